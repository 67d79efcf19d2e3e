use std::{
    fmt,
    ops::{Add, Neg, Sub},
};

use crate::{EngineError, ResultEngine};

/// Largest magnitude accepted from JSON input, in whole units.
///
/// Keeps `value * 100` well inside the range where `f64 -> i64` conversion is
/// exact and balances cannot be pushed near `i64::MAX` by a single request.
const MAX_INPUT_UNITS: f64 = 1e13;

/// Rounds `value` to `places` decimals.
///
/// The value is scaled, shifted by one half and truncated toward zero by the
/// integer conversion, then scaled back. For positive inputs this is
/// round-half-up; for negative inputs the truncation moves the result toward
/// zero (`round(-2.5, 0) == -2.0`, `round(-1.234, 2) == -1.22`). Callers rely
/// on this exact behavior, so it must not be replaced with `f64::round`.
///
/// ```rust
/// use engine::round;
///
/// assert_eq!(round(50.005, 2), 50.01);
/// assert_eq!(round(-2.5, 0), -2.0);
/// ```
#[must_use]
pub fn round(value: f64, places: u32) -> f64 {
    let pow = scale(places);
    ((value * pow + 0.5) as i64) as f64 / pow
}

fn scale(places: u32) -> f64 {
    let mut pow = 1.0;
    for _ in 0..places {
        pow *= 10.0;
    }
    pow
}

fn check_input(value: f64) -> ResultEngine<()> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount(
            "amount must be a finite number".to_string(),
        ));
    }
    if value.abs() > MAX_INPUT_UNITS {
        return Err(EngineError::InvalidAmount("amount too large".to_string()));
    }
    Ok(())
}

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (balances,
/// transaction, expense and alert amounts) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = credit
/// - negative = debit
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "$12.34");
/// ```
///
/// Converting from a JSON number applies [`round`] with two places:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!(MoneyCents::from_f64_rounded(50.005).unwrap().cents(), 5001);
/// assert!(MoneyCents::from_f64_rounded(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new amount from whole units (dollars).
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Converts a decimal amount into cents using the two-place [`round`]
    /// formula.
    ///
    /// This is the conversion for amounts that move balances.
    pub fn from_f64_rounded(value: f64) -> ResultEngine<Self> {
        check_input(value)?;
        Ok(Self((value * scale(2) + 0.5) as i64))
    }

    /// Converts a decimal amount into the nearest cent, ties away from zero.
    ///
    /// Used for informational figures (alert amount and balance) that are
    /// recorded as given and never applied to an account.
    pub fn from_f64_nearest(value: f64) -> ResultEngine<Self> {
        check_input(value)?;
        Ok(Self((value * scale(2)).round() as i64))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal number, as rendered in JSON.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}${dollars}.{cents:02}")
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}
