//! User preferences recorded by the setup flow.
//!
//! Autopay falls back to the rent and payroll preferences when a request
//! carries no amount, and the checking account opens with the preferred
//! balance.

use crate::MoneyCents;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Prefs {
    /// Monthly rent, as entered.
    pub rent: Option<f64>,
    /// Payroll deposit, as entered.
    pub payroll: Option<f64>,
    /// Opening balance of the checking account.
    pub checking: Option<MoneyCents>,
}

impl Prefs {
    /// Amount an autopay flow runs with: the requested amount, else the
    /// preference, else `default`. Non-positive values count as unset.
    pub(crate) fn autopay_amount(requested: Option<f64>, pref: Option<f64>, default: f64) -> f64 {
        requested
            .filter(|amount| *amount > 0.0)
            .or(pref)
            .unwrap_or(default)
    }
}

/// Validate a rent or payroll preference. Non-positive amounts clear it.
pub(crate) fn autopay_pref(amount: f64) -> crate::ResultEngine<Option<f64>> {
    MoneyCents::from_f64_rounded(amount)?;
    Ok((amount > 0.0).then_some(amount))
}
