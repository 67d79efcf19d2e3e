//! The shared in-memory store.
//!
//! One [`RwLock`] guards every table and the category set. Reads take the
//! lock in shared mode; every operation that inserts, moves a balance or
//! seeds defaults holds the exclusive lock for its whole duration, so callers
//! never observe a transaction without its balance effect or an expense
//! without its paired transaction.
//!
//! Input is validated before anything is written: a rejected request never
//! leaves partial state behind.

use chrono::{Local, NaiveDate, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::{
    Account, Alert, AlertCmd, AutopayCmd, EngineError, Expense, ExpenseCmd, IdGenerator,
    MoneyCents, ResultEngine, Transaction,
    accounts::CHECKING_ID,
    alerts::{PAYROLL_POSTED, RENT_PAID},
    categories::{self, CategorySet, normalize_category},
    ids::{ALERT_PREFIX, EXPENSE_PREFIX, TRANSACTION_PREFIX},
    prefs::{Prefs, autopay_pref},
    tables::Table,
};

const RENT_NAME: &str = "RENT";
const PAYROLL_NAME: &str = "PAYROLL";
const OPENING_ADJUSTMENT_NAME: &str = "OPENING BALANCE ADJUSTMENT";
const DEFAULT_RENT: f64 = 1200.0;
const DEFAULT_PAYROLL: f64 = 1500.0;

/// Everything guarded by the store lock.
#[derive(Debug, Default)]
struct Ledger {
    connected: bool,
    accounts: Table<Account>,
    transactions: Table<Transaction>,
    alerts: Table<Alert>,
    expenses: Table<Expense>,
    categories: CategorySet,
    prefs: Prefs,
}

impl Ledger {
    fn ensure_checking(&mut self) {
        if !self.accounts.contains(CHECKING_ID) {
            tracing::debug!("opening default checking account");
            self.accounts.insert(self.opening_checking());
        }
    }

    fn opening_checking(&self) -> Account {
        self.prefs
            .checking
            .map_or_else(Account::checking, Account::checking_with)
    }

    fn ensure_default_categories(&mut self) {
        if self.categories.ensure_defaults() {
            tracing::debug!("seeded default categories");
        }
    }

    fn checking_balance(&self) -> MoneyCents {
        self.accounts
            .get(CHECKING_ID)
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    /// Store a transaction and apply it to its account.
    ///
    /// Every balance change in the store goes through here. An unknown
    /// account keeps the transaction but leaves all balances untouched.
    fn add_transaction(
        &mut self,
        ids: &IdGenerator,
        account_id: &str,
        name: &str,
        amount: MoneyCents,
        date: NaiveDate,
        category: Option<&str>,
    ) -> ResultEngine<Transaction> {
        let new_balance = match self.accounts.get(account_id) {
            Some(account) => Some(
                account
                    .balance
                    .checked_add(amount)
                    .ok_or_else(|| EngineError::BalanceOverflow(account_id.to_string()))?,
            ),
            None => {
                tracing::warn!(
                    account_id,
                    "transaction recorded against unknown account, balance not updated"
                );
                None
            }
        };

        let txn = Transaction {
            id: ids.next_id(TRANSACTION_PREFIX),
            account_id: account_id.to_string(),
            name: name.to_string(),
            amount,
            date,
            category: category
                .filter(|category| !category.is_empty())
                .map(ToString::to_string),
        };
        self.transactions.insert(txn.clone());

        if let (Some(balance), Some(account)) = (new_balance, self.accounts.get_mut(account_id)) {
            account.balance = balance;
        }

        tracing::debug!(txn_id = %txn.id, account_id, amount = %amount, "transaction applied");
        Ok(txn)
    }

    #[allow(clippy::too_many_arguments)]
    fn add_alert(
        &mut self,
        ids: &IdGenerator,
        kind: &str,
        message: &str,
        severity: &str,
        amount: MoneyCents,
        balance: MoneyCents,
        txn_id: Option<&str>,
    ) -> Alert {
        let alert = Alert {
            id: ids.next_id(ALERT_PREFIX),
            txn_id: txn_id.map(ToString::to_string),
            kind: kind.to_string(),
            message: message.to_string(),
            severity: severity.to_string(),
            amount,
            balance,
            created_at: Utc::now(),
        };
        self.alerts.insert(alert.clone());
        tracing::debug!(alert_id = %alert.id, kind, "alert stored");
        alert
    }
}

/// Process-wide state of the mock bank.
///
/// Construct one with [`Store::new`] and share it (e.g. behind an `Arc`)
/// with every caller.
#[derive(Debug, Default)]
pub struct Store {
    ids: IdGenerator,
    state: RwLock<Ledger>,
}

impl Store {
    /// Empty store: no accounts, no categories, not connected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store drawing its ids from `ids`.
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            ids,
            state: RwLock::new(Ledger::default()),
        }
    }

    /// Drop all state and go back to a fresh, disconnected store.
    ///
    /// The id generator is not rewound, so ids handed out before the reset
    /// are never reused.
    pub fn reset(&self) {
        *self.state.write() = Ledger::default();
        tracing::info!("store reset");
    }

    /// Mock account linking.
    ///
    /// Marks the store connected, opens the default checking and savings
    /// accounts when no account exists yet and seeds the categories. Calling
    /// it again is harmless.
    pub fn connect(&self) {
        let mut state = self.state.write();
        state.connected = true;
        if state.accounts.is_empty() {
            let checking = state.opening_checking();
            state.accounts.insert(checking);
            state.accounts.insert(Account::savings());
            tracing::info!("default accounts linked");
        }
        state.ensure_default_categories();
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    /// All categories, seeding the defaults first when the set is empty.
    pub fn list_categories(&self) -> Vec<String> {
        let state = self.state.upgradable_read();
        if !state.categories.is_empty() {
            return state.categories.list();
        }
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.ensure_default_categories();
        state.categories.list()
    }

    /// Add a category and return the stored (trimmed) label.
    pub fn add_category(&self, name: &str) -> ResultEngine<String> {
        let name = normalize_category(name)?;
        let mut state = self.state.write();
        state.ensure_default_categories();
        state.categories.add(&name)
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.read().accounts.snapshot()
    }

    pub fn account(&self, id: &str) -> Option<Account> {
        self.state.read().accounts.get(id).cloned()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read().transactions.snapshot()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.read().alerts.snapshot()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.state.read().expenses.snapshot()
    }

    /// Store a transaction and apply `amount` to the account balance.
    ///
    /// Unlike the expense and autopay flows, this does not open a missing
    /// account: the transaction is stored and no balance changes.
    pub fn add_transaction(
        &self,
        account_id: &str,
        name: &str,
        amount: MoneyCents,
        date: NaiveDate,
        category: Option<&str>,
    ) -> ResultEngine<Transaction> {
        self.state
            .write()
            .add_transaction(&self.ids, account_id, name, amount, date, category)
    }

    /// Store an alert with a generated id and timestamp.
    pub fn add_alert(
        &self,
        kind: &str,
        message: &str,
        severity: &str,
        amount: MoneyCents,
        balance: MoneyCents,
        txn_id: Option<&str>,
    ) -> Alert {
        self.state
            .write()
            .add_alert(&self.ids, kind, message, severity, amount, balance, txn_id)
    }

    /// Store a client supplied alert, filling in id and timestamp when
    /// missing.
    pub fn create_alert(&self, cmd: AlertCmd) -> ResultEngine<Alert> {
        let amount = MoneyCents::from_f64_nearest(cmd.amount)?;
        let balance = MoneyCents::from_f64_nearest(cmd.balance)?;
        let id = cmd
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.ids.next_id(ALERT_PREFIX));
        let alert = Alert {
            id,
            txn_id: cmd.txn_id.filter(|txn_id| !txn_id.is_empty()),
            kind: cmd.kind,
            message: cmd.message,
            severity: cmd.severity,
            amount,
            balance,
            created_at: cmd.created_at.unwrap_or_else(Utc::now),
        };

        self.state.write().alerts.insert(alert.clone());
        tracing::debug!(alert_id = %alert.id, kind = %alert.kind, "alert created");
        Ok(alert)
    }

    /// Record an expense and debit the checking account by the same amount.
    pub fn record_expense(&self, cmd: ExpenseCmd) -> ResultEngine<(Expense, Transaction)> {
        if cmd.name.is_empty() {
            return Err(EngineError::InvalidName(
                "expense name must not be empty".to_string(),
            ));
        }
        let category = normalize_category(&cmd.category)?;
        if !(cmd.amount > 0.0) {
            return Err(EngineError::InvalidAmount(
                "expense amount must be > 0".to_string(),
            ));
        }
        let amount = MoneyCents::from_f64_rounded(cmd.amount)?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "expense amount rounds to zero".to_string(),
            ));
        }
        if cmd.date.is_empty() {
            return Err(EngineError::InvalidDate(
                "expense date must not be empty".to_string(),
            ));
        }
        let date = parse_date(&cmd.date)?;

        let mut state = self.state.write();
        state.ensure_checking();
        state.ensure_default_categories();

        let expense = Expense {
            id: self.ids.next_id(EXPENSE_PREFIX),
            name: cmd.name,
            category,
            amount,
            date,
        };
        let txn = state.add_transaction(
            &self.ids,
            CHECKING_ID,
            &expense.name,
            -amount,
            date,
            Some(&expense.category),
        )?;
        state.expenses.insert(expense.clone());
        state.categories.add(&expense.category)?;

        tracing::info!(expense_id = %expense.id, txn_id = %txn.id, amount = %amount, "expense recorded");
        Ok((expense, txn))
    }

    /// Autopay rent: expense, debit on checking and a `rent_paid` alert.
    ///
    /// Amount falls back to the rent preference, then 1200. Dated today
    /// unless a date is given.
    pub fn pay_rent(&self, cmd: AutopayCmd) -> ResultEngine<(Expense, Transaction, Alert)> {
        let date = autopay_date(&cmd)?;

        let mut state = self.state.write();
        let raw = Prefs::autopay_amount(cmd.amount, state.prefs.rent, DEFAULT_RENT);
        let amount = MoneyCents::from_f64_rounded(raw)?;
        state.ensure_checking();
        state.ensure_default_categories();

        let expense = Expense {
            id: self.ids.next_id(EXPENSE_PREFIX),
            name: RENT_NAME.to_string(),
            category: categories::RENT.to_string(),
            amount,
            date,
        };
        let txn = state.add_transaction(
            &self.ids,
            CHECKING_ID,
            RENT_NAME,
            -amount,
            date,
            Some(categories::RENT),
        )?;
        state.expenses.insert(expense.clone());
        let balance = state.checking_balance();
        let alert = state.add_alert(
            &self.ids,
            RENT_PAID,
            &format!("Rent paid (-${raw:.0})."),
            "medium",
            txn.amount,
            balance,
            Some(&txn.id),
        );

        tracing::info!(txn_id = %txn.id, balance = %balance, "rent paid");
        Ok((expense, txn, alert))
    }

    /// Autopay payroll: credit on checking and a `payroll_posted` alert.
    ///
    /// Amount falls back to the payroll preference, then 1500. Dated today
    /// unless a date is given.
    pub fn post_payroll(&self, cmd: AutopayCmd) -> ResultEngine<(Transaction, Alert)> {
        let date = autopay_date(&cmd)?;

        let mut state = self.state.write();
        let raw = Prefs::autopay_amount(cmd.amount, state.prefs.payroll, DEFAULT_PAYROLL);
        let amount = MoneyCents::from_f64_rounded(raw)?;
        state.ensure_checking();
        state.ensure_default_categories();

        let txn = state.add_transaction(
            &self.ids,
            CHECKING_ID,
            PAYROLL_NAME,
            amount,
            date,
            Some(categories::INCOME),
        )?;
        let balance = state.checking_balance();
        let alert = state.add_alert(
            &self.ids,
            PAYROLL_POSTED,
            &format!("Payroll deposited (+${raw:.0})."),
            "low",
            txn.amount,
            balance,
            Some(&txn.id),
        );

        tracing::info!(txn_id = %txn.id, balance = %balance, "payroll posted");
        Ok((txn, alert))
    }

    pub fn prefs(&self) -> Prefs {
        self.state.read().prefs
    }

    /// Set the rent used by autopay when a request has no amount.
    ///
    /// A non-positive amount clears the preference.
    pub fn set_rent_pref(&self, amount: f64) -> ResultEngine<Option<f64>> {
        let rent = autopay_pref(amount)?;
        self.state.write().prefs.rent = rent;
        tracing::info!(?rent, "rent preference updated");
        Ok(rent)
    }

    /// Set the payroll used by autopay when a request has no amount.
    ///
    /// A non-positive amount clears the preference.
    pub fn set_payroll_pref(&self, amount: f64) -> ResultEngine<Option<f64>> {
        let payroll = autopay_pref(amount)?;
        self.state.write().prefs.payroll = payroll;
        tracing::info!(?payroll, "payroll preference updated");
        Ok(payroll)
    }

    /// Set the opening balance of the checking account.
    ///
    /// A missing checking account is opened with `balance`. An existing one
    /// is brought to `balance` by an adjustment transaction dated today.
    pub fn setup_checking(&self, balance: f64) -> ResultEngine<MoneyCents> {
        let opening = MoneyCents::from_f64_rounded(balance)?;

        let mut state = self.state.write();
        let current = state.accounts.get(CHECKING_ID).map(|account| account.balance);
        match current {
            None => state.accounts.insert(Account::checking_with(opening)),
            Some(current) => {
                let delta = opening
                    .checked_sub(current)
                    .ok_or_else(|| EngineError::BalanceOverflow(CHECKING_ID.to_string()))?;
                if delta != MoneyCents::ZERO {
                    state.add_transaction(
                        &self.ids,
                        CHECKING_ID,
                        OPENING_ADJUSTMENT_NAME,
                        delta,
                        today(),
                        None,
                    )?;
                }
            }
        }
        state.prefs.checking = Some(opening);

        tracing::info!(balance = %opening, "checking balance set");
        Ok(state.checking_balance())
    }
}

/// Today's calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(format!("expected YYYY-MM-DD, got \"{value}\"")))
}

/// Date of an autopay request, today when unset or empty.
fn autopay_date(cmd: &AutopayCmd) -> ResultEngine<NaiveDate> {
    match cmd.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => parse_date(date),
        _ => Ok(today()),
    }
}
