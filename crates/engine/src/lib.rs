//! In-memory state of the mock bank.
//!
//! [`Store`] owns the accounts, transactions, alerts, expenses and the
//! category set, and exposes every read and derived write as one atomic
//! operation.

pub use accounts::{Account, CHECKING_ID, SAVINGS_ID};
pub use alerts::Alert;
pub use categories::{CategorySet, DEFAULT_CATEGORIES};
pub use commands::{AlertCmd, AutopayCmd, ExpenseCmd};
pub use error::EngineError;
pub use expenses::Expense;
pub use ids::IdGenerator;
pub use money::{MoneyCents, round};
pub use prefs::Prefs;
pub use store::{Store, parse_date, today};
pub use transactions::Transaction;
pub use watcher::AlertWatcher;

mod accounts;
mod alerts;
mod categories;
mod commands;
mod error;
mod expenses;
mod ids;
mod money;
mod prefs;
mod store;
mod tables;
mod transactions;
mod watcher;

type ResultEngine<T> = Result<T, EngineError>;
