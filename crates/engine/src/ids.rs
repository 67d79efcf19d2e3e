//! Identifier generation for stored entities.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

pub const TRANSACTION_PREFIX: &str = "txn";
pub const EXPENSE_PREFIX: &str = "exp";
pub const ALERT_PREFIX: &str = "alt";

/// Generates `prefix_<decimal>` ids.
///
/// The decimal part starts at the wall-clock nanosecond timestamp taken when
/// the generator is created and is advanced atomically on every call, so ids
/// look like the timestamps clients already know but can never repeat inside
/// one process, no matter how fast they are requested.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let seed = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .unwrap_or_default();
        Self::starting_at(seed)
    }

    /// Generator whose first id uses `seed` as its decimal part.
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}_{value}")
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_have_prefix_and_decimal_suffix() {
        let ids = IdGenerator::starting_at(42);
        assert_eq!(ids.next_id(TRANSACTION_PREFIX), "txn_42");
        assert_eq!(ids.next_id(EXPENSE_PREFIX), "exp_43");
    }

    #[test]
    fn thousand_rapid_ids_are_distinct() {
        let ids = IdGenerator::new();
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id(ALERT_PREFIX)).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn ids_are_distinct_across_threads() {
        let ids = IdGenerator::new();
        let generated: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| (0..250).map(|_| ids.next_id("txn")).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });
        let unique: HashSet<&String> = generated.iter().collect();
        assert_eq!(unique.len(), 1000);
    }
}
