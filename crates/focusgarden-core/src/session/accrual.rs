//! Garden and stat accrual.
//!
//! Pure functions mapping one completed or abandoned session into a
//! garden plant and a daily stat update. Inputs are never mutated;
//! callers persist the returned list (in the same transaction as the
//! session write, see `Database::commit_transition`).

use crate::model::{CycleStat, GardenPlant, PlantKind, PlantStatus};

/// Stats with today's `completed` incremented by one; appends a fresh
/// record if no record for `today` exists yet.
pub fn record_completion(today: &str, stats: &[CycleStat]) -> Vec<CycleStat> {
    bump(today, stats, |s| s.completed += 1)
}

/// Stats with today's `interrupted` incremented by one.
pub fn record_interruption(today: &str, stats: &[CycleStat]) -> Vec<CycleStat> {
    bump(today, stats, |s| s.interrupted += 1)
}

fn bump(today: &str, stats: &[CycleStat], apply: impl Fn(&mut CycleStat)) -> Vec<CycleStat> {
    let mut out = stats.to_vec();
    match out.iter_mut().find(|s| s.date == today) {
        Some(existing) => apply(existing),
        None => {
            let mut fresh = CycleStat::new(today);
            apply(&mut fresh);
            out.push(fresh);
        }
    }
    out
}

/// A new sapling for `today` with a time-based id.
pub fn plant_for(now_ms: i64, today: &str, status: PlantStatus) -> GardenPlant {
    GardenPlant {
        id: now_ms,
        kind: PlantKind::Sapling,
        date: today.to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn completion_appends_fresh_record() {
        let stats = record_completion("2026-08-06", &[]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].date, "2026-08-06");
        assert_eq!(stats[0].completed, 1);
        assert_eq!(stats[0].interrupted, 0);
        assert!(stats[0].emergency_access.is_empty());
    }

    #[test]
    fn completion_increments_existing_record() {
        let mut existing = CycleStat::new("2026-08-06");
        existing.completed = 3;
        existing.interrupted = 1;
        existing.emergency_access.insert("twitter.com".into(), 2);

        let stats = record_completion("2026-08-06", &[existing.clone()]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].completed, 4);
        assert_eq!(stats[0].interrupted, 1);
        assert_eq!(stats[0].emergency_access.get("twitter.com"), Some(&2));
    }

    #[test]
    fn interruption_is_symmetric() {
        let stats = record_interruption("2026-08-06", &[]);
        assert_eq!(stats[0].completed, 0);
        assert_eq!(stats[0].interrupted, 1);
    }

    #[test]
    fn other_days_are_untouched() {
        let yesterday = CycleStat::new("2026-08-05");
        let stats = record_completion("2026-08-06", &[yesterday.clone()]);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0], yesterday);
    }

    #[test]
    fn inputs_are_never_mutated() {
        let input = vec![CycleStat::new("2026-08-06")];
        let before = input.clone();
        let _ = record_completion("2026-08-06", &input);
        let _ = record_interruption("2026-08-06", &input);
        assert_eq!(input, before);
    }

    #[test]
    fn plant_carries_date_and_status() {
        let p = plant_for(1_700_000_000_000, "2026-08-06", PlantStatus::Withered);
        assert_eq!(p.id, 1_700_000_000_000);
        assert_eq!(p.kind, PlantKind::Sapling);
        assert_eq!(p.date, "2026-08-06");
        assert_eq!(p.status, PlantStatus::Withered);
    }

    proptest! {
        /// Repeated application accumulates by exactly the call count.
        #[test]
        fn repeated_completion_accumulates_exactly(n in 1usize..20, seed in 0u32..100) {
            let mut existing = CycleStat::new("2026-08-06");
            existing.completed = seed;

            let mut stats = vec![existing];
            for _ in 0..n {
                stats = record_completion("2026-08-06", &stats);
            }
            prop_assert_eq!(stats.len(), 1);
            prop_assert_eq!(stats[0].completed, seed + n as u32);
            prop_assert_eq!(stats[0].interrupted, 0);
        }

        /// Accrual never changes the number of records for other dates.
        #[test]
        fn accrual_preserves_other_dates(days in proptest::collection::vec("[0-9]{4}-[0-9]{2}-[0-9]{2}", 0..5)) {
            let stats: Vec<CycleStat> = days.iter().map(CycleStat::new).collect();
            let out = record_interruption("2099-01-01", &stats);
            for day in days.iter().filter(|d| d.as_str() != "2099-01-01") {
                let before = stats.iter().filter(|s| &s.date == day).count();
                let after = out.iter().filter(|s| &s.date == day).count();
                prop_assert_eq!(before, after);
            }
        }
    }
}
