use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::recognition::dto::NutritionRecord;

#[derive(Debug, Clone)]
pub struct MealEntry {
    pub id: Uuid,
    /// Time of logging, not of photo capture.
    pub logged_at: OffsetDateTime,
    pub record: NutritionRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DailyTotals {
    pub calories: u64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub count: usize,
}

impl DailyTotals {
    pub const ZERO: Self = Self {
        calories: 0,
        protein: 0.0,
        carbs: 0.0,
        fats: 0.0,
        count: 0,
    };
}

/// Append-only in-memory meal log, newest first. Entries leave only through
/// explicit removal by id.
#[derive(Debug, Default)]
pub struct MealLedger {
    entries: Vec<MealEntry>,
}

impl MealLedger {
    pub fn add(&mut self, record: NutritionRecord) -> Uuid {
        let entry = MealEntry {
            id: Uuid::new_v4(),
            logged_at: OffsetDateTime::now_utc(),
            record,
        };
        let id = entry.id;
        self.entries.insert(0, entry);
        id
    }

    /// Idempotent delete: reports whether an entry was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    /// Totals for all entries logged on the given UTC calendar date.
    /// Recomputed from the full ledger on every call, never cached.
    pub fn daily_totals(&self, date: Date) -> DailyTotals {
        self.entries
            .iter()
            .filter(|e| e.logged_at.date() == date)
            .fold(DailyTotals::ZERO, |totals, e| DailyTotals {
                calories: totals.calories + u64::from(e.record.nutrition.calories),
                protein: totals.protein + e.record.nutrition.protein,
                carbs: totals.carbs + e.record.nutrition.carbs,
                fats: totals.fats + e.record.nutrition.fats,
                count: totals.count + 1,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::catalog;

    fn record(key: &str) -> NutritionRecord {
        NutritionRecord {
            food: key.to_string(),
            confidence: 0.8,
            nutrition: catalog::lookup(key),
        }
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut ledger = MealLedger::default();
        ledger.add(record("apple"));
        ledger.add(record("pizza"));

        let foods: Vec<_> = ledger.entries().iter().map(|e| e.record.food.as_str()).collect();
        assert_eq!(foods, vec!["pizza", "apple"]);
    }

    #[test]
    fn ids_are_unique() {
        let mut ledger = MealLedger::default();
        let a = ledger.add(record("apple"));
        let b = ledger.add(record("apple"));
        assert_ne!(a, b);
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut ledger = MealLedger::default();
        ledger.add(record("salad"));
        let before: Vec<Uuid> = ledger.entries().iter().map(|e| e.id).collect();

        let id = ledger.add(record("burger"));
        assert!(ledger.remove(id));

        let after: Vec<Uuid> = ledger.entries().iter().map(|e| e.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let mut ledger = MealLedger::default();
        ledger.add(record("rice"));
        assert!(!ledger.remove(Uuid::new_v4()));
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn totals_over_empty_day_are_zero() {
        let ledger = MealLedger::default();
        let totals = ledger.daily_totals(OffsetDateTime::now_utc().date());
        assert_eq!(totals, DailyTotals::ZERO);
    }

    #[test]
    fn totals_sum_fieldwise_over_todays_entries() {
        let mut ledger = MealLedger::default();
        ledger.add(record("apple")); // 52 / 0.3 / 14 / 0.2
        ledger.add(record("egg")); // 155 / 13 / 1.1 / 11

        let totals = ledger.daily_totals(OffsetDateTime::now_utc().date());
        assert_eq!(totals.calories, 207);
        assert!((totals.protein - 13.3).abs() < 1e-9);
        assert!((totals.carbs - 15.1).abs() < 1e-9);
        assert!((totals.fats - 11.2).abs() < 1e-9);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn totals_ignore_other_dates() {
        let mut ledger = MealLedger::default();
        ledger.add(record("pasta"));

        let yesterday = OffsetDateTime::now_utc().date().previous_day().unwrap();
        assert_eq!(ledger.daily_totals(yesterday), DailyTotals::ZERO);
    }
}
