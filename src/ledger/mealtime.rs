use serde::Serialize;
use time::OffsetDateTime;

/// Meal-of-day bucket, derived from the hour a meal was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MealTime {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealTime {
    pub fn for_timestamp(ts: OffsetDateTime) -> Self {
        Self::from_hour(ts.hour())
    }

    fn from_hour(hour: u8) -> Self {
        match hour {
            0..=9 => Self::Breakfast,
            10..=13 => Self::Lunch,
            14..=17 => Self::Snack,
            _ => Self::Dinner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_boundaries() {
        let table = [
            (0, MealTime::Breakfast),
            (9, MealTime::Breakfast),
            (10, MealTime::Lunch),
            (13, MealTime::Lunch),
            (14, MealTime::Snack),
            (17, MealTime::Snack),
            (18, MealTime::Dinner),
            (23, MealTime::Dinner),
        ];
        for (hour, expected) in table {
            assert_eq!(MealTime::from_hour(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn derived_from_timestamp_hour() {
        use time::macros::datetime;
        assert_eq!(
            MealTime::for_timestamp(datetime!(2026-08-24 08:30 UTC)),
            MealTime::Breakfast
        );
        assert_eq!(
            MealTime::for_timestamp(datetime!(2026-08-24 19:05 UTC)),
            MealTime::Dinner
        );
    }
}
