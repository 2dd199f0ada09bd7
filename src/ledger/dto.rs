use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::mealtime::MealTime;
use crate::recognition::catalog::MacroQuantities;

#[derive(Debug, Serialize)]
pub struct LoggedMealResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct MealListItem {
    pub id: Uuid,
    pub food: String,
    pub confidence: f32,
    pub nutrition: MacroQuantities,
    pub meal_time: MealTime,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: bool,
}

#[derive(Debug, Deserialize)]
pub struct TotalsQuery {
    /// UTC calendar date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
}
