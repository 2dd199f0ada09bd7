use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use time::{macros::format_description, Date, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{LoggedMealResponse, MealListItem, RemovedResponse, TotalsQuery};
use super::mealtime::MealTime;
use super::repo::DailyTotals;
use crate::recognition::dto::NutritionRecord;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(log_meal))
        .route("/meals/totals", get(daily_totals))
        .route("/meals/:id", delete(remove_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> Json<Vec<MealListItem>> {
    let ledger = state.ledger.read().await;
    let items = ledger
        .entries()
        .iter()
        .map(|e| MealListItem {
            id: e.id,
            food: e.record.food.clone(),
            confidence: e.record.confidence,
            nutrition: e.record.nutrition,
            meal_time: MealTime::for_timestamp(e.logged_at),
            logged_at: e.logged_at,
        })
        .collect();
    Json(items)
}

/// POST /meals — log the analysis result the client is holding.
#[instrument(skip(state, body))]
pub async fn log_meal(
    State(state): State<AppState>,
    Json(body): Json<NutritionRecord>,
) -> Result<(StatusCode, HeaderMap, Json<LoggedMealResponse>), (StatusCode, String)> {
    validate_record(&body)?;

    let mut ledger = state.ledger.write().await;
    let id = ledger.add(body);
    let logged_at = ledger
        .entries()
        .first()
        .map(|e| e.logged_at)
        .unwrap_or_else(OffsetDateTime::now_utc);

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/meals/{}", id).parse().map_err(internal)?,
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(LoggedMealResponse { id, logged_at }),
    ))
}

#[instrument(skip(state))]
pub async fn remove_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<RemovedResponse> {
    let removed = state.ledger.write().await.remove(id);
    Json(RemovedResponse { removed })
}

#[instrument(skip(state))]
pub async fn daily_totals(
    State(state): State<AppState>,
    Query(q): Query<TotalsQuery>,
) -> Result<Json<DailyTotals>, (StatusCode, String)> {
    let date = match q.date {
        Some(raw) => parse_date(&raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let totals = state.ledger.read().await.daily_totals(date);
    Ok(Json(totals))
}

fn parse_date(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| (StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD".into()))
}

fn validate_record(record: &NutritionRecord) -> Result<(), (StatusCode, String)> {
    if !(0.0..=1.0).contains(&record.confidence) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "confidence must be within [0, 1]".into(),
        ));
    }
    let n = &record.nutrition;
    if n.protein < 0.0 || n.carbs < 0.0 || n.fats < 0.0 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "macro quantities must be non-negative".into(),
        ));
    }
    Ok(())
}

fn internal<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
