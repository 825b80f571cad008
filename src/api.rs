use axum::{
    Extension, Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::calendar::{
    Lookup, Navigation, format_date, locate, navigation, parse_date_param, parse_week_commencing,
    target_date,
};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::meal_time::{MealPeriod, current_period, serving_hours};
use crate::schedule::{DayName, Schedule};
use crate::source::load_schedule;

/// The parsed menu and the date its first week starts on. Read-only once
/// the server is up.
#[derive(Debug, Clone)]
pub struct AppState {
    pub schedule: Schedule,
    pub start_date: NaiveDate,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Loads the configured menu. Without a configured start date, the
    /// "Week Commencing" line printed in the menu is used instead.
    pub fn load(menu: &MenuConfig) -> Result<Self, MenuError> {
        let (text, schedule) = load_schedule(&menu.path)?;
        let start_date = menu
            .start_date
            .or_else(|| parse_week_commencing(&text))
            .ok_or_else(|| {
                MenuError::Config(
                    "no menu start_date configured and none printed in the menu".to_string(),
                )
            })?;
        info!(start = %format_date(start_date), "menu start date");
        Ok(Self {
            schedule,
            start_date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MealQuery {
    /// Defaults to today.
    pub date: Option<String>,
    /// Days to move from `date`, negative for the past.
    pub offset: Option<i64>,
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub date: String,
    pub period: MealPeriod,
    pub meal: String,
}

#[derive(Debug, Serialize)]
pub struct MealEntry {
    pub period: MealPeriod,
    pub hours: String,
    pub items: String,
    pub now_serving: bool,
}

/// Everything shown for one day: the three meals, which one is on now, and
/// whether the neighbouring days are inside the menu.
#[derive(Debug, Serialize)]
pub struct MealCard {
    pub date: String,
    pub week: usize,
    pub day: DayName,
    pub current_period: MealPeriod,
    pub meals: Vec<MealEntry>,
    pub navigation: Navigation,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MealReply {
    Card(MealCard),
    Single(MealResponse),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Answers a meal query against `state` as of `now`.
pub fn resolve_meal(
    state: &AppState,
    query: &MealQuery,
    now: NaiveDateTime,
) -> Result<MealReply, ApiError> {
    let base = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_date_param(raw)?,
        None => now.date(),
    };
    let date = target_date(base, query.offset.unwrap_or(0))
        .ok_or_else(|| ApiError::BadRequest("offset out of range".to_string()))?;

    let period = query
        .period
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.parse::<MealPeriod>())
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let (week, diff_days, day) = match locate(&state.schedule, state.start_date, date) {
        Lookup::Found {
            week_number,
            diff_days,
            day,
        } => (week_number, diff_days, day),
        Lookup::OutOfRange { diff_days } => {
            debug!(diff_days, "date outside menu range");
            return Err(ApiError::NotFound(format!(
                "{} is outside the menu range",
                format_date(date)
            )));
        }
        Lookup::Missing { week_number, day } => {
            return Err(ApiError::NotFound(format!(
                "No menu data for {day} of week {week_number}"
            )));
        }
    };

    let weekday = date.weekday();
    let serving = if now.date() == date {
        current_period(weekday, now.time())
    } else {
        MealPeriod::None
    };

    match period {
        Some(MealPeriod::None) => Err(ApiError::BadRequest(
            "period must be breakfast, lunch or dinner".to_string(),
        )),
        Some(period) => Ok(MealReply::Single(MealResponse {
            date: format_date(date),
            period,
            meal: day.meal(period).unwrap_or_default().to_string(),
        })),
        None => {
            let meals = MealPeriod::SERVED
                .into_iter()
                .map(|period| MealEntry {
                    period,
                    hours: serving_hours(period, weekday).unwrap_or_default(),
                    items: day.meal(period).unwrap_or_default().to_string(),
                    now_serving: serving == period,
                })
                .collect();
            Ok(MealReply::Card(MealCard {
                date: format_date(date),
                week,
                day: day.name,
                current_period: serving,
                meals,
                navigation: navigation(diff_days, state.schedule.total_days()),
            }))
        }
    }
}

pub async fn get_meal(
    Query(params): Query<MealQuery>,
    Extension(state): Extension<SharedState>,
) -> impl IntoResponse {
    let now = Local::now().naive_local();
    match resolve_meal(&state, &params, now) {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_menu(Extension(state): Extension<SharedState>) -> impl IntoResponse {
    Json(state.schedule.clone())
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/menu", get(get_menu))
        .route("/meal", get(get_meal))
        .layer(Extension(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_schedule;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    const MENU: &str = "Week 1 Monday Breakfast* Veg Pulao + Chicken Karahi + Salad \
        Tuesday Breakfast Tea Toast Jam Butter Wednesday Breakfast Roti Haleem Thursday \
        Sunday Breakfast Pasta Salad Dinner Chicken Karahi";

    fn state() -> AppState {
        AppState {
            schedule: parse_schedule(MENU),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn query(date: Option<&str>, offset: Option<i64>, period: Option<&str>) -> MealQuery {
        MealQuery {
            date: date.map(str::to_string),
            offset,
            period: period.map(str::to_string),
        }
    }

    #[test]
    fn card_marks_the_meal_being_served() {
        let reply = resolve_meal(&state(), &query(None, None, None), at(2026, 1, 26, 13, 30)).unwrap();
        let MealReply::Card(card) = reply else {
            panic!("expected a card");
        };
        assert_eq!(card.date, "2026-01-26");
        assert_eq!(card.week, 1);
        assert_eq!(card.day, DayName::Monday);
        assert_eq!(card.current_period, MealPeriod::Lunch);
        assert_eq!(card.meals.len(), 3);
        assert_eq!(card.meals[1].items, "Veg Pulao");
        assert!(card.meals[1].now_serving);
        assert!(!card.meals[2].now_serving);
        assert_eq!(card.meals[2].items, "Chicken Karahi + Salad");
        assert!(!card.navigation.has_previous);
        assert!(card.navigation.has_next);
    }

    #[test]
    fn other_days_are_never_serving() {
        let reply = resolve_meal(
            &state(),
            &query(None, Some(1), None),
            at(2026, 1, 26, 13, 30),
        )
        .unwrap();
        let MealReply::Card(card) = reply else {
            panic!("expected a card");
        };
        assert_eq!(card.day, DayName::Tuesday);
        assert_eq!(card.current_period, MealPeriod::None);
        assert!(card.meals.iter().all(|m| !m.now_serving));
    }

    #[test]
    fn sunday_card_uses_sunday_breakfast() {
        let reply = resolve_meal(
            &state(),
            &query(Some("2026-02-01"), None, None),
            at(2026, 2, 1, 10, 30),
        )
        .unwrap();
        let MealReply::Card(card) = reply else {
            panic!("expected a card");
        };
        assert_eq!(card.day, DayName::Sunday);
        assert_eq!(card.current_period, MealPeriod::Breakfast);
        assert_eq!(card.meals[0].hours, "10:00 AM - 11:15 AM");
        assert!(card.meals[0].items.starts_with("Special Breakfast"));
        assert_eq!(card.meals[2].items, "Chicken Karahi");
        assert!(!card.navigation.has_next);
    }

    #[test]
    fn single_period_reply() {
        let reply = resolve_meal(
            &state(),
            &query(Some("2026/01/27"), None, Some("Dinner")),
            at(2026, 1, 26, 8, 0),
        )
        .unwrap();
        let MealReply::Single(meal) = reply else {
            panic!("expected a single meal");
        };
        assert_eq!(meal.date, "2026-01-27");
        assert_eq!(meal.period, MealPeriod::Dinner);
        assert_eq!(meal.meal, "Jam Butter");
    }

    #[test]
    fn rejects_bad_input() {
        let now = at(2026, 1, 26, 8, 0);
        let err = resolve_meal(&state(), &query(Some("soon"), None, None), now).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let err = resolve_meal(&state(), &query(None, None, Some("brunch")), now).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let err = resolve_meal(&state(), &query(None, None, Some("none")), now).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn offsets_past_the_calendar_are_bad_requests() {
        let now = at(2026, 1, 26, 8, 0);
        for offset in [1_000_000_000, -1_000_000_000, i64::MAX, i64::MIN] {
            let err = resolve_meal(&state(), &query(None, Some(offset), None), now).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "offset {offset}");
            assert_eq!(err.to_string(), "offset out of range");
        }
    }

    #[test]
    fn missing_and_out_of_range_are_not_found() {
        let now = at(2026, 1, 26, 8, 0);
        // Thursday never matched: its successor row is absent.
        let err = resolve_meal(&state(), &query(Some("2026-01-29"), None, None), now).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("Thursday"));
        let err = resolve_meal(&state(), &query(None, Some(-1), None), now).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("outside the menu range"));
    }

    #[test]
    fn load_falls_back_to_printed_start_date() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Week Commencing Monday 26th January 2026\n{MENU}").unwrap();
        let mut menu = MenuConfig {
            path: file.path().to_path_buf(),
            start_date: None,
        };

        let loaded = AppState::load(&menu).unwrap();
        assert_eq!(loaded.start_date, state().start_date);
        assert_eq!(loaded.schedule, parse_schedule(MENU));

        menu.start_date = NaiveDate::from_ymd_opt(2026, 3, 2);
        assert_eq!(AppState::load(&menu).unwrap().start_date, menu.start_date.unwrap());
    }

    #[test]
    fn load_without_any_start_date_fails() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::fs::write(file.path(), MENU).unwrap();
        let menu = MenuConfig {
            path: file.path().to_path_buf(),
            start_date: None,
        };
        assert!(matches!(AppState::load(&menu), Err(MenuError::Config(_))));
    }

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let app = router(Arc::new(state()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn menu_endpoint_returns_schedule() {
        let (status, body) = get("/menu").await;
        assert_eq!(status, StatusCode::OK);
        let schedule: Schedule = serde_json::from_slice(&body).unwrap();
        assert_eq!(schedule, parse_schedule(MENU));
    }

    #[tokio::test]
    async fn meal_endpoint_by_date_and_period() {
        let (status, body) = get("/meal?date=2026-01-26&period=lunch").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["period"], "lunch");
        assert_eq!(json["meal"], "Veg Pulao");

        let (status, _) = get("/meal?date=2026-99-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get("/meal?date=2030-01-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn meal_endpoint_rejects_huge_offset() {
        let (status, body) = get("/meal?offset=1000000000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"offset out of range");
    }
}
