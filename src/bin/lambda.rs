use chrono::Local;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use mess_menu::api::{AppState, MealQuery, resolve_meal};
use mess_menu::config;
use serde_json::{Value, json};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .without_time()
        .init();

    let config_path = std::env::var("MENU_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = config::load(&config_path)?;
    let state = Arc::new(AppState::load(&cfg.menu)?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { handle(&state, &event.payload) }
    }))
    .await
}

fn handle(state: &AppState, payload: &Value) -> Result<Value, Error> {
    let query = MealQuery {
        date: parse_payload(payload, "date"),
        offset: parse_payload(payload, "offset"),
        period: parse_payload(payload, "period"),
    };
    match resolve_meal(state, &query, Local::now().naive_local()) {
        Ok(reply) => Ok(serde_json::to_value(reply)?),
        Err(err) => Ok(json!({
            "statusCode": err.status().as_u16(),
            "error": err.to_string(),
        })),
    }
}

/// Reads `key` from the payload root, `queryStringParameters` or
/// `pathParameters`, in that order. API Gateway hands every value over as a
/// string, so strings are decoded as JSON first and as a bare string second.
fn parse_payload<T>(payload: &Value, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    payload
        .get(key)
        .or_else(|| {
            payload
                .get("queryStringParameters")
                .and_then(|qs| qs.get(key))
        })
        .or_else(|| payload.get("pathParameters").and_then(|pp| pp.get(key)))
        .and_then(|v| {
            if let Some(s) = v.as_str() {
                if let Ok(result) = serde_json::from_str::<T>(s) {
                    return Some(result);
                }
                if let Ok(result) = serde_json::from_value::<T>(Value::String(s.to_string())) {
                    return Some(result);
                }
            }
            serde_json::from_value(v.clone()).ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mess_menu::parse_schedule;

    fn state() -> AppState {
        AppState {
            schedule: parse_schedule("Week 1 Monday Breakfast Veg Pulao + Chicken Karahi Tuesday"),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
        }
    }

    #[test]
    fn reads_keys_from_every_location() {
        let root = json!({"date": "2026-01-26"});
        let query = json!({"queryStringParameters": {"offset": "-2"}});
        let path = json!({"pathParameters": {"period": "lunch"}});

        assert_eq!(parse_payload::<String>(&root, "date").as_deref(), Some("2026-01-26"));
        assert_eq!(parse_payload::<i64>(&query, "offset"), Some(-2));
        assert_eq!(parse_payload::<String>(&path, "period").as_deref(), Some("lunch"));
        assert_eq!(parse_payload::<String>(&root, "period"), None);
    }

    #[test]
    fn numeric_values_pass_through() {
        let payload = json!({"offset": 3});
        assert_eq!(parse_payload::<i64>(&payload, "offset"), Some(3));
    }

    #[test]
    fn handles_a_period_request() {
        let payload = json!({"queryStringParameters": {"date": "2026-01-26", "period": "dinner"}});
        let reply = handle(&state(), &payload).unwrap();
        assert_eq!(reply["meal"], "Chicken Karahi");
        assert_eq!(reply["period"], "dinner");
    }

    #[test]
    fn errors_become_status_payloads() {
        let payload = json!({"date": "2026-05-01"});
        let reply = handle(&state(), &payload).unwrap();
        assert_eq!(reply["statusCode"], 404);

        let reply = handle(&state(), &json!({"offset": i64::MAX})).unwrap();
        assert_eq!(reply["statusCode"], 400);
    }
}
