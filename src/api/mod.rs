use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::config::AppConfig;
use crate::food::analysis::aggregate::{aggregate_items, render_totals, FoodItem};
use crate::food::analysis::deficiency::score_deficiencies;
use crate::food::analysis::recommend::recommend_foods;
use crate::food::api::UsdaClient;
use crate::llm::consult::{display_value, run_chat, run_consultation, Profile};
use crate::providers::gemini::gemini::GeminiProvider;
use crate::weather::{WeatherClient, WeatherSnapshot};

#[derive(Clone)]
pub struct AppState {
    weather: Arc<WeatherClient>,
    usda: Arc<UsdaClient>,
    gemini: Option<Arc<GeminiProvider>>,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    city: String,
    #[serde(default)]
    items: Vec<AnalyzeItem>,
    #[serde(default = "default_gender")]
    gender: String,
    #[serde(default)]
    height: Value,
    #[serde(default)]
    weight: Value,
}

#[derive(Deserialize)]
pub struct AnalyzeItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    qty: Value,
}

#[derive(Deserialize)]
pub struct ConsultRequest {
    #[serde(default)]
    age: Value,
    #[serde(default = "default_gender")]
    gender: String,
    #[serde(default)]
    height: Value,
    #[serde(default)]
    weight: Value,
    #[serde(default = "default_activity")]
    activity: String,
    #[serde(default)]
    total_nutrients: Map<String, Value>,
    #[serde(default)]
    deficient: Map<String, Value>,
    #[serde(default)]
    weather: Value,
    #[serde(default = "default_lang")]
    lang: String,
}

#[derive(Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 1000))]
    message: String,
    #[serde(default)]
    analysis_data: Option<Value>,
    #[serde(default = "default_lang")]
    lang: String,
}

fn default_gender() -> String {
    "male".to_string()
}

fn default_activity() -> String {
    "moderate".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

/// Create and configure the API router. Collaborator clients are built
/// once from the injected configuration and shared read-only across
/// requests.
pub fn create_api(config: &AppConfig) -> Router {
    let state = AppState {
        weather: Arc::new(WeatherClient::new(config.weather_api_key.clone())),
        usda: Arc::new(UsdaClient::new(config.usda_api_key.clone())),
        gemini: config
            .gemini_api_key
            .clone()
            .map(|key| Arc::new(GeminiProvider::new(key, config.gemini_model.clone()))),
    };

    // Fully permissive CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/consult", post(consult_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let city = request.city.trim();
    if city.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "City required");
    }

    let weather = match state.weather.current(city).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Weather lookup failed for '{}': {}", city, e);
            return error_response(
                StatusCode::NOT_FOUND,
                &format!("Weather data not found for city: {}", city),
            );
        }
    };

    let items: Vec<FoodItem> = request
        .items
        .iter()
        .map(|item| FoodItem {
            name: item.name.clone(),
            qty_grams: lossy_f64(&item.qty),
        })
        .collect();

    let totals = aggregate_items(&state.usda, &items).await;
    let deficient = score_deficiencies(
        &totals,
        &request.gender,
        lossy_f64(&request.height),
        lossy_f64(&request.weight),
    );
    let recommendations = recommend_foods(&deficient, Some(&weather));

    let mut total_nutrients = Map::new();
    for (name, amount) in render_totals(&totals) {
        total_nutrients.insert(name.to_string(), Value::String(amount));
    }
    let mut deficient_out = Map::new();
    for (nutrient, amount) in &deficient {
        deficient_out.insert(nutrient.name().to_string(), Value::String(amount.clone()));
    }

    Json(json!({
        "weather": weather,
        "total_nutrients": total_nutrients,
        "deficient": deficient_out,
        "recommendations": recommendations,
    }))
    .into_response()
}

async fn consult_handler(
    State(state): State<AppState>,
    Json(request): Json<ConsultRequest>,
) -> Response {
    let provider = match &state.gemini {
        Some(provider) => Arc::clone(provider),
        None => {
            return failure_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "GEMINI_API_KEY not set; consultation is disabled",
            )
        }
    };

    let profile = Profile {
        age: lossy_age(&request.age),
        gender: request.gender.clone(),
        height_cm: lossy_f64(&request.height),
        weight_kg: lossy_f64(&request.weight),
        activity: request.activity.clone(),
    };
    let totals = display_pairs(&request.total_nutrients);
    let deficiencies = display_pairs(&request.deficient);
    // Lenient: an absent or unusable weather object just drops the weather
    // block from the prompt
    let weather: Option<WeatherSnapshot> = serde_json::from_value(request.weather.clone()).ok();

    match run_consultation(
        provider.as_ref(),
        &profile,
        &totals,
        &deficiencies,
        weather.as_ref(),
        &request.lang,
    )
    .await
    {
        Ok(consult) => Json(json!({ "ok": true, "consult": consult })).into_response(),
        Err(e) => {
            log::error!("Consultation failed: {}", e);
            failure_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    if request.validate().is_err() {
        return failure_response(StatusCode::BAD_REQUEST, "No message provided");
    }

    let provider = match &state.gemini {
        Some(provider) => Arc::clone(provider),
        None => {
            return failure_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "GEMINI_API_KEY not set; chat is disabled",
            )
        }
    };

    match run_chat(
        provider.as_ref(),
        &request.message,
        request.analysis_data.as_ref(),
        &request.lang,
    )
    .await
    {
        Ok(reply) => Json(json!({ "ok": true, "reply": reply })).into_response(),
        Err(e) => {
            log::error!("Chat completion failed: {}", e);
            failure_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn health_check() -> Response {
    Json(json!({ "status": "Server is running and healthy" })).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn failure_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}

/// Numeric fields arrive as JSON numbers or strings; anything unparseable
/// coerces to zero instead of failing the request.
fn lossy_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn lossy_age(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(30),
        Value::String(s) => s.trim().parse().unwrap_or(30),
        _ => 30,
    }
}

fn display_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(name, amount)| (name.clone(), display_value(amount)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_f64_accepts_numbers_and_strings() {
        assert_eq!(lossy_f64(&json!(72.5)), 72.5);
        assert_eq!(lossy_f64(&json!("175")), 175.0);
        assert_eq!(lossy_f64(&json!(" 68.2 ")), 68.2);
    }

    #[test]
    fn lossy_f64_coerces_garbage_to_zero() {
        assert_eq!(lossy_f64(&json!("tall")), 0.0);
        assert_eq!(lossy_f64(&Value::Null), 0.0);
        assert_eq!(lossy_f64(&json!([1, 2])), 0.0);
    }

    #[test]
    fn lossy_age_defaults_to_thirty() {
        assert_eq!(lossy_age(&json!(42)), 42);
        assert_eq!(lossy_age(&json!("55")), 55);
        assert_eq!(lossy_age(&json!("unknown")), 30);
        assert_eq!(lossy_age(&Value::Null), 30);
    }

    #[test]
    fn analyze_request_tolerates_missing_fields() {
        let request: AnalyzeRequest = serde_json::from_str(r#"{"city":"Pune"}"#).unwrap();
        assert_eq!(request.city, "Pune");
        assert!(request.items.is_empty());
        assert_eq!(request.gender, "male");
        assert_eq!(lossy_f64(&request.height), 0.0);
    }

    #[test]
    fn chat_request_requires_a_message() {
        let empty: ChatRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.validate().is_err());

        let present: ChatRequest =
            serde_json::from_str(r#"{"message":"What should I eat?"}"#).unwrap();
        assert!(present.validate().is_ok());
        assert_eq!(present.lang, "en");
    }

    #[test]
    fn display_pairs_unquotes_strings() {
        let mut map = Map::new();
        map.insert("Protein".to_string(), json!("1.65 g"));
        map.insert("Iron".to_string(), json!(8));
        let pairs = display_pairs(&map);
        assert!(pairs.contains(&("Protein".to_string(), "1.65 g".to_string())));
        assert!(pairs.contains(&("Iron".to_string(), "8".to_string())));
    }
}
