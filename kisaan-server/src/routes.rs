use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::models::WeatherError;
use crate::system::AppState;

/// System prompt for the assistant endpoint. The model either answers a
/// farming question in plain text or classifies the query into one of the
/// tool/navigational intents as a bare JSON string the client router can
/// parse directly.
const CLASSIFIER_SYSTEM_PROMPT: &str = r#"
You are "Kisaan Ki Aawaaz", a helpful AI assistant for farmers and agricultural experts.
Your primary goal is to provide accurate, concise and relevant information about agriculture.

Please adhere to these rules:

1. Handle off-topic questions: if a question is clearly not related to agriculture
   (e.g. "Who won the world cup?"), politely decline with: "I am an agricultural
   assistant and can only answer questions related to farming and agriculture."

2. Intent classification: your most important job is to classify the user's intent.
   If the query matches one of the tool or navigational intents below, respond with
   ONLY a JSON string. ABSOLUTELY DO NOT wrap the JSON in Markdown backticks (```)
   or any other text.

3. WEATHER intent (tool):
   * The query asks for the weather in a specific location.
   * Also determine the requested timeframe as "duration": "today", "5-day" or
     "default" when no timeframe is mentioned. The free API only supports 5 days,
     so "6 days" or "15 days" classifies as "5-day".
   * Examples:
     - "weather in pune" -> {"intent": "WEATHER", "city": "Pune", "duration": "default"}
     - "today's weather noida" -> {"intent": "WEATHER", "city": "Noida", "duration": "today"}
     - "5 day forecast for delhi" -> {"intent": "WEATHER", "city": "Delhi", "duration": "5-day"}
     - "15 day weather in noida" -> {"intent": "WEATHER", "city": "Noida", "duration": "5-day"}

4. CROP_PRICES intent (tool):
   * The query asks for the market price of a specific crop.
   * Include the district as "location" when the user names one, otherwise "null".
   * Example: {"intent": "CROP_PRICES", "crop": "Wheat", "location": "Pune"}

5. GOV_SCHEMES intent (navigational):
   * The query asks to see government schemes. Carry the topic as "search_term".
   * Example: {"intent": "GOV_SCHEMES", "search_term": "crop insurance"}

6. GENERAL_INFO intent (default):
   * Any other agricultural question (e.g. "how to grow rice", "what is a good
     fertilizer") gets a normal, helpful, concise answer. Do NOT output JSON.
"#;

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Server is running...")
}

#[get("/api/hello")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Kisaan Ki Aawaaz backend is up"
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    crop: Option<String>,
    location: Option<String>,
}

#[get("/api/crops/prices")]
pub async fn crop_prices(
    state: web::Data<AppState>,
    query: web::Query<PriceQuery>,
) -> HttpResponse {
    let crop = match query.crop.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(crop) => crop,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Crop parameter is required"
            }))
        }
    };

    let client = match &state.prices {
        Some(client) => client,
        None => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Server configuration error: API key missing"
            }))
        }
    };

    // "null" is the router's sentinel for "no district filter"
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "null");

    match client.fetch_prices(crop, location).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            println!("Error fetching crop prices: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Government server is busy. Please try again."
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
}

#[get("/api/weather")]
pub async fn weather(state: web::Data<AppState>, query: web::Query<WeatherQuery>) -> HttpResponse {
    let city = match query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => city,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "City parameter is required"
            }))
        }
    };

    let client = match &state.weather {
        Some(client) => client,
        None => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Server configuration error: API key missing"
            }))
        }
    };

    match client.fetch_weather(city).await {
        Ok(bundle) => HttpResponse::Ok().json(bundle),
        Err(WeatherError::CityNotFound(city)) => HttpResponse::NotFound().json(
            serde_json::json!({ "message": format!("City not found: {}", city) }),
        ),
        Err(e) => {
            println!("Error in /api/weather route: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch weather data"
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssistantQuery {
    query: Option<String>,
}

#[post("/api/gemini")]
pub async fn assistant(
    state: web::Data<AppState>,
    body: web::Json<AssistantQuery>,
) -> HttpResponse {
    let query = match body.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => query,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Query parameter is required"
            }))
        }
    };

    let client = match &state.assistant {
        Some(client) => client,
        None => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Server configuration error: API key missing"
            }))
        }
    };

    match client.generate(CLASSIFIER_SYSTEM_PROMPT, query).await {
        Ok(answer) => HttpResponse::Ok().json(serde_json::json!({ "answer": answer })),
        Err(e) => {
            println!("Error in /api/gemini route: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to get response from AI"
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(hello)
        .service(health_check)
        .service(crop_prices)
        .service(weather)
        .service(assistant);
}
