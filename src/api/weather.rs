use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::model::weather::city_weather;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// Caller id, echoed back in the response
    #[serde(default)]
    #[param(example = 1)]
    pub user_id: i64,
    /// City to look up (1 = New York, 2 = Cairo)
    #[serde(default)]
    #[param(example = 2)]
    pub city_id: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Cairo")]
    pub city: String,
    #[schema(example = 40)]
    pub temperature: i32,
}

/// Weather lookup stub
#[utoipa::path(
    get,
    path = "/api/weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Weather for a known city", body = WeatherResponse),
        (status = 404, description = "City not found", body = Object, example = json!({
            "userId": 1,
            "message": "City not found"
        })),
        (status = 400, description = "Malformed query string")
    ),
    tag = "Weather"
)]
#[instrument(name = "get_weather", skip(query), fields(user_id = query.user_id, city_id = query.city_id))]
pub async fn get_weather(query: web::Query<WeatherQuery>) -> impl Responder {
    let WeatherQuery { user_id, city_id } = query.into_inner();

    match city_weather(city_id) {
        Some(weather) => HttpResponse::Ok().json(WeatherResponse {
            user_id,
            city: weather.city.to_string(),
            temperature: weather.temperature,
        }),
        None => {
            debug!("Unknown city");
            HttpResponse::NotFound().json(json!({
                "userId": user_id,
                "message": "City not found"
            }))
        }
    }
}
