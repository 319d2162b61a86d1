use crate::api::vacation::{
    CreateVacationRequest, CreatedVacationResponse, VacationBalanceResponse,
};
use crate::api::weather::WeatherResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vacation API",
        version = "0.1.0",
        description = r#"
## Vacation balance service

Small HTTP API over an in-memory vacation ledger.

### 🔹 Endpoints
- **Vacation Requests**
  - Book a date range (inclusive of both ends) against an employee's remaining days
- **Vacation Balance**
  - Total, used, pending and remaining days for an employee
- **Weather**
  - Fixed readings for a couple of known cities

### 📦 Response Format
- JSON bodies with camelCase field names
- Errors carry a human-readable `message`

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::vacation::create_request,
        crate::api::vacation::get_balance,

        crate::api::weather::get_weather
    ),
    components(
        schemas(
            CreateVacationRequest,
            CreatedVacationResponse,
            VacationBalanceResponse,
            WeatherResponse
        )
    ),
    tags(
        (name = "Vacation", description = "Vacation request and balance APIs"),
        (name = "Weather", description = "Weather lookup stub"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/api/requests"));
        assert!(paths.contains(&"/api/balance/{user_id}"));
        assert!(paths.contains(&"/api/weather"));
    }
}
