use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    ledger::{EmployeeId, Ledger},
    model::balance::{ANNUAL_VACATION_DAYS, VacationBalance},
};

/// Route name used to build the `Location` of a newly created request.
pub const BALANCE_ROUTE: &str = "vacation_balance";

/// Limit on `reason`, measured in UTF-16 code units like the clients that produce it.
pub const REASON_MAX_LEN: usize = 200;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacationRequest {
    #[schema(example = 1, value_type = i64)]
    pub user_id: EmployeeId,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    /// Why the time off is needed (required, at most 200 UTF-16 code units)
    #[schema(example = "Trip", max_length = 200)]
    pub reason: String,
    #[schema(example = "Back on Monday", nullable = true)]
    pub notes: Option<String>,
}

impl CreateVacationRequest {
    /// Field-level checks that run before the ledger is consulted.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.reason.trim().is_empty() {
            return Err(ApiError::Validation("reason is required".into()));
        }
        if self.reason.encode_utf16().count() > REASON_MAX_LEN {
            return Err(ApiError::Validation(format!(
                "reason must be at most {REASON_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedVacationResponse {
    #[schema(example = "Request created successfully")]
    pub message: String,
    #[schema(example = 7)]
    pub days_requested: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VacationBalanceResponse {
    #[schema(example = 1, value_type = i64)]
    pub user_id: EmployeeId,
    #[schema(example = 21)]
    pub total_annual_days: u32,
    #[schema(example = 7)]
    pub used_days: u32,
    /// Always 0: there is no approval workflow yet
    #[schema(example = 0)]
    pub pending_days: u32,
    #[schema(example = 14)]
    pub remaining_days: u32,
}

impl VacationBalanceResponse {
    pub fn new(user_id: EmployeeId, balance: VacationBalance) -> Self {
        Self {
            user_id,
            total_annual_days: ANNUAL_VACATION_DAYS,
            used_days: balance.taken_days(),
            pending_days: 0,
            remaining_days: balance.remaining_days(),
        }
    }
}

/* =========================
Create vacation request
========================= */
/// Books vacation days against the employee's balance
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body(
        content = CreateVacationRequest,
        description = "Vacation request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request created; Location points at the employee's balance",
         body = CreatedVacationResponse,
         headers(("Location" = String, description = "Balance endpoint for the employee"))
        ),
        (status = 400, description = "Invalid payload, reversed dates or not enough days", body = Object, example = json!({
            "message": "Not enough vacation days remaining"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Vacation"
)]
#[instrument(
    name = "create_vacation_request",
    skip(req, ledger, payload),
    fields(user_id = payload.user_id)
)]
pub async fn create_request(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    payload: web::Json<CreateVacationRequest>,
) -> actix_web::Result<HttpResponse> {
    payload.validate().inspect_err(|e| warn!(error = %e, "Invalid vacation request"))?;

    let days_requested = ledger
        .request_days(payload.user_id, payload.start_date, payload.end_date)
        .map_err(|e| {
            warn!(error = %e, "Vacation request rejected");
            ApiError::from(e)
        })?;

    debug!(has_notes = payload.notes.is_some(), "Vacation request accepted");

    let location = req
        .url_for(BALANCE_ROUTE, [payload.user_id.to_string()])
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build balance location");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.path()))
        .json(CreatedVacationResponse {
            message: "Request created successfully".into(),
            days_requested,
        }))
}

/* =========================
Get vacation balance
========================= */
/// Current vacation balance for an employee
#[utoipa::path(
    get,
    path = "/api/balance/{user_id}",
    params(
        ("user_id" = i64, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Balance found", body = VacationBalanceResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Vacation"
)]
#[instrument(name = "get_vacation_balance", skip(ledger))]
pub async fn get_balance(
    ledger: web::Data<Ledger>,
    path: web::Path<EmployeeId>,
) -> actix_web::Result<HttpResponse> {
    let user_id = path.into_inner();

    let balance = ledger.balance(user_id).map_err(|e| {
        debug!(error = %e, "Balance lookup failed");
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(VacationBalanceResponse::new(user_id, balance)))
}
