//! HTTP request handlers for the care shift engine API.
//!
//! This module contains the handler functions for all API endpoints and
//! the router wiring them together. Every handler logs under a fresh
//! correlation id and maps [`EngineError`] onto the HTTP status taxonomy
//! via [`ApiErrorResponse`].

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::NewWorkLog;
use crate::payroll::approve_work_log;
use crate::scheduling::generate_from_definitions;
use crate::store::ShiftFilter;

use super::request::{
    CreateExpenseRequest, CreateShiftRequest, CreateWorkLogRequest, ExpenseStatusRequest,
    GenerateShiftsRequest, ListShiftsQuery, ProcessPaymentRequest, RejectWorkLogRequest,
    UpdateShiftRequest,
};
use super::response::{ApiError, ApiErrorResponse, GenerationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/care-plans/:plan_id/shifts",
            post(create_shift_handler).get(list_shifts_handler),
        )
        .route(
            "/care-plans/:plan_id/shifts/generate",
            post(generate_shifts_handler),
        )
        .route(
            "/shifts/:id",
            patch(update_shift_handler).delete(delete_shift_handler),
        )
        .route("/work-logs", post(create_work_log_handler))
        .route("/care-plans/:plan_id/work-logs", get(list_work_logs_handler))
        .route("/work-logs/:id/approve", post(approve_work_log_handler))
        .route("/work-logs/:id/reject", post(reject_work_log_handler))
        .route(
            "/work-logs/:id/expenses",
            post(add_expense_handler).get(list_expenses_handler),
        )
        .route("/expenses/:id/status", post(expense_status_handler))
        .route("/care-plans/:plan_id/payroll", get(list_payroll_handler))
        .route("/payroll/:id/approve", post(approve_payment_handler))
        .route("/payroll/:id/pay", post(process_payment_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn fail(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, turning axum's rejection into the engine's error
/// body shape.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(json_response(StatusCode::BAD_REQUEST, error))
        }
    }
}

/// Handler for POST /care-plans/{plan_id}/shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    payload: Result<Json<CreateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    match state.store().create_shift(request.into_new_shift(plan_id)) {
        Ok(shift) => {
            info!(
                correlation_id = %correlation_id,
                shift = %shift.id,
                plan = %plan_id,
                status = %shift.status,
                "shift created"
            );
            json_response(StatusCode::CREATED, shift)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for GET /care-plans/{plan_id}/shifts.
async fn list_shifts_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<ListShiftsQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let filter = match query.filter.as_deref() {
        Some(raw) => match raw.parse::<ShiftFilter>() {
            Ok(filter) => filter,
            Err(err) => return fail(correlation_id, err),
        },
        None => ShiftFilter::All,
    };
    match state.store().shifts_for_plan(plan_id, filter) {
        Ok(shifts) => json_response(StatusCode::OK, shifts),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /care-plans/{plan_id}/shifts/generate.
///
/// Batch expansion is partial-success: the response reports created
/// shifts and skipped definitions side by side and is never an error as
/// a whole once the request itself parses.
async fn generate_shifts_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    payload: Result<Json<GenerateShiftsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let mut definitions = Vec::with_capacity(request.definitions.len());
    for definition in request.definitions {
        match definition.into_definition() {
            Ok(parsed) => definitions.push(parsed),
            Err(err) => return fail(correlation_id, err),
        }
    }
    let today = request
        .reference_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let outcome =
        generate_from_definitions(state.store(), plan_id, request.family_id, definitions, today);
    info!(
        correlation_id = %correlation_id,
        plan = %plan_id,
        created = outcome.created.len(),
        skipped = outcome.skipped.len(),
        "shift generation completed"
    );
    json_response(
        StatusCode::OK,
        GenerationResponse {
            created: outcome.created,
            skipped: outcome.skipped.into_iter().map(Into::into).collect(),
        },
    )
}

/// Handler for PATCH /shifts/{id}.
async fn update_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    match state.store().update_shift(id, request.into()) {
        Ok(shift) => {
            info!(
                correlation_id = %correlation_id,
                shift = %shift.id,
                status = %shift.status,
                "shift updated"
            );
            json_response(StatusCode::OK, shift)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for DELETE /shifts/{id}.
async fn delete_shift_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().delete_shift(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /work-logs.
async fn create_work_log_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkLogRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let result = match request {
        CreateWorkLogRequest::FromShift {
            shift_id,
            break_minutes,
            notes,
        } => state
            .store()
            .work_log_from_shift(shift_id, break_minutes, notes),
        CreateWorkLogRequest::Explicit {
            team_member_id,
            care_plan_id,
            shift_id,
            start_time,
            end_time,
            break_minutes,
            notes,
        } => state.store().create_work_log(NewWorkLog {
            team_member_id,
            care_plan_id,
            shift_id,
            start_time,
            end_time,
            break_minutes,
            notes,
        }),
    };
    match result {
        Ok(log) => {
            info!(
                correlation_id = %correlation_id,
                work_log = %log.id,
                plan = %log.care_plan_id,
                "work log created"
            );
            json_response(StatusCode::CREATED, log)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for GET /care-plans/{plan_id}/work-logs.
async fn list_work_logs_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().work_logs_for_plan(plan_id) {
        Ok(logs) => json_response(StatusCode::OK, logs),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /work-logs/{id}/approve.
///
/// The sole trigger for payroll entry creation.
async fn approve_work_log_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match approve_work_log(state.store(), id, state.defaults()) {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                work_log = %id,
                payroll_entry = %entry.id,
                total = %entry.total_amount,
                "work log approved"
            );
            json_response(StatusCode::CREATED, entry)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /work-logs/{id}/reject. The body is optional.
async fn reject_work_log_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<RejectWorkLogRequest>>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let reason = payload.map(|Json(req)| req.reason).unwrap_or_default();
    match state.store().reject_work_log(id, reason) {
        Ok(log) => {
            info!(correlation_id = %correlation_id, work_log = %id, "work log rejected");
            json_response(StatusCode::OK, log)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /work-logs/{id}/expenses.
async fn add_expense_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    match state.store().add_expense(request.into_new_expense(id)) {
        Ok(expense) => {
            info!(
                correlation_id = %correlation_id,
                expense = %expense.id,
                work_log = %id,
                amount = %expense.amount,
                "expense recorded"
            );
            json_response(StatusCode::CREATED, expense)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for GET /work-logs/{id}/expenses.
async fn list_expenses_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().expenses_for(id) {
        Ok(expenses) => json_response(StatusCode::OK, expenses),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /expenses/{id}/status.
async fn expense_status_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ExpenseStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    match state.store().set_expense_status(id, request.status) {
        Ok(expense) => json_response(StatusCode::OK, expense),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for GET /care-plans/{plan_id}/payroll.
async fn list_payroll_handler(State(state): State<AppState>, Path(plan_id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().payroll_for_plan(plan_id) {
        Ok(entries) => json_response(StatusCode::OK, entries),
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /payroll/{id}/approve.
async fn approve_payment_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().approve_payment(id) {
        Ok(entry) => {
            info!(correlation_id = %correlation_id, payroll_entry = %id, "payment approved");
            json_response(StatusCode::OK, entry)
        }
        Err(err) => fail(correlation_id, err),
    }
}

/// Handler for POST /payroll/{id}/pay. The body is optional; the payment
/// date defaults to the current date.
async fn process_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<ProcessPaymentRequest>>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let payment_date = payload
        .and_then(|Json(req)| req.payment_date)
        .unwrap_or_else(|| Utc::now().date_naive());
    match state.store().process_payment(id, payment_date) {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                payroll_entry = %id,
                date = %payment_date,
                "payment processed"
            );
            json_response(StatusCode::OK, entry)
        }
        Err(err) => fail(correlation_id, err),
    }
}
