//! HTTP API module for the care shift engine.
//!
//! This module provides the REST endpoints for shift scheduling, work-log
//! approval, expense tracking and payroll payment processing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateExpenseRequest, CreateShiftRequest, CreateWorkLogRequest, ExpenseStatusRequest,
    GenerateShiftsRequest, ProcessPaymentRequest, RejectWorkLogRequest, ShiftDefinitionRequest,
    UpdateShiftRequest,
};
pub use response::{ApiError, GenerationResponse, SkippedDefinitionResponse};
pub use state::AppState;
