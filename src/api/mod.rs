//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST API endpoints for leave day valuation,
//! hour summaries, leave balances, and time-entry conflict checks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ConflictCheckRequest, HoursSummaryRequest, LeaveDayValueRequest, LeaveRemainingRequest,
};
pub use response::{ApiError, ApiErrorResponse, ConflictCheckResponse, LeaveDayValueResponse};
pub use state::AppState;
