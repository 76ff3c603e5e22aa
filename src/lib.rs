//! E-Kejaksaan Deadline Library
//!
//! Deadline/overdue evaluation engine for the E-Kejaksaan case tracking
//! system:
//! - Tolerant parsing of stored and submitted milestone dates
//! - Regulatory day limits per age category (Dewasa / Anak) and milestone
//! - Overdue classification shared by the dashboard and the update path

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::date_parser::{format_iso, parse, ParseFailure, RawDate};
pub use crate::core::deadline_policy::{
    classify, is_overdue, is_overdue_on, DeadlinePolicy, DeadlineTable, Evaluation,
};
pub use models::config::ServerConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{OverdueClassification, ProcedureField, SubjectCategory};
pub use utils::telemetry::{ClassificationTelemetry, TelemetryStats};
