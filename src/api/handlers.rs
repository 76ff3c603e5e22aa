//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::deadline_policy::{DeadlinePolicy, Evaluation};
use crate::models::errors::AppError;
use crate::models::types::{ProcedureField, SubjectCategory};
use crate::utils::constants::{is_writable_case_field, APP_VERSION};
use crate::utils::telemetry::ClassificationTelemetry;

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    pub telemetry: Arc<ClassificationTelemetry>,
    pub policy: DeadlinePolicy,
    pub api_key: Option<String>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(telemetry: Arc<ClassificationTelemetry>, api_key: Option<String>) -> Self {
        Self {
            telemetry,
            policy: DeadlinePolicy::standard(),
            api_key,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Evaluate against the current date and count the outcome
    fn evaluate(&self, raw: &serde_json::Value, field: &str, category: SubjectCategory) -> Evaluation {
        let evaluation = self.policy.evaluate(raw, field, category);
        self.telemetry.record(&evaluation);
        evaluation
    }

    /// Same as `evaluate` for an already-resolved field
    fn evaluate_field(
        &self,
        raw: &serde_json::Value,
        field: ProcedureField,
        category: SubjectCategory,
    ) -> Evaluation {
        let evaluation = self.policy.evaluate_field(raw, field, category);
        self.telemetry.record(&evaluation);
        evaluation
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: AppError, start: Instant) -> ApiFailure {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(&err), elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Single classification
// ============================================

pub async fn classify_date(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ApiResponse<ClassifyData>>, ApiFailure> {
    let start = Instant::now();

    if req.field.trim().is_empty() {
        return Err(failure(AppError::bad_request("Field must not be empty"), start));
    }

    let category = SubjectCategory::from_label(req.category.as_deref());
    let evaluation = state.evaluate(&req.date, &req.field, category);
    let classification = evaluation.classification();

    let (elapsed_days, limit_days, reason) = match evaluation {
        Evaluation::Evaluated {
            elapsed_days,
            limit_days,
            ..
        } => (Some(elapsed_days), Some(limit_days), None),
        Evaluation::DateUnavailable(cause) => (None, None, Some(AppError::from(cause).to_string())),
        Evaluation::UnknownField => (None, None, Some("field is not a procedure milestone".to_string())),
    };

    let data = ClassifyData {
        field: req.field,
        category: category.source_label().to_string(),
        overdue: classification.overdue,
        style_hint: classification.style_hint.to_string(),
        status: evaluation.status().to_string(),
        elapsed_days,
        limit_days,
        reason,
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Dashboard rendering
// ============================================

pub async fn render_cases(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderCasesRequest>,
) -> Json<ApiResponse<RenderCasesData>> {
    let start = Instant::now();
    let null = serde_json::Value::Null;

    let rows: Vec<RenderedCaseRow> = req
        .cases
        .iter()
        .map(|row| {
            let category = SubjectCategory::from_label(row.kategori_umur.as_deref());
            let cells: BTreeMap<String, String> = ProcedureField::ALL
                .iter()
                .map(|field| {
                    let column = field.case_column();
                    let raw = row.columns.get(column).unwrap_or(&null);
                    let hint = state.evaluate_field(raw, *field, category).classification().style_hint;
                    (column.to_string(), hint.to_string())
                })
                .collect();
            let overdue_count = cells.values().filter(|hint| !hint.is_empty()).count();

            RenderedCaseRow {
                id: row.id,
                kategori_umur: category.source_label().to_string(),
                cells,
                overdue_count,
            }
        })
        .collect();

    let total_overdue_cells: usize = rows.iter().map(|r| r.overdue_count).sum();
    info!(
        rows = rows.len(),
        overdue_cells = total_overdue_cells,
        "Rendered case rows"
    );

    Json(ApiResponse::success(
        RenderCasesData {
            total_rows: rows.len(),
            total_overdue_cells,
            rows,
        },
        elapsed_ms(start),
    ))
}

// ============================================
// Cell update check
// ============================================

pub async fn update_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCheckRequest>,
) -> Result<Json<ApiResponse<UpdateCheckData>>, ApiFailure> {
    let start = Instant::now();

    // Allow-list is enforced here, the engine never sees forbidden fields
    if !is_writable_case_field(&req.field) {
        warn!(id = req.id, field = %req.field, "Rejected update of non-writable field");
        return Err(failure(AppError::forbidden_field(&req.field), start));
    }

    let (overdue, style_hint) = match ProcedureField::from_identifier(&req.field) {
        Some(field) => {
            let category = SubjectCategory::from_label(req.kategori_umur.as_deref());
            let classification = state.evaluate_field(&req.value, field, category).classification();
            (Some(classification.overdue), classification.style_hint)
        }
        None => (None, ""),
    };

    Ok(Json(ApiResponse::success(
        UpdateCheckData {
            id: req.id,
            field: req.field,
            value: req.value,
            overdue,
            style_hint: style_hint.to_string(),
        },
        elapsed_ms(start),
    )))
}

// ============================================
// Limits
// ============================================

pub async fn get_limits(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LimitsData>> {
    let start = Instant::now();

    let limits = ProcedureField::ALL
        .iter()
        .map(|field| LimitEntry {
            field: field.as_str().to_string(),
            label: field.label().to_string(),
            case_column: field.case_column().to_string(),
            adult_days: state.policy.limit_for(SubjectCategory::Adult, *field),
            minor_days: state.policy.limit_for(SubjectCategory::Minor, *field),
        })
        .collect();

    Json(ApiResponse::success(LimitsData { limits }, elapsed_ms(start)))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        telemetry: state.telemetry.get_stats(),
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
