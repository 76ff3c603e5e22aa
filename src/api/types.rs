//! API Request/Response Types

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::errors::AppError;
use crate::utils::telemetry::TelemetryStats;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: None,
        }
    }
}

// ============================================
// Classification
// ============================================

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Raw date value; strings, null, or anything else
    #[serde(default)]
    pub date: serde_json::Value,
    pub field: String,
    /// "Dewasa" / "Anak" (English names accepted), defaults to Dewasa
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyData {
    pub field: String,
    pub category: String,
    pub overdue: bool,
    pub style_hint: String,
    /// "evaluated" | "date_unavailable" | "unknown_field"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================
// Dashboard rendering
// ============================================

/// One case row as stored, milestone columns included
#[derive(Debug, Deserialize)]
pub struct CaseRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub kategori_umur: Option<String>,
    /// Remaining columns (spdp_tgl_terima, berkas_tahap_1, ...)
    #[serde(flatten)]
    pub columns: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RenderCasesRequest {
    pub cases: Vec<CaseRow>,
}

#[derive(Debug, Serialize)]
pub struct RenderedCaseRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub kategori_umur: String,
    /// Milestone column -> CSS class ("overdue-cell" or "")
    pub cells: BTreeMap<String, String>,
    pub overdue_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RenderCasesData {
    pub total_rows: usize,
    pub total_overdue_cells: usize,
    pub rows: Vec<RenderedCaseRow>,
}

// ============================================
// Cell update check
// ============================================

#[derive(Debug, Deserialize)]
pub struct UpdateCheckRequest {
    pub id: i64,
    pub field: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub kategori_umur: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateCheckData {
    pub id: i64,
    pub field: String,
    pub value: serde_json::Value,
    /// Only present when the field is a milestone date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,
    pub style_hint: String,
}

// ============================================
// Limits
// ============================================

#[derive(Debug, Serialize)]
pub struct LimitEntry {
    pub field: String,
    pub label: String,
    pub case_column: String,
    pub adult_days: Option<u32>,
    pub minor_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LimitsData {
    pub limits: Vec<LimitEntry>,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub telemetry: TelemetryStats,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
