//! Telemetry Module
//!
//! Counts classification outcomes so operators can spot data-quality
//! problems (unparseable dates, unknown field keys) in production.
//!
//! Only counters are kept. Classification results themselves are never stored.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::deadline_policy::Evaluation;

/// Aggregated counters for reporting
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    /// Total evaluations recorded
    pub total_classified: u64,
    /// Evaluations that came out overdue
    pub total_overdue: u64,
    /// Evaluations skipped because the date was missing or unreadable
    pub date_unavailable: u64,
    /// Evaluations skipped because the field key is not a milestone
    pub unknown_field: u64,
    /// Overdue count per canonical field name
    pub overdue_by_field: BTreeMap<String, u64>,
    /// Collector start timestamp (unix seconds)
    pub period_start: u64,
}

/// Thread-safe telemetry collector
#[derive(Debug)]
pub struct ClassificationTelemetry {
    total_classified: AtomicU64,
    total_overdue: AtomicU64,
    date_unavailable: AtomicU64,
    unknown_field: AtomicU64,
    overdue_by_field: DashMap<&'static str, u64>,
    period_start: u64,
}

impl ClassificationTelemetry {
    pub fn new() -> Self {
        Self {
            total_classified: AtomicU64::new(0),
            total_overdue: AtomicU64::new(0),
            date_unavailable: AtomicU64::new(0),
            unknown_field: AtomicU64::new(0),
            overdue_by_field: DashMap::new(),
            period_start: current_timestamp(),
        }
    }

    /// Record one evaluation outcome
    pub fn record(&self, evaluation: &Evaluation) {
        self.total_classified.fetch_add(1, Ordering::Relaxed);

        match evaluation {
            Evaluation::Evaluated { field, overdue: true, .. } => {
                self.total_overdue.fetch_add(1, Ordering::Relaxed);
                *self.overdue_by_field.entry(field.as_str()).or_insert(0) += 1;
            }
            Evaluation::Evaluated { .. } => {}
            Evaluation::DateUnavailable(_) => {
                self.date_unavailable.fetch_add(1, Ordering::Relaxed);
            }
            Evaluation::UnknownField => {
                self.unknown_field.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Snapshot of current counters
    pub fn get_stats(&self) -> TelemetryStats {
        TelemetryStats {
            total_classified: self.total_classified.load(Ordering::Relaxed),
            total_overdue: self.total_overdue.load(Ordering::Relaxed),
            date_unavailable: self.date_unavailable.load(Ordering::Relaxed),
            unknown_field: self.unknown_field.load(Ordering::Relaxed),
            overdue_by_field: self
                .overdue_by_field
                .iter()
                .map(|entry| (entry.key().to_string(), *entry.value()))
                .collect(),
            period_start: self.period_start,
        }
    }
}

impl Default for ClassificationTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date_parser::ParseFailure;
    use crate::models::types::ProcedureField;

    #[test]
    fn test_record_outcomes() {
        let telemetry = ClassificationTelemetry::new();

        telemetry.record(&Evaluation::Evaluated {
            field: ProcedureField::P21,
            overdue: true,
            elapsed_days: 20,
            limit_days: 12,
        });
        telemetry.record(&Evaluation::Evaluated {
            field: ProcedureField::P21,
            overdue: false,
            elapsed_days: 2,
            limit_days: 12,
        });
        telemetry.record(&Evaluation::DateUnavailable(ParseFailure::UnparseableString));
        telemetry.record(&Evaluation::UnknownField);

        let stats = telemetry.get_stats();
        assert_eq!(stats.total_classified, 4);
        assert_eq!(stats.total_overdue, 1);
        assert_eq!(stats.date_unavailable, 1);
        assert_eq!(stats.unknown_field, 1);
        assert_eq!(stats.overdue_by_field.get("P21"), Some(&1));
    }

    #[test]
    fn test_empty_stats() {
        let stats = ClassificationTelemetry::new().get_stats();
        assert_eq!(stats.total_classified, 0);
        assert!(stats.overdue_by_field.is_empty());
    }
}
