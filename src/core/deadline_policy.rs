//! Deadline Policy Module
//!
//! Holds the regulatory limit table (category -> field -> days) and decides
//! whether a milestone date is overdue as of today.
//!
//! Rules:
//! - elapsed days = calendar-day difference, time-of-day ignored
//! - overdue only when elapsed days is strictly greater than the limit
//! - "today" is read from the local clock on every call, never cached
//!
//! Every failure (bad date, unknown field) degrades to "not overdue".

use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

use super::date_parser::{parse, ParseFailure, RawDate};
use crate::models::types::{OverdueClassification, ProcedureField, SubjectCategory};
use crate::utils::constants::*;

lazy_static::lazy_static! {
    /// Process-wide limit table, built once on first use
    pub static ref DEADLINE_TABLE: DeadlineTable = DeadlineTable::standard();
}

/// Limit table keyed by category then field
#[derive(Debug, Clone)]
pub struct DeadlineTable {
    limits: HashMap<SubjectCategory, HashMap<ProcedureField, u32>>,
}

impl DeadlineTable {
    /// The regulatory limits for Dewasa and Anak cases
    pub fn standard() -> Self {
        let adult = HashMap::from([
            (ProcedureField::SpdpReceipt, LIMIT_SPDP_DAYS),
            (ProcedureField::FileStage1, LIMIT_ADULT_FILE_STAGE_1_DAYS),
            (ProcedureField::P18P19, LIMIT_ADULT_P18_P19_DAYS),
            (ProcedureField::P21, LIMIT_ADULT_P21_DAYS),
            (ProcedureField::Stage2, LIMIT_ADULT_STAGE_2_DAYS),
        ]);
        let minor = HashMap::from([
            (ProcedureField::SpdpReceipt, LIMIT_SPDP_DAYS),
            (ProcedureField::FileStage1, LIMIT_MINOR_FILE_STAGE_1_DAYS),
            (ProcedureField::P18P19, LIMIT_MINOR_P18_P19_DAYS),
            (ProcedureField::P21, LIMIT_MINOR_P21_DAYS),
            (ProcedureField::Stage2, LIMIT_MINOR_STAGE_2_DAYS),
        ]);

        Self {
            limits: HashMap::from([
                (SubjectCategory::Adult, adult),
                (SubjectCategory::Minor, minor),
            ]),
        }
    }

    /// Day limit for a category/field pair
    pub fn limit(&self, category: SubjectCategory, field: ProcedureField) -> Option<u32> {
        self.limits.get(&category)?.get(&field).copied()
    }
}

/// Outcome of a single evaluation, before collapsing to a classification.
///
/// Keeps the two fail-open causes apart so callers can report data quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Evaluated {
        field: ProcedureField,
        overdue: bool,
        elapsed_days: i64,
        limit_days: u32,
    },
    DateUnavailable(ParseFailure),
    UnknownField,
}

impl Evaluation {
    pub fn is_overdue(&self) -> bool {
        matches!(self, Evaluation::Evaluated { overdue: true, .. })
    }

    pub fn classification(&self) -> OverdueClassification {
        OverdueClassification::from_overdue(self.is_overdue())
    }

    pub fn status(&self) -> &'static str {
        match self {
            Evaluation::Evaluated { .. } => "evaluated",
            Evaluation::DateUnavailable(_) => "date_unavailable",
            Evaluation::UnknownField => "unknown_field",
        }
    }
}

/// Today's date on the host's local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole calendar days from `date` to `today` (negative for future dates)
pub fn elapsed_days(date: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(date).num_days()
}

/// Overdue check against an explicit "today"
pub fn is_overdue_on(date: NaiveDate, limit_days: u32, today: NaiveDate) -> bool {
    elapsed_days(date, today) > i64::from(limit_days)
}

/// Overdue check against the current local date
pub fn is_overdue(date: NaiveDate, limit_days: u32) -> bool {
    is_overdue_on(date, limit_days, today())
}

/// Classify using the standard table, against the current local date
pub fn classify<R: Into<RawDate>>(
    raw: R,
    field: &str,
    category: SubjectCategory,
) -> OverdueClassification {
    DeadlinePolicy::standard().classify(raw, field, category)
}

/// Deadline policy bound to a limit table
#[derive(Debug, Clone, Copy)]
pub struct DeadlinePolicy {
    table: &'static DeadlineTable,
}

impl DeadlinePolicy {
    pub fn new(table: &'static DeadlineTable) -> Self {
        Self { table }
    }

    /// Policy over the process-wide table
    pub fn standard() -> Self {
        Self::new(&DEADLINE_TABLE)
    }

    pub fn limit_for(&self, category: SubjectCategory, field: ProcedureField) -> Option<u32> {
        self.table.limit(category, field)
    }

    /// Full evaluation of a raw date and field identifier as of `today`
    ///
    /// A bad date wins over an unknown field.
    pub fn evaluate_on<R: Into<RawDate>>(
        &self,
        raw: R,
        field: &str,
        category: SubjectCategory,
        today: NaiveDate,
    ) -> Evaluation {
        if let Some(resolved) = ProcedureField::from_identifier(field) {
            return self.evaluate_field_on(raw, resolved, category, today);
        }

        match parse(raw) {
            Ok(_) => {
                debug!(field = %field, "Unknown procedure field, not flagging");
                Evaluation::UnknownField
            }
            Err(failure) => date_unavailable(field, failure),
        }
    }

    /// Full evaluation as of the current local date
    pub fn evaluate<R: Into<RawDate>>(
        &self,
        raw: R,
        field: &str,
        category: SubjectCategory,
    ) -> Evaluation {
        self.evaluate_on(raw, field, category, today())
    }

    /// Evaluation of a raw date for an already-resolved field as of `today`
    pub fn evaluate_field_on<R: Into<RawDate>>(
        &self,
        raw: R,
        field: ProcedureField,
        category: SubjectCategory,
        today: NaiveDate,
    ) -> Evaluation {
        match parse(raw) {
            Ok(date) => self.evaluate_date_on(date, field, category, today),
            Err(failure) => date_unavailable(field.as_str(), failure),
        }
    }

    pub fn evaluate_field<R: Into<RawDate>>(
        &self,
        raw: R,
        field: ProcedureField,
        category: SubjectCategory,
    ) -> Evaluation {
        self.evaluate_field_on(raw, field, category, today())
    }

    /// Evaluation for an already-parsed date and resolved field
    pub fn evaluate_date_on(
        &self,
        date: NaiveDate,
        field: ProcedureField,
        category: SubjectCategory,
        today: NaiveDate,
    ) -> Evaluation {
        let Some(limit_days) = self.limit_for(category, field) else {
            return Evaluation::UnknownField;
        };

        Evaluation::Evaluated {
            field,
            overdue: is_overdue_on(date, limit_days, today),
            elapsed_days: elapsed_days(date, today),
            limit_days,
        }
    }

    /// Collapse an evaluation into the rendering/validation result
    pub fn classify<R: Into<RawDate>>(
        &self,
        raw: R,
        field: &str,
        category: SubjectCategory,
    ) -> OverdueClassification {
        self.evaluate(raw, field, category).classification()
    }

    /// Same as [`classify`](Self::classify) for an already-resolved field
    pub fn classify_field<R: Into<RawDate>>(
        &self,
        raw: R,
        field: ProcedureField,
        category: SubjectCategory,
    ) -> OverdueClassification {
        self.evaluate_field(raw, field, category).classification()
    }
}

fn date_unavailable(field: &str, failure: ParseFailure) -> Evaluation {
    debug!(field = %field, reason = failure.as_str(), "Date unavailable, not flagging");
    Evaluation::DateUnavailable(failure)
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
