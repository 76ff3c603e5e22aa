//! Type definitions for the deadline engine
//! Subject categories, procedure milestones, and overdue classifications

use serde::{Deserialize, Serialize};

use crate::utils::constants::OVERDUE_STYLE_HINT;

/// Age category of the suspect (kategori umur)
///
/// Determines which limit table applies. Absent or unrecognized labels
/// fall back to `Adult`, matching the column default `'Dewasa'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubjectCategory {
    /// Dewasa
    #[default]
    Adult,
    /// Anak
    Minor,
}

impl SubjectCategory {
    pub const ALL: [SubjectCategory; 2] = [SubjectCategory::Adult, SubjectCategory::Minor];

    /// Resolve a stored or submitted label, defaulting to `Adult`
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("anak") | Some("minor") => Self::Minor,
            _ => Self::Adult,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectCategory::Adult => "Adult",
            SubjectCategory::Minor => "Minor",
        }
    }

    /// Label as stored in the `kategori_umur` column
    pub fn source_label(&self) -> &'static str {
        match self {
            SubjectCategory::Adult => "Dewasa",
            SubjectCategory::Minor => "Anak",
        }
    }
}

/// Procedural milestone being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcedureField {
    #[serde(rename = "SPDP_RECEIPT")]
    SpdpReceipt,
    #[serde(rename = "FILE_STAGE_1")]
    FileStage1,
    #[serde(rename = "P18_P19")]
    P18P19,
    #[serde(rename = "P21")]
    P21,
    #[serde(rename = "STAGE_2")]
    Stage2,
}

impl ProcedureField {
    pub const ALL: [ProcedureField; 5] = [
        ProcedureField::SpdpReceipt,
        ProcedureField::FileStage1,
        ProcedureField::P18P19,
        ProcedureField::P21,
        ProcedureField::Stage2,
    ];

    /// Resolve a field identifier (case-insensitive).
    ///
    /// Accepts the canonical names, the `SPDP` alias, and the column keys
    /// used by the dashboard (`spdp`, `berkas_tahap_1`, `p18_p19`, `p21`,
    /// `tahap_2`, `spdp_tgl_terima`). Returns `None` for anything else.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "spdp_receipt" | "spdp" | "spdp_tgl_terima" => Some(Self::SpdpReceipt),
            "file_stage_1" | "berkas_tahap_1" => Some(Self::FileStage1),
            "p18_p19" => Some(Self::P18P19),
            "p21" => Some(Self::P21),
            "stage_2" | "tahap_2" => Some(Self::Stage2),
            _ => None,
        }
    }

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureField::SpdpReceipt => "SPDP_RECEIPT",
            ProcedureField::FileStage1 => "FILE_STAGE_1",
            ProcedureField::P18P19 => "P18_P19",
            ProcedureField::P21 => "P21",
            ProcedureField::Stage2 => "STAGE_2",
        }
    }

    /// Case column holding this milestone's date
    pub fn case_column(&self) -> &'static str {
        match self {
            ProcedureField::SpdpReceipt => "spdp_tgl_terima",
            ProcedureField::FileStage1 => "berkas_tahap_1",
            ProcedureField::P18P19 => "p18_p19",
            ProcedureField::P21 => "p21",
            ProcedureField::Stage2 => "tahap_2",
        }
    }

    /// Display label used in the dashboard header
    pub fn label(&self) -> &'static str {
        match self {
            ProcedureField::SpdpReceipt => "SPDP",
            ProcedureField::FileStage1 => "Berkas Tahap I",
            ProcedureField::P18P19 => "P-18/P-19",
            ProcedureField::P21 => "P-21",
            ProcedureField::Stage2 => "Tahap II",
        }
    }
}

impl std::fmt::Display for ProcedureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result handed to the rendering and validation callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverdueClassification {
    pub overdue: bool,
    /// `"overdue-cell"` when overdue, empty otherwise
    pub style_hint: &'static str,
}

impl OverdueClassification {
    pub const NOT_OVERDUE: Self = Self {
        overdue: false,
        style_hint: "",
    };

    pub fn from_overdue(overdue: bool) -> Self {
        if overdue {
            Self {
                overdue: true,
                style_hint: OVERDUE_STYLE_HINT,
            }
        } else {
            Self::NOT_OVERDUE
        }
    }
}
