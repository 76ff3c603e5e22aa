//! Constants Module - Single Source of Truth
//!
//! Semua konstanta batas waktu, format tanggal, dan daftar field
//! yang digunakan di seluruh aplikasi didefinisikan di sini.
//! Tidak ada hardcoded values di modul lain!

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "E-Kejaksaan Tracking System";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

// ============================================
// RENDERING
// ============================================

/// CSS class token emitted for an overdue table cell
pub const OVERDUE_STYLE_HINT: &str = "overdue-cell";

// ============================================
// DATE FORMATS - fixed priority order
// ============================================

/// ISO format used by HTML date inputs
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first format from manual entry and spreadsheet imports
pub const DAY_FIRST_DATE_FORMAT: &str = "%d-%m-%Y";

/// Formats tried by the date parser, first match wins
pub const DATE_FORMATS: [&str; 2] = [ISO_DATE_FORMAT, DAY_FIRST_DATE_FORMAT];

// ============================================
// DEADLINE LIMITS (calendar days)
// ============================================

/// SPDP receipt limit, same for both categories
pub const LIMIT_SPDP_DAYS: u32 = 25;

/// Berkas Tahap I - Dewasa
pub const LIMIT_ADULT_FILE_STAGE_1_DAYS: u32 = 6;
/// P-18/P-19 - Dewasa
pub const LIMIT_ADULT_P18_P19_DAYS: u32 = 10;
/// P-21 - Dewasa
pub const LIMIT_ADULT_P21_DAYS: u32 = 12;
/// Tahap II - Dewasa
pub const LIMIT_ADULT_STAGE_2_DAYS: u32 = 7;

/// Berkas Tahap I - Anak
pub const LIMIT_MINOR_FILE_STAGE_1_DAYS: u32 = 3;
/// P-18/P-19 - Anak
pub const LIMIT_MINOR_P18_P19_DAYS: u32 = 7;
/// P-21 - Anak
pub const LIMIT_MINOR_P21_DAYS: u32 = 10;
/// Tahap II - Anak
pub const LIMIT_MINOR_STAGE_2_DAYS: u32 = 5;

// ============================================
// CASE FIELDS
// ============================================

/// Case columns a client may update through the mutation path.
/// Anything else (id, created_at, ...) is rejected with 403.
pub const WRITABLE_CASE_FIELDS: [&str; 13] = [
    "nama_tersangka",
    "umur_tersangka",
    "kategori_umur",
    "pasal",
    "jpu",
    "spdp_tgl_terima",
    "spdp_ket_terima",
    "spdp_tgl_polisi",
    "spdp_ket_polisi",
    "berkas_tahap_1",
    "p18_p19",
    "p21",
    "tahap_2",
];

/// Check whether a case column is on the writable allow-list
pub fn is_writable_case_field(field: &str) -> bool {
    WRITABLE_CASE_FIELDS.contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writable_fields() {
        assert!(is_writable_case_field("berkas_tahap_1"));
        assert!(is_writable_case_field("kategori_umur"));
        assert!(!is_writable_case_field("created_at"));
        assert!(!is_writable_case_field("id"));
        assert!(!is_writable_case_field("BERKAS_TAHAP_1"));
    }

    #[test]
    fn test_iso_format_comes_first() {
        assert_eq!(DATE_FORMATS[0], ISO_DATE_FORMAT);
        assert_eq!(DATE_FORMATS[1], DAY_FIRST_DATE_FORMAT);
    }
}
