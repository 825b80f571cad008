use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::MenuError;
use crate::schedule::{Schedule, parse_schedule};

/// Reads the menu text from disk. PDFs go through `pdf-extract`, which
/// separates pages with newlines; anything else is read as plain text.
pub fn load_menu_text(path: &Path) -> Result<String, MenuError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        let bytes = fs::read(path)?;
        extract_pdf_text(&bytes)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, MenuError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| MenuError::Pdf(e.to_string()))
}

/// Loads and parses a menu file, returning the raw text alongside the
/// schedule so callers can look for a printed start date.
pub fn load_schedule(path: &Path) -> Result<(String, Schedule), MenuError> {
    let text = load_menu_text(path)?;
    let schedule = parse_schedule(&text);

    if schedule.is_empty() {
        warn!(path = %path.display(), "menu file produced an empty schedule");
    } else {
        info!(
            path = %path.display(),
            weeks = schedule.weeks.len(),
            days = schedule.day_count(),
            "loaded menu"
        );
    }
    Ok((text, schedule))
}
