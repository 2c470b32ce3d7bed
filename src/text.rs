//! Text file helpers shared by the project and SDK readers
//!
//! Visual Studio writes a UTF-8 byte order mark at the start of
//! `global.json`, `.deployment` and friends. Every reader goes through
//! [`read_text`] so parsers never see it.

use crate::error::{BuildpackError, BuildpackResult};
use std::path::Path;

/// UTF-8 byte order mark
pub const BOM: char = '\u{feff}';

/// Strip a leading byte order mark, if any
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BOM).unwrap_or(content)
}

/// Read a text file with its byte order mark removed
pub fn read_text(path: &Path) -> BuildpackResult<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| BuildpackError::io(format!("reading {}", path.display()), e))?;
    Ok(strip_bom(&content).to_string())
}
