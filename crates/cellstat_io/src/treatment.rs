use crate::error::{IoError, Result};
use std::path::Path;

const TREATMENT_MARKER: &str = "treat=";

/// Treatment of a run, taken from its file name.
///
/// Run files are named as `+`-separated `key=value` segments; the treatment is
/// the first segment containing `treat=`, returned verbatim.
pub fn extract_treatment<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .ok_or_else(|| IoError::not_found(format!("file name of {}", path.display())))?;
    name.split('+')
        .find(|segment| segment.contains(TREATMENT_MARKER))
        .map(str::to_string)
        .ok_or_else(|| {
            IoError::not_found(format!("treatment segment in {}", path.display()))
        })
}
