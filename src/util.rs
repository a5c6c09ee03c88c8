//! Private utility module
use std::path::Path;

/// The file name suffixes recognized for MINC volumes.
const MINC_SUFFIXES: &[&str] = &[".mnc", ".mnc2"];

/// Check whether the file name carries a recognized MINC suffix,
/// case-insensitively. A name consisting of nothing but the suffix does
/// not qualify.
pub fn is_minc_file_name<P: AsRef<Path>>(path: P) -> bool {
    let name = match path.as_ref().file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_lowercase(),
        None => return false,
    };
    MINC_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix) && name.len() > suffix.len())
}
