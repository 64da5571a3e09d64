//! The `explain` command: display documentation for diagnostic codes.

use posit_diagnostic::{ErrorCode, ErrorDocs};

use super::CliError;

/// Look up the documentation for an error code string such as `E2001`.
pub fn explain_error(code_str: &str) -> Result<String, CliError> {
    let code = code_str
        .parse::<ErrorCode>()
        .map_err(|()| CliError::UnknownCode(code_str.to_string()))?;
    let doc = ErrorDocs::get(code).ok_or(CliError::Undocumented(code))?;
    let mut out = doc.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
