//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::Value;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Overlay the top-level fields of `patch` onto `base`.
///
/// Both must be JSON objects. An `id` in the patch is ignored so the
/// target product cannot be swapped out from under an update.
pub fn merge_object(base: Value, patch: Value) -> Result<Value, CliError> {
    let Value::Object(mut base) = base else {
        return Err(CliError::Validation {
            field: "product".into(),
            reason: "expected a JSON object".into(),
        });
    };
    let Value::Object(patch) = patch else {
        return Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object of fields to change".into(),
        });
    };
    for (key, value) in patch {
        if key != "id" {
            base.insert(key, value);
        }
    }
    Ok(Value::Object(base))
}
