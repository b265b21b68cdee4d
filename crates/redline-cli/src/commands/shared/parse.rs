use redline_core::enums::ChangeKind;
use redline_core::errors::CoreError;

/// Parse a `--kind` value. Accepts snake_case, hyphenated, or label forms.
pub fn parse_kind(raw: &str) -> anyhow::Result<ChangeKind> {
    raw.parse::<ChangeKind>().map_err(|error| {
        anyhow::anyhow!(
            "{error} (expected one of: {})",
            ChangeKind::ALL
                .iter()
                .map(|kind| kind.as_str().replace('_', "-"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

/// Parse the kind of a mark to insert; only textual kinds qualify.
pub fn parse_insert_kind(raw: &str) -> anyhow::Result<ChangeKind> {
    let kind = parse_kind(raw)?;
    if !kind.is_textual() {
        return Err(CoreError::Validation(format!(
            "--kind must be insertion or deletion, got '{raw}'"
        ))
        .into());
    }
    Ok(kind)
}

/// Reject empty or whitespace-only values for a required text field.
pub fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}
