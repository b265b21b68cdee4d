use redline_config::RedlineConfig;

const SECTIONS: [&str; 2] = ["AUTHOR", "DISPLAY"];

/// Load `.env`, layered config files and `REDLINE_*` overrides.
pub fn load_config() -> anyhow::Result<RedlineConfig> {
    let config = RedlineConfig::load_with_dotenv()?;
    for warning in config_warnings(std::env::vars().map(|(key, _)| key)) {
        tracing::warn!("{warning}");
    }
    tracing::debug!(author = %config.author.name, "configuration loaded");
    Ok(config)
}

/// Flag env keys that look like config overrides but use a single
/// underscore after the section name, which figment silently ignores.
fn config_warnings(keys: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut warnings = Vec::new();
    for key in keys {
        let Some(rest) = key.strip_prefix("REDLINE_") else {
            continue;
        };
        for section in SECTIONS {
            let Some(field) = rest.strip_prefix(section) else {
                continue;
            };
            if field.starts_with('_') && !field.starts_with("__") {
                warnings.push(format!(
                    "ignoring {key}: use REDLINE_{section}__{} to set {}.{}",
                    &field[1..],
                    section.to_ascii_lowercase(),
                    field[1..].to_ascii_lowercase()
                ));
            }
        }
    }
    warnings
}
