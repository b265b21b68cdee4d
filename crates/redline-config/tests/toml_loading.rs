//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use redline_config::{ConfigError, RedlineConfig};

fn jailed_figment() -> Figment {
    Figment::from(Serialized::defaults(RedlineConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("REDLINE_").split("__"))
}

#[test]
fn loads_author_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[author]
name = "Margaret Hamilton"
initials = "MH"
"#,
        )?;

        let config = RedlineConfig::from_figment(&jailed_figment()).expect("config loads");
        assert_eq!(config.author.name, "Margaret Hamilton");
        assert_eq!(config.author.initials, "MH");
        assert_eq!(config.display.excerpt_chars, 100);
        Ok(())
    });
}

#[test]
fn partial_display_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[display]
preview_chars = 40
",
        )?;

        let config = RedlineConfig::from_figment(&jailed_figment()).expect("config loads");
        assert_eq!(config.display.preview_chars, 40);
        assert_eq!(config.display.excerpt_chars, 100);
        assert_eq!(config.author.name, "AIM");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[author]
name = "From Toml"
"#,
        )?;
        jail.set_env("REDLINE_AUTHOR__NAME", "From Env");

        let config = RedlineConfig::from_figment(&jailed_figment()).expect("config loads");
        assert_eq!(config.author.name, "From Env");
        Ok(())
    });
}

#[test]
fn zero_excerpt_bound_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[display]
excerpt_chars = 0
",
        )?;

        let err = RedlineConfig::from_figment(&jailed_figment()).expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "display.excerpt_chars"));
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".redline")?;
        jail.create_file(
            ".redline/config.toml",
            r#"
[author]
name = "Project Reviewer"
"#,
        )?;

        let config = RedlineConfig::load().expect("config loads");
        assert_eq!(config.author.name, "Project Reviewer");
        Ok(())
    });
}
