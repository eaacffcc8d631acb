//! CLI configuration: thin wrapper around `shopfront_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` overrides (--api-url, --insecure, --timeout).

use clap::parser::ValueSource;
use clap::{ArgMatches, ValueEnum};
use shopfront_core::CatalogConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use shopfront_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default,
    profile_to_catalog_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build a `CatalogConfig` from the config file, profile, and flags.
///
/// Flags win over the profile, the profile over `[defaults]`. Without a
/// config file the built-in local API URL is used. Naming a profile that
/// does not exist is an error.
pub fn resolve_catalog_config(
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<CatalogConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => Profile::default(),
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(profile_to_catalog_config(&profile, &cfg.defaults)?)
}

/// Take `--output` and `--color` from `[defaults]` unless a flag or env
/// var set them.
pub fn apply_display_defaults(
    global: &mut GlobalOpts,
    matches: &ArgMatches,
    defaults: &Defaults,
) -> Result<(), CliError> {
    if is_default(matches, "output") {
        global.output = parse_setting::<OutputFormat>("defaults.output", &defaults.output)?;
    }
    if is_default(matches, "color") {
        global.color = parse_setting::<ColorMode>("defaults.color", &defaults.color)?;
    }
    Ok(())
}

fn is_default(matches: &ArgMatches, id: &str) -> bool {
    matches!(
        matches.value_source(id),
        None | Some(ValueSource::DefaultValue)
    )
}

fn parse_setting<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unsupported value '{value}'"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    use crate::cli::Cli;
    use clap::{CommandFactory, FromArgMatches};
    use shopfront_core::TlsVerification;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["shopfront"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["products", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn with_profile(name: &str, url: &str) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            name.into(),
            Profile {
                api_url: url.into(),
                timeout: Some(12),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn falls_back_to_local_api_without_config() {
        let resolved = resolve_catalog_config(&Config::default(), &global(&[])).unwrap();
        assert_eq!(resolved.api_url.as_str(), "http://localhost:8080/");
        assert_eq!(resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_profile() {
        let cfg = with_profile("default", "http://shop.internal:3000");
        let resolved = resolve_catalog_config(
            &cfg,
            &global(&["--api-url", "https://other.example.com", "-k", "--timeout", "3"]),
        )
        .unwrap();
        assert_eq!(resolved.api_url.host_str(), Some("other.example.com"));
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let cfg = with_profile("default", "http://shop.internal:3000");
        let resolved = resolve_catalog_config(&cfg, &global(&[])).unwrap();
        assert_eq!(resolved.api_url.port(), Some(3000));
        assert_eq!(resolved.timeout, Duration::from_secs(12));
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let cfg = with_profile("default", "http://shop.internal:3000");
        let err = resolve_catalog_config(&cfg, &global(&["--profile", "prod"])).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "default");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    fn parse_with_matches(args: &[&str]) -> (GlobalOpts, ArgMatches) {
        let mut argv = vec!["shopfront"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["products", "list"]);
        let matches = Cli::command().try_get_matches_from(argv).unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        (cli.global, matches)
    }

    fn json_defaults() -> Defaults {
        Defaults {
            output: "json".into(),
            color: "never".into(),
            ..Defaults::default()
        }
    }

    #[test]
    fn config_defaults_fill_unset_display_flags() {
        let (mut global, matches) = parse_with_matches(&[]);
        apply_display_defaults(&mut global, &matches, &json_defaults()).unwrap();
        assert!(matches!(global.output, OutputFormat::Json));
        assert!(matches!(global.color, ColorMode::Never));
    }

    #[test]
    fn explicit_display_flags_beat_config_defaults() {
        let (mut global, matches) = parse_with_matches(&["-o", "yaml", "--color", "always"]);
        apply_display_defaults(&mut global, &matches, &json_defaults()).unwrap();
        assert!(matches!(global.output, OutputFormat::Yaml));
        assert!(matches!(global.color, ColorMode::Always));
    }

    #[test]
    fn unknown_default_output_is_rejected() {
        let (mut global, matches) = parse_with_matches(&[]);
        let defaults = Defaults {
            output: "xml".into(),
            ..Defaults::default()
        };
        let err = apply_display_defaults(&mut global, &matches, &defaults).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "defaults.output"));
    }
}
