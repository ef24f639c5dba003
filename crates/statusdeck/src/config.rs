//! CLI configuration: thin layer over `statusdeck_config` that applies the
//! `GlobalOpts` overrides (--server, --token, --insecure, --timeout, --author).

use secrecy::SecretString;

use statusdeck_core::{AuthCredentials, ControllerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use statusdeck_config::{
    Config, Defaults, Profile, SecretKind, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help, or "(none)".
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the `ControllerConfig` for this invocation.
///
/// With a matching profile, flags override its values and credentials fall
/// back to env/keyring/plaintext. Without one, `--server` and `--token` must
/// both be given.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let Some(profile) = cfg.profiles.get(&profile_name) else {
        if global.profile.is_some() {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        return config_from_flags(global, &profile_name, &cfg.defaults);
    };

    let profile = with_overrides(profile.clone(), global);
    let auth = match global.token {
        Some(ref token) => AuthCredentials::Token(SecretString::from(token.clone())),
        None => statusdeck_config::resolve_auth(&profile, &profile_name)?,
    };
    Ok(statusdeck_config::controller_config_with_auth(
        &profile,
        &cfg.defaults,
        auth,
    )?)
}

fn config_from_flags(
    global: &GlobalOpts,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ControllerConfig, CliError> {
    if global.server.is_none() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    let Some(ref token) = global.token else {
        return Err(CliError::NoCredentials {
            profile: profile_name.into(),
        });
    };

    let profile = with_overrides(Profile::default(), global);
    let auth = AuthCredentials::Token(SecretString::from(token.clone()));
    Ok(statusdeck_config::controller_config_with_auth(
        &profile, defaults, auth,
    )?)
}

fn with_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    if global.author.is_some() {
        profile.author.clone_from(&global.author);
    }
    profile
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use statusdeck_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["statusdeck"];
        argv.extend_from_slice(args);
        argv.push("whoami");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile_values() {
        let opts = global(&[
            "--server",
            "https://status.example.com",
            "--insecure",
            "--timeout",
            "5",
            "--author",
            "Jamie",
        ]);
        let profile = with_overrides(Profile::default(), &opts);
        let cfg = statusdeck_config::controller_config_with_auth(
            &profile,
            &Defaults::default(),
            AuthCredentials::Token(SecretString::from("t")),
        )
        .unwrap();

        assert_eq!(cfg.url.as_str(), "https://status.example.com/");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.author.as_deref(), Some("Jamie"));
    }

    #[test]
    fn flagless_profile_is_left_alone() {
        let opts = global(&[]);
        let mut profile = Profile::default();
        profile.timeout = Some(12);
        profile.author = Some("Ops".into());
        let merged = with_overrides(profile, &opts);
        assert_eq!(merged.timeout, Some(12));
        assert_eq!(merged.author.as_deref(), Some("Ops"));
        assert_eq!(merged.insecure, None);
    }

    #[test]
    fn profile_flag_wins_over_default_profile() {
        let cfg = Config::default();
        assert_eq!(active_profile_name(&global(&[]), &cfg), "default");
        assert_eq!(
            active_profile_name(&global(&["--profile", "prod"]), &cfg),
            "prod"
        );
    }

    #[test]
    fn server_without_token_needs_credentials() {
        let opts = global(&["--server", "http://localhost:3000"]);
        let err = config_from_flags(&opts, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }));
    }
}
