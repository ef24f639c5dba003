//! Config subcommand handlers.

use std::collections::HashMap;
use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretKindArg};
use crate::config::{self, Config, Defaults, Profile, SecretKind};
use crate::error::CliError;
use crate::output;

const SETTABLE_KEYS: &str =
    "server, auth_mode, token_env, email, author, ca_cert, insecure, timeout";

// ── Helpers ─────────────────────────────────────────────────────────

/// Render the config as TOML-ish text with secrets masked.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out, "\n[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "refresh_interval = {}", cfg.defaults.refresh_interval);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out, "\n[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        let _ = writeln!(out, "auth_mode = \"{}\"", p.auth_mode);
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref author) = p.author {
            let _ = writeln!(out, "author = \"{author}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Copy of the config with plaintext secrets replaced, for structured output.
fn redacted(cfg: &Config) -> Config {
    let mask = |s: &Option<String>| s.as_ref().map(|_| "****".to_owned());
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
            refresh_interval: cfg.defaults.refresh_interval,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                p.token = mask(&p.token);
                p.password = mask(&p.password);
                (name.clone(), p)
            })
            .collect(),
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_secret(label: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(format!("{label}: ")).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: label.to_lowercase(),
            reason: "value cannot be empty".into(),
        });
    }
    Ok(secret)
}

/// Offer the keyring or plaintext config for a secret.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn store_or_keep(
    profile_name: &str,
    kind: SecretKind,
    secret: String,
    label: &str,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {}?", label.to_lowercase()))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        statusdeck_config::store_secret(profile_name, kind, &secret)?;
        eprintln!("   ✓ {label} stored in system keyring");
        Ok(None)
    } else {
        // The keyring is read before plaintext config; drop any older entry.
        statusdeck_config::delete_secret(profile_name, kind)?;
        Ok(Some(secret))
    }
}

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

/// Apply one `config set` key to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "server" => {
            statusdeck_config::parse_server_url(&value)?;
            profile.server = value;
        }
        "auth_mode" | "auth-mode" => {
            if !matches!(value.as_str(), "token" | "password") {
                return Err(CliError::Validation {
                    field: "auth_mode".into(),
                    reason: "must be 'token' or 'password'".into(),
                });
            }
            profile.auth_mode = value;
        }
        "token_env" | "token-env" => profile.token_env = Some(value),
        "email" => profile.email = Some(value),
        "author" => profile.author = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(parse_flag("insecure", &value, "must be 'true' or 'false'")?);
        }
        "timeout" => {
            profile.timeout = Some(parse_flag("timeout", &value, "must be a number (seconds)")?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {SETTABLE_KEYS}"),
            });
        }
    }
    Ok(())
}

// ── Init wizard ─────────────────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("statusdeck configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let server: String = Input::new()
        .with_prompt("Server URL")
        .default(Profile::default().server)
        .validate_with(|input: &String| {
            statusdeck_config::parse_server_url(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    let auth_choices = &["API token (recommended)", "Email and password"];
    let auth_selection = Select::new()
        .with_prompt("Authentication method")
        .items(auth_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        server,
        ..Profile::default()
    };

    if auth_selection == 0 {
        let token = prompt_secret("Token")?;
        profile.auth_mode = "token".into();
        profile.token = store_or_keep(&profile_name, SecretKind::Token, token, "Token")?;
    } else {
        let email: String = Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_err)?;
        let password = prompt_secret("Password")?;
        profile.auth_mode = "password".into();
        profile.email = Some(email);
        profile.password =
            store_or_keep(&profile_name, SecretKind::Password, password, "Password")?;
    }

    let author: String = Input::new()
        .with_prompt("Author name for updates (blank uses your account name)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    if !author.trim().is_empty() {
        profile.author = Some(author.trim().to_owned());
    }

    // Merge into any existing config rather than replacing other profiles.
    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Test it: statusdeck whoami");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            config::save_config(&cfg)?;
            output::notice(&format!("✓ Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                output::notice("No profiles configured. Run: statusdeck config init", global.quiet);
                return Ok(());
            }
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let lines: Vec<_> = names
                .into_iter()
                .map(|name| {
                    let marker = if name == default { " *" } else { "" };
                    format!("{name}{marker}")
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::notice(&format!("✓ Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret { kind, target } => {
            let cfg = config::load_config_or_default();
            let profile_name = target.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }

            let (kind, label) = match kind {
                SecretKindArg::Token => (SecretKind::Token, "Token"),
                SecretKindArg::Password => (SecretKind::Password, "Password"),
            };
            let secret = prompt_secret(label)?;
            statusdeck_config::store_secret(&profile_name, kind, &secret)?;
            output::notice(
                &format!("✓ {label} stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                server: "https://status.example.com".into(),
                token: Some("s3cret".into()),
                author: Some("On-call".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn show_masks_secrets() {
        let text = format_config_redacted(&sample());
        assert!(text.contains("[profiles.prod]"));
        assert!(text.contains("token = \"****\""));
        assert!(text.contains("author = \"On-call\""));
        assert!(!text.contains("s3cret"));

        let json = serde_json::to_string(&redacted(&sample())).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("****"));
    }

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_key(&mut profile, "server", "https://status.example.com".into()).unwrap();
        set_key(&mut profile, "timeout", "10".into()).unwrap();
        set_key(&mut profile, "insecure", "true".into()).unwrap();
        set_key(&mut profile, "auth-mode", "password".into()).unwrap();
        assert_eq!(profile.server, "https://status.example.com");
        assert_eq!(profile.timeout, Some(10));
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.auth_mode, "password");
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(matches!(
            set_key(&mut profile, "timeout", "soon".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut profile, "auth_mode", "cookie".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut profile, "colour", "red".into()),
            Err(CliError::Validation { .. })
        ));
    }
}
