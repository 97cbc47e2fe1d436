/**
 * Server Configuration
 *
 * This module loads the runtime configuration from environment variables,
 * with sensible defaults for local development.
 *
 * # Configuration Sources
 *
 * | Variable                            | Default   | Meaning                           |
 * |-------------------------------------|-----------|-----------------------------------|
 * | `SERVER_PORT`                       | 3000      | HTTP listen port                  |
 * | `KEYWARD_BCRYPT_COST`               | 12        | bcrypt work factor (4..=31)       |
 * | `KEYWARD_IDLE_TIMEOUT_MINUTES`      | 30        | session idle timeout              |
 * | `KEYWARD_ACTIVATION_TTL_HOURS`      | 48        | activation token lifetime         |
 * | `KEYWARD_RESET_TTL_MINUTES`         | 45        | reset token lifetime              |
 * | `KEYWARD_REVOKE_TOKENS_ON_DISABLE`  | true      | disable also drops live tokens    |
 * | `KEYWARD_SWEEP_INTERVAL_SECS`       | 300       | background purge cadence          |
 * | `KEYWARD_ADMIN_USERNAME`            | admin     | bootstrap admin username          |
 * | `KEYWARD_ADMIN_EMAIL`               | admin@localhost | bootstrap admin email       |
 * | `KEYWARD_ADMIN_PASSWORD`            | (built-in) | bootstrap admin password         |
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup: a
 * value that fails to parse falls back to its default with a warning.
 */

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use crate::auth::service::AuthPolicy;

/// Placeholder password the server boots with when none is configured.
/// Startup warns loudly whenever this is still in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "changeme-admin";

/// Runtime configuration for the server binary
#[derive(Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,
    /// bcrypt work factor, clamped to the valid 4..=31 range
    pub bcrypt_cost: u32,
    /// Sliding idle timeout for sessions
    pub idle_timeout: Duration,
    /// Activation token lifetime
    pub activation_ttl: Duration,
    /// Password reset token lifetime
    pub reset_ttl: Duration,
    /// Whether disabling an account drops its live tokens too
    pub revoke_tokens_on_disable: bool,
    /// How often the background sweeper purges idle sessions and
    /// expired tokens
    pub sweep_interval: std::time::Duration,
    /// Bootstrap admin account created at startup if absent
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Never fails: unparseable values fall back to their defaults with
    /// a warning in the log.
    pub fn from_env() -> Self {
        let bcrypt_cost = clamp_bcrypt_cost(env_parse("KEYWARD_BCRYPT_COST", bcrypt::DEFAULT_COST));

        Self {
            port: env_parse("SERVER_PORT", 3000),
            bcrypt_cost,
            idle_timeout: Duration::minutes(env_parse("KEYWARD_IDLE_TIMEOUT_MINUTES", 30)),
            activation_ttl: Duration::hours(env_parse("KEYWARD_ACTIVATION_TTL_HOURS", 48)),
            reset_ttl: Duration::minutes(env_parse("KEYWARD_RESET_TTL_MINUTES", 45)),
            revoke_tokens_on_disable: env_parse_bool("KEYWARD_REVOKE_TOKENS_ON_DISABLE", true),
            sweep_interval: std::time::Duration::from_secs(env_parse(
                "KEYWARD_SWEEP_INTERVAL_SECS",
                300,
            )),
            admin_username: std::env::var("KEYWARD_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_email: std::env::var("KEYWARD_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@localhost".to_string()),
            admin_password: std::env::var("KEYWARD_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }

    /// The token/disable policy slice of this configuration
    pub fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy {
            activation_ttl: self.activation_ttl,
            reset_ttl: self.reset_ttl,
            revoke_tokens_on_disable: self.revoke_tokens_on_disable,
        }
    }
}

// The admin password must not end up in logs via {:?}.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("idle_timeout", &self.idle_timeout)
            .field("activation_ttl", &self.activation_ttl)
            .field("reset_ttl", &self.reset_ttl)
            .field("revoke_tokens_on_disable", &self.revoke_tokens_on_disable)
            .field("sweep_interval", &self.sweep_interval)
            .field("admin_username", &self.admin_username)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

/// Parse an environment variable, falling back to `default` when the
/// variable is absent or unparseable
fn env_parse<T: FromStr + fmt::Display>(key: &str, default: T) -> T {
    parse_value(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_value<T: FromStr + fmt::Display>(key: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("{} has unparseable value {:?}, using {}", key, raw, default);
                default
            }
        },
    }
}

/// Boolean variables accept 1/0, true/false, yes/no, on/off
fn env_parse_bool(key: &str, default: bool) -> bool {
    parse_bool_value(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_bool_value(key: &str, raw: Option<&str>, default: bool) -> bool {
    match raw {
        None => default,
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                tracing::warn!("{} has unparseable value {:?}, using {}", key, other, default);
                default
            }
        },
    }
}

/// bcrypt only accepts cost 4..=31; anything else would panic inside the
/// hashing call
fn clamp_bcrypt_cost(cost: u32) -> u32 {
    if !(4..=31).contains(&cost) {
        let clamped = cost.clamp(4, 31);
        tracing::warn!("bcrypt cost {} outside 4..=31, clamping to {}", cost, clamped);
        return clamped;
    }
    cost
}
