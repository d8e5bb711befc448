//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::cli::CliArgs;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT token expiration time in hours
    pub jwt_expiration_hours: u64,

    /// Allow password signup
    pub allow_signup: bool,

    /// Storage and logging settings for the core library
    pub config_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            max_request_size: 1024 * 1024,
            jwt_secret: String::new(),
            jwt_expiration_hours: 24,
            allow_signup: true,
            config_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables.
    /// CLI arguments take precedence over environment variables.
    pub fn from_cli_and_env(cli_args: CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("KINSHIP_PORT") {
            config.port = port.parse()?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("KINSHIP_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        if let Some(jwt_secret) = cli_args.jwt_secret {
            config.jwt_secret = jwt_secret;
        } else if let Ok(jwt_secret) = env::var("KINSHIP_JWT_SECRET") {
            config.jwt_secret = jwt_secret;
        }

        if let Some(exp_hours) = cli_args.jwt_expiration_hours {
            config.jwt_expiration_hours = exp_hours;
        } else if let Ok(exp_hours) = env::var("KINSHIP_JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = exp_hours.parse()?;
        }

        if let Some(allow_signup) = cli_args.allow_signup {
            config.allow_signup = allow_signup;
        } else if let Ok(allow_signup) = env::var("KINSHIP_ALLOW_SIGNUP") {
            config.allow_signup = allow_signup.parse().unwrap_or(true);
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file = Some(config_path);
        } else if let Ok(config_path) = env::var("KINSHIP_CONFIG_FILE") {
            config.config_file = Some(PathBuf::from(config_path));
        }

        Ok(config)
    }

    /// Fill in a random JWT secret when none was configured.
    ///
    /// Returns true if one was generated.
    pub fn ensure_jwt_secret(&mut self) -> bool {
        if !self.jwt_secret.is_empty() {
            return false;
        }
        self.jwt_secret = Self::generate_jwt_secret();
        true
    }

    /// Generate a secure random JWT secret
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;
        use rand::distr::Alphanumeric;
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_win() {
        let args = CliArgs {
            port: Some(8181),
            allow_signup: Some(false),
            jwt_secret: Some("from-cli".to_string()),
            jwt_expiration_hours: Some(2),
            config_file: Some(PathBuf::from("kinship.toml")),
            max_request_size: Some(4096),
            log_level: None,
        };

        let config = ServerConfig::from_cli_and_env(args).unwrap();
        assert_eq!(config.port, 8181);
        assert!(!config.allow_signup);
        assert_eq!(config.jwt_secret, "from-cli");
        assert_eq!(config.jwt_expiration_hours, 2);
        assert_eq!(config.max_request_size, 4096);
        assert_eq!(config.config_file, Some(PathBuf::from("kinship.toml")));
    }

    #[test]
    fn test_ensure_jwt_secret_keeps_configured_value() {
        let mut config = ServerConfig {
            jwt_secret: "configured".to_string(),
            ..Default::default()
        };
        assert!(!config.ensure_jwt_secret());
        assert_eq!(config.jwt_secret, "configured");

        let mut config = ServerConfig::default();
        assert!(config.ensure_jwt_secret());
        assert_eq!(config.jwt_secret.len(), 64);
    }

    #[test]
    fn test_generated_secret() {
        let a = ServerConfig::generate_jwt_secret();
        let b = ServerConfig::generate_jwt_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
