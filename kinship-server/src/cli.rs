use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for kinship-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub allow_signup: Option<bool>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub config_file: Option<PathBuf>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("kinship-server")
            .version(kinship::VERSION)
            .author("Kinship Contributors")
            .about("HTTP API server for Kinship person and relationship records")
            .long_about(
                r#"Kinship Server exposes persons and the relationships between them as a
JSON REST API. Every data endpoint requires a bearer token; tokens are issued by
the signup and login endpoints or by any issuer sharing the JWT secret.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  kinship-server --port 8080
  kinship-server --config kinship.toml --allow-signup=false
  kinship-server --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: KINSHIP_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON file with storage and logging
settings. KINSHIP_ environment variables are applied on top of it.
Environment variable: KINSHIP_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("allow_signup")
                    .long("allow-signup")
                    .value_name("BOOL")
                    .help("Allow user registration")
                    .long_help(
                        "Allow new users to register accounts via the signup API.
Environment variable: KINSHIP_ALLOW_SIGNUP",
                    )
                    .value_parser(clap::value_parser!(bool)),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT signing secret")
                    .long_help(
                        "Secret used to sign and verify bearer tokens. A random
secret is generated when none is given, which invalidates tokens on restart.
Environment variable: KINSHIP_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration")
                    .value_name("HOURS")
                    .help("Token lifetime in hours")
                    .long_help(
                        "Lifetime of tokens issued by signup and login.
Environment variable: KINSHIP_JWT_EXPIRATION_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: KINSHIP_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            allow_signup: matches.get_one::<bool>("allow_signup").copied(),
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_hours: matches.get_one::<u64>("jwt_expiration").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    fn print_env_help() {
        println!("Kinship Server Environment Variables");
        println!("====================================");
        println!();
        println!("Server:");
        println!("  KINSHIP_PORT                    - Server port (default: 3000)");
        println!("  KINSHIP_MAX_REQUEST_SIZE        - Max request body size in bytes (default: 1MB)");
        println!("  KINSHIP_CONFIG_FILE             - Path to storage/logging config file");
        println!();
        println!("Authentication:");
        println!("  KINSHIP_JWT_SECRET              - JWT signing secret (auto-generated if not set)");
        println!("  KINSHIP_JWT_EXPIRATION_HOURS    - Token lifetime in hours (default: 24)");
        println!("  KINSHIP_ALLOW_SIGNUP            - Allow user registration (default: true)");
        println!();
        println!("Storage and logging (nested keys use a double underscore):");
        println!("  KINSHIP_STORAGE__ENGINE         - memory or rocksdb (default: memory)");
        println!("  KINSHIP_STORAGE__DATA_DIR       - Directory for on-disk storage");
        println!("  KINSHIP_STORAGE__NAMESPACE      - Database namespace (default: kinship)");
        println!("  KINSHIP_STORAGE__DATABASE       - Database name (default: main)");
        println!("  KINSHIP_LOGGING__LEVEL          - trace, debug, info, warn or error");
        println!("  KINSHIP_LOGGING__FORMAT         - default, compact or json");
        println!("  RUST_LOG                        - Overrides the log filter entirely");
    }
}
