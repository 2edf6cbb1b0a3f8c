use std::env;
use std::path::PathBuf;

/// Fallback signing secret for local development and tests.
const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";

/// Default listen address when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the service's entire configuration state. Loaded once at startup and
/// never mutated afterwards; handlers and the `Principal` extractor pull it out
/// of the shared state via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local authentication bypass and log format.
    pub env: Env,
    // Secret used to verify the HS256 signature of incoming bearer tokens.
    pub jwt_secret: String,
    // Socket address the HTTP listener binds to.
    pub bind_addr: String,
    // Optional JSON file used to seed the student directory and enrollment store.
    pub seed_file: Option<PathBuf>,
}

/// Env
///
/// Runtime context. `Local` enables developer conveniences (pretty logs, the
/// `x-student-id` bypass, the fallback signing secret) and is only selected by
/// an explicit `APP_ENV=local`. Anything else, including an unset variable,
/// is `Production`: hardened authentication and JSON logs.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Non-panicking configuration for test state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            seed_file: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in `Env::Production` when `JWT_SECRET` is not set, so the service
    /// never starts with a guessable signing secret.
    pub fn load() -> Self {
        // Local mode must be asked for by name; a missing APP_ENV stays hardened.
        let env = match env::var("APP_ENV").as_deref() {
            Ok("local") => Env::Local,
            _ => Env::Production,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let seed_file = env::var("SEED_FILE")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            env,
            jwt_secret,
            bind_addr,
            seed_file,
        }
    }
}
