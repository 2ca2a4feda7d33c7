use std::env;

/// Default token lifetime when TOKEN_TTL_SECS is not set: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls the logging format.
    pub env: Env,
    // Secret key used to sign and verify the session access tokens.
    pub token_secret: String,
    // Lifetime of an issued access token, in seconds.
    pub token_ttl_secs: u64,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, fallback secret) and production-grade settings (JSON logs, mandatory secret).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            token_secret: "super-secure-test-secret-value-local".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the fail-fast
    /// principle.
    ///
    /// # Panics
    /// Panics if TOKEN_SECRET is not set while running in Production. This prevents the
    /// application from starting with an insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // Token Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let token_secret = match env {
            Env::Production => {
                env::var("TOKEN_SECRET").expect("FATAL: TOKEN_SECRET must be set in production.")
            }
            // In local, we provide a fallback, though the developer should ideally set one.
            _ => env::var("TOKEN_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            env,
            token_secret,
            token_ttl_secs,
        }
    }
}
