pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            api_base: std::env::var("RECOMMENDER_API_BASE")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// A base URL given on the command line wins over the environment.
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        self
    }
}
