use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            api_token: env::var("API_TOKEN").ok().filter(|v| !v.is_empty()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }
}
