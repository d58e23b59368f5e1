use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_secret: String,
    pub require_api_key: bool,
    pub sync_url: Option<String>,
    pub store_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            api_secret: env::var("API_SECRET")
                .unwrap_or_else(|_| "my_secret_key".to_string()),
            // Off by default; flip on to require x-api-key on writes.
            require_api_key: env::var("REQUIRE_API_KEY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            sync_url: env::var("SYNC_URL").ok(),
            store_path: env::var("STORE_PATH").ok(),
        }
    }
}
