// src/config.rs

/// Endpoint of the hosted catalog API, used when no override is set.
pub const DEFAULT_API_BASE_URL: &str = "https://saloon-e7dp.vercel.app/api/services";

const API_URL_ENV_VAR: &str = "SALONEX_API_URL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// Reads configuration from the environment. A `.env` file in the
    /// working directory is honored when present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        match std::env::var(API_URL_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => {
                log::info!("Using API endpoint from {}: {}", API_URL_ENV_VAR, url);
                Self {
                    api_base_url: url.trim().to_string(),
                }
            }
            _ => Self::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}
