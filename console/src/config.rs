use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use platform_api::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_GEOCODE_URL};
use platform_session::{DEFAULT_SESSION_FILE, SESSION_FILE_ENV};
use products_hr::dashboard::DEFAULT_BUDGET;
use url::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: Url,
    pub session_file: PathBuf,
    pub geocode_url: Url,
    pub geocode_api_key: Option<String>,
    pub http_timeout: Duration,
    pub budget: f64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = var("HRM_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let base_url = Url::parse(&base_url).context("invalid HRM_API_BASE_URL")?;

        let session_file = var(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let geocode_url = var("HRM_GEOCODE_URL").unwrap_or_else(|| DEFAULT_GEOCODE_URL.into());
        let geocode_url = Url::parse(&geocode_url).context("invalid HRM_GEOCODE_URL")?;

        let http_timeout = match var("HRM_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().context("invalid HRM_HTTP_TIMEOUT_SECS")?;
                if secs == 0 {
                    return Err(anyhow!("HRM_HTTP_TIMEOUT_SECS must be at least 1"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        let budget = match var("HRM_COMPANY_BUDGET") {
            Some(raw) => raw.parse().context("invalid HRM_COMPANY_BUDGET")?,
            None => DEFAULT_BUDGET,
        };

        Ok(Self {
            base_url,
            session_file,
            geocode_url,
            geocode_api_key: var("HRM_GEOCODE_API_KEY"),
            http_timeout,
            budget,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.http_timeout)
    }
}
