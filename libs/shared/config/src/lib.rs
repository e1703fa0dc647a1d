use std::env;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_VIDEO_PROVIDER: &str = "runwayml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub catalog_path: Option<String>,
    pub vitals_seed: Option<u64>,
    pub video_generation_api_key: String,
    pub video_generation_provider: String,
    pub video_generation_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            catalog_path: None,
            vitals_seed: None,
            video_generation_api_key: String::new(),
            video_generation_provider: DEFAULT_VIDEO_PROVIDER.to_string(),
            video_generation_base_url: video_base_url_for(DEFAULT_VIDEO_PROVIDER).to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let video_generation_provider = env::var("VIDEO_GENERATION_PROVIDER")
            .unwrap_or_else(|_| {
                warn!("VIDEO_GENERATION_PROVIDER not set, using {}", DEFAULT_VIDEO_PROVIDER);
                DEFAULT_VIDEO_PROVIDER.to_string()
            });

        let config = Self {
            bind_addr: env::var("KIOSK_BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("KIOSK_BIND_ADDR not set, using {}", DEFAULT_BIND_ADDR);
                    DEFAULT_BIND_ADDR.to_string()
                }),
            catalog_path: env::var("KIOSK_CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            vitals_seed: match env::var("KIOSK_VITALS_SEED") {
                Ok(raw) => match raw.trim().parse::<u64>() {
                    Ok(seed) => Some(seed),
                    Err(_) => {
                        warn!("KIOSK_VITALS_SEED is not a number ({}), using entropy", raw);
                        None
                    }
                },
                Err(_) => None,
            },
            video_generation_api_key: env::var("VIDEO_GENERATION_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("VIDEO_GENERATION_API_KEY not set, using empty value");
                    String::new()
                }),
            video_generation_base_url: env::var("VIDEO_GENERATION_BASE_URL")
                .unwrap_or_else(|_| video_base_url_for(&video_generation_provider).to_string()),
            video_generation_provider,
        };

        if config.catalog_path.is_none() {
            warn!("KIOSK_CATALOG_PATH not set, using the built-in seed catalog");
        }

        config
    }

    pub fn is_video_generation_configured(&self) -> bool {
        !self.video_generation_api_key.is_empty()
            && !self.video_generation_base_url.is_empty()
    }
}

/// Base URL of the hosted video generation API for a provider name.
pub fn video_base_url_for(provider: &str) -> &'static str {
    match provider {
        "pika" => "https://api.pika.art/v1",
        _ => "https://api.runwayml.com/v1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_seed_catalog() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.catalog_path.is_none());
        assert!(!config.is_video_generation_configured());
    }

    #[test]
    fn test_video_base_url_for_provider() {
        assert_eq!(video_base_url_for("pika"), "https://api.pika.art/v1");
        assert_eq!(video_base_url_for("runwayml"), "https://api.runwayml.com/v1");
        assert_eq!(video_base_url_for("unknown"), "https://api.runwayml.com/v1");
    }

    #[test]
    fn test_video_generation_configured_with_key() {
        let config = AppConfig {
            video_generation_api_key: "key".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_video_generation_configured());
    }
}
