/// Connection settings for the reasoning-service endpoint.
#[derive(Debug, Clone)]
pub struct ReasoningConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl ReasoningConfig {
    /// Defaults with environment overrides (ATTIRE_REASONING_URL,
    /// ATTIRE_REASONING_TIMEOUT_SECS).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("ATTIRE_REASONING_URL") {
            config.base_url = url;
        }
        if let Ok(raw) = std::env::var("ATTIRE_REASONING_TIMEOUT_SECS") {
            if let Ok(secs) = raw.parse() {
                config.timeout_secs = secs;
            }
        }
        config
    }
}
