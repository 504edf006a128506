use std::env;

pub struct Config {
    pub port: u16,
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            generator: GeneratorConfig::from_env(),
        }
    }
}

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Settings for the language-model server used by `/api/generate-json`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            username: None,
            password: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty and
    /// unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            base_url: non_empty("OLLAMA_BASE_URL").unwrap_or(defaults.base_url),
            model: non_empty("OLLAMA_MODEL").unwrap_or(defaults.model),
            temperature: non_empty("OLLAMA_TEMPERATURE")
                .and_then(|t| t.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite())
                .unwrap_or(defaults.temperature),
            max_tokens: non_empty("OLLAMA_MAX_TOKENS")
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(defaults.max_tokens),
            username: lookup("OLLAMA_USERNAME"),
            password: lookup("OLLAMA_PASSWORD"),
        }
    }
}
