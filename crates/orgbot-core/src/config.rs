//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g. `APP_LLM__MODEL`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.5;
pub const EXCERPT_CHARS_RANGE: std::ops::RangeInclusive<usize> = 1..=1500;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads the configuration files found in `base_dir`. Missing files are skipped.
    pub fn load_from(base_dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts and validates the typed settings tree.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Resolves a configured data path against the directory the config was loaded from.
    pub fn data_path(&self, configured: &str) -> PathBuf {
        resolve_with_base(&self.base_dir, configured)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub assistant: AssistantSettings,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    pub knowledge_base: String,
    pub structured_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub top_k: usize,
    pub min_similarity: f32,
    pub excerpt_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub classifier_temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    pub brand: String,
    pub domain_terms: Vec<String>,
    pub greetings: Vec<String>,
}

/// Toggles for the optional routing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub hr_routing: bool,
    pub domain_gate: bool,
    pub greeting_shortcut: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { hr_routing: true, domain_gate: true, greeting_shortcut: true }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings {
                knowledge_base: "data/knowledge_base.json".to_string(),
                structured_data: "data/structured_data.json".to_string(),
            },
            search: SearchSettings { top_k: 4, min_similarity: 0.02, excerpt_chars: 1500 },
            llm: LlmSettings {
                base_url: "http://localhost:11434".to_string(),
                model: "gemma3:1b".to_string(),
                temperature: 0.7,
                classifier_temperature: 0.0,
                timeout_secs: 60,
            },
            assistant: AssistantSettings {
                brand: "Fanalca".to_string(),
                domain_terms: [
                    "fanalca", "empresa", "compañía", "compania", "grupo", "honda", "motocicletas",
                    "autos", "autopartes", "tubos", "acero", "ambiental", "fanalvias", "negocios",
                    "fundación", "fundacion", "sostenibilidad", "misión", "mision", "visión",
                    "vision", "valores", "propósito", "proposito", "historia",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                greetings: [
                    "hola", "holi", "hey", "buenas", "buenos días", "buenos dias", "buenas tardes",
                    "buenas noches", "saludos", "qué tal", "que tal", "hola qué tal", "hola que tal",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            features: FeatureFlags::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        for (name, t) in [
            ("llm.temperature", self.llm.temperature),
            ("llm.classifier_temperature", self.llm.classifier_temperature),
        ] {
            if !TEMPERATURE_RANGE.contains(&t) {
                return Err(Error::InvalidConfig(format!("{name} must be within [0.0, 1.5], got {t}")));
            }
        }
        if self.search.top_k == 0 {
            return Err(Error::InvalidConfig("search.top_k must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.search.min_similarity) {
            return Err(Error::InvalidConfig(format!(
                "search.min_similarity must be within [0, 1], got {}",
                self.search.min_similarity
            )));
        }
        if !EXCERPT_CHARS_RANGE.contains(&self.search.excerpt_chars) {
            return Err(Error::InvalidConfig(format!(
                "search.excerpt_chars must be within [1, 1500], got {}",
                self.search.excerpt_chars
            )));
        }
        if self.assistant.brand.trim().is_empty() {
            return Err(Error::InvalidConfig("assistant.brand must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
