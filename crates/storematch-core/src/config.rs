//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_LEXICAL__PROFILE=lenient`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Named lexical threshold sets. Both are kept until one is settled on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexicalProfile {
    /// name 0.2 / address 0.1
    #[default]
    Standard,
    /// name 0.4 / address 0.2
    Lenient,
}

impl LexicalProfile {
    /// `(name_threshold, address_threshold)`
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            LexicalProfile::Standard => (0.2, 0.1),
            LexicalProfile::Lenient => (0.4, 0.2),
        }
    }
}

impl std::str::FromStr for LexicalProfile {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(LexicalProfile::Standard),
            "lenient" => Ok(LexicalProfile::Lenient),
            other => Err(format!("unknown lexical profile '{other}' (expected standard|lenient)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub path: String,
}

impl Default for RegistrySettings {
    fn default() -> Self { Self { path: "data/stores.json".to_string() } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalSettings {
    pub profile: LexicalProfile,
    /// Overrides the profile's name threshold when set.
    pub name_threshold: Option<f64>,
    /// Overrides the profile's address threshold when set.
    pub address_threshold: Option<f64>,
    /// Char offset that adds a full point of distance to a match.
    pub distance: usize,
    /// Attach a singular `store` field to definitive JSON responses.
    pub attach_store_alias: bool,
}

impl Default for LexicalSettings {
    fn default() -> Self {
        Self { profile: LexicalProfile::Standard, name_threshold: None, address_threshold: None, distance: 100, attach_store_alias: false }
    }
}

impl LexicalSettings {
    pub fn name_threshold(&self) -> f64 { self.name_threshold.unwrap_or(self.profile.thresholds().0) }
    pub fn address_threshold(&self) -> f64 { self.address_threshold.unwrap_or(self.profile.thresholds().1) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticSettings {
    pub strict_threshold: f64,
    pub wide_threshold: f64,
    pub strict_top_k: usize,
    pub wide_top_k: usize,
    /// Score multiplier applied when only an address was supplied.
    pub damping: f64,
}

impl Default for SemanticSettings {
    fn default() -> Self {
        Self { strict_threshold: 0.85, wide_threshold: 0.7, strict_top_k: 1, wide_top_k: 3, damping: 0.7 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    #[default]
    OpenAi,
    Fake,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub dimension: usize,
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::OpenAi,
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            dimension: 1536,
            batch_size: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorProviderKind {
    #[default]
    Upstash,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorSettings {
    pub provider: VectorProviderKind,
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Typed view of the whole configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub lexical: LexicalSettings,
    pub semantic: SemanticSettings,
    pub embedding: EmbeddingSettings,
    pub vector: VectorSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let s = self.settings()?;
        for (key, v) in [
            ("lexical.name_threshold", s.lexical.name_threshold()),
            ("lexical.address_threshold", s.lexical.address_threshold()),
            ("semantic.strict_threshold", s.semantic.strict_threshold),
            ("semantic.wide_threshold", s.semantic.wide_threshold),
            ("semantic.damping", s.semantic.damping),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::InvalidConfig(format!("{key} must be within [0, 1], got {v}")));
            }
        }
        if s.semantic.strict_top_k == 0 || s.semantic.wide_top_k == 0 {
            return Err(Error::InvalidConfig("semantic top_k must be at least 1".to_string()));
        }
        if s.lexical.distance == 0 {
            return Err(Error::InvalidConfig("lexical.distance must be at least 1".to_string()));
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
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
