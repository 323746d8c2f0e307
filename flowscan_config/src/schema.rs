use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use flowscan_core::{EntityExtractor, ExtractorConfig, ScannerConfig, SubstringScanner};

const CONFIG_DIR: &str = "flowscan";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Config {
    /// `~/flowscan/config.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'flowscan init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {e}", path.display())
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        debug!(
            path = %path.display(),
            date_patterns = config.extractor.date_patterns.len(),
            amount_patterns = config.extractor.amount_patterns.len(),
            keyword_groups = config.extractor.keywords.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Load `path` when given, else the default file if it exists, else the
    /// built-in defaults.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::load_from(&default_path)
        } else {
            debug!("no config file found, using built-in defaults");
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn scanner(&self) -> SubstringScanner {
        SubstringScanner::with_config(self.scanner.clone())
    }

    #[must_use]
    pub fn extractor(&self) -> EntityExtractor {
        EntityExtractor::from_config(&self.extractor)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);
        Self::write_template(&config_path)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - scanner.case_sensitive: compare bytes exactly in 'flowscan scan'");
        println!("   - scanner.whole_word: only keep matches on word boundaries");
        println!("   - extractor.date_patterns / amount_patterns: regex lists, [] disables");
        println!("   - extractor.keywords: entity_type + keyword lists for the automaton");
        println!();
        Ok(config_path)
    }

    /// Write the template to `path`, refusing to overwrite an existing file.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, Self::template()?)?;
        Ok(())
    }

    /// Default configuration with one sample keyword group, as pretty JSON.
    pub fn template() -> anyhow::Result<String> {
        let mut config = Self::default();
        config.extractor.keywords.push(flowscan_core::KeywordGroup {
            entity_type: flowscan_core::EntityType::Organization,
            keywords: vec!["Acme Corp".to_string(), "Globex".to_string()],
        });
        Ok(serde_json::to_string_pretty(&config)?)
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }
}
