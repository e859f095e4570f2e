use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// Build settings live next to the assembler that consumes them
use hanzi_cards::AssemblerConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub sources: SourcesConfig,
    #[serde(default)]
    pub build: AssemblerConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub anki: AnkiConfig,
}

/// Paths of the dictionary files. Relative paths are resolved against the
/// directory holding the config file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SourcesConfig {
    pub heisig_decomposition: PathBuf,
    pub cjkvi_ids: PathBuf,
    pub heisig_glossary: PathBuf,
    pub cedict: PathBuf,
    pub hsk_dir: PathBuf,
    pub frequency: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonics: Option<PathBuf>,
}

impl SourcesConfig {
    #[must_use]
    pub fn resolve(&self, base: &Path) -> Self {
        let at = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        Self {
            heisig_decomposition: at(&self.heisig_decomposition),
            cjkvi_ids: at(&self.cjkvi_ids),
            heisig_glossary: at(&self.heisig_glossary),
            cedict: at(&self.cedict),
            hsk_dir: at(&self.hsk_dir),
            frequency: at(&self.frequency),
            components: self.components.as_ref().map(at),
            mnemonics: self.mnemonics.as_ref().map(at),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AudioConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "AudioConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "AudioConfig::default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Pause between two remote fetches.
    #[serde(default = "AudioConfig::default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: Self::default_dir(),
            prefix: Self::default_prefix(),
            endpoint: String::new(),
            api_key: None,
            pause_ms: Self::default_pause_ms(),
        }
    }
}

impl AudioConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("audio")
    }

    fn default_prefix() -> String {
        "most_freq_".to_string()
    }

    const fn default_pause_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnkiConfig {
    #[serde(default = "AnkiConfig::default_url")]
    pub url: String,
    #[serde(default = "AnkiConfig::default_deck")]
    pub deck: String,
    #[serde(default = "AnkiConfig::default_model")]
    pub model: String,
    #[serde(default = "AnkiConfig::default_tags")]
    pub tags: Vec<String>,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            deck: Self::default_deck(),
            model: Self::default_model(),
            tags: Self::default_tags(),
        }
    }
}

impl AnkiConfig {
    fn default_url() -> String {
        "http://localhost:8765".to_string()
    }

    fn default_deck() -> String {
        "vocab".to_string()
    }

    fn default_model() -> String {
        "vocab".to_string()
    }

    fn default_tags() -> Vec<String> {
        vec!["most frequent words".to_string()]
    }
}

pub const CONFIG_TEMPLATE: &str = r#"{
  "sources": {
    "heisig_decomposition": "data/heisig_decomp.json",
    "cjkvi_ids": "data/ids.txt",
    "heisig_glossary": "data/traditional.txt",
    "cedict": "data/cedict_1_0_ts_utf-8_mdbg.txt",
    "hsk_dir": "data/hsk",
    "frequency": "data/global_wordfreq.release_UTF-8.txt",
    "components": "data/components.json",
    "mnemonics": "data/mnemonics.json"
  },
  "build": {
    "workers": 0,
    "traditional_policy": "last_non_empty"
  },
  "audio": {
    "enabled": false,
    "dir": "audio",
    "prefix": "most_freq_",
    "endpoint": "http://localhost:5002/api/tts",
    "pause_ms": 100
  },
  "anki": {
    "url": "http://localhost:8765",
    "deck": "vocab",
    "model": "vocab",
    "tags": ["most frequent words"]
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("hanzi"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'hanzi init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load a config file and resolve its source paths against the file's
    /// directory.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.sources = config.sources.resolve(base);
        }
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!(
            "   1. Put the dictionary files under {}",
            config_dir.join("data").display()
        );
        println!("   2. Start Anki with the AnkiConnect add-on to export cards");
        println!("   3. Run 'hanzi build --top 100' to build cards");
        println!();
        println!("🔧 Configuration options:");
        println!("   - build.workers: worker threads for card assembly (0 = one per core)");
        println!("   - build.traditional_policy: last_non_empty or first_non_empty");
        println!("   - audio.enabled: fetch text-to-speech audio for each card");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_cards::TraditionalPolicy;

    #[test]
    fn template_parses() {
        #[expect(clippy::expect_used, reason = "test: bundled template must parse")]
        let config = Config::parse(CONFIG_TEMPLATE).expect("bundled template must parse");
        assert_eq!(config.anki.deck, "vocab");
        assert_eq!(config.build.traditional_policy, TraditionalPolicy::LastNonEmpty);
        assert!(!config.audio.enabled);
    }

    #[test]
    fn optional_sections_default() {
        let minimal = r#"{
          "sources": {
            "heisig_decomposition": "a.json",
            "cjkvi_ids": "ids.txt",
            "heisig_glossary": "g.txt",
            "cedict": "c.txt",
            "hsk_dir": "hsk",
            "frequency": "f.txt"
          }
        }"#;
        #[expect(clippy::expect_used, reason = "test: minimal config must parse")]
        let config = Config::parse(minimal).expect("minimal config must parse");
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.audio.prefix, "most_freq_");
        assert_eq!(config.audio.pause_ms, 100);
        assert_eq!(config.build.workers, 0);
        assert!(config.sources.components.is_none());
    }

    #[test]
    fn relative_sources_resolve_against_base() {
        #[expect(clippy::expect_used, reason = "test: bundled template must parse")]
        let config = Config::parse(CONFIG_TEMPLATE).expect("bundled template must parse");
        let resolved = config.sources.resolve(Path::new("/srv/hanzi"));
        assert_eq!(resolved.cedict, Path::new("/srv/hanzi/data/cedict_1_0_ts_utf-8_mdbg.txt"));
        assert_eq!(
            resolved.mnemonics.as_deref(),
            Some(Path::new("/srv/hanzi/data/mnemonics.json"))
        );
    }

    #[test]
    fn missing_sources_is_an_error() {
        assert!(Config::parse(r#"{"anki": {}}"#).is_err());
    }
}
