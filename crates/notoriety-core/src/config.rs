//! Configuration loading and typed config structures for the resolver.
//!
//! Shard operators toggle the optional allegiance systems (ethics, alignment,
//! factions, IOB), the classic stealing mode and the corpse grace window
//! from a YAML file. Every field has a default matching stock shard rules, so
//! an empty document is a valid configuration.

use std::path::Path;

use serde::Deserialize;

use notoriety_types::Facet;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotorietyConfig {
    /// Murderer thresholds.
    #[serde(default)]
    pub murderer: MurdererConfig,

    /// Legacy ethics system.
    #[serde(default)]
    pub ethics: EthicsConfig,

    /// Alignment system.
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Faction system.
    #[serde(default)]
    pub factions: FactionConfig,

    /// Legacy IOB alignment.
    #[serde(default)]
    pub iob: IobConfig,

    /// Stealing rules.
    #[serde(default)]
    pub stealing: StealingConfig,

    /// Guild status rules.
    #[serde(default)]
    pub guilds: GuildConfig,

    /// Corpse looting rights.
    #[serde(default)]
    pub corpse: CorpseConfig,

    /// House friend flag.
    #[serde(default)]
    pub house: HouseConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NotorietyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Murderer thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MurdererConfig {
    /// Kill count at which a mobile or corpse owner reads as a murderer.
    #[serde(default = "default_kill_threshold")]
    pub kill_threshold: u32,
}

impl Default for MurdererConfig {
    fn default() -> Self {
        Self {
            kill_threshold: default_kill_threshold(),
        }
    }
}

/// Legacy ethics system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EthicsConfig {
    /// Whether Hero/Evil membership affects notoriety.
    #[serde(default)]
    pub enabled: bool,
}

/// Alignment system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlignmentConfig {
    /// Whether the alignment system is active.
    #[serde(default)]
    pub enabled: bool,

    /// When false, alignment enemies only read as `Enemy` while one of the
    /// two stands in a stronghold.
    #[serde(default = "default_true")]
    pub enemies_attackable_anywhere: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            enemies_attackable_anywhere: true,
        }
    }
}

/// Faction system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactionConfig {
    /// Whether faction membership affects notoriety.
    #[serde(default)]
    pub enabled: bool,

    /// The facet faction warfare happens on.
    #[serde(default)]
    pub facet: Facet,
}

/// Legacy IOB alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IobConfig {
    /// Apply IOB rules everywhere rather than only inside IOB regions.
    #[serde(default)]
    pub shard_wide: bool,
}

/// Stealing rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StealingConfig {
    /// Classic mode: thieves stay attackable by their victims.
    #[serde(default)]
    pub classic_mode: bool,
}

/// Guild status rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildConfig {
    /// Report every guild as `Warring` regardless of its peaceful flag or
    /// its enemy list. Beneficial gating on live shards depends on this.
    #[serde(default = "default_true")]
    pub legacy_always_warring: bool,
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self {
            legacy_always_warring: true,
        }
    }
}

/// Corpse looting rights.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorpseConfig {
    /// Seconds after death during which only aggressors may loot a
    /// creature corpse.
    #[serde(default = "default_loot_right_grace_secs")]
    pub loot_right_grace_secs: u32,
}

impl Default for CorpseConfig {
    fn default() -> Self {
        Self {
            loot_right_grace_secs: default_loot_right_grace_secs(),
        }
    }
}

/// House friend flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HouseConfig {
    /// Tiles searched around a location for a house sign.
    #[serde(default = "default_house_search_radius")]
    pub search_radius: u32,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            search_radius: default_house_search_radius(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_kill_threshold() -> u32 {
    5
}

const fn default_loot_right_grace_secs() -> u32 {
    120
}

const fn default_house_search_radius() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
