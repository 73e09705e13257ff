use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ShowcueError};
use crate::types::{TriggerKind, TriggerSyntax};

/// Endpoint used when the configured one is empty.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5505/";
pub const DEFAULT_SHOW_ACTION: &str = "name_select_show";
pub const DEFAULT_SLIDE_ACTION: &str = "name_select_slide";
pub const DEFAULT_PREFIX: &str = "!fs";
pub const DEFAULT_SHOW_COLOR: &str = "#4a90d9";
pub const DEFAULT_SLIDE_COLOR: &str = "#e0a030";

/// Keys accepted by [`ShowcueConfig::get`] and [`ShowcueConfig::set`].
pub const SETTING_KEYS: &[&str] = &[
    "general.log_level",
    "general.notice_secs",
    "remote.endpoint",
    "remote.show_action",
    "remote.slide_action",
    "remote.timeout_secs",
    "trigger.prefix",
    "trigger.syntax",
    "colors.show",
    "colors.slide",
];

/// Top-level configuration for showcue.
///
/// Loaded from `~/.showcue/config.toml` by default. Missing sections and
/// fields take their defaults, so a partial file is always valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowcueConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

impl ShowcueConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShowcueConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ShowcueError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Read a single setting as a string, addressed by `section.field`.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "general.log_level" => self.general.log_level.clone(),
            "general.notice_secs" => self.general.notice_secs.to_string(),
            "remote.endpoint" => self.remote.endpoint.clone(),
            "remote.show_action" => self.remote.show_action.clone(),
            "remote.slide_action" => self.remote.slide_action.clone(),
            "remote.timeout_secs" => self.remote.timeout_secs.to_string(),
            "trigger.prefix" => self.trigger.prefix.clone(),
            "trigger.syntax" => self.trigger.syntax.to_string(),
            "colors.show" => self.colors.show.clone(),
            "colors.slide" => self.colors.slide.clone(),
            _ => return Err(ShowcueError::UnknownSetting(key.to_string())),
        };
        Ok(value)
    }

    /// Update a single setting, addressed by `section.field`.
    ///
    /// The config is left unchanged when the key is unknown or the value
    /// does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.log_level" => self.general.log_level = value.to_string(),
            "general.notice_secs" => self.general.notice_secs = parse_secs(key, value)?,
            "remote.endpoint" => self.remote.endpoint = value.trim().to_string(),
            "remote.show_action" => self.remote.show_action = value.to_string(),
            "remote.slide_action" => self.remote.slide_action = value.to_string(),
            "remote.timeout_secs" => self.remote.timeout_secs = parse_secs(key, value)?,
            "trigger.prefix" => self.trigger.prefix = value.to_string(),
            "trigger.syntax" => {
                self.trigger.syntax =
                    value
                        .parse()
                        .map_err(|reason| ShowcueError::InvalidSetting {
                            key: key.to_string(),
                            reason,
                        })?
            }
            "colors.show" => self.colors.show = value.to_string(),
            "colors.slide" => self.colors.slide = value.to_string(),
            _ => return Err(ShowcueError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    /// Load the file a settings change will be written back to.
    ///
    /// A missing file starts from defaults. Any other failure is returned,
    /// so a file that does not parse is never overwritten with defaults.
    pub fn load_for_update(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ShowcueError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No configuration at {}; starting from defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Update a setting and persist the whole config immediately.
    pub fn set_and_save(&mut self, key: &str, value: &str, path: &Path) -> Result<()> {
        self.set(key, value)?;
        self.save(path)
    }
}

/// A stored string setting, or `default` when it is empty or blank.
fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        trimmed => trimmed,
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ShowcueError::InvalidSetting {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// How long a success notice stays visible, in seconds.
    pub notice_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notice_secs: 3,
        }
    }
}

/// The presentation-control API that triggers are sent to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL. Empty means [`DEFAULT_ENDPOINT`]; a missing scheme means `http://`.
    pub endpoint: String,
    /// Action identifier sent for show triggers.
    pub show_action: String,
    /// Action identifier sent for slide triggers.
    pub slide_action: String,
    /// Request timeout in seconds. 0 leaves timing to the transport.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Action identifier for a trigger kind. Blank values fall back to the default.
    pub fn action_for(&self, kind: TriggerKind) -> &str {
        match kind {
            TriggerKind::Show => or_default(&self.show_action, DEFAULT_SHOW_ACTION),
            TriggerKind::Slide => or_default(&self.slide_action, DEFAULT_SLIDE_ACTION),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            show_action: DEFAULT_SHOW_ACTION.to_string(),
            slide_action: DEFAULT_SLIDE_ACTION.to_string(),
            timeout_secs: 0,
        }
    }
}

/// Inline trigger recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Token that introduces a `[label]` slide trigger. Blank means [`DEFAULT_PREFIX`].
    pub prefix: String,
    /// Which trigger syntaxes are recognized.
    pub syntax: TriggerSyntax,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            syntax: TriggerSyntax::Both,
        }
    }
}

impl TriggerConfig {
    /// The prefix token in effect, surrounding whitespace removed.
    pub fn effective_prefix(&self) -> &str {
        or_default(&self.prefix, DEFAULT_PREFIX)
    }
}

/// Display colors for generated controls, one per trigger kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub show: String,
    pub slide: String,
}

impl ColorConfig {
    pub fn color_for(&self, kind: TriggerKind) -> &str {
        match kind {
            TriggerKind::Show => or_default(&self.show, DEFAULT_SHOW_COLOR),
            TriggerKind::Slide => or_default(&self.slide, DEFAULT_SLIDE_COLOR),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            show: DEFAULT_SHOW_COLOR.to_string(),
            slide: DEFAULT_SLIDE_COLOR.to_string(),
        }
    }
}
