#![forbid(unsafe_code)]

//! Page configuration.
//!
//! [`PageConfig`] is read from JSON (every field optional) and can be
//! adjusted through `PAGECRAFT_*` environment variables:
//!
//! | Variable | Format | Field |
//! |----------|--------|-------|
//! | `PAGECRAFT_BREAKPOINTS` | `w0,w1,w2` (ascending) | `breakpoints` |
//! | `PAGECRAFT_VIEWPORT_WIDTH` | pixels | `viewportWidth` |
//! | `PAGECRAFT_SLIDER_INTERVAL_MS` | milliseconds, > 0 | `sliderIntervalMs` |
//! | `PAGECRAFT_ADD_AFTER` | `0`/`1`/`true`/`false` | `addAfter` |
//!
//! Invalid environment values are logged and ignored; invalid files are
//! errors.

use std::path::{Path, PathBuf};

use pagecraft_core::ComponentKind;
use pagecraft_layout::ColumnBreakpoints;
use pagecraft_widgets::RenderOptions;
use pagecraft_widgets::options::DEFAULT_SLIDER_INTERVAL_MS;
use serde::{Deserialize, Serialize};

pub const ENV_BREAKPOINTS: &str = "PAGECRAFT_BREAKPOINTS";
pub const ENV_VIEWPORT_WIDTH: &str = "PAGECRAFT_VIEWPORT_WIDTH";
pub const ENV_SLIDER_INTERVAL_MS: &str = "PAGECRAFT_SLIDER_INTERVAL_MS";
pub const ENV_ADD_AFTER: &str = "PAGECRAFT_ADD_AFTER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("breakpoints must be three ascending widths, got {0:?}")]
    Breakpoints(String),
    #[error("invalid value {value:?} for {key}")]
    Value { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a [`Page`](crate::Page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    pub breakpoints: ColumnBreakpoints,
    /// Initial viewport width; `None` until the host measures one.
    pub viewport_width: Option<u32>,
    /// `false` on hosts without resize observation: every region renders
    /// its declared column count.
    pub observe_resize: bool,
    pub slider_interval_ms: u64,
    pub add_after: bool,
    /// Kinds offered by quick-insert palettes; empty keeps the defaults.
    pub palette: Vec<ComponentKind>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            breakpoints: ColumnBreakpoints::DEFAULT,
            viewport_width: None,
            observe_resize: true,
            slider_interval_ms: DEFAULT_SLIDER_INTERVAL_MS,
            add_after: true,
            palette: Vec::new(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply `PAGECRAFT_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_BREAKPOINTS) {
            match parse_breakpoints(&value) {
                Ok(breakpoints) => self.breakpoints = breakpoints,
                Err(err) => tracing::warn!(error = %err, "ignoring {ENV_BREAKPOINTS}"),
            }
        }
        if let Some(value) = lookup(ENV_VIEWPORT_WIDTH) {
            match value.trim().parse::<u32>() {
                Ok(width) => self.viewport_width = Some(width),
                Err(_) => tracing::warn!(value = %value, "ignoring {ENV_VIEWPORT_WIDTH}"),
            }
        }
        if let Some(value) = lookup(ENV_SLIDER_INTERVAL_MS) {
            match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.slider_interval_ms = ms,
                _ => tracing::warn!(value = %value, "ignoring {ENV_SLIDER_INTERVAL_MS}"),
            }
        }
        if let Some(value) = lookup(ENV_ADD_AFTER) {
            match parse_flag(&value) {
                Some(enabled) => self.add_after = enabled,
                None => tracing::warn!(value = %value, "ignoring {ENV_ADD_AFTER}"),
            }
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let [w0, w1, w2] = self.breakpoints.thresholds();
        if !(w0 < w1 && w1 < w2) {
            return Err(ConfigError::Breakpoints(format!("{w0},{w1},{w2}")));
        }
        if self.slider_interval_ms == 0 {
            return Err(ConfigError::Value {
                key: "sliderIntervalMs",
                value: "0".into(),
            });
        }
        Ok(())
    }

    /// Options for the widget layer.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default()
            .with_breakpoints(self.breakpoints)
            .with_add_after(self.add_after)
            .with_slider_interval_ms(self.slider_interval_ms);
        if !self.palette.is_empty() {
            options = options.with_palette(self.palette.iter().cloned());
        }
        options
    }
}

/// Parse `"w0,w1,w2"` into strictly ascending breakpoints.
pub fn parse_breakpoints(value: &str) -> ConfigResult<ColumnBreakpoints> {
    let invalid = || ConfigError::Breakpoints(value.to_string());
    let widths = value
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    match widths.as_slice() {
        &[w0, w1, w2] if w0 < w1 && w1 < w2 => Ok(ColumnBreakpoints::new(w0, w1, w2)),
        _ => Err(invalid()),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
