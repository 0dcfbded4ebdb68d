// Configuration loading and parsing (config/slugline.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file inside `config/` and `defaults/`.
pub const SETTINGS_FILE: &str = "slugline.toml";

/// Short labels accepted for `analysis.default_category`.
pub const CATEGORY_LABELS: &[&str] = &["1B", "2B", "3B", "HR", "TB", "H"];

/// Allowed drift when checking that the prediction weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// The fully loaded and validated settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub analysis: AnalysisConfig,
    pub prediction_weights: PredictionWeights,
}

/// Endpoints and query windows for the external statistics providers.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub statcast_url: String,
    pub stats_api_url: String,
    pub request_timeout_secs: u64,
    /// Trailing window of plate appearances to fetch, ending today.
    pub lookback_days: u32,
    /// First season included in the career table.
    pub career_start_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// How many of the most recent games feed the chart and hit-rate table.
    pub recent_games: usize,
    pub recent_at_bats: usize,
    pub default_thresholds: Vec<u32>,
    pub default_category: String,
    #[serde(default)]
    pub denominator: DenominatorPolicy,
    #[serde(default)]
    pub missing_average: MissingAverage,
}

/// How hit-rate percentages are computed when fewer games exist than the
/// window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenominatorPolicy {
    /// Always divide by the window size (10, 5 or 3).
    #[default]
    Nominal,
    /// Divide by `min(window, games available)`.
    Available,
}

/// How the predictor handles an average that has no supporting games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingAverage {
    /// Substitute 0 and keep the fixed weights.
    #[default]
    Zero,
    /// Drop the input and rescale the remaining weights to sum to 1.
    Renormalize,
}

/// Blend weights for the next-game prediction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PredictionWeights {
    pub season: f64,
    pub opponent: f64,
    pub recent: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        PredictionWeights {
            season: 0.4,
            opponent: 0.3,
            recent: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/slugline.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(SETTINGS_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/slugline.toml` to `config/` unless a settings file is
/// already there. Returns the copied path, if any.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(SETTINGS_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(SETTINGS_FILE);

    if target.is_file() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {SETTINGS_FILE} in {0}/config or {0}/defaults",
                base_dir.display()
            ),
        });
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("copying {} to {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(&config_dir).map_err(copy_error)?;
    std::fs::copy(&source, &target).map_err(copy_error)?;
    tracing::info!("copied default settings to {}", target.display());

    Ok(Some(target))
}

/// Pick the directory that holds `defaults/` and `config/`.
///
/// The working directory wins when it has either folder; otherwise the
/// per-user config directory is used if a previous run populated it.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("defaults").is_dir() || cwd.join("config").is_dir() {
        return Ok(cwd);
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "slugline") {
        let user_dir = dirs.config_dir();
        if user_dir.join("config").is_dir() {
            return Ok(user_dir.to_path_buf());
        }
    }
    Ok(cwd)
}

/// Resolve the base directory, copy defaults if needed, and load.
pub fn load_config() -> Result<Config, ConfigError> {
    let base = resolve_base_dir()?;
    ensure_config_files(&base)?;
    load_config_from(&base)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let provider = &config.provider;
    if provider.request_timeout_secs == 0 {
        return Err(invalid("provider.request_timeout_secs", "must be greater than 0"));
    }
    if provider.lookback_days == 0 {
        return Err(invalid("provider.lookback_days", "must be greater than 0"));
    }
    for (name, url) in [
        ("provider.statcast_url", &provider.statcast_url),
        ("provider.stats_api_url", &provider.stats_api_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(name, format!("must be an http(s) URL, got {url:?}")));
        }
    }

    let analysis = &config.analysis;
    if analysis.recent_games == 0 {
        return Err(invalid("analysis.recent_games", "must be greater than 0"));
    }
    if analysis.recent_at_bats == 0 {
        return Err(invalid("analysis.recent_at_bats", "must be greater than 0"));
    }
    if !CATEGORY_LABELS.contains(&analysis.default_category.as_str()) {
        return Err(invalid(
            "analysis.default_category",
            format!(
                "must be one of {}, got {:?}",
                CATEGORY_LABELS.join("/"),
                analysis.default_category
            ),
        ));
    }

    let w = &config.prediction_weights;
    let weight_fields: &[(&str, f64)] = &[
        ("prediction_weights.season", w.season),
        ("prediction_weights.opponent", w.opponent),
        ("prediction_weights.recent", w.recent),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(invalid(name, format!("must be >= 0, got {val}")));
        }
    }
    let sum = w.season + w.opponent + w.recent;
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(invalid(
            "prediction_weights",
            format!("weights must sum to 1.0, got {sum}"),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
