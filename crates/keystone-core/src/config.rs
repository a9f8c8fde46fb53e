//! Ranking parameters and project configuration.
//!
//! [`RankConfig`] holds the three numeric parameters of the ranking engine.
//! Callers usually build it from a [`RankOverrides`], where every field is
//! optional. An override of `None`, zero, or NaN is treated as "not
//! supplied" and the default is kept, so `damping = 0` in a config file
//! silently means `damping = 0.85`. The `Option` fields keep the two cases
//! representable even though they currently coalesce the same way.
//!
//! Project configuration lives in `keystone.toml`:
//!
//! ```toml
//! [rank]
//! damping = 0.9
//! max_iterations = 200
//! tolerance = 1e-8
//!
//! [output]
//! top = 15
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::KeystoneError;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_TOP: usize = 10;

/// File name searched for in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "keystone.toml";

// ---------------------------------------------------------------------------
// RankConfig
// ---------------------------------------------------------------------------

/// Parameters of the ranking engine, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankConfig {
    /// Probability of following a link versus jumping uniformly.
    pub damping: f64,
    /// Hard cap on power iterations.
    pub max_iterations: usize,
    /// Stop once the largest per-node change drops below this.
    pub tolerance: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RankConfig {
    /// Apply overrides on top of the defaults.
    ///
    /// Zero and NaN count as "not supplied".
    #[must_use]
    pub fn from_overrides(overrides: RankOverrides) -> Self {
        let defaults = Self::default();
        Self {
            damping: truthy_f64(overrides.damping).unwrap_or(defaults.damping),
            max_iterations: overrides
                .max_iterations
                .filter(|&n| n != 0)
                .unwrap_or(defaults.max_iterations),
            tolerance: truthy_f64(overrides.tolerance).unwrap_or(defaults.tolerance),
        }
    }

    /// Check that the parameters describe a contracting iteration.
    ///
    /// The engine accepts any values; this is for callers that take
    /// parameters from users.
    ///
    /// # Errors
    ///
    /// Returns [`KeystoneError::InvalidConfig`] if `damping` is outside
    /// `(0, 1)` or `tolerance` is not a positive finite number.
    pub fn validate(&self) -> Result<(), KeystoneError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(KeystoneError::InvalidConfig(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(KeystoneError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

fn truthy_f64(value: Option<f64>) -> Option<f64> {
    // NaN fails the comparison as well as zero does.
    value.filter(|v| v.abs() > 0.0)
}

// ---------------------------------------------------------------------------
// RankOverrides
// ---------------------------------------------------------------------------

/// Partial ranking parameters from a config file or command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RankOverrides {
    #[serde(default)]
    pub damping: Option<f64>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl RankOverrides {
    /// Layer `other` over `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            damping: other.damping.or(self.damping),
            max_iterations: other.max_iterations.or(self.max_iterations),
            tolerance: other.tolerance.or(self.tolerance),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub rank: RankOverrides,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default entry count for `ks top`.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { top: default_top() }
    }
}

const fn default_top() -> usize {
    DEFAULT_TOP
}

/// Find the config file to use when none is given explicitly.
///
/// Looks for `keystone.toml` in `project_root`, then for
/// `keystone/config.toml` under the user config directory.
#[must_use]
pub fn discover_config_path(project_root: &Path) -> Option<PathBuf> {
    let local = project_root.join(PROJECT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("keystone/config.toml");
    user.exists().then_some(user)
}

/// Load a project config. A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`KeystoneError::Io`] if the file exists but cannot be read and
/// [`KeystoneError::ConfigParse`] if it is not valid TOML.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig, KeystoneError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| KeystoneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<ProjectConfig>(&content).map_err(|source| KeystoneError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = RankConfig::default();
        assert!((config.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 100);
        assert!((config.tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = RankConfig::from_overrides(RankOverrides {
            damping: Some(0.5),
            max_iterations: Some(7),
            tolerance: None,
        });
        assert!((config.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 7);
        assert!((config.tolerance - DEFAULT_TOLERANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_override_falls_back_to_default() {
        let config = RankConfig::from_overrides(RankOverrides {
            damping: Some(0.0),
            max_iterations: Some(0),
            tolerance: Some(0.0),
        });
        assert_eq!(config, RankConfig::default());
    }

    #[test]
    fn nan_override_falls_back_to_default() {
        let config = RankConfig::from_overrides(RankOverrides {
            damping: Some(f64::NAN),
            ..RankOverrides::default()
        });
        assert!((config.damping - DEFAULT_DAMPING).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_override_is_kept_but_invalid() {
        let config = RankConfig::from_overrides(RankOverrides {
            damping: Some(-0.3),
            ..RankOverrides::default()
        });
        assert!((config.damping + 0.3).abs() < f64::EPSILON);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(RankConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_damping_of_one() {
        let config = RankConfig {
            damping: 1.0,
            ..RankConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KeystoneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_infinite_tolerance() {
        let config = RankConfig {
            tolerance: f64::INFINITY,
            ..RankConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_prefers_later_layer() {
        let file = RankOverrides {
            damping: Some(0.7),
            max_iterations: Some(50),
            tolerance: None,
        };
        let flags = RankOverrides {
            damping: Some(0.9),
            ..RankOverrides::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.damping, Some(0.9));
        assert_eq!(merged.max_iterations, Some(50));
        assert_eq!(merged.tolerance, None);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = load_project_config(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(config.rank, RankOverrides::default());
        assert_eq!(config.output.top, DEFAULT_TOP);
    }

    #[test]
    fn config_file_is_parsed() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(&path, "[rank]\ndamping = 0.9\n\n[output]\ntop = 3\n").expect("write");

        let config = load_project_config(&path).expect("load");
        assert_eq!(config.rank.damping, Some(0.9));
        assert_eq!(config.rank.max_iterations, None);
        assert_eq!(config.output.top, 3);
    }

    #[test]
    fn invalid_toml_reports_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(&path, "[rank\ndamping = ").expect("write");

        let err = load_project_config(&path).expect_err("should fail");
        assert!(matches!(err, KeystoneError::ConfigParse { .. }));
    }

    #[test]
    fn local_config_is_discovered() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(&path, "").expect("write");
        assert_eq!(discover_config_path(dir.path()), Some(path));
    }
}
