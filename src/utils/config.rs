//! Configuration management
//!
//! Every field has a default, so an empty or missing file reproduces the
//! standard run: inputs and outputs in the working directory, a 5-row
//! volatility window and 50-bin histograms clipped to the 1st-99th percentile.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub news_file: String,
    pub no_news_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            news_file: "matching_dates.csv".to_string(),
            no_news_file: "non_matching_dates.csv".to_string(),
        }
    }
}

impl DataConfig {
    pub fn news_path(&self) -> PathBuf {
        self.dir.join(&self.news_file)
    }

    pub fn no_news_path(&self) -> PathBuf {
        self.dir.join(&self.no_news_file)
    }
}

/// Derived series and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rolling volatility window, in rows
    pub window: usize,
    /// Histogram bin count
    pub bins: usize,
    /// Lower clip percentile for histogram ranges
    pub lower_percentile: f64,
    /// Upper clip percentile for histogram ranges
    pub upper_percentile: f64,
    /// Significance level used when reporting test results
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: 5,
            bins: 50,
            lower_percentile: 1.0,
            upper_percentile: 99.0,
            alpha: 0.05,
        }
    }
}

/// Output files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub summary_file: String,
    pub processed_news_file: String,
    pub processed_no_news_file: String,
    pub returns_plot: String,
    pub volatility_plot: String,
    pub news_returns_plot: String,
    pub news_volatility_plot: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            summary_file: "baseline_summary.csv".to_string(),
            processed_news_file: "processed_matching_dates.csv".to_string(),
            processed_no_news_file: "processed_non_matching_dates.csv".to_string(),
            returns_plot: "daily_returns_distribution.png".to_string(),
            volatility_plot: "volatility_distribution.png".to_string(),
            news_returns_plot: "news_days_returns.png".to_string(),
            news_volatility_plot: "news_days_volatility.png".to_string(),
        }
    }
}

impl OutputConfig {
    /// Resolve a file name against the output directory
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// Histogram appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// Opacity of bars when two groups are overlaid
    pub overlay_alpha: f64,
    /// Opacity of bars in single-group plots
    pub single_alpha: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            overlay_alpha: 0.5,
            single_alpha: 0.7,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub plot: PlotConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the study cannot run with
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.window == 0 {
            return Err(Error::InvalidConfig("window must be at least 1".to_string()));
        }
        if analysis.bins == 0 {
            return Err(Error::InvalidConfig("bins must be at least 1".to_string()));
        }
        let (lo, hi) = (analysis.lower_percentile, analysis.upper_percentile);
        if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo >= hi {
            return Err(Error::InvalidConfig(format!(
                "percentiles must satisfy 0 <= lower < upper <= 100, got {lo} and {hi}"
            )));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(Error::InvalidConfig("plot size must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.analysis.window, 5);
        assert_eq!(config.analysis.bins, 50);
        assert_eq!(config.data.news_path(), PathBuf::from("./matching_dates.csv"));
        assert_eq!(
            config.output.path(&config.output.summary_file),
            PathBuf::from("./baseline_summary.csv")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[analysis]\nwindow = 10\n").unwrap();
        assert_eq!(config.analysis.window, 10);
        assert_eq!(config.analysis.bins, 50);
        assert_eq!(config.output.returns_plot, "daily_returns_distribution.png");
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("study.toml");

        let mut config = Config::default();
        config.output.dir = PathBuf::from("out");
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.output.dir, PathBuf::from("out"));
        assert_eq!(loaded.data.no_news_file, "non_matching_dates.csv");
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("study.toml");
        std::fs::write(&path, "[analysis]\nwindow = \"five\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[analysis]\nbins = 0\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));

        assert!(matches!(
            Config::load(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_percentiles() {
        let mut config = Config::default();
        config.analysis.lower_percentile = 99.0;
        config.analysis.upper_percentile = 1.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
