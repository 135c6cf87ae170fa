//! Utility module
//!
//! This module provides:
//! - Configuration management
//! - Logging setup

mod config;
mod logging;

pub use config::{AnalysisConfig, Config, DataConfig, LoggingConfig, OutputConfig, PlotConfig};
pub use logging::{level_for_verbosity, setup_logging};
