//! Plot Configuration Module
//!
//! Curve selection, cleaning rules and figure layout loaded from TOML, so a
//! new well can be displayed without touching code.
//!
//! ## Loading Order
//!
//! 1. `--config <PATH>` on the command line
//! 2. `LASPLOT_CONFIG` environment variable (path to TOML file)
//! 3. `lasplot.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = PlotConfig::load(cli.config.as_deref())?;
//! let prepared = pipeline::prepare(&las, &config.processing)?;
//! ```

mod plot_config;
pub mod defaults;
pub mod validation;

pub use plot_config::*;
