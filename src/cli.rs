//! Shared command-line plumbing for the simulation binaries

use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::error::Result;

/// Flags every binary accepts
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for images and JSON (overrides the config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write the computed series as JSON
    #[arg(long)]
    pub export_json: bool,
}

impl CommonArgs {
    /// Load the configuration and apply the output overrides
    pub fn load_config(&self) -> Result<SimConfig> {
        let mut config = SimConfig::load_or_default(self.config.as_deref())?;
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        config.output.export_json |= self.export_json;
        Ok(config)
    }
}

/// Install the fmt subscriber; `RUST_LOG` overrides the `info` default
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when called from tests
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Console banner in the style of all simulation binaries
pub fn banner(title: &str, subtitle: &str) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  {title}");
    println!("  {subtitle}");
    println!("═══════════════════════════════════════════════════════════════\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = CommonArgs {
            config: None,
            output_dir: Some(PathBuf::from("out")),
            export_json: true,
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(config.output.export_json);
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = CommonArgs::default().load_config().unwrap();
        assert_eq!(config.output.dir, PathBuf::from("results"));
        assert!(!config.output.export_json);
    }
}
