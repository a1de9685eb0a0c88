/// Run-time settings: command-line flags plus an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::constants::{DEFAULT_FRAME_RATE, DEFAULT_ROUND_SECONDS};

#[derive(Parser, Debug, Clone)]
#[command(name = "shooting_birds", about = "Shoot the birds, spare the dark ones")]
pub struct Args {
    /// JSON file with game settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible spawn sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable all sound cues
    #[arg(long)]
    pub mute: bool,

    /// Where to write the log (the terminal is busy with the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("shooting_birds.log"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_seconds: u32,
    pub frame_rate: u32,
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            round_seconds: DEFAULT_ROUND_SECONDS,
            frame_rate: DEFAULT_FRAME_RATE,
            sound: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(text).context("game config is not valid JSON")?;
        Ok(config.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the effective settings for this run.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if args.mute {
            config.sound = false;
        }
        Ok(config)
    }

    /// Zero values make no sense for either setting; fall back to defaults.
    fn sanitized(mut self) -> Self {
        if self.round_seconds == 0 {
            tracing::warn!(
                "round_seconds must be positive. Falling back to {}.",
                DEFAULT_ROUND_SECONDS
            );
            self.round_seconds = DEFAULT_ROUND_SECONDS;
        }
        if self.frame_rate == 0 {
            tracing::warn!(
                "frame_rate must be positive. Falling back to {}.",
                DEFAULT_FRAME_RATE
            );
            self.frame_rate = DEFAULT_FRAME_RATE;
        }
        self
    }

    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }
}
