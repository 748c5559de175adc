use crate::core::exchange::DEFAULT_OUTPUT_PATH;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw a gift exchange where couples never pick each other")]
pub struct CliConfig {
    #[arg(long, help = "Roster TOML file (defaults to the built-in example roster)")]
    pub roster: Option<String>,

    #[arg(long, help = "Directory that receives one <name>.txt per participant [default: output]")]
    pub output_path: Option<String>,

    #[arg(long, help = "Allow two participants to pick each other")]
    pub allow_reciprocal: bool,

    #[arg(long, help = "Seed for a reproducible draw")]
    pub seed: Option<u64>,

    #[arg(long, help = "Only re-check existing picks, do not draw")]
    pub validate_only: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn allow_reciprocal(&self) -> bool {
        self.allow_reciprocal
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(roster) = &self.roster {
            validate_path("roster", roster)?;
        }
        validate_path("output_path", self.output_path())
    }
}
