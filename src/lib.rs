pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RosterConfig;

pub use adapters::storage::{DirectoryStore, MemoryStore};
pub use core::assignment::AssignmentRules;
pub use core::exchange::{run, Exchange};
pub use domain::model::{Assignment, CoupleGroup, Roster};
pub use utils::error::{ConstructionError, ExchangeError, Result, ValidationError};
