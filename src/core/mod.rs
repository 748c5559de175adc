pub mod assignment;
pub mod exchange;
pub mod grouping;
pub mod stress;
pub mod validator;

pub use crate::domain::model::{Assignment, CoupleGroup, Pool, Roster};
pub use crate::domain::ports::{ArtifactStore, ConfigProvider};
pub use crate::utils::error::Result;
