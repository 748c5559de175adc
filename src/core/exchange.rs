use crate::adapters::storage::DirectoryStore;
use crate::core::assignment::{assign, AssignmentRules};
use crate::core::grouping::{balance, ensure_assignable, split};
use crate::core::validator::validate;
use crate::domain::model::{Assignment, Roster};
use crate::domain::ports::{ArtifactStore, ConfigProvider};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "output";

/// 一次完整的抽籤流程：重設儲存 → 分池 → 逐池抽籤 → 驗證
pub struct Exchange<S: ArtifactStore> {
    store: S,
    rules: AssignmentRules,
    seed: Option<u64>,
}

impl<S: ArtifactStore> Exchange<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            rules: AssignmentRules::default(),
            seed: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(store: S, config: &C) -> Self {
        Self::new(store)
            .with_rules(AssignmentRules::new(config.allow_reciprocal()))
            .with_seed(config.seed())
    }

    pub fn with_rules(mut self, rules: AssignmentRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn rules(&self) -> AssignmentRules {
        self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn run(&mut self, roster: &Roster) -> Result<Assignment> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(roster, &mut rng)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) -> Result<Assignment> {
        tracing::info!(
            "Starting draw for {} participants ({} couples, {} singles)",
            roster.len(),
            roster.couple_count(),
            roster.single_count()
        );

        self.store.reset()?;

        let min_size = self.rules.min_pool_size();
        let mut pools = split(roster, rng);
        balance(&mut pools, roster, min_size, rng);
        ensure_assignable(&pools, min_size)?;

        let mut assignment = Assignment::new();
        for pool in &pools {
            assignment.extend(assign(pool, self.rules, &mut self.store, rng)?);
        }

        self.verify(roster)?;
        tracing::info!("✅ {} picks written to {}", assignment.len(), self.store.location());
        Ok(assignment)
    }

    /// 不抽籤，只重新驗證儲存中現有的結果
    pub fn verify(&self, roster: &Roster) -> Result<()> {
        tracing::info!("🔍 Validating picks in {}", self.store.location());
        validate(roster, &self.store)
    }
}

/// 以預設規則抽籤並寫入 `output_path` 目錄
pub fn run(roster: &Roster, output_path: impl Into<PathBuf>) -> Result<Assignment> {
    Exchange::new(DirectoryStore::new(output_path)).run(roster)
}
