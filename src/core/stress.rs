use crate::core::assignment::AssignmentRules;
use crate::core::exchange::Exchange;
use crate::core::grouping::is_assignable;
use crate::domain::model::{CoupleGroup, Roster};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{ConstructionError, ExchangeError, Result};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// 抽籤完成且通過驗證
    Passed { participants: usize },
    /// 名單太小，兩池設計無法抽籤，在抽籤前即被拒絕
    Rejected { participants: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StressReport {
    pub trials: usize,
    pub passed: usize,
    pub rejected: usize,
}

impl StressReport {
    pub fn record(&mut self, outcome: TrialOutcome) {
        self.trials += 1;
        match outcome {
            TrialOutcome::Passed { .. } => self.passed += 1,
            TrialOutcome::Rejected { .. } => self.rejected += 1,
        }
    }
}

/// 以一份名單跑完整流程
///
/// 只有在名單本身無法分成可抽籤的池時，`UnassignablePool` 才算預期中的拒絕；
/// 其他任何錯誤都原樣回傳。
pub fn run_trial<S, R>(
    groups: Vec<CoupleGroup>,
    store: S,
    rules: AssignmentRules,
    rng: &mut R,
) -> Result<TrialOutcome>
where
    S: ArtifactStore,
    R: Rng + ?Sized,
{
    let roster = Roster::new(groups)?;
    let participants = roster.len();
    let mut exchange = Exchange::new(store).with_rules(rules);

    match exchange.run_with_rng(&roster, rng) {
        Ok(_) => Ok(TrialOutcome::Passed { participants }),
        Err(ExchangeError::Construction(ConstructionError::UnassignablePool { .. }))
            if !is_assignable(&roster, rules.min_pool_size()) =>
        {
            tracing::debug!("Roster of {} participants cannot be split into assignable pools", participants);
            Ok(TrialOutcome::Rejected { participants })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_small_couple_roster_is_rejected() {
        let outcome = run_trial(
            vec![CoupleGroup::couple("Greg", "Megan"), CoupleGroup::single("Ann")],
            MemoryStore::new(),
            AssignmentRules::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert_eq!(outcome, TrialOutcome::Rejected { participants: 3 });
    }

    #[test]
    fn test_duplicate_names_are_errors_not_rejections() {
        let result = run_trial(
            vec![CoupleGroup::single("Ann"), CoupleGroup::single("Ann")],
            MemoryStore::new(),
            AssignmentRules::default(),
            &mut StdRng::seed_from_u64(2),
        );
        assert!(matches!(
            result,
            Err(ExchangeError::Construction(ConstructionError::DuplicateName { .. }))
        ));
    }

    #[test]
    fn test_report_counts_outcomes() {
        let mut report = StressReport::default();
        report.record(TrialOutcome::Passed { participants: 6 });
        report.record(TrialOutcome::Rejected { participants: 2 });
        report.record(TrialOutcome::Passed { participants: 9 });

        assert_eq!(
            report,
            StressReport {
                trials: 3,
                passed: 2,
                rejected: 1
            }
        );
    }
}
