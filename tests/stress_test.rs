use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::core::grouping::is_assignable;
use secret_santa::core::stress::{run_trial, StressReport, TrialOutcome};
use secret_santa::domain::model::mock_roster;
use secret_santa::{AssignmentRules, DirectoryStore, MemoryStore, Roster};
use tempfile::TempDir;

fn stress(trials: usize, rules: AssignmentRules, rng: &mut StdRng) -> Result<StressReport> {
    let mut report = StressReport::default();
    for trial in 0..trials {
        let groups = mock_roster(rng);
        let roster = Roster::new(groups.clone())?;

        let outcome = run_trial(groups.clone(), MemoryStore::new(), rules, rng).with_context(|| {
            format!(
                "trial {} failed for roster {}",
                trial,
                serde_json::to_string(&groups).unwrap_or_default()
            )
        })?;

        // 只有太小的名單會被拒絕
        match outcome {
            TrialOutcome::Passed { participants } => {
                assert_eq!(participants, roster.len());
                assert!(is_assignable(&roster, rules.min_pool_size()));
            }
            TrialOutcome::Rejected { participants } => {
                assert_eq!(participants, roster.len());
                assert!(!is_assignable(&roster, rules.min_pool_size()));
            }
        }
        report.record(outcome);
    }
    Ok(report)
}

#[test]
fn test_stress_seeded_rosters() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(20241225);
    let report = stress(300, AssignmentRules::default(), &mut rng)?;

    assert_eq!(report.trials, 300);
    assert_eq!(report.passed + report.rejected, 300);
    assert!(report.passed > report.rejected);
    Ok(())
}

#[test]
fn test_stress_entropy_rosters() -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let report = stress(100, AssignmentRules::default(), &mut rng)?;
    assert_eq!(report.trials, 100);
    Ok(())
}

#[test]
fn test_stress_with_reciprocity_allowed() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let report = stress(150, AssignmentRules::new(true), &mut rng)?;
    assert_eq!(report.passed + report.rejected, 150);
    Ok(())
}

#[test]
fn test_stress_against_directory_store() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..25 {
        let scratch = TempDir::new()?;
        let store = DirectoryStore::new(scratch.path().join("stress_test"));
        run_trial(mock_roster(&mut rng), store, AssignmentRules::default(), &mut rng)?;
    }
    Ok(())
}

#[test]
fn test_minimal_rosters_that_draw() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let rosters = [
        r#"["Ann", "Bob", "Cid"]"#,
        r#"[["Greg", "Megan"], ["Russell", "Sondra"], ["Josh", "Caitlin"]]"#,
        r#"[["Greg", "Megan"], "Ann", "Bob", "Cid", "Dee"]"#,
        r#"[["Greg", "Megan"], ["Josh", "Caitlin"], "Ann", "Bob"]"#,
    ];

    for json in rosters {
        for _ in 0..50 {
            let outcome = run_trial(
                serde_json::from_str(json)?,
                MemoryStore::new(),
                AssignmentRules::default(),
                &mut rng,
            )?;
            assert!(matches!(outcome, TrialOutcome::Passed { participants: 3 | 6 }), "{}", json);
        }
    }
    Ok(())
}
