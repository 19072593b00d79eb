use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::process::ProcessedMatchRecord;
use crate::record::MatchRecord;

pub const DEFAULT_TEST_SIZE: f64 = 0.1;
pub const DEFAULT_SPLIT_SEED: u64 = 42;

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read match records {}", path.display()))?;
    serde_json::from_str(&raw).context("decode match records json")
}

pub fn load_processed(path: &Path) -> Result<Vec<ProcessedMatchRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read processed records {}", path.display()))?;
    serde_json::from_str(&raw).context("decode processed records json")
}

// Seeded shuffle then tail split; same seed, same partition. Both sides keep
// at least one record once there are two to share.
pub fn split_records(
    mut records: Vec<MatchRecord>,
    test_size: f64,
    seed: u64,
) -> (Vec<MatchRecord>, Vec<MatchRecord>) {
    let n = records.len();
    if n < 2 {
        return (records, Vec::new());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    let test_size = test_size.clamp(0.0, 1.0);
    let test_len = (((n as f64) * test_size).round() as usize).clamp(1, n - 1);
    let test = records.split_off(n - test_len);
    (records, test)
}

pub fn save_processed(path: &Path, records: &[ProcessedMatchRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(records).context("serialize processed records")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MatchRecord, ScoreLine};

    fn record(home: &str) -> MatchRecord {
        MatchRecord {
            home_team: home.to_string(),
            away_team: "Opponent".to_string(),
            final_score: Some(ScoreLine {
                home: "1".to_string(),
                away: "0".to_string(),
            }),
            half_time_score: None,
            scorers: Vec::new(),
            cards: Vec::new(),
            stats: None,
            report: None,
        }
    }

    #[test]
    fn split_is_reproducible_and_partitions() {
        let records: Vec<MatchRecord> = (0..20).map(|i| record(&format!("Team {i}"))).collect();

        let (train_a, test_a) = split_records(records.clone(), 0.1, 7);
        let (train_b, test_b) = split_records(records.clone(), 0.1, 7);

        assert_eq!(train_a.len() + test_a.len(), records.len());
        assert_eq!(test_a.len(), 2);

        let names = |side: &[MatchRecord]| -> Vec<String> {
            side.iter().map(|r| r.home_team.clone()).collect()
        };
        assert_eq!(names(&train_a), names(&train_b));
        assert_eq!(names(&test_a), names(&test_b));
    }

    #[test]
    fn tiny_inputs_keep_everything_in_train() {
        let (train, test) = split_records(vec![record("Only")], 0.5, 1);
        assert_eq!(train.len(), 1);
        assert!(test.is_empty());
    }

    #[test]
    fn extreme_test_size_still_leaves_training_data() {
        let records: Vec<MatchRecord> = (0..5).map(|i| record(&format!("T{i}"))).collect();
        let (train, test) = split_records(records, 1.0, 3);
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 4);
    }
}
