//! File-name prefix strategies for multi-file batches.

use clap::ValueEnum;
use magicgen_generator::uuid_v4;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;

/// How the distinguishing token in `<file_name>_<prefix>.json` is chosen
/// when more than one file is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStrategy {
    /// Zero-padded indices `0..files_count-1`.
    Count,
    /// Distinct random integers from `[0, files_count * 10000)`.
    Random,
    /// Distinct random UUID-v4 strings.
    Uuid,
}

/// Create `files_count` distinct prefixes.
///
/// The random strategies retry until the required count of distinct tokens
/// is reached; the numeric token space (`files_count * 10000`) keeps
/// starvation practically impossible.
pub fn create_prefixes<R: Rng>(
    strategy: PrefixStrategy,
    files_count: u64,
    rng: &mut R,
) -> Vec<String> {
    match strategy {
        PrefixStrategy::Count => {
            let width = files_count.saturating_sub(1).to_string().len();
            (0..files_count).map(|i| format!("{i:0width$}")).collect()
        }
        PrefixStrategy::Random => {
            let bound = files_count * 10_000;
            let mut prefixes = HashSet::new();
            while (prefixes.len() as u64) < files_count {
                prefixes.insert(rng.gen_range(0..bound));
            }
            prefixes.into_iter().map(|p| p.to_string()).collect()
        }
        PrefixStrategy::Uuid => {
            let mut prefixes = HashSet::new();
            while (prefixes.len() as u64) < files_count {
                prefixes.insert(uuid_v4(rng).to_string());
            }
            prefixes.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_prefixes_small() {
        let mut rng = StdRng::seed_from_u64(42);
        let prefixes = create_prefixes(PrefixStrategy::Count, 3, &mut rng);
        assert_eq!(prefixes, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_count_prefixes_padded_to_largest_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let prefixes = create_prefixes(PrefixStrategy::Count, 12, &mut rng);
        assert_eq!(prefixes.len(), 12);
        assert_eq!(prefixes[0], "00");
        assert_eq!(prefixes[11], "11");

        // Ten files still fit a single digit (largest index is 9).
        let prefixes = create_prefixes(PrefixStrategy::Count, 10, &mut rng);
        assert_eq!(prefixes[0], "0");
        assert_eq!(prefixes[9], "9");
    }

    #[test]
    fn test_random_prefixes_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let prefixes = create_prefixes(PrefixStrategy::Random, 50, &mut rng);
        assert_eq!(prefixes.len(), 50);

        let distinct: HashSet<_> = prefixes.iter().collect();
        assert_eq!(distinct.len(), 50);

        for prefix in &prefixes {
            let n: u64 = prefix.parse().unwrap();
            assert!(n < 50 * 10_000);
        }
    }

    #[test]
    fn test_uuid_prefixes_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let prefixes = create_prefixes(PrefixStrategy::Uuid, 20, &mut rng);
        assert_eq!(prefixes.len(), 20);

        let distinct: HashSet<_> = prefixes.iter().collect();
        assert_eq!(distinct.len(), 20);

        for prefix in &prefixes {
            uuid::Uuid::parse_str(prefix).expect("prefix should be a UUID");
        }
    }
}
