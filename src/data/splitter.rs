// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Test set:     the first ceil(n * test_fraction) shuffled samples
//   - Training set: everything else
//
// The same seed over the same input always produces the same
// partition, so a checkpoint can be re-evaluated later on exactly
// the samples it never saw during training.
//
// The split is not stratified: class proportions in each subset
// follow whatever the shuffle produces.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom over a
// StdRng seeded from the caller's u64.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{ClassifierError, Result};

/// Absorbs floating error in `n * fraction` so that e.g. 0.1 * 30
/// yields 3 test samples rather than 4.
const ROUNDING_GUARD: f64 = 1e-9;

/// Number of samples the test set receives for a dataset of `total`.
pub fn test_set_size(total: usize, test_fraction: f64) -> usize {
    let raw = (total as f64) * test_fraction - ROUNDING_GUARD;
    (raw.ceil().max(0.0) as usize).min(total)
}

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `seed`          - Shuffle seed; same seed, same partition
/// * `test_fraction` - Proportion held out, strictly between 0 and 1
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    seed:          u64,
    test_fraction: f64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ClassifierError::config(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total  = samples.len();
    let n_test = test_set_size(total, test_fraction);

    // split_off(n) leaves [0..n] in `samples` and returns [n..]
    let train = samples.split_off(n_test);
    let test  = samples;

    tracing::debug!(
        "Dataset split (seed {}): {} training, {} test",
        seed,
        train.len(),
        test.len(),
    );

    Ok((train, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..150).collect();
        let (train, test) = split_train_test(items, 33, 0.2).unwrap();
        assert_eq!(train.len(), 120);
        assert_eq!(test.len(),  30);
    }

    #[test]
    fn test_test_size_rounds_up() {
        // 7 * 0.2 = 1.4 → 2
        assert_eq!(test_set_size(7, 0.2), 2);
        // 10 * 0.25 = 2.5 → 3
        assert_eq!(test_set_size(10, 0.25), 3);
        // exact products are not bumped by floating error
        assert_eq!(test_set_size(30, 0.1), 3);
        assert_eq!(test_set_size(100, 0.2), 20);
        assert_eq!(test_set_size(0, 0.2), 0);
        // a single sample always lands in the test set
        assert_eq!(test_set_size(1, 0.2), 1);
    }

    #[test]
    fn test_all_items_preserved_and_disjoint() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test) = split_train_test(items, 7, 0.3).unwrap();
        assert_eq!(train.len() + test.len(), 50);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let items: Vec<usize> = (0..100).collect();
        let a = split_train_test(items.clone(), 33, 0.2).unwrap();
        let b = split_train_test(items, 33, 0.2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let items: Vec<usize> = (0..100).collect();
        let (_, test_a) = split_train_test(items.clone(), 1, 0.2).unwrap();
        let (_, test_b) = split_train_test(items, 2, 0.2).unwrap();
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test) = split_train_test(items, 0, 0.2).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_fraction_out_of_range_rejected() {
        for fraction in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let items: Vec<usize> = (0..10).collect();
            let err = split_train_test(items, 0, fraction).unwrap_err();
            assert!(matches!(err, ClassifierError::Config(_)));
        }
    }
}
