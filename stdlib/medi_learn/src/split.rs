use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::LearnError;

/// Row indices of a hold-out split, each side in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle-split `labels` into train/test, keeping class proportions.
///
/// The test side holds `ceil(test_size * n)` rows. Each class contributes a
/// share proportional to its frequency, with leftover slots handed to the
/// classes with the largest fractional remainders. Identical labels and seed
/// always produce the identical split.
pub fn train_test_split_stratified(
    labels: &[bool],
    test_size: f64,
    seed: u64,
) -> Result<Split, LearnError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(LearnError::InvalidParameter(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    let n = labels.len();
    if n == 0 {
        return Err(LearnError::EmptyInput);
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n - n_test.min(n);
    if n_test == 0 || n_train == 0 {
        return Err(LearnError::InvalidParameter(format!(
            "test_size {test_size} leaves an empty side for {n} rows"
        )));
    }

    let mut classes: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, &y) in labels.iter().enumerate() {
        classes[usize::from(y)].push(i);
    }
    if classes.iter().any(|c| c.len() < 2) {
        return Err(LearnError::InvalidParameter(
            "the least populated class needs at least 2 members".to_string(),
        ));
    }

    let quotas = allocate(&[classes[0].len(), classes[1].len()], n_test, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for (members, quota) in classes.iter_mut().zip(quotas) {
        members.shuffle(&mut rng);
        let (held_out, kept) = members.split_at(quota);
        test.extend_from_slice(held_out);
        train.extend_from_slice(kept);
    }
    train.sort_unstable();
    test.sort_unstable();

    Ok(Split { train, test })
}

fn allocate(counts: &[usize; 2], n_test: usize, n: usize) -> [usize; 2] {
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * n_test as f64 / n as f64)
        .collect();
    let mut quotas = [exact[0].floor() as usize, exact[1].floor() as usize];

    let mut order = [0usize, 1];
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa)
    });
    let mut left = n_test - quotas.iter().sum::<usize>();
    for &c in order.iter().cycle() {
        if left == 0 {
            break;
        }
        if quotas[c] < counts[c] {
            quotas[c] += 1;
            left -= 1;
        }
    }
    quotas
}
