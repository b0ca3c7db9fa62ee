/// Fraction of predictions that match the reference labels.
pub fn accuracy(predicted: &[bool], actual: &[bool]) -> f64 {
    let n = predicted.len().min(actual.len());
    if n == 0 {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p == a)
        .count();
    hits as f64 / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_matches() {
        let p = [true, false, true, true];
        let a = [true, true, true, false];
        assert!((accuracy(&p, &a) - 0.5).abs() < 1e-12);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}
