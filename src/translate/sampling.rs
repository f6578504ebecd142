use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Rescale a probability distribution by `temperature`: `softmax(ln(p) / t)`.
///
/// Zero (or negative) probabilities stay at zero. Lower temperatures sharpen
/// the distribution towards its mode.
pub fn apply_temperature(probs: &[f32], temperature: f32) -> Vec<f64> {
    let t = f64::from(temperature);
    let scaled: Vec<f64> = probs
        .iter()
        .map(|&p| {
            if p > 0.0 {
                f64::from(p).ln() / t
            } else {
                f64::NEG_INFINITY
            }
        })
        .collect();

    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return vec![0.0; probs.len()];
    }

    let exps: Vec<f64> = scaled.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}

/// Index of the largest weight; ties resolve to the lowest index
pub fn argmax<T: PartialOrd + Copy>(weights: &[T]) -> usize {
    let mut best = 0;
    for (i, w) in weights.iter().enumerate().skip(1) {
        if *w > weights[best] {
            best = i;
        }
    }
    best
}

/// Draw an index proportionally to `weights`. Degenerate distributions
/// (all zero, or containing NaN) fall back to the argmax.
pub fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => argmax(weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn temperature_one_is_identity() {
        let out = apply_temperature(&[0.2, 0.3, 0.5], 1.0);
        assert!((out[0] - 0.2).abs() < 1e-6);
        assert!((out[1] - 0.3).abs() < 1e-6);
        assert!((out[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn low_temperature_sharpens() {
        let out = apply_temperature(&[0.4, 0.6], 0.5);
        // p^2 renormalised: 0.16 / 0.52 and 0.36 / 0.52
        assert!((out[0] - 0.16 / 0.52).abs() < 1e-6);
        assert!((out[1] - 0.36 / 0.52).abs() < 1e-6);
        assert!(out[1] > 0.6);
    }

    #[test]
    fn zero_probabilities_stay_zero() {
        let out = apply_temperature(&[0.0, 1.0, 0.0], 0.7);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 1.0).abs() < 1e-9);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn all_zero_distribution_yields_zeros() {
        assert_eq!(apply_temperature(&[0.0, 0.0], 0.7), vec![0.0, 0.0]);
    }

    #[test]
    fn sampling_respects_certain_outcome() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(sample_index(&[0.0, 0.0, 1.0], &mut rng), 2);
        }
    }

    #[test]
    fn degenerate_weights_fall_back_to_argmax() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_index(&[0.0, 0.0, 0.0], &mut rng), 0);
        assert_eq!(argmax(&[0.1f32, 0.7, 0.2]), 1);
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let weights = [0.25, 0.25, 0.25, 0.25];
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10).map(|_| sample_index(&weights, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }
}
