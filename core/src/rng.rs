use anyhow::{anyhow, ensure, Result};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Construct a deterministic RNG from a fixed seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw `count` samples from a zero-mean normal distribution.
/// `std_dev` must be finite and non-negative.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64, count: usize) -> Result<Vec<f64>> {
    ensure!(
        std_dev.is_finite() && std_dev >= 0.0,
        "invalid noise deviation {}",
        std_dev
    );
    let normal = Normal::new(0.0, std_dev)
        .map_err(|err| anyhow!("invalid noise deviation {}: {}", std_dev, err))?;
    Ok((0..count).map(|_| normal.sample(rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_noise() {
        let a = gaussian_noise(&mut seeded_rng(42), 15.0, 32).unwrap();
        let b = gaussian_noise(&mut seeded_rng(42), 15.0, 32).unwrap();
        let c = gaussian_noise(&mut seeded_rng(43), 15.0, 32).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn negative_deviation_is_rejected() {
        let err = gaussian_noise(&mut seeded_rng(1), -1.0, 4).unwrap_err();
        assert!(err.to_string().contains("-1"));
        assert!(gaussian_noise(&mut seeded_rng(1), f64::NAN, 4).is_err());
        assert!(gaussian_noise(&mut seeded_rng(1), f64::INFINITY, 4).is_err());
    }

    #[test]
    fn zero_deviation_is_silent() {
        let noise = gaussian_noise(&mut seeded_rng(1), 0.0, 4).unwrap();
        assert_eq!(noise, vec![0.0; 4]);
    }
}
