//! Synthetic sequences behind the curve charts.
//!
//! Episodes are 1-based throughout; element `k` of every returned vector
//! belongs to episode `k + 1`.

use anyhow::Result;
use rand::rngs::StdRng;

use crate::rng::gaussian_noise;

pub const LEARNING_EPISODES: usize = 100;
pub const LEARNING_BASE: f64 = -40.0;
pub const LEARNING_SLOPE: f64 = 0.8;
pub const LEARNING_NOISE: f64 = 15.0;
pub const MOVING_AVERAGE_WINDOW: usize = 10;

pub const EPSILON_EPISODES: usize = 200;
pub const EPSILON_START: f64 = 0.3;
pub const EPSILON_DECAY: f64 = 0.995;
pub const EPSILON_MIN: f64 = 0.05;
pub const EPSILON_MARKERS: [usize; 2] = [50, 100];

pub const COVERAGE_EPISODES: usize = 100;
pub const COVERAGE_MAX_STATES: f64 = 150.0;
pub const COVERAGE_RATE: f64 = 0.05;
pub const COVERAGE_MARKERS: [usize; 3] = [20, 50, 100];

pub fn episodes(count: usize) -> Vec<f64> {
    (1..=count).map(|e| e as f64).collect()
}

/// Linear upward trend with Gaussian noise on top.
pub fn learning_rewards(rng: &mut StdRng, count: usize) -> Result<Vec<f64>> {
    let noise = gaussian_noise(rng, LEARNING_NOISE, count)?;
    Ok(episodes(count)
        .into_iter()
        .zip(noise)
        .map(|(episode, n)| LEARNING_BASE + LEARNING_SLOPE * episode + n)
        .collect())
}

/// Uniform-kernel convolution keeping only fully overlapping windows.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

pub fn epsilon_schedule(count: usize, start: f64, decay: f64, floor: f64) -> Vec<f64> {
    (1..=count)
        .map(|episode| (start * decay.powi(episode as i32)).max(floor))
        .collect()
}

pub fn state_coverage(count: usize, max_states: f64, rate: f64) -> Vec<f64> {
    (1..=count)
        .map(|episode| max_states * (1.0 - (-rate * episode as f64).exp()))
        .collect()
}

pub fn coverage_percent(value: f64, max_states: f64) -> f64 {
    value / max_states * 100.0
}

/// Value at a 1-based episode, if the series reaches it.
pub fn at_episode(values: &[f64], episode: usize) -> Option<f64> {
    episode.checked_sub(1).and_then(|idx| values.get(idx)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn moving_average_valid_mode() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(moving_average(&values, 2), vec![1.5, 2.5, 3.5, 4.5]);
        assert_eq!(moving_average(&values, 5), vec![3.0]);
        assert!(moving_average(&values, 6).is_empty());
        assert!(moving_average(&values, 0).is_empty());
    }

    #[test]
    fn learning_rewards_follow_trend() {
        let rewards = learning_rewards(&mut seeded_rng(1337), LEARNING_EPISODES).unwrap();
        assert_eq!(rewards.len(), LEARNING_EPISODES);

        let smoothed = moving_average(&rewards, MOVING_AVERAGE_WINDOW);
        assert_eq!(smoothed.len(), LEARNING_EPISODES - MOVING_AVERAGE_WINDOW + 1);
        assert!(smoothed.last().unwrap() > smoothed.first().unwrap());
    }

    #[test]
    fn epsilon_decays_to_floor() {
        let schedule =
            epsilon_schedule(EPSILON_EPISODES, EPSILON_START, EPSILON_DECAY, EPSILON_MIN);
        assert_eq!(schedule.len(), EPSILON_EPISODES);
        assert!(schedule.windows(2).all(|w| w[1] <= w[0]));
        assert!(schedule.iter().all(|&e| e >= EPSILON_MIN));

        let at_50 = at_episode(&schedule, 50).unwrap();
        assert!((at_50 - 0.3 * 0.995f64.powi(50)).abs() < 1e-12);
        assert!((at_50 - 0.2334).abs() < 1e-3);
    }

    #[test]
    fn epsilon_clamps_when_floor_is_high() {
        let schedule = epsilon_schedule(10, 0.3, 0.5, 0.1);
        assert_eq!(schedule[0], 0.15);
        assert_eq!(schedule[9], 0.1);
    }

    #[test]
    fn coverage_grows_below_ceiling() {
        let coverage = state_coverage(COVERAGE_EPISODES, COVERAGE_MAX_STATES, COVERAGE_RATE);
        assert!(coverage.windows(2).all(|w| w[1] > w[0]));
        assert!(coverage.iter().all(|&c| c < COVERAGE_MAX_STATES));

        let pct = coverage_percent(at_episode(&coverage, 20).unwrap(), COVERAGE_MAX_STATES);
        assert!((pct - 63.2).abs() < 0.1);
        let pct = coverage_percent(at_episode(&coverage, 100).unwrap(), COVERAGE_MAX_STATES);
        assert!((pct - 99.3).abs() < 0.1);
    }

    #[test]
    fn at_episode_is_one_based() {
        let values = [10.0, 20.0];
        assert_eq!(at_episode(&values, 0), None);
        assert_eq!(at_episode(&values, 1), Some(10.0));
        assert_eq!(at_episode(&values, 3), None);
    }
}
