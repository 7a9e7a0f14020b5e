//! Fixed illustrative numbers shown in the bar, heatmap and pie charts.

/// State-action values after 100 training episodes. Rows follow
/// `Labels::states`, columns follow `Labels::actions`.
pub const Q_VALUES: [[f64; 5]; 8] = [
    [45.3, 12.5, 8.2, -15.8, 68.7],
    [-8.2, -12.3, 25.6, 15.2, -22.1],
    [-5.5, 28.3, -10.8, 12.1, -18.5],
    [32.1, 18.5, 15.2, -8.3, 42.5],
    [-12.5, -18.2, 35.8, 22.5, -28.3],
    [-10.2, 38.5, -15.3, 20.1, -25.8],
    [22.5, 15.2, 12.8, -5.5, 28.3],
    [-5.8, -8.2, 22.5, 15.8, -12.3],
];

/// Cells whose magnitude exceeds this get light text.
pub const Q_TEXT_CONTRAST: f64 = 30.0;

pub const RANDOM_AI: [f64; 4] = [12.3, 2.1, 15.3, -42.5];
pub const QLEARNING_AI: [f64; 4] = [28.7, 8.5, 6.2, 35.8];
pub const RANDOM_AI_COLOR: &str = "#ff7f7f";
pub const QLEARNING_AI_COLOR: &str = "#7fbf7f";

pub const ENEMY_COUNTS: [u32; 4] = [10, 20, 30, 50];
pub const AVG_FPS: [f64; 4] = [58.2, 55.7, 49.3, 38.5];
pub const MIN_FPS: [f64; 4] = [52.0, 48.0, 41.0, 32.0];
pub const AVG_FPS_COLOR: &str = "#4a90d9";
pub const MIN_FPS_COLOR: &str = "#d94a4a";
pub const FPS_SMOOTH: f64 = 30.0;
pub const FPS_TARGET: f64 = 60.0;
pub const FPS_Y_MAX: f64 = 70.0;

/// Absolute weights of the reward terms, in `Labels::reward_parts` order.
pub const REWARD_WEIGHTS: [f64; 5] = [100.0, 20.0, 50.0, 30.0, 10.0];
pub const REWARD_COLORS: [&str; 5] = ["#2ecc71", "#e74c3c", "#c0392b", "#3498db", "#95a5a6"];
/// Index of the slice pulled out of the pie.
pub const REWARD_EXPLODED: usize = 0;
pub const REWARD_EXPLODE_OFFSET: f64 = 0.1;
pub const REWARD_START_ANGLE: f64 = 90.0;

pub const EVENT_REWARDS: [f64; 3] = [100.0, -20.0, -50.0];
pub const EVENT_COLORS: [&str; 3] = ["#2ecc71", "#e67e22", "#e74c3c"];

pub const AVG_LATENCY_MS: [f64; 4] = [23.0, 18.0, 5.0, 41.0];
pub const P95_LATENCY_MS: [f64; 4] = [35.0, 28.0, 8.0, 63.0];
pub const AVG_LATENCY_COLOR: &str = "#3498db";
pub const P95_LATENCY_COLOR: &str = "#e74c3c";
pub const LATENCY_INTERACTIVE_MS: f64 = 100.0;
pub const LATENCY_Y_MAX: f64 = 120.0;

/// Width of one bar in grouped bar charts, in category units.
pub const BAR_WIDTH: f64 = 0.35;

/// Smallest and largest entry of the value matrix.
pub fn q_value_bounds() -> (f64, f64) {
    Q_VALUES
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Share of each weight in percent.
pub fn shares(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| w / total * 100.0).collect()
}
