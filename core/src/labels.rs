//! Text catalogue for every chart.
//!
//! Chinese is the report language. English exists for machines without a
//! CJK font, where Chinese glyphs would otherwise render as boxes.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn from_code(value: &str) -> Result<Self> {
        match value {
            "zh" => Ok(Self::Chinese),
            "en" => Ok(Self::English),
            other => Err(anyhow!("invalid language: {} (expected zh or en)", other)),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Chinese => "zh",
            Self::English => "en",
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Self::Chinese => &CHINESE,
            Self::English => &ENGLISH,
        }
    }
}

#[derive(Debug)]
pub struct Labels {
    pub episode_axis: &'static str,

    pub learning_title: &'static str,
    pub learning_reward_axis: &'static str,
    pub learning_per_episode: &'static str,
    /// Appended to the window size, e.g. "10局移动平均".
    pub learning_moving_average_suffix: &'static str,
    pub learning_phases: [&'static str; 3],

    pub epsilon_title: &'static str,
    pub epsilon_axis: &'static str,
    pub epsilon_floor_prefix: &'static str,
    pub episode_marker_prefix: &'static str,
    pub episode_marker_suffix: &'static str,

    pub heatmap_title: &'static str,
    pub heatmap_value: &'static str,
    pub heatmap_action_axis: &'static str,
    pub heatmap_state_axis: &'static str,
    pub actions: [&'static str; 5],
    pub states: [&'static str; 8],

    pub comparison_title: &'static str,
    pub comparison_metric_axis: &'static str,
    pub comparison_value_axis: &'static str,
    pub comparison_metrics: [&'static str; 4],
    pub comparison_random: &'static str,
    pub comparison_qlearning: &'static str,
    pub comparison_improvements: [&'static str; 4],

    pub fps_title: &'static str,
    pub fps_enemy_axis: &'static str,
    pub fps_axis: &'static str,
    pub fps_average: &'static str,
    pub fps_minimum: &'static str,
    pub fps_smooth: &'static str,
    pub fps_target: &'static str,

    pub coverage_title: &'static str,
    pub coverage_axis: &'static str,
    pub coverage_visited: &'static str,
    pub coverage_total_prefix: &'static str,

    pub reward_pie_title: &'static str,
    /// Name and value note for each pie slice, drawn on two lines.
    pub reward_parts: [(&'static str, &'static str); 5],
    pub reward_events_title: &'static str,
    pub reward_axis: &'static str,
    pub reward_events: [&'static str; 3],

    pub latency_title: &'static str,
    pub latency_stage_axis: &'static str,
    pub latency_axis: &'static str,
    pub latency_stages: [&'static str; 4],
    pub latency_average: &'static str,
    pub latency_p95: &'static str,
    pub latency_threshold: &'static str,
}

impl Labels {
    pub fn moving_average(&self, window: usize) -> String {
        format!("{}{}", window, self.learning_moving_average_suffix)
    }

    pub fn epsilon_floor(&self, floor: f64) -> String {
        format!("{}{}", self.epsilon_floor_prefix, floor)
    }

    pub fn episode_marker(&self, episode: usize, epsilon: f64) -> String {
        format!(
            "{}{}{}: ε={:.3}",
            self.episode_marker_prefix, episode, self.episode_marker_suffix, epsilon
        )
    }

    pub fn coverage_total(&self, max_states: f64) -> String {
        format!("{}({})", self.coverage_total_prefix, max_states)
    }
}

pub static CHINESE: Labels = Labels {
    episode_axis: "训练局数",

    learning_title: "Q-Learning在线对抗学习 - 累积奖励曲线",
    learning_reward_axis: "累积奖励",
    learning_per_episode: "单局奖励",
    learning_moving_average_suffix: "局移动平均",
    learning_phases: ["探索阶段", "学习阶段", "收敛阶段"],

    epsilon_title: "ε-Greedy策略的探索率衰减",
    epsilon_axis: "探索率 ε",
    epsilon_floor_prefix: "最小探索率 ε_min=",
    episode_marker_prefix: "第",
    episode_marker_suffix: "局",

    heatmap_title: "100局训练后的Q值分布热力图",
    heatmap_value: "Q值",
    heatmap_action_axis: "动作",
    heatmap_state_axis: "状态",
    actions: ["直冲", "左绕", "右绕", "后退", "冲锋"],
    states: [
        "近距离-无威胁",
        "近距离-左手靠近",
        "近距离-右手靠近",
        "中距离-无威胁",
        "中距离-左手靠近",
        "中距离-右手靠近",
        "远距离-无威胁",
        "远距离-左手靠近",
    ],

    comparison_title: "随机AI vs Q-Learning AI 性能对比",
    comparison_metric_axis: "评估指标",
    comparison_value_axis: "数值",
    comparison_metrics: ["平均存活时间(秒)", "攻击成功次数", "被击杀次数", "平均奖励"],
    comparison_random: "随机AI",
    comparison_qlearning: "Q-Learning AI",
    comparison_improvements: ["↑133%", "↑305%", "↓60%", "正负逆转"],

    fps_title: "不同负载下的帧率表现",
    fps_enemy_axis: "敌人数量",
    fps_axis: "帧率 (FPS)",
    fps_average: "平均FPS",
    fps_minimum: "最低FPS",
    fps_smooth: "流畅阈值(30FPS)",
    fps_target: "目标帧率(60FPS)",

    coverage_title: "Q-Learning状态空间覆盖进度",
    coverage_axis: "状态数量",
    coverage_visited: "已访问状态数",
    coverage_total_prefix: "估计总状态数",

    reward_pie_title: "奖励函数组成（按绝对值权重）",
    reward_parts: [
        ("攻击水晶", "(+100)"),
        ("被击中", "(-20)"),
        ("死亡", "(-50)"),
        ("距离奖励", "(±0.5)"),
        ("存活奖励", "(+0.1)"),
    ],
    reward_events_title: "事件奖励值对比",
    reward_axis: "奖励值",
    reward_events: ["攻击成功", "被击中", "死亡"],

    latency_title: "MediaPipe Hands 处理延迟分析",
    latency_stage_axis: "处理阶段",
    latency_axis: "延迟 (ms)",
    latency_stages: ["手掌检测", "关键点提取", "手势分类", "端到端"],
    latency_average: "平均延迟",
    latency_p95: "95百分位延迟",
    latency_threshold: "交互阈值(100ms)",
};

pub static ENGLISH: Labels = Labels {
    episode_axis: "Training episode",

    learning_title: "Online adversarial Q-Learning - cumulative reward",
    learning_reward_axis: "Cumulative reward",
    learning_per_episode: "Episode reward",
    learning_moving_average_suffix: "-episode moving average",
    learning_phases: ["Exploration", "Learning", "Convergence"],

    epsilon_title: "Exploration rate decay of the ε-greedy policy",
    epsilon_axis: "Exploration rate ε",
    epsilon_floor_prefix: "Minimum exploration ε_min=",
    episode_marker_prefix: "Episode ",
    episode_marker_suffix: "",

    heatmap_title: "Q-value heatmap after 100 training episodes",
    heatmap_value: "Q value",
    heatmap_action_axis: "Action",
    heatmap_state_axis: "State",
    actions: ["Charge", "Flank left", "Flank right", "Retreat", "Rush"],
    states: [
        "Near - no threat",
        "Near - left hand close",
        "Near - right hand close",
        "Mid - no threat",
        "Mid - left hand close",
        "Mid - right hand close",
        "Far - no threat",
        "Far - left hand close",
    ],

    comparison_title: "Random AI vs Q-Learning AI",
    comparison_metric_axis: "Metric",
    comparison_value_axis: "Value",
    comparison_metrics: [
        "Avg. survival (s)",
        "Successful attacks",
        "Times killed",
        "Avg. reward",
    ],
    comparison_random: "Random AI",
    comparison_qlearning: "Q-Learning AI",
    comparison_improvements: ["↑133%", "↑305%", "↓60%", "sign flip"],

    fps_title: "Frame rate under load",
    fps_enemy_axis: "Enemy count",
    fps_axis: "Frame rate (FPS)",
    fps_average: "Average FPS",
    fps_minimum: "Minimum FPS",
    fps_smooth: "Smooth threshold (30 FPS)",
    fps_target: "Target (60 FPS)",

    coverage_title: "Q-Learning state space coverage",
    coverage_axis: "States",
    coverage_visited: "Visited states",
    coverage_total_prefix: "Estimated total states",

    reward_pie_title: "Reward function composition (absolute weight)",
    reward_parts: [
        ("Hit crystal", "(+100)"),
        ("Got hit", "(-20)"),
        ("Death", "(-50)"),
        ("Distance", "(±0.5)"),
        ("Survival", "(+0.1)"),
    ],
    reward_events_title: "Event rewards",
    reward_axis: "Reward",
    reward_events: ["Attack hit", "Got hit", "Death"],

    latency_title: "MediaPipe Hands processing latency",
    latency_stage_axis: "Stage",
    latency_axis: "Latency (ms)",
    latency_stages: ["Palm detection", "Landmarks", "Gesture classification", "End to end"],
    latency_average: "Average latency",
    latency_p95: "p95 latency",
    latency_threshold: "Interactive threshold (100 ms)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("zh").unwrap(), Language::Chinese);
        assert_eq!(Language::from_code("en").unwrap(), Language::English);
        assert!(Language::from_code("fr").is_err());
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn formatted_labels() {
        let zh = Language::Chinese.labels();
        assert_eq!(zh.moving_average(10), "10局移动平均");
        assert_eq!(zh.epsilon_floor(0.05), "最小探索率 ε_min=0.05");
        assert_eq!(zh.episode_marker(50, 0.23349), "第50局: ε=0.233");
        assert_eq!(zh.coverage_total(150.0), "估计总状态数(150)");

        let en = Language::English.labels();
        assert_eq!(en.episode_marker(100, 0.18176), "Episode 100: ε=0.182");
    }
}
