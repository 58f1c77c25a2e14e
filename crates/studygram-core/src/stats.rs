//! Dashboard cards derived from goal progress.

use serde::{Deserialize, Serialize};

use crate::goal::GoalProgress;
use crate::timer::format_study_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStat {
    pub label: String,
    pub value: String,
    /// Week-over-week change in percent, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<i32>,
}

impl StudyStat {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.into(),
            value,
            trend: None,
        }
    }

    pub fn with_trend(mut self, trend: Option<i32>) -> Self {
        self.trend = trend;
        self
    }

    /// "↑ 12% vs last week" style caption. A zero or unknown trend has none.
    pub fn trend_label(&self) -> Option<String> {
        match self.trend? {
            0 => None,
            t if t > 0 => Some(format!("↑ {t}% vs last week")),
            t => Some(format!("↓ {}% vs last week", t.unsigned_abs())),
        }
    }
}

/// Week-over-week change for each card, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTrends {
    pub study_time: Option<i32>,
    pub goal_left: Option<i32>,
    pub focus_score: Option<i32>,
}

/// One point of the weekly focus chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusScore {
    pub day: String,
    /// 0..=100
    pub score: u8,
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Label raw scores with weekdays starting on Monday. Scores past the
/// seventh wrap around.
pub fn focus_week(scores: &[u8]) -> Vec<FocusScore> {
    scores
        .iter()
        .zip(WEEKDAYS.iter().cycle())
        .map(|(&score, day)| FocusScore {
            day: (*day).to_string(),
            score: score.min(100),
        })
        .collect()
}

/// "Study Time", "Goal Left" and "Focus Score" cards, in display order.
pub fn study_stats(progress: &GoalProgress, focus_score: u8, trends: StatTrends) -> Vec<StudyStat> {
    vec![
        StudyStat::new("Study Time", format_study_time(progress.completed_minutes))
            .with_trend(trends.study_time),
        StudyStat::new("Goal Left", format!("{}m", progress.remaining_minutes))
            .with_trend(trends.goal_left),
        StudyStat::new("Focus Score", format!("{}%", focus_score.min(100)))
            .with_trend(trends.focus_score),
    ]
}

/// Mean score rounded down, or `None` for an empty week.
pub fn weekly_average(scores: &[FocusScore]) -> Option<u8> {
    if scores.is_empty() {
        return None;
    }
    let total: u32 = scores.iter().map(|s| s.score.min(100) as u32).sum();
    Some((total / scores.len() as u32) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalAccumulator;

    #[test]
    fn cards_follow_goal_progress() {
        let progress = GoalAccumulator::new(240, 360).unwrap().progress();
        let stats = study_stats(&progress, 87, StatTrends::default());
        let values: Vec<_> = stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["4h 0m", "120m", "87%"]);
        assert_eq!(stats[0].label, "Study Time");
        assert!(stats.iter().all(|s| s.trend.is_none()));
    }

    #[test]
    fn trends_attach_to_matching_cards() {
        let progress = GoalAccumulator::new(240, 360).unwrap().progress();
        let trends = StatTrends {
            study_time: Some(12),
            goal_left: Some(-5),
            focus_score: Some(-2),
        };
        let stats = study_stats(&progress, 87, trends);
        let labels: Vec<_> = stats.iter().filter_map(StudyStat::trend_label).collect();
        assert_eq!(
            labels,
            ["↑ 12% vs last week", "↓ 5% vs last week", "↓ 2% vs last week"]
        );
    }

    #[test]
    fn flat_trend_has_no_caption() {
        let stat = StudyStat::new("Study Time", "1h 0m".into()).with_trend(Some(0));
        assert_eq!(stat.trend_label(), None);
    }

    #[test]
    fn trend_is_omitted_from_json_when_unknown() {
        let stat = StudyStat::new("Goal Left", "5m".into());
        let json = serde_json::to_value(&stat).unwrap();
        assert!(json.get("trend").is_none());
        let json = serde_json::to_value(stat.with_trend(Some(-5))).unwrap();
        assert_eq!(json["trend"], -5);
    }

    #[test]
    fn weekly_average_rounds_down() {
        let week = focus_week(&[65, 78, 92]);
        assert_eq!(weekly_average(&week), Some(78));
        assert_eq!(weekly_average(&[]), None);
    }

    #[test]
    fn focus_week_labels_days_from_monday() {
        let week = focus_week(&[65, 82, 70, 95, 87, 45, 60, 120]);
        let days: Vec<_> = week.iter().map(|f| f.day.as_str()).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"]);
        assert_eq!(week[7].score, 100);
        assert_eq!(weekly_average(&week[..7]), Some(72));
    }
}
