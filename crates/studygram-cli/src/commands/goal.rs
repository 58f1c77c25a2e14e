use clap::Subcommand;
use studygram_core::{focus_week, study_stats, weekly_average, Config, GoalAccumulator, StatTrends};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show progress toward today's goal
    Status {
        /// Minutes studied so far (defaults to goal.seed_completed_minutes)
        #[arg(long)]
        completed: Option<u32>,
        /// Daily goal in minutes (defaults to goal.daily_goal_minutes)
        #[arg(long)]
        goal: Option<u32>,
        /// Focus score shown on the dashboard card
        #[arg(long, default_value = "87")]
        focus_score: u8,
        /// Daily focus scores from Monday on, e.g. 65,82,70 (the card shows their average)
        #[arg(long, value_delimiter = ',')]
        week: Vec<u8>,
        /// Week-over-week change of the Study Time card, in percent
        #[arg(long, allow_negative_numbers = true)]
        study_trend: Option<i32>,
        /// Week-over-week change of the Goal Left card, in percent
        #[arg(long, allow_negative_numbers = true)]
        goal_trend: Option<i32>,
        /// Week-over-week change of the Focus Score card, in percent
        #[arg(long, allow_negative_numbers = true)]
        focus_trend: Option<i32>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GoalAction::Status {
            completed,
            goal,
            focus_score,
            week,
            study_trend,
            goal_trend,
            focus_trend,
            json,
        } => {
            let config = Config::load_or_default();
            let accumulator = GoalAccumulator::new(
                completed.unwrap_or(config.goal.seed_completed_minutes),
                goal.unwrap_or(config.goal.daily_goal_minutes),
            )?;
            let progress = accumulator.progress();
            let week = focus_week(&week);
            let focus = weekly_average(&week).unwrap_or(focus_score);
            let trends = StatTrends {
                study_time: study_trend,
                goal_left: goal_trend,
                focus_score: focus_trend,
            };
            let stats = study_stats(&progress, focus, trends);

            if json {
                let out = serde_json::json!({ "progress": progress, "stats": stats, "week": week });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for stat in &stats {
                    match stat.trend_label() {
                        Some(trend) => println!("{:<12} {:<8} {}", stat.label, stat.value, trend),
                        None => println!("{:<12} {}", stat.label, stat.value),
                    }
                }
                println!("{:<12} {}%", "Complete", progress.percent_complete);
                if !week.is_empty() {
                    let chart: Vec<String> =
                        week.iter().map(|f| format!("{} {}", f.day, f.score)).collect();
                    println!("{:<12} {}", "Focus week", chart.join("  "));
                }
            }
        }
    }
    Ok(())
}
