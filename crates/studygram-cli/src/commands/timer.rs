use std::time::Duration;

use clap::Subcommand;
use studygram_core::timer::{
    format_remaining, IntervalTickSource, ManualTickSource, Preset, TickSource, TimerController,
};
use studygram_core::{Config, Event};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a sprint in the foreground until it completes or Ctrl-C
    Run {
        /// Preset to load: study or break
        #[arg(long, default_value = "study")]
        preset: Preset,
        /// Custom sprint length in minutes (overrides --preset)
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
        /// Tick period in milliseconds (defaults to timer.tick_interval_ms)
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Print events as JSON lines instead of the countdown
        #[arg(long)]
        json: bool,
    },
    /// Render a number of seconds as M:SS
    Format {
        seconds: u64,
    },
    /// Print the initial timer state as JSON
    Status,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn print_summary<S: TickSource>(ctl: &TimerController<S>) {
    let p = ctl.progress();
    println!(
        "{} left on the clock; {}/{} min studied today ({}%)",
        ctl.format_remaining(),
        p.completed_minutes,
        p.daily_goal_minutes,
        p.percent_complete
    );
}

async fn run_sprint(
    preset: Preset,
    minutes: Option<i64>,
    tick_ms: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let period = Duration::from_millis(tick_ms.unwrap_or(config.timer.tick_interval_ms));
    let source = IntervalTickSource::new(period)?;
    let mut ctl = TimerController::new(source, config.timer_settings())?;

    let reset = match minutes {
        Some(m) => ctl.reset_to_preset(m),
        None => ctl.reset_to(preset),
    };
    if json {
        print_event(&reset)?;
    } else {
        println!("{} sprint: {}", ctl.sprint().label(), ctl.format_remaining());
    }

    if let Some(started) = ctl.start() {
        if json {
            print_event(&started)?;
        }
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let report = tokio::select! {
            report = ctl.next_tick() => report,
            _ = &mut ctrl_c => {
                tracing::info!("interrupted");
                None
            }
        };
        let Some(report) = report else {
            break;
        };

        if json {
            if let Some(event) = &report.event {
                print_event(event)?;
            }
            continue;
        }

        let done = ctl.engine().sprint_progress() * 100.0;
        println!("{}  {:>3.0}%", format_remaining(report.remaining_secs), done.floor());
        match report.event {
            Some(Event::MinuteElapsed { .. }) => {
                let p = ctl.progress();
                println!("  +1 min ({}/{})", p.completed_minutes, p.daily_goal_minutes);
            }
            Some(Event::TimerCompleted { .. }) => println!("Sprint complete."),
            _ => {}
        }
    }

    if let Some(paused) = ctl.pause() {
        if json {
            print_event(&paused)?;
        }
    }

    if json {
        print_event(&ctl.snapshot())?;
    } else {
        print_summary(&ctl);
    }
    Ok(())
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            preset,
            minutes,
            tick_ms,
            json,
        } => run_sprint(preset, minutes, tick_ms, json).await?,
        TimerAction::Format { seconds } => {
            println!("{}", format_remaining(seconds));
        }
        TimerAction::Status => {
            let config = Config::load_or_default();
            let ctl = TimerController::new(ManualTickSource::new(), config.timer_settings())?;
            println!("{}", serde_json::to_string_pretty(&ctl.snapshot())?);
        }
    }
    Ok(())
}
