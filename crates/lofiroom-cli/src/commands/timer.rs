use clap::Subcommand;
use lofiroom_core::{Countdown, TimerMode};

#[derive(Subcommand)]
pub enum TimerAction {
    /// List the timer presets
    Modes,
    /// Run a fresh countdown for a number of one-second ticks and print the result
    Simulate {
        /// Timer preset (work, short-break, long-break)
        #[arg(long, default_value = "work")]
        mode: TimerMode,
        /// Number of ticks to apply after starting
        #[arg(long, default_value = "0")]
        ticks: u32,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Modes => {
            let modes: Vec<serde_json::Value> = TimerMode::ALL
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "mode": m,
                        "label": m.label(),
                        "duration": m.short_duration(),
                        "duration_secs": m.duration_secs(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&modes)?);
        }
        TimerAction::Simulate { mode, ticks } => {
            let mut timer = Countdown::new(mode);
            timer.toggle_run();
            for _ in 0..ticks {
                if let Some(event) = timer.tick() {
                    eprintln!("{}", serde_json::to_string(&event)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
    }
    Ok(())
}
