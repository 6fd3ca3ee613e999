mod engine;
mod mode;

pub use engine::{Countdown, CountdownSnapshot, TimerState};
pub use mode::TimerMode;
