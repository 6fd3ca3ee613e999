//! Cooperative event loop for a [`Session`].
//!
//! Each periodic task owns its own interval. The countdown and listening
//! intervals exist only while their state needs them: they are created when
//! the condition turns true and dropped when it turns false or the loop
//! exits. Missed ticks are skipped, never replayed.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{Command, Session};
use crate::error::CoreError;
use crate::events::Event;
use crate::playback::AudioEngine;

/// Period of the clock, countdown and listening intervals.
pub const TICK: Duration = Duration::from_secs(1);

/// How often the engine status is observed.
pub const ENGINE_POLL: Duration = Duration::from_millis(250);

/// Anything the loop reports: an event, or a failure for the front-end.
pub type Output = Result<Event, CoreError>;

/// Interval whose first tick is one `period` from now.
fn every(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Create or drop the interval in `slot` to match `wanted`.
fn arm(slot: &mut Option<Interval>, wanted: bool, name: &str) {
    match (slot.is_some(), wanted) {
        (false, true) => {
            debug!(interval = name, "arming");
            *slot = Some(every(TICK));
        }
        (true, false) => {
            debug!(interval = name, "cancelling");
            *slot = None;
        }
        _ => {}
    }
}

async fn tick_armed(slot: &mut Option<Interval>) {
    match slot {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn emit(events: &mpsc::UnboundedSender<Output>, output: Output) {
    if let Err(e) = &output {
        warn!(error = %e, "session error");
    }
    // A vanished observer does not stop the session.
    let _ = events.send(output);
}

/// Drive `session` until `Quit` arrives or the command channel closes.
///
/// Returns the session so the caller can inspect its final state.
pub async fn run<E: AudioEngine>(
    mut session: Session<E>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<Output>,
) -> Session<E> {
    info!("session started");
    let mut clock = every(TICK);
    let mut engine_poll = every(ENGINE_POLL);
    let mut last_poll = Instant::now();
    let mut countdown: Option<Interval> = None;
    let mut listening: Option<Interval> = None;

    emit(&events, Ok(session.tick_clock(&Local::now())));

    loop {
        arm(&mut countdown, session.wants_countdown_ticks(), "countdown");
        arm(&mut listening, session.wants_listening_ticks(), "listening");

        tokio::select! {
            command = commands.recv() => match command {
                None | Some(Command::Quit) => break,
                Some(command) => match session.apply(command) {
                    Ok(produced) => {
                        for event in produced {
                            emit(&events, Ok(event));
                        }
                    }
                    Err(e) => emit(&events, Err(e)),
                },
            },
            _ = clock.tick() => {
                emit(&events, Ok(session.tick_clock(&Local::now())));
            }
            _ = engine_poll.tick() => {
                let now = Instant::now();
                let elapsed = now - last_poll;
                last_poll = now;
                match session.poll_player(elapsed) {
                    Ok(Some(event)) => emit(&events, Ok(event)),
                    Ok(None) => {}
                    Err(e) => emit(&events, Err(e)),
                }
            }
            _ = tick_armed(&mut countdown) => {
                if let Some(event) = session.tick_countdown() {
                    emit(&events, Ok(event));
                }
            }
            _ = tick_armed(&mut listening) => {
                if let Some(event) = session.tick_listening() {
                    emit(&events, Ok(event));
                }
            }
        }
    }

    info!(
        listened_minutes = session.listening().whole_minutes(),
        "session ended"
    );
    session
}
