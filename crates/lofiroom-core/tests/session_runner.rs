//! Integration tests for the interval-driven session loop.
//!
//! Tokio's paused clock lets these run hours of session time instantly.

use std::time::Duration;

use lofiroom_core::session::runner::{run, Output};
use lofiroom_core::{
    Command, Config, Event, Session, SimulatedEngine, TimerMode, TimerState, TrackChangeReason,
    TrackList,
};
use tokio::sync::mpsc;

fn drain(rx: &mut mpsc::UnboundedReceiver<Output>) -> Vec<Output> {
    let mut out = Vec::new();
    while let Ok(item) = rx.try_recv() {
        out.push(item);
    }
    out
}

fn long_track_session() -> Session<SimulatedEngine> {
    Session::new(SimulatedEngine::new(Duration::from_secs(3600)), &Config::default()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn listening_accumulates_three_minutes() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    let (session, ()) = tokio::join!(run(long_track_session(), cmd_rx, ev_tx), async move {
        cmd_tx.send(Command::PlayPause).await.unwrap();
        tokio::time::sleep(Duration::from_millis(180_500)).await;
        cmd_tx.send(Command::Quit).await.unwrap();
    });

    assert!((session.listening().total_minutes() - 3.0).abs() < 1e-6);
    assert_eq!(session.listening().level(), 1);

    let updates = drain(&mut ev_rx)
        .into_iter()
        .filter(|o| matches!(o, Ok(Event::ListeningTimeUpdated { .. })))
        .count();
    assert_eq!(updates, 180);
}

#[tokio::test(start_paused = true)]
async fn nothing_accumulates_without_playback() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, _ev_rx) = mpsc::unbounded_channel();

    let (session, ()) = tokio::join!(run(long_track_session(), cmd_rx, ev_tx), async move {
        tokio::time::sleep(Duration::from_secs(120)).await;
        drop(cmd_tx);
    });

    assert_eq!(session.listening().total_minutes(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn countdown_expires_and_stops() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    let (session, ()) = tokio::join!(run(long_track_session(), cmd_rx, ev_tx), async move {
        cmd_tx.send(Command::TimerMode(TimerMode::ShortBreak)).await.unwrap();
        cmd_tx.send(Command::TimerToggle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(400)).await;
        cmd_tx.send(Command::Quit).await.unwrap();
    });

    assert_eq!(session.countdown().remaining_secs(), 0);
    assert_eq!(session.countdown().state(), TimerState::Expired);
    assert!(!session.countdown().is_running());

    let expired = drain(&mut ev_rx)
        .into_iter()
        .filter(|o| matches!(o, Ok(Event::TimerExpired { .. })))
        .count();
    assert_eq!(expired, 1);
}

#[tokio::test(start_paused = true)]
async fn paused_countdown_does_not_tick() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, _ev_rx) = mpsc::unbounded_channel();

    let (session, ()) = tokio::join!(run(long_track_session(), cmd_rx, ev_tx), async move {
        cmd_tx.send(Command::TimerToggle).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        cmd_tx.send(Command::TimerToggle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        cmd_tx.send(Command::Quit).await.unwrap();
    });

    assert_eq!(session.countdown().remaining_secs(), 1490);
    assert_eq!(session.countdown().state(), TimerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn finished_tracks_auto_advance_once_each() {
    let config = Config::default();
    let tracks = TrackList::builtin();
    let engine = SimulatedEngine::for_tracks(&tracks);
    let session = Session::new(engine, &config).unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    // 164 s + 142 s gets through the first two tracks; stop partway into the third.
    let (session, ()) = tokio::join!(run(session, cmd_rx, ev_tx), async move {
        cmd_tx.send(Command::PlayPause).await.unwrap();
        tokio::time::sleep(Duration::from_secs(164 + 142 + 30)).await;
        cmd_tx.send(Command::Quit).await.unwrap();
    });

    assert_eq!(session.player().current_index(), 2);
    assert!(session.player().is_playing());

    let advances: Vec<usize> = drain(&mut ev_rx)
        .into_iter()
        .filter_map(|o| match o {
            Ok(Event::TrackChanged {
                index,
                reason: TrackChangeReason::AutoAdvance,
                ..
            }) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(advances, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn command_errors_are_reported_not_fatal() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    let (session, ()) = tokio::join!(run(long_track_session(), cmd_rx, ev_tx), async move {
        cmd_tx.send(Command::SetVolume(3.0)).await.unwrap();
        cmd_tx.send(Command::SetVolume(0.3)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        cmd_tx.send(Command::Quit).await.unwrap();
    });

    let outputs = drain(&mut ev_rx);
    assert!(outputs.iter().any(|o| o.is_err()));
    assert!(outputs
        .iter()
        .any(|o| matches!(o, Ok(Event::VolumeChanged { .. }))));
    assert!((session.player().volume() - 0.3).abs() < f32::EPSILON);
}
