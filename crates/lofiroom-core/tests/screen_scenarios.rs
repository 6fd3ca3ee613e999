//! End-to-end scenarios over the public API.

use std::time::Duration;

use lofiroom_core::{
    Appearance, Command, Config, Countdown, Event, ListeningCounter, PlaybackController,
    SelectionRegistry, Session, SimulatedEngine, TimerMode, Track, TrackList,
};

#[test]
fn full_work_session_runs_out() {
    let mut timer = Countdown::new(TimerMode::Work);
    timer.toggle_run();
    for _ in 0..1500 {
        timer.tick();
    }
    assert_eq!(timer.remaining_secs(), 0);
    assert!(!timer.is_running());
    assert_eq!(timer.progress_percent(), 100.0);
    assert_eq!(timer.format_remaining(), "00:00");
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut a = Countdown::new(TimerMode::LongBreak);
    a.toggle_run();
    for _ in 0..77 {
        a.tick();
    }
    let mut b = a.clone();
    a.reset();
    b.reset();
    b.reset();
    assert_eq!(a, b);
}

#[test]
fn three_tracks_skip_previous_wraps_to_last() {
    let tracks = TrackList::new(vec![
        Track::new("One", "A", "one.mp3"),
        Track::new("Two", "B", "two.mp3"),
        Track::new("Three", "C", "three.mp3"),
    ])
    .unwrap();
    let engine = SimulatedEngine::for_tracks(&tracks);
    let mut player = PlaybackController::new(engine, tracks, 0.7).unwrap();
    player.skip_previous().unwrap();
    assert_eq!(player.current_index(), 2);
    assert_eq!(player.engine().source().map(|l| l.as_str()), Some("three.mp3"));
}

#[test]
fn simulated_completions_walk_the_list() {
    let tracks = TrackList::new(vec![
        Track::new("One", "A", "one.mp3").with_duration_secs(2),
        Track::new("Two", "B", "two.mp3").with_duration_secs(2),
    ])
    .unwrap();
    let engine = SimulatedEngine::for_tracks(&tracks);
    let mut player = PlaybackController::new(engine, tracks, 0.5).unwrap();
    player.play_pause().unwrap();

    let mut advanced = 0;
    for _ in 0..10 {
        player.advance(Duration::from_secs(1));
        if let Some(Event::TrackChanged { .. }) = player.poll().unwrap() {
            advanced += 1;
        }
    }
    assert_eq!(advanced, 5);
    assert_eq!(player.current_index(), 5 % 2);
}

#[test]
fn listening_accumulator_rate() {
    let mut active = ListeningCounter::new();
    active.set_active(true);
    let mut idle = ListeningCounter::new();
    for _ in 0..180 {
        active.tick();
        idle.tick();
    }
    assert!((active.total_minutes() - 3.0).abs() < 1e-9);
    assert_eq!(idle.total_minutes(), 0.0);
}

#[test]
fn registry_defaults_to_study_room() {
    let registry = SelectionRegistry::default();
    assert_eq!(registry.background(Appearance::Dark).as_str(), "bg/study-room-dark.png");
    assert_eq!(registry.background(Appearance::Light).as_str(), "bg/study-room.png");
}

#[test]
fn unavailable_track_surfaces_through_session() {
    let config = Config::default();
    let tracks = config.track_list().unwrap();
    let mut engine = SimulatedEngine::for_tracks(&tracks);
    engine.mark_unavailable(tracks[1].source.clone());
    let mut session = Session::new(engine, &config).unwrap();

    let err = session.apply(Command::Next).unwrap_err();
    assert!(err.to_string().contains("steam-over-tea"));
    assert_eq!(session.snapshot().track.index, 0);
}
