use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tomatimer::{
    countdown::Countdown,
    keys::KeyRouter,
    runtime::{FixedTicker, HostEvent, Runner, TestEventSource},
    selection::DEFAULT_PRESETS,
    session::{Phase, Session},
    view::COMPLETE_MESSAGE,
};

// Headless integration using the internal runtime + Session without a TTY.
// Ticks are injected through the event source; the runner's own clock is
// set far in the future so it never fires during these tests.

fn key(code: KeyCode) -> HostEvent {
    HostEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn tick(secs: u64) -> HostEvent {
    HostEvent::Tick(Duration::from_secs(secs))
}

/// Feeds `events` through a runner and returns the session plus every frame drawn
fn drive(events: Vec<HostEvent>) -> (Session<'static>, Vec<String>) {
    let (tx, rx) = mpsc::channel();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_secs(3600)),
    );
    let mut session = Session::new(&DEFAULT_PRESETS).unwrap();
    let mut frames = Vec::new();

    runner
        .drive(&mut session, &KeyRouter::default(), |s| {
            frames.push(s.render().to_string());
            Ok::<_, ()>(())
        })
        .unwrap();

    (session, frames)
}

#[test]
fn headless_select_last_preset_and_start() {
    let (session, frames) = drive(vec![
        key(KeyCode::Down),
        key(KeyCode::Char('j')),
        key(KeyCode::Enter),
        key(KeyCode::Char('q')),
    ]);

    assert_eq!(session.phase(), Phase::Quitting);
    assert_eq!(session.chosen().map(|p| p.label), Some("1 Hr ⌛"));
    assert_eq!(
        session.countdown().map(Countdown::remaining),
        Some(Duration::from_secs(3600))
    );

    // initial, two moves, confirm
    assert_eq!(frames.len(), 4);
    assert!(frames[2].contains("->> 1 Hr ⌛"));
    assert!(frames[3].contains("1:00:00"));
}

#[test]
fn headless_countdown_runs_to_completion() {
    let (session, frames) = drive(vec![
        key(KeyCode::Enter),
        tick(600),
        tick(600),
        tick(600),
        key(KeyCode::Char('s')),
        key(KeyCode::Char('r')),
        key(KeyCode::Esc),
    ]);

    assert_eq!(session.phase(), Phase::Quitting);
    assert_eq!(
        session.countdown().map(Countdown::remaining),
        Some(Duration::ZERO)
    );

    let last = frames.last().unwrap();
    assert!(last.contains(COMPLETE_MESSAGE));
    assert!(!last.contains("00:00"));
    // toggle and reset after completion draw nothing new
    assert_eq!(frames.len(), 5);
}

#[test]
fn headless_stop_ignores_ticks_until_resumed() {
    let (session, frames) = drive(vec![
        key(KeyCode::Enter),
        key(KeyCode::Char('s')),
        tick(10),
        key(KeyCode::Char('s')),
        tick(10),
        key(KeyCode::Char('q')),
    ]);

    let cd = session.countdown().unwrap();
    assert_eq!(cd.remaining(), Duration::from_secs(1790));
    assert!(cd.is_running());
    assert!(frames.iter().any(|f| f.contains("30:00 (stopped)")));
    assert!(frames.last().unwrap().contains("29:50"));
}

#[test]
fn headless_reset_restarts_stopped_countdown() {
    let (session, _) = drive(vec![
        key(KeyCode::Enter),
        tick(300),
        key(KeyCode::Char('s')),
        key(KeyCode::Char('r')),
        key(KeyCode::Char('q')),
    ]);

    let cd = session.countdown().unwrap();
    assert_eq!(cd.remaining(), cd.total());
    assert!(cd.is_running());
}

#[test]
fn headless_quit_before_confirm_chooses_nothing() {
    let (session, frames) = drive(vec![
        key(KeyCode::Down),
        HostEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        key(KeyCode::Enter),
    ]);

    assert_eq!(session.phase(), Phase::Quitting);
    assert!(session.chosen().is_none());
    assert_eq!(session.selection().cursor(), 1);
    assert_eq!(frames.len(), 2);
}

#[test]
fn headless_unmapped_keys_draw_nothing() {
    let (_, frames) = drive(vec![
        key(KeyCode::Char('x')),
        key(KeyCode::Tab),
        key(KeyCode::Char('q')),
    ]);
    assert_eq!(frames.len(), 1);
}

#[test]
fn headless_resize_redraws_same_frame() {
    let (_, frames) = drive(vec![HostEvent::Resize, key(KeyCode::Char('q'))]);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], frames[1]);
}
