//! End-to-end crossing scenarios driven through the public API.

use crosswalk::core::{CarSignal, Durations, PedSignal, Phase, Trigger};
use crosswalk::observer::{ChannelObserver, Notification, StateChanged};
use crosswalk::{Controller, Settings};
use std::time::Duration;

fn controller() -> Controller {
    Controller::new(Durations::from_millis(5000, 3000, 8000, 3000, 2000))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn state_changes(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Notification>) -> Vec<StateChanged> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        if let Notification::StateChanged(change) = n {
            out.push(change);
        }
    }
    out
}

#[test]
fn cycle_without_pedestrian() {
    let mut c = controller();

    c.tick(ms(5000));
    assert_eq!(c.phase(), Phase::Yellow);
    assert_eq!(c.car_signal(), CarSignal::Yellow);
    assert_eq!(c.ped_signal(), PedSignal::DontWalk);
    assert_eq!(c.elapsed(), Duration::ZERO);

    c.tick(ms(3000));
    assert_eq!(c.phase(), Phase::RedWait);
    assert_eq!(c.car_signal(), CarSignal::Red);
    assert_eq!(c.ped_signal(), PedSignal::DontWalk);

    c.tick(ms(2000));
    assert_eq!(c.phase(), Phase::Green);
    assert_eq!(c.car_signal(), CarSignal::Green);
    assert_eq!(c.ped_signal(), PedSignal::DontWalk);
}

#[test]
fn cycle_with_pedestrian() {
    let mut c = controller();
    let (observer, mut rx) = ChannelObserver::channel();
    c.subscribe(observer);

    assert!(c.request_crossing());
    assert!(c.is_request_queued());

    c.tick(ms(5000));
    assert_eq!(c.phase(), Phase::Yellow);

    c.tick(ms(3000));
    assert_eq!(c.phase(), Phase::RedWalk);
    assert!(!c.is_request_queued());
    assert_eq!(c.car_signal(), CarSignal::Red);
    assert_eq!(c.ped_signal(), PedSignal::Walk);

    c.tick(ms(8000));
    assert_eq!(c.phase(), Phase::RedFlash);
    c.tick(ms(3000));
    assert_eq!(c.phase(), Phase::RedWait);
    c.tick(ms(2000));
    assert_eq!(c.phase(), Phase::Green);

    let changes = state_changes(&mut rx);
    let pairs: Vec<(Phase, Phase)> = changes.iter().map(|ch| (ch.previous, ch.current)).collect();
    assert_eq!(
        pairs,
        vec![
            (Phase::Green, Phase::Yellow),
            (Phase::Yellow, Phase::RedWalk),
            (Phase::RedWalk, Phase::RedFlash),
            (Phase::RedFlash, Phase::RedWait),
            (Phase::RedWait, Phase::Green),
        ]
    );
    assert_eq!(changes[1].trigger, Trigger::TimeoutWithRequest);
    assert_eq!(changes[1].outputs.ped, PedSignal::Walk);
}

#[test]
fn press_during_walk_cycle_waits_for_next_green() {
    let mut c = controller();
    c.request_crossing();
    c.tick(ms(5000));
    c.tick(ms(3000));
    assert_eq!(c.phase(), Phase::RedWalk);

    // Ignored outside Green.
    assert!(!c.request_crossing());
    c.tick(ms(8000));
    c.tick(ms(3000));
    c.tick(ms(2000));
    assert_eq!(c.phase(), Phase::Green);
    assert!(!c.is_request_queued());

    // Next cycle skips the walk because nothing was latched.
    c.tick(ms(5000));
    c.tick(ms(3000));
    assert_eq!(c.phase(), Phase::RedWait);
}

#[test]
fn small_ticks_follow_reference_cadence() {
    let mut c = controller();
    let mut ticks = 0;
    while c.phase() == Phase::Green {
        c.tick(ms(200));
        ticks += 1;
    }
    assert_eq!(ticks, 25);
    assert_eq!(c.phase(), Phase::Yellow);
}

#[test]
fn settings_drive_the_same_cycle() {
    let settings = Settings::from_toml_str(
        r#"
        [durations]
        green = 5000
        yellow = 3000
        red_walk = 8000
        red_flash = 3000
        red_wait = 2000
        "#,
    )
    .unwrap();
    let mut c = settings.build_controller().unwrap();

    c.request_crossing();
    for delta in [5000, 3000, 8000, 3000, 2000] {
        c.tick(ms(delta));
    }

    assert_eq!(c.phase(), Phase::Green);
    assert_eq!(c.history().cycles(), 1);
    assert_eq!(c.history().len(), 5);
}
