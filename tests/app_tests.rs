//! Integration tests for KitchenApp

mod common;
use common::*;

use kitchen_monitor::{
    Button, Config, InitError, IntensityLevel, KitchenApp, SystemState, TimerMode,
};

#[test]
fn full_noodle_session() {
    let timer = MockTimeSource::new();
    let mut app = TestApp::new(&timer, peripherals(2048), Config::DEFAULT).unwrap();
    app.boot();
    assert_eq!(app.strip().lit(), 0);

    app.controls_mut().x = 3500;
    click(&mut app, &timer, Button::Confirm);
    assert_eq!(app.state(), SystemState::NoodleTimerSelect);
    assert!(app.display().shows("3 minutes"));

    click(&mut app, &timer, Button::Confirm);
    assert_eq!(app.state(), SystemState::NoodleTimerRunning);

    // tick once a second like a relaxed control loop would
    let mut ticks = 0;
    while app.state() == SystemState::NoodleTimerRunning {
        timer.advance(TestDuration(1_000));
        app.tick();
        ticks += 1;
        assert!(ticks <= 181, "countdown never expired");
    }

    assert_eq!(app.state(), SystemState::Menu);
    assert_eq!(app.buzzer().tones.as_slice(), &[(1000, 1000)]);
    assert!(!app.timer().is_active());
    // noodle mode never touches the matrix
    assert_eq!(app.strip().lit(), 0);
}

#[test]
fn countdown_display_counts_down_in_whole_seconds() {
    let timer = MockTimeSource::new();
    let mut app = TestApp::new(&timer, peripherals(2048), Config::DEFAULT).unwrap();

    click(&mut app, &timer, Button::Confirm);
    click(&mut app, &timer, Button::Confirm);
    // release tick ran 250 ms after the start
    assert!(app.display().shows("Left: 03:00"));

    timer.advance(TestDuration(750));
    app.tick();
    assert!(app.display().shows("Left: 02:59"));

    timer.advance(TestDuration(178_999));
    app.tick();
    assert!(app.display().shows("Left: 00:01"));
}

#[test]
fn full_bean_session() {
    let timer = MockTimeSource::new();
    let mut app = TestApp::new(&timer, peripherals(2048), Config::DEFAULT).unwrap();

    app.controls_mut().x = 200;
    click(&mut app, &timer, Button::Confirm);
    assert_eq!(app.state(), SystemState::BeanMonitor);
    assert!(app.display().shows("Monitoring..."));
    assert_eq!(app.strip().lit(), 1);

    // level 2: center plus the four neighbours, and above the trigger
    app.source_mut().level = 2078;
    app.tick();
    assert_eq!(app.feedback().last_level(), Some(IntensityLevel::new(2)));
    assert_eq!(app.strip().lit(), 5);
    assert_eq!(app.state(), SystemState::BeanTimerRunning);
    assert_eq!(app.timer().mode(), Some(TimerMode::Stopwatch));

    // full volume lights all rings
    app.source_mut().level = 4095;
    timer.advance(TestDuration(90_000));
    app.tick();
    assert_eq!(app.strip().lit(), 21);
    assert!(app.display().shows("Pressure: 01:30"));

    click(&mut app, &timer, Button::Back);
    assert_eq!(app.state(), SystemState::Menu);
    assert_eq!(app.strip().lit(), 0);
    assert!(app.display().shows("Main Menu"));
}

#[test]
fn back_always_wins_over_state_body() {
    let timer = MockTimeSource::new();
    let mut app = TestApp::new(&timer, peripherals(2048), Config::DEFAULT).unwrap();

    app.controls_mut().x = 200;
    click(&mut app, &timer, Button::Confirm);

    // pot gets loud on the same tick as back is pressed
    app.source_mut().level = 4095;
    app.controls_mut().back = true;
    app.tick();

    assert_eq!(app.state(), SystemState::Menu);
    assert!(!app.timer().is_active());
    assert_eq!(app.strip().lit(), 0);
}

#[test]
fn custom_trigger_level() {
    let timer = MockTimeSource::new();
    let config = Config {
        bean_trigger_level: 3,
        ..Config::DEFAULT
    };
    let mut app = TestApp::new(&timer, peripherals(2088), config).unwrap();

    app.controls_mut().x = 200;
    click(&mut app, &timer, Button::Confirm);
    assert_eq!(app.feedback().last_level(), Some(IntensityLevel::new(3)));
    assert_eq!(app.state(), SystemState::BeanMonitor);

    app.source_mut().level = 4095;
    app.tick();
    assert_eq!(app.state(), SystemState::BeanTimerRunning);
}

#[test]
fn rejects_config_with_zero_step() {
    let timer = MockTimeSource::new();
    let config = Config {
        intensity_bands: 0.0,
        ..Config::DEFAULT
    };

    let result: Result<TestApp<'_>, _> = KitchenApp::new(&timer, peripherals(2048), config);
    assert!(matches!(result, Err(InitError::InvalidConfig(_))));
}
