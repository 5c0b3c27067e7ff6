//! Login and return-to-home procedures against scripted screens.

mod common;

use std::time::Duration;

use tokio::time::Instant;

use common::*;
use mower_lib::errors::MowerError;
use mower_lib::perception::types::{Coordinate, Landmark, Location, Scene};
use mower_lib::solver::prompt::CredentialField;
use mower_lib::solver::Solver;

fn login_screens(scenes: &[Scene]) -> ScriptedPerception {
    ScriptedPerception::new(scenes)
        .element("login_account", Location::scope((500, 600), (700, 640)))
        .element("login_username", Location::scope((400, 300), (880, 340)))
        .element("login_password", Location::scope((400, 380), (880, 420)))
        .element("login_button", Location::scope((560, 480), (720, 520)))
        .element("login_iknow", Location::Coordinate(Coordinate::new(640, 650)))
}

#[tokio::test(start_paused = true)]
async fn test_login_from_main_types_each_credential_once() {
    let device = MockDevice::focused();
    let perception = login_screens(&[
        Scene::LoginMain,
        Scene::LoginInput,
        Scene::LoginAnnounce,
        Scene::Index,
    ]);
    let (prompt, asked) = RecordingPrompt::new();
    let mut solver = Solver::builder(config(3))
        .device(device.clone())
        .perception(Box::new(perception))
        .prompt(Box::new(prompt))
        .build()
        .await
        .unwrap();

    solver.login().await.unwrap();

    assert_eq!(device.texts(), vec!["doctor".to_string(), "originium".to_string()]);
    assert_eq!(
        *asked.lock().unwrap(),
        vec![CredentialField::Username, CredentialField::Password]
    );
    assert_eq!(
        device.taps(),
        vec![
            Coordinate::new(600, 620), // account
            Coordinate::new(640, 320), // username field
            Coordinate::new(0, 0),
            Coordinate::new(640, 400), // password field
            Coordinate::new(0, 0),
            Coordinate::new(640, 500), // login button
            Coordinate::new(640, 650), // announcement
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_login_start_taps_bottom_center() {
    let device = MockDevice::focused();
    let mut solver = solver_with(
        config(3),
        device.clone(),
        ScriptedPerception::new(&[Scene::LoginStart, Scene::Index]),
    )
    .await;

    solver.login().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(640, 710)]);
}

#[tokio::test(start_paused = true)]
async fn test_login_gives_up_on_unknown_scene() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Unrecognized(199)]);
    let log = perception.log();
    let mut solver = solver_with(config(2), device.clone(), perception).await;

    let err = solver.login().await.unwrap_err();

    assert!(matches!(err, MowerError::Strategy(_)));
    assert!(device.actions().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_already_home_does_nothing() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Index]);
    let log = perception.log();
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert!(device.actions().is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.refreshes, 0);
    assert!(log.finds.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_mail_without_home_exhausts_budget() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Mail]);
    let log = perception.log();
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    let err = solver.back_to_index().await.unwrap_err();

    assert!(matches!(err, MowerError::Strategy(_)));
    assert!(device.taps().is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.finds.get("mail"), Some(&3));
    // one re-observation per failure, the last one included
    assert_eq!(log.refreshes, 3);
}

#[tokio::test(start_paused = true)]
async fn test_mail_taps_vertical_midpoint() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Mail, Scene::Index])
        .element("mail", Location::scope((1100, 300), (1200, 500)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(400, 400)]);
}

#[tokio::test(start_paused = true)]
async fn test_opens_navigation_then_goes_home() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[
        Scene::Undefined,
        Scene::NavigationBar,
        Scene::Index,
    ])
    .landmark(Landmark::NavButton, Location::Coordinate(Coordinate::new(60, 40)))
    .element("nav_index", Location::scope((100, 100), (200, 140)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(
        device.taps(),
        vec![Coordinate::new(60, 40), Coordinate::new(150, 120)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_home_delegates_to_login() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::LoginStart, Scene::Index]);
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(640, 710)]);
}

#[tokio::test(start_paused = true)]
async fn test_double_confirm_uses_biased_anchor() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::DoubleConfirm, Scene::Index])
        .element("double_confirm", Location::scope((0, 0), (100, 50)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(80, 25)]);
}

#[tokio::test(start_paused = true)]
async fn test_operation_finished_and_confirm() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[
        Scene::OperatorFinish,
        Scene::Confirm,
        Scene::Loading,
        Scene::Index,
    ])
    .landmark(Landmark::Confirm, Location::Coordinate(Coordinate::new(900, 500)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(
        device.taps(),
        vec![Coordinate::new(640, 10), Coordinate::new(900, 500)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_login_aborts_home() {
    let device = MockDevice::focused();
    // login family, but no account button on screen
    let perception = ScriptedPerception::new(&[Scene::LoginMain]);
    let mut solver = solver_with(config(2), device.clone(), perception).await;

    let err = solver.back_to_index().await.unwrap_err();

    match err {
        MowerError::Strategy(reason) => assert!(reason.contains("login")),
        other => panic!("expected strategy error, got {other:?}"),
    }
    assert!(device.taps().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_login_succeeds_when_last_retry_lands_home() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[
        Scene::Unrecognized(150),
        Scene::Unrecognized(150),
        Scene::Unrecognized(150),
        Scene::Index,
    ]);
    let log = perception.log();
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.login().await.unwrap();

    assert!(device.actions().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 3);
}

#[tokio::test(start_paused = true)]
async fn test_home_succeeds_when_last_retry_lands_home() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[
        Scene::Undefined,
        Scene::Undefined,
        Scene::Undefined,
        Scene::Index,
    ]);
    let log = perception.log();
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert!(device.taps().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 3);
}

#[tokio::test(start_paused = true)]
async fn test_login_quickly_taps_awake() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::LoginQuickly, Scene::Index])
        .element("login_awake", Location::scope((540, 560), (740, 600)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.login().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(640, 580)]);
}

#[tokio::test(start_paused = true)]
async fn test_login_loading_waits_without_tapping() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::LoginLoading, Scene::Loading, Scene::Index]);
    let log = perception.log();
    let cfg = config(3);
    let loading = Duration::from_millis(cfg.timing.loading_wait_ms);
    let mut solver = solver_with(cfg, device.clone(), perception).await;

    let started = Instant::now();
    solver.login().await.unwrap();

    assert!(started.elapsed() >= loading * 2);
    assert!(device.actions().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_login_confirm_taps_landmark() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Confirm, Scene::Index])
        .landmark(Landmark::Confirm, Location::Coordinate(Coordinate::new(880, 520)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.login().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(880, 520)]);
}

#[tokio::test(start_paused = true)]
async fn test_announcement_taps_close() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Announcement, Scene::Index]).landmark(
        Landmark::AnnouncementClose,
        Location::scope((1180, 20), (1220, 60)),
    );
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(1200, 40)]);
}

#[tokio::test(start_paused = true)]
async fn test_materiel_taps_icon() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Materiel, Scene::Index])
        .element("materiel_ico", Location::scope((600, 300), (680, 380)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(640, 340)]);
}

#[tokio::test(start_paused = true)]
async fn test_skip_taps_skip() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Skip, Scene::Index])
        .element("skip", Location::Coordinate(Coordinate::new(1210, 35)));
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(1210, 35)]);
}

#[tokio::test(start_paused = true)]
async fn test_ongoing_operation_waits_longer() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::OperatorOngoing, Scene::Index]);
    let log = perception.log();
    let cfg = config(3);
    let operation = Duration::from_millis(cfg.timing.operation_wait_ms);
    let mut solver = solver_with(cfg, device.clone(), perception).await;

    let started = Instant::now();
    solver.back_to_index().await.unwrap();

    assert!(started.elapsed() >= operation);
    assert!(device.actions().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_elimination_finished_taps_top_center() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::OperatorEliminateFinish, Scene::Index]);
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert_eq!(device.taps(), vec![Coordinate::new(640, 10)]);
}

#[tokio::test(start_paused = true)]
async fn test_unanticipated_home_scene_is_retried() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Unrecognized(700), Scene::Index]);
    let log = perception.log();
    let mut solver = solver_with(config(3), device.clone(), perception).await;

    solver.back_to_index().await.unwrap();

    assert!(device.taps().is_empty());
    assert_eq!(log.lock().unwrap().refreshes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_unanticipated_home_scene_exhausts_budget() {
    let device = MockDevice::focused();
    let perception = ScriptedPerception::new(&[Scene::Unrecognized(700)]);
    let mut solver = solver_with(config(2), device.clone(), perception).await;

    let err = solver.back_to_index().await.unwrap_err();

    assert!(matches!(err, MowerError::Strategy(_)));
    assert!(device.taps().is_empty());
}
