mod common;

use std::time::Duration;

use common::*;
use game_core::{BodyRegion, GateState, Weapon};
use runtime::{
    DamageEvent, Event, MatchEvent, MatchPhase, PoseError, RuntimeConfig, RuntimeError,
    ServerMessage, ShotError, ShotEvent, ShotReport, Topic,
};

#[tokio::test(start_paused = true)]
async fn hit_sends_damage_event() {
    let mut session = active_session(ScriptedPose::new([Ok(shoulder_on_crosshair())])).await;

    let report = session.handle.shoot().await.expect("shot should settle");

    let ShotReport::Hit { hit, event } = report.clone() else {
        panic!("expected a hit, got {report:?}");
    };
    assert_eq!(hit.region, BodyRegion::Torso);
    assert_eq!(hit.damage, 15);
    assert_eq!(
        event,
        DamageEvent {
            shooter_id: SHOOTER.to_string(),
            damage: 15,
        }
    );

    let line = session.outbound.recv().await.expect("damage should be sent");
    assert_eq!(
        line,
        r#"{"type":"damage","shooterId":"shooter-1","damage":15}"#
    );
}

#[tokio::test(start_paused = true)]
async fn pistol_shot_inside_cooldown_is_dropped() {
    let mut session = active_session(ScriptedPose::new([
        Ok(shoulder_on_crosshair()),
        Ok(shoulder_on_crosshair()),
    ]))
    .await;

    let first = session.handle.shoot().await.expect("first shot should settle");
    assert_eq!(first.damage(), Some(15));
    session.outbound.recv().await.expect("first damage should be sent");

    tokio::time::advance(Duration::from_millis(100)).await;
    let second = session.handle.shoot().await.expect("second shot should settle");

    assert_eq!(second, ShotReport::Dropped { remaining_ms: 100 });
    assert!(!second.was_accepted());
    assert!(session.outbound.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(100)).await;
    assert_eq!(
        session.handle.gate_state().await.unwrap(),
        GateState::Ready
    );
    let third = session.handle.shoot().await.expect("third shot should settle");
    assert_eq!(third.damage(), Some(15));
}

#[tokio::test(start_paused = true)]
async fn weapon_switch_keeps_in_flight_profile() {
    let (pose, release) = GatedPose::new(nose_above_crosshair());
    let mut session = active_session(pose).await;
    let mut shots = session.handle.subscribe(Topic::Shot);

    session.handle.equip(Weapon::Sniper).await.unwrap();
    let shooter = session.handle.clone();
    let in_flight = tokio::spawn(async move { shooter.shoot().await });

    wait_accepted(&mut shots).await;
    session.handle.equip(Weapon::Pistol).await.unwrap();
    release.notify_one();

    let report = in_flight
        .await
        .expect("shot task should not panic")
        .expect("shot should settle");
    assert_eq!(report.damage(), Some(40));
    assert_eq!(
        session.handle.equipped().await.unwrap(),
        Weapon::Pistol
    );

    let line = session.outbound.recv().await.expect("damage should be sent");
    assert!(line.contains(r#""damage":40"#));

    // The sniper's reload window still applies after switching.
    tokio::time::advance(Duration::from_millis(250)).await;
    let report = session.handle.shoot().await.unwrap();
    assert_eq!(report, ShotReport::Dropped { remaining_ms: 150 });
}

#[tokio::test(start_paused = true)]
async fn result_after_game_over_is_discarded() {
    let (pose, release) = GatedPose::new(shoulder_on_crosshair());
    let mut session = active_session(pose).await;
    let mut shots = session.handle.subscribe(Topic::Shot);

    let shooter = session.handle.clone();
    let in_flight = tokio::spawn(async move { shooter.shoot().await });

    let shot_id = wait_accepted(&mut shots).await;
    session
        .handle
        .apply(ServerMessage::GameOver {
            winner: "rival".to_string(),
        })
        .await
        .unwrap();
    release.notify_one();

    let report = in_flight.await.unwrap().unwrap();
    assert_eq!(report, ShotReport::Discarded);
    assert_eq!(
        shots.recv().await.unwrap(),
        Event::Shot(ShotEvent::Discarded { shot_id })
    );
    assert!(session.outbound.try_recv().is_err());

    let state = session.handle.match_state().await.unwrap();
    assert_eq!(
        state.phase,
        MatchPhase::Over {
            winner: "rival".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn refused_shots_leave_cooldown_untouched() {
    let session = session(ScriptedPose::default()).await;

    let err = session.handle.shoot().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Shot(ShotError::MatchNotActive)
    ));

    session
        .handle
        .apply(ServerMessage::MatchStarted)
        .await
        .unwrap();

    session.feed.set_live(false);
    let err = session.handle.shoot().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Shot(ShotError::NoVideoFrame)));

    session.feed.set_live(true);
    session.channel.disconnect();
    let err = session.handle.shoot().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Shot(ShotError::Disconnected)));

    assert_eq!(
        session.handle.gate_state().await.unwrap(),
        GateState::Ready
    );
}

#[tokio::test(start_paused = true)]
async fn estimation_failure_consumes_the_shot() {
    let mut session = active_session(ScriptedPose::new([Err(PoseError::Inference(
        "tensor shape mismatch".to_string(),
    ))]))
    .await;
    let mut shots = session.handle.subscribe(Topic::Shot);

    let report = session.handle.shoot().await.unwrap();
    assert_eq!(report, ShotReport::Missed);
    assert!(session.outbound.try_recv().is_err());

    let mut saw_failure = false;
    while let Ok(event) = shots.try_recv() {
        if let Event::Shot(ShotEvent::EstimationFailed { reason, .. }) = event {
            assert!(reason.contains("tensor shape mismatch"));
            saw_failure = true;
        }
    }
    assert!(saw_failure);

    assert_eq!(
        session.handle.gate_state().await.unwrap(),
        GateState::Reloading { remaining_ms: 200 }
    );
}

#[tokio::test(start_paused = true)]
async fn empty_estimate_is_a_miss() {
    let session = active_session(ScriptedPose::new([Ok(Vec::new())])).await;

    let report = session.handle.shoot().await.unwrap();
    assert_eq!(report, ShotReport::Missed);
    assert!(report.was_accepted());
}

#[tokio::test(start_paused = true)]
async fn server_messages_update_match_state() {
    let session = session(ScriptedPose::default()).await;
    let mut matches = session.handle.subscribe(Topic::Match);

    let roster: ServerMessage = serde_json::from_str(
        r#"{"type":"players","players":[{"id":"shooter-1","health":100,"ready":true},{"id":"rival","health":85,"ready":false}]}"#,
    )
    .unwrap();
    session.handle.apply(roster).await.unwrap();

    let event = matches.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::Match(MatchEvent::RosterUpdated { ref players }) if players.len() == 2
    ));

    let state = session.handle.match_state().await.unwrap();
    assert_eq!(state.phase, MatchPhase::Waiting);
    assert_eq!(state.player("rival").map(|p| p.health), Some(85));
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_worker() {
    let session = active_session(ScriptedPose::default()).await;
    let Session {
        runtime, handle, ..
    } = session;
    drop(handle);

    runtime.shutdown().await.expect("worker should stop cleanly");
}

#[tokio::test(start_paused = true)]
async fn stalled_network_does_not_block_the_session() {
    let config = common::config();
    let session = start(
        session_with(
            ScriptedPose::new([Ok(shoulder_on_crosshair()), Ok(shoulder_on_crosshair())]),
            config,
            1,
        )
        .await,
    )
    .await;
    // `session.outbound` stays alive but is never read, so the queue stays full.

    let first = session.handle.shoot().await.unwrap();
    assert_eq!(first.damage(), Some(15));

    tokio::time::advance(Duration::from_millis(200)).await;
    let second = tokio::time::timeout(Duration::from_secs(5), session.handle.shoot())
        .await
        .expect("second shot should settle while the queue is full")
        .unwrap();
    assert_eq!(second.damage(), Some(15));

    let gate = tokio::time::timeout(Duration::from_secs(5), session.handle.gate_state())
        .await
        .expect("worker should keep answering commands");
    assert!(matches!(gate, Ok(GateState::Reloading { .. })));

    tokio::time::timeout(Duration::from_secs(5), session.handle.equip(Weapon::Shotgun))
        .await
        .expect("equip should not wait on the network")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn send_failure_after_hit_is_absorbed() {
    let (pose, release) = GatedPose::new(shoulder_on_crosshair());
    let mut session = active_session(pose).await;
    let mut shots = session.handle.subscribe(Topic::Shot);

    let shooter = session.handle.clone();
    let in_flight = tokio::spawn(async move { shooter.shoot().await });

    wait_accepted(&mut shots).await;
    session.channel.disconnect();
    release.notify_one();

    let report = in_flight.await.unwrap().unwrap();
    assert_eq!(report.damage(), Some(15));
    assert!(matches!(report, ShotReport::Hit { .. }));

    // Let the send task run; it must give up without queueing anything.
    tokio::task::yield_now().await;
    assert!(session.outbound.try_recv().is_err());

    // The session keeps working after the failed send.
    assert_eq!(session.handle.equipped().await.unwrap(), Weapon::Pistol);
}

#[tokio::test(start_paused = true)]
async fn flip_setting_reaches_pose_source() {
    let pose = RecordingPose::default();
    let flips = pose.flips.clone();
    let config = RuntimeConfig {
        flip_horizontal: true,
        ..common::config()
    };
    let session = start(session_with(pose, config, 16).await).await;

    let report = session.handle.shoot().await.unwrap();
    assert_eq!(report.damage(), Some(15));

    assert_eq!(*flips.lock().unwrap(), vec![true]);
}
