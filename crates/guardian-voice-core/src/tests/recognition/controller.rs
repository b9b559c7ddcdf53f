use crate::{
    LoopController, NoPlayback, RecognitionEvent, RestartDelays, SessionEvent, SessionSink,
    tests::support::{FakeEngine, FakePlayback},
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::Instant};

fn controller(engine: &FakeEngine) -> LoopController {
    let (events_tx, _events_rx) = mpsc::unbounded_channel();
    LoopController::new(
        engine.boxed(),
        Arc::new(NoPlayback),
        RestartDelays::default(),
        events_tx,
    )
}

fn with_playback(engine: &FakeEngine, playback: Arc<FakePlayback>) -> LoopController {
    let (events_tx, _events_rx) = mpsc::unbounded_channel();
    LoopController::new(engine.boxed(), playback, RestartDelays::default(), events_tx)
}

fn on(sink: &SessionSink, event: RecognitionEvent) -> SessionEvent {
    SessionEvent {
        session_id: sink.session_id(),
        event,
    }
}

#[allow(clippy::unwrap_used)]
fn current_sink(engine: &FakeEngine) -> SessionSink {
    engine.last_sink().unwrap()
}

/// WHAT: Enabling starts exactly one session, even when repeated
/// WHY: Gate cycles must not spawn duplicate recognizers
#[test]
fn given_disabled_when_enabling_twice_then_single_session() {
    // Given
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let now = Instant::now();

    // When
    controller.enable(now);
    controller.enable(now);

    // Then
    assert!(controller.is_enabled());
    assert_eq!(engine.starts(), 1);
    assert_eq!(controller.session(), Some(current_sink(&engine).session_id()));
    assert!(controller.restart_deadline().is_none());
}

/// WHAT: A final result is returned and a restart is scheduled after 400ms
/// WHY: Listening must continue after every utterance
#[test]
fn given_session_when_final_result_then_transcript_and_restart_scheduled() {
    // Given: Running session
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);
    let sink = current_sink(&engine);

    // When: Final result arrives
    let transcript = controller.on_event(on(&sink, RecognitionEvent::Final("socorro".into())), t0);

    // Then: Transcript returned, restart in 400ms
    assert_eq!(transcript.as_deref(), Some("socorro"));
    assert_eq!(
        controller.restart_deadline(),
        Some(t0 + Duration::from_millis(400))
    );
}

/// WHAT: Restart fires only once the deadline passes, replacing the session
/// WHY: The old session is released before the new one starts
#[test]
fn given_pending_restart_when_polling_then_new_session_after_deadline() {
    // Given: Restart pending after a final result
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);
    let first = current_sink(&engine);
    controller.on_event(on(&first, RecognitionEvent::Final("oi".into())), t0);

    // When: Polling before and at the deadline
    let early = controller.poll_restart(t0 + Duration::from_millis(399));
    let due = controller.poll_restart(t0 + Duration::from_millis(400));

    // Then: Only the second poll restarts
    assert!(!early);
    assert!(due);
    assert_eq!(engine.starts(), 2);
    assert_eq!(engine.releases(), 1);
    assert_ne!(controller.session(), Some(first.session_id()));
    assert!(controller.restart_deadline().is_none());
}

/// WHAT: Events from a released session are dropped
/// WHY: Late callbacks must never reach the wake machine
#[test]
fn given_restarted_session_when_old_session_reports_then_dropped() {
    // Given: Session replaced by a restart
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);
    let old = current_sink(&engine);
    controller.on_event(on(&old, RecognitionEvent::Error("net".into())), t0);
    controller.poll_restart(t0 + Duration::from_secs(1));

    // When: The old session reports late
    let transcript =
        controller.on_event(on(&old, RecognitionEvent::Partial("socorro".into())), t0);

    // Then: Ignored
    assert_eq!(transcript, None);
}

/// WHAT: End of speech does not shorten an already scheduled restart
/// WHY: Final then EndOfSpeech keeps the 400ms restart
#[test]
fn given_restart_pending_when_end_of_speech_then_deadline_kept() {
    // Given
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);
    let sink = current_sink(&engine);
    controller.on_event(on(&sink, RecognitionEvent::Final("oi".into())), t0);

    // When
    let later = t0 + Duration::from_millis(100);
    controller.on_event(on(&sink, RecognitionEvent::EndOfSpeech), later);

    // Then
    assert_eq!(
        controller.restart_deadline(),
        Some(t0 + Duration::from_millis(400))
    );
}

/// WHAT: End of speech alone restarts after 800ms, errors after 1000ms
/// WHY: Each session ending has its own back-off
#[test]
fn given_session_when_end_of_speech_or_error_then_respective_delays() {
    // Given
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);

    // When: End of speech
    controller.on_event(on(&current_sink(&engine), RecognitionEvent::EndOfSpeech), t0);

    // Then
    assert_eq!(
        controller.restart_deadline(),
        Some(t0 + Duration::from_millis(800))
    );

    // When: Next session errors
    let t1 = t0 + Duration::from_millis(800);
    controller.poll_restart(t1);
    controller.on_event(on(&current_sink(&engine), RecognitionEvent::Error("x".into())), t1);

    // Then
    assert_eq!(
        controller.restart_deadline(),
        Some(t1 + Duration::from_millis(1000))
    );
}

/// WHAT: Media playing at start defers the session by 3s
/// WHY: The recognizer must not fight other audio for the microphone
#[test]
fn given_playback_active_when_enabling_then_deferred() {
    // Given: Media playing
    let engine = FakeEngine::new();
    let playback = Arc::new(FakePlayback::default());
    playback.set(true);
    let mut controller = with_playback(&engine, playback.clone());
    let t0 = Instant::now();

    // When: Enabling
    controller.enable(t0);

    // Then: No session yet, retry in 3s
    assert_eq!(engine.starts(), 0);
    assert_eq!(controller.restart_deadline(), Some(t0 + Duration::from_secs(3)));

    // When: Playback stops and the deadline passes
    playback.set(false);
    controller.poll_restart(t0 + Duration::from_secs(3));

    // Then: Session starts
    assert_eq!(engine.starts(), 1);
}

/// WHAT: Media starting mid-session drops the transcript and backs off
/// WHY: Speech from a video must not trigger an alert
#[test]
fn given_session_when_playback_starts_and_partial_arrives_then_released() {
    // Given: Running session
    let engine = FakeEngine::new();
    let playback = Arc::new(FakePlayback::default());
    let mut controller = with_playback(&engine, playback.clone());
    let t0 = Instant::now();
    controller.enable(t0);
    let sink = current_sink(&engine);

    // When: Playback starts and a partial arrives
    playback.set(true);
    let transcript =
        controller.on_event(on(&sink, RecognitionEvent::Partial("socorro".into())), t0);

    // Then: Dropped, session stopped and released, 3s back-off
    assert_eq!(transcript, None);
    assert_eq!(engine.stops(), 1);
    assert_eq!(engine.releases(), 1);
    assert_eq!(controller.session(), None);
    assert_eq!(controller.restart_deadline(), Some(t0 + Duration::from_secs(3)));
}

/// WHAT: A refused start is retried after 800ms
/// WHY: A busy microphone is transient
#[test]
fn given_engine_refuses_when_enabling_then_retry_scheduled() {
    // Given: Engine refuses once
    let engine = FakeEngine::new();
    engine.fail_next_starts(1);
    let mut controller = controller(&engine);
    let t0 = Instant::now();

    // When
    controller.enable(t0);

    // Then
    assert_eq!(controller.session(), None);
    assert_eq!(
        controller.restart_deadline(),
        Some(t0 + Duration::from_millis(800))
    );

    // When: Retry
    controller.poll_restart(t0 + Duration::from_millis(800));

    // Then
    assert_eq!(engine.starts(), 1);
    assert!(controller.session().is_some());
}

/// WHAT: Disabling stops and releases the session and cancels restarts
/// WHY: Hibernation must leave nothing listening
#[test]
fn given_running_session_when_disabling_then_everything_released() {
    // Given: Session with a pending restart
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    let t0 = Instant::now();
    controller.enable(t0);
    let sink = current_sink(&engine);
    controller.on_event(on(&sink, RecognitionEvent::EndOfSpeech), t0);

    // When: Disabled twice
    controller.disable();
    controller.disable();

    // Then: One stop, one release, nothing pending, late events dropped
    assert!(!controller.is_enabled());
    assert_eq!(engine.stops(), 1);
    assert_eq!(engine.releases(), 1);
    assert!(controller.restart_deadline().is_none());
    assert!(!controller.poll_restart(t0 + Duration::from_secs(10)));
    assert_eq!(
        controller.on_event(on(&sink, RecognitionEvent::Final("socorro".into())), t0),
        None
    );
}

/// WHAT: Dropping the controller releases its session
/// WHY: Service teardown must free the microphone
#[test]
fn given_running_session_when_dropped_then_released() {
    let engine = FakeEngine::new();
    let mut controller = controller(&engine);
    controller.enable(Instant::now());

    drop(controller);

    assert_eq!(engine.releases(), 1);
}
