use bridge_core::lifecycle::{ShutdownReason, ShutdownSignal};

use std::time::Duration;

use tokio::time::timeout as TokioTimeout;

/// **VALUE**: Only the first reason is recorded.
///
/// **WHY THIS MATTERS**: `/shutdown` and Ctrl-C can arrive together. The log and the exit
/// path must agree on a single cause.
#[test]
fn given_fired_signal_when_fired_again_then_first_reason_kept() {
    // GIVEN: A fresh signal
    let signal = ShutdownSignal::new();
    assert!(!signal.is_fired());
    assert_eq!(signal.reason(), None);

    // WHEN: Firing twice with different reasons
    let first = signal.fire(ShutdownReason::ShutdownRequest);
    let second = signal.fire(ShutdownReason::Interrupt);

    // THEN: Only the first call counts
    assert!(first);
    assert!(!second);
    assert!(signal.is_fired());
    assert_eq!(signal.reason(), Some(ShutdownReason::ShutdownRequest));
}

#[test]
fn given_cloned_signal_when_clone_fires_then_original_observes_it() {
    let signal = ShutdownSignal::new();
    let clone = signal.clone();

    clone.fire(ShutdownReason::Terminate);

    assert_eq!(signal.reason(), Some(ShutdownReason::Terminate));
}

/// **VALUE**: Concurrent producers race safely; exactly one wins.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set race letting two firers both believe
/// they started shutdown (and both kill the driver).
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_firers_when_racing_then_exactly_one_succeeds() {
    // GIVEN: Many tasks sharing one signal
    let signal = ShutdownSignal::new();
    let handles: Vec<_> = (0..32)
        .map(|i| {
            let signal = signal.clone();
            let reason = if i % 2 == 0 {
                ShutdownReason::Interrupt
            } else {
                ShutdownReason::ShutdownRequest
            };
            tokio::spawn(async move { signal.fire(reason) })
        })
        .collect();

    // WHEN: All of them fire
    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    // THEN: One winner
    assert_eq!(winners, 1);
    assert!(signal.is_fired());
}

#[tokio::test]
async fn given_waiter_when_signal_fires_then_waiter_receives_reason() {
    let signal = ShutdownSignal::new();
    let waiter = {
        let signal = signal.clone();
        tokio::spawn(async move { signal.fired().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    signal.fire(ShutdownReason::Interrupt);

    let reason = TokioTimeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter resolves")
        .unwrap();
    assert_eq!(reason, ShutdownReason::Interrupt);
}

/// **VALUE**: Subscribing after the fact never misses the event.
#[tokio::test]
async fn given_already_fired_signal_when_waiting_then_resolves_immediately() {
    let signal = ShutdownSignal::new();
    signal.fire(ShutdownReason::ServerStopped);

    let reason = TokioTimeout(Duration::from_millis(100), signal.fired())
        .await
        .expect("late waiter resolves");

    assert_eq!(reason, ShutdownReason::ServerStopped);
}

#[tokio::test]
async fn given_unfired_signal_when_waiting_then_does_not_resolve() {
    let signal = ShutdownSignal::new();

    let result = TokioTimeout(Duration::from_millis(100), signal.fired()).await;

    assert!(result.is_err());
}
