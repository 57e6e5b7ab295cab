//! Gate behavior against the in-memory lock store: cooldown atomicity,
//! exclusive-session single-holder semantics and token-guarded release.

use croupier_bot::dispatch::{CommandGate, CooldownDecision, SessionDecision};
use croupier_bot::services::locks::MemoryLockStore;
use std::sync::Arc;
use std::time::Duration;

fn gate() -> Arc<CommandGate> {
    Arc::new(CommandGate::new(Arc::new(MemoryLockStore::new())))
}

#[tokio::test]
async fn second_invocation_within_window_is_blocked() {
    let gate = gate();
    let ttl = Duration::from_secs(15);
    assert_eq!(
        gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
    match gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap() {
        CooldownDecision::Blocked { remaining } => {
            assert!(remaining <= ttl);
            assert!(remaining > Duration::from_secs(10));
        }
        CooldownDecision::Reserved => panic!("second invocation must be blocked"),
    }
}

#[tokio::test]
async fn cooldowns_are_scoped_per_user_guild_and_command() {
    let gate = gate();
    let ttl = Duration::from_secs(15);
    gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap();
    // Different user, different guild, different command: all unaffected.
    assert_eq!(
        gate.reserve_cooldown(2, 10, "dice", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
    assert_eq!(
        gate.reserve_cooldown(1, 11, "dice", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
    assert_eq!(
        gate.reserve_cooldown(1, 10, "roulette", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
}

#[tokio::test]
async fn clearing_waives_the_window() {
    let gate = gate();
    let ttl = Duration::from_secs(15);
    gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap();
    // A usage error waives the cooldown: the retry goes straight through.
    gate.clear_cooldown(1, 10, "dice").await.unwrap();
    assert_eq!(
        gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
}

#[tokio::test]
async fn cooldown_expires_on_its_own() {
    let gate = gate();
    let ttl = Duration::from_millis(50);
    gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(
        gate.reserve_cooldown(1, 10, "dice", ttl).await.unwrap(),
        CooldownDecision::Reserved
    );
}

#[tokio::test]
async fn concurrent_reservations_admit_exactly_one() {
    let gate = gate();
    let ttl = Duration::from_secs(15);
    let (a, b) = tokio::join!(
        gate.reserve_cooldown(1, 10, "dice", ttl),
        gate.reserve_cooldown(1, 10, "dice", ttl),
    );
    let reserved = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter(|d| *d == CooldownDecision::Reserved)
        .count();
    assert_eq!(reserved, 1, "a double-click must reserve exactly once");
}

#[tokio::test]
async fn second_exclusive_session_is_refused_naming_the_holder() {
    let gate = gate();
    let ttl = Duration::from_secs(60);
    let granted = gate.acquire_session(1, 10, "wager", ttl).await.unwrap();
    assert!(matches!(granted, SessionDecision::Granted(_)));

    match gate.acquire_session(1, 10, "wager", ttl).await.unwrap() {
        SessionDecision::Busy { holder } => assert_eq!(holder, "wager"),
        SessionDecision::Granted(_) => panic!("second session must be refused"),
    }
    // A different user's slot is independent.
    assert!(matches!(
        gate.acquire_session(2, 10, "wager", ttl).await.unwrap(),
        SessionDecision::Granted(_)
    ));
}

#[tokio::test]
async fn release_frees_the_slot() {
    let gate = gate();
    let ttl = Duration::from_secs(60);
    let SessionDecision::Granted(token) = gate.acquire_session(1, 10, "wager", ttl).await.unwrap()
    else {
        panic!("first acquire must succeed");
    };
    assert!(gate.release_session(1, 10, &token).await.unwrap());
    assert!(matches!(
        gate.acquire_session(1, 10, "wager", ttl).await.unwrap(),
        SessionDecision::Granted(_)
    ));
}

#[tokio::test]
async fn stale_token_cannot_release_a_newer_session() {
    let gate = gate();
    let SessionDecision::Granted(stale) = gate
        .acquire_session(1, 10, "wager", Duration::from_millis(40))
        .await
        .unwrap()
    else {
        panic!("first acquire must succeed");
    };
    // Let the first session expire, then let someone re-acquire the slot.
    tokio::time::sleep(Duration::from_millis(60)).await;
    let SessionDecision::Granted(_fresh) = gate
        .acquire_session(1, 10, "roulette", Duration::from_secs(60))
        .await
        .unwrap()
    else {
        panic!("slot must be free after expiry");
    };

    // The slow, expired holder comes back: its release must be a no-op.
    assert!(!gate.release_session(1, 10, &stale).await.unwrap());
    match gate
        .acquire_session(1, 10, "dice", Duration::from_secs(60))
        .await
        .unwrap()
    {
        SessionDecision::Busy { holder } => assert_eq!(holder, "roulette"),
        SessionDecision::Granted(_) => panic!("newer session must still be held"),
    }
}

#[tokio::test]
async fn concurrent_session_acquisitions_admit_exactly_one() {
    let gate = gate();
    let ttl = Duration::from_secs(60);
    // Two near-simultaneous wagers by the same user against different targets.
    let (a, b) = tokio::join!(
        gate.acquire_session(1, 10, "wager", ttl),
        gate.acquire_session(1, 10, "wager", ttl),
    );
    let granted = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter(|d| matches!(d, SessionDecision::Granted(_)))
        .count();
    assert_eq!(granted, 1, "only one wager may proceed past acquisition");
}

#[tokio::test]
async fn timed_keys_report_their_remaining_window() {
    let gate = gate();
    gate.arm_timer("robshield:10:42", Duration::from_secs(30))
        .await
        .unwrap();
    let remaining = gate.timer_remaining("robshield:10:42").await.unwrap();
    assert!(remaining.is_some());
    assert!(remaining.unwrap() <= Duration::from_secs(30));
    assert!(gate.timer_remaining("robshield:10:43").await.unwrap().is_none());
}
