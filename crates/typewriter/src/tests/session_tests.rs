use super::*;
use tokio::time::{sleep, Duration};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn reveals_one_character_per_tick() {
    let session = TypingSession::start(["hello"], TypingOptions::default().with_loop(false));
    assert_eq!(session.text(), "");

    sleep(ms(250)).await;
    assert_eq!(session.text(), "he");

    let done = session.finished().await;
    assert_eq!(done.text, "hello");
    assert_eq!(done.phase, Phase::Done);
    assert!(!session.is_running());
}

#[tokio::test(start_paused = true)]
async fn start_delay_holds_back_typing() {
    let options = TypingOptions::default().with_start_delay(ms(500));
    let session = TypingSession::start(["hey"], options);

    sleep(ms(550)).await;
    assert_eq!(session.text(), "");
    assert_eq!(session.snapshot().phase, Phase::Typing);

    sleep(ms(100)).await;
    assert_eq!(session.text(), "h");
}

#[tokio::test(start_paused = true)]
async fn holds_full_phrase_before_deleting() {
    let session = TypingSession::start(["ab", "cd"], TypingOptions::default());

    sleep(ms(1000)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Holding);
    assert_eq!(snapshot.text, "ab");
}

#[tokio::test(start_paused = true)]
async fn looping_session_publishes_cycle_in_order() {
    let session = TypingSession::start(["ab", "cd"], TypingOptions::default());
    let mut rx = session.subscribe();

    let mut texts = vec![rx.borrow_and_update().text.clone()];
    while texts.len() < 10 {
        rx.changed().await.expect("session alive");
        let text = rx.borrow_and_update().text.clone();
        if texts.last() != Some(&text) {
            texts.push(text);
        }
    }

    assert_eq!(
        texts,
        vec!["", "a", "ab", "a", "", "c", "cd", "c", "", "a"]
    );
}

#[tokio::test(start_paused = true)]
async fn stop_freezes_visible_text() {
    let mut session = TypingSession::start(["hello"], TypingOptions::default());
    sleep(ms(250)).await;
    assert_eq!(session.text(), "he");

    session.stop();
    assert!(!session.is_running());

    sleep(ms(5_000)).await;
    assert_eq!(session.text(), "he");
    assert_eq!(session.finished().await.text, "he");
}

#[tokio::test(start_paused = true)]
async fn dropping_session_closes_subscriptions() {
    let session = TypingSession::start(["hello", "world"], TypingOptions::default());
    let mut rx = session.subscribe();

    sleep(ms(350)).await;
    let before = rx.borrow_and_update().text.clone();
    assert_eq!(before, "hel");

    drop(session);
    sleep(ms(5_000)).await;

    assert!(rx.changed().await.is_err());
    assert_eq!(rx.borrow().text, before);
}

#[tokio::test(start_paused = true)]
async fn empty_phrase_list_never_spawns() {
    let session = TypingSession::start(Vec::<String>::new(), TypingOptions::default());
    assert!(!session.is_running());

    let done = session.finished().await;
    assert_eq!(done.phase, Phase::Done);
    assert_eq!(done.text, "");
}

#[tokio::test(start_paused = true)]
async fn sessions_run_independently() {
    let slow = TypingSession::start(["abcdef"], TypingOptions::default().with_loop(false));
    let fast = TypingSession::start(
        ["abcdef"],
        TypingOptions::default()
            .with_speed(ms(50))
            .with_loop(false),
    );

    sleep(ms(225)).await;
    assert_eq!(slow.text(), "ab");
    assert_eq!(fast.text(), "abcd");

    drop(fast);
    sleep(ms(200)).await;
    assert_eq!(slow.text(), "abcd");
}
