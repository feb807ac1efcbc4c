// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn install_polls_until_ready_and_reports_distinct_progress() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("1"))
        .on("GET", "/v2/changes/1", FakeReply::change(&doing("1")))
        .on("GET", "/v2/changes/1", FakeReply::change(&doing("1")))
        .on("GET", "/v2/changes/1", FakeReply::change(&done("1")));
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let options = CallOptions::new().on_progress(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let change = daemon.client().install("hello", options).await.unwrap();

    assert!(change.ready);
    assert_eq!(change.status, "Done");
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(daemon.count("GET", "/v2/changes/1"), 3);
    assert_eq!(daemon.requests()[0].json(), json!({"action": "install"}));
}

#[tokio::test]
async fn failed_change_surfaces_its_error() {
    let daemon = FakeDaemon::start().await;
    let failed = Change::builder().id("2").status("Error").ready(true).err("cannot install: boom").build();
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("2"))
        .on("GET", "/v2/changes/2", FakeReply::change(&failed));

    let err = daemon.client().install("hello", CallOptions::default()).await.unwrap_err();

    assert_eq!(err, ClientError::ChangeFailed("cannot install: boom".into()));
}

#[tokio::test]
async fn cancelling_while_polling_aborts_once() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("5"))
        .on("GET", "/v2/changes/5", FakeReply::change(&doing("5")))
        .on("POST", "/v2/changes/5", FakeReply::change(&doing("5")));
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = daemon.client().install("hello", CallOptions::new().cancel(token)).await.unwrap_err();

    assert_eq!(err, ClientError::Cancelled);
    assert_eq!(daemon.count("POST", "/v2/changes/5"), 1);
    let abort = daemon.requests().into_iter().find(|r| r.method == "POST" && r.path() == "/v2/changes/5").unwrap();
    assert_eq!(abort.json(), json!({"action": "abort"}));
}

#[tokio::test]
async fn explicit_abort_suppresses_the_automatic_one() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("6"))
        .on("GET", "/v2/changes/6", FakeReply::change(&doing("6")))
        .on("POST", "/v2/changes/6", FakeReply::change(&doing("6")));
    let client = daemon.client();
    let token = CancellationToken::new();

    let install = tokio::spawn({
        let client = client.clone();
        let token = token.clone();
        async move { client.install("hello", CallOptions::new().cancel(token)).await }
    });
    while daemon.count("GET", "/v2/changes/6") == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    client.abort_change("6").await.unwrap();
    token.cancel();

    assert_eq!(install.await.unwrap().unwrap_err(), ClientError::Cancelled);
    assert_eq!(daemon.count("POST", "/v2/changes/6"), 1);
}

#[tokio::test]
async fn ready_change_after_cancel_reports_cancelled() {
    let daemon = FakeDaemon::start().await;
    let token = CancellationToken::new();
    let canceller = token.clone();
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("8"))
        .on("GET", "/v2/changes/8", FakeReply::change(&done("8")).delay(Duration::from_millis(30)))
        .on("POST", "/v2/changes/8", FakeReply::change(&done("8")));
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = daemon.client().install("hello", CallOptions::new().cancel(token)).await.unwrap_err();

    assert_eq!(err, ClientError::Cancelled);
}

#[tokio::test]
async fn mismatched_change_id_is_a_protocol_error() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("3"))
        .on("GET", "/v2/changes/3", FakeReply::change(&done("4")));

    let err = daemon.client().install("hello", CallOptions::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::Protocol(_)), "{err:?}");
}

#[tokio::test]
async fn change_queries_are_synchronous() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/changes", FakeReply::sync(json!([done("1"), doing("2")])));

    let changes = daemon.client().get_changes(ChangeFilter::All, Some("hello")).await.unwrap();

    assert_eq!(changes.len(), 2);
    assert_eq!(daemon.requests()[0].target, "/v2/changes?select=all&for=hello");
}
