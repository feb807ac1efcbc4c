// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn calls_share_one_connection() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/system-info", FakeReply::sync(json!({})));
    let client = daemon.client();

    for _ in 0..3 {
        client.system_info().await.unwrap();
    }

    assert_eq!(daemon.connections(), 1);
}

#[tokio::test]
async fn missing_socket_is_a_connect_error() {
    let dir = tempfile::tempdir().unwrap();
    let client = Client::new(ClientConfig::from_env().socket_path(dir.path().join("absent.socket")));

    let err = client.system_info().await.unwrap_err();

    assert!(matches!(err, ClientError::Connect { .. }), "{err:?}");
}

#[tokio::test]
async fn hang_up_fails_synchronous_call() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/snaps/hello", FakeReply::hang_up());

    let err = daemon.client().get_snap("hello").await.unwrap_err();

    assert!(matches!(err, ClientError::ConnectionLost(_)), "{err:?}");
}

#[tokio::test]
async fn closed_keep_alive_connection_is_replaced() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("GET", "/v2/snaps/hello", FakeReply::sync(snap_json("hello")).close_after())
        .on("GET", "/v2/snaps/hello", FakeReply::sync(snap_json("hello")));
    let client = daemon.client();

    client.get_snap("hello").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let snap = client.get_snap("hello").await.unwrap();

    assert_eq!(snap.name, "hello");
    assert_eq!(daemon.connections(), 2);
}

#[tokio::test]
async fn change_polling_survives_a_lost_connection() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("7"))
        .on("GET", "/v2/changes/7", FakeReply::hang_up())
        .on("GET", "/v2/changes/7", FakeReply::change(&done("7")));

    let change = daemon.client().install("hello", CallOptions::default()).await.unwrap();

    assert_eq!(change.id, "7");
    assert_eq!(daemon.connections(), 2);
    assert_eq!(daemon.count("GET", "/v2/changes/7"), 2);
}

#[tokio::test]
async fn change_polling_survives_a_garbled_response() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("7"))
        .on("GET", "/v2/changes/7", FakeReply::change(&doing("7")).header("Transfer-Encoding", "gzip"))
        .on("GET", "/v2/changes/7", FakeReply::change(&done("7")));

    let change = daemon.client().install("hello", CallOptions::default()).await.unwrap();

    assert_eq!(change.id, "7");
    assert_eq!(daemon.count("GET", "/v2/changes/7"), 2);
}

#[test]
fn framing_errors_count_as_connection_loss() {
    assert!(ClientError::Frame(snapd_wire::FrameError::Truncated).is_connection_loss());
    assert!(!ClientError::Protocol("change id mismatch".into()).is_connection_loss());
}

#[tokio::test]
async fn late_response_of_cancelled_call_is_discarded() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("GET", "/v2/snaps/slow", FakeReply::sync(snap_json("slow")).delay(Duration::from_millis(100)))
        .on("GET", "/v2/snaps/fast", FakeReply::sync(snap_json("fast")));
    let client = daemon.client();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = client.call(GetSnap::new("slow"), CallOptions::new().cancel(token)).await.unwrap_err();
    assert_eq!(err, ClientError::Cancelled);
    assert_eq!(client.pending_requests(), 1);

    let snap = client.get_snap("fast").await.unwrap();
    assert_eq!(snap.name, "fast");
    assert_eq!(client.pending_requests(), 0);
    assert_eq!(daemon.connections(), 1);
}

#[tokio::test]
async fn dropping_a_call_abandons_it() {
    let daemon = FakeDaemon::start().await;
    daemon
        .on("GET", "/v2/snaps/slow", FakeReply::sync(snap_json("slow")).delay(Duration::from_millis(100)))
        .on("GET", "/v2/snaps/fast", FakeReply::sync(snap_json("fast")));
    let client = daemon.client();

    let timed_out = tokio::time::timeout(Duration::from_millis(20), client.get_snap("slow")).await;
    assert!(timed_out.is_err());

    let snap = client.get_snap("fast").await.unwrap();
    assert_eq!(snap.name, "fast");
}

#[tokio::test]
async fn garbage_from_the_daemon_fails_the_call() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/system-info", FakeReply::raw(200, "application/json", b"{not json".to_vec()));

    let err = daemon.client().system_info().await.unwrap_err();

    assert!(matches!(err, ClientError::Protocol(_)), "{err:?}");
}
