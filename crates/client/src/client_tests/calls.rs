// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn find_returns_snaps() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/find", FakeReply::sync(json!([snap_json("hello"), snap_json("hello-world")])));

    let snaps = daemon.client().find("hello").await.unwrap();

    let names: Vec<_> = snaps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["hello", "hello-world"]);
    assert_eq!(daemon.requests()[0].target, "/v2/find?q=hello");
}

#[tokio::test]
async fn chunked_responses_are_reassembled() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/find", FakeReply::sync(json!([snap_json("hello")])).chunked(7));

    let snaps = daemon.client().find("hello").await.unwrap();

    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].summary, "The hello snap");
}

#[tokio::test]
async fn daemon_error_keeps_kind_and_message() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/snaps/nope", FakeReply::error(404, "", "no such snap"));

    let err = daemon.client().get_snap("nope").await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.to_string(), "no such snap");
}

#[tokio::test]
async fn named_error_kind_wins_over_status() {
    let daemon = FakeDaemon::start().await;
    daemon.on("POST", "/v2/snaps/hello", FakeReply::error(400, "snap-already-installed", "already there"));

    let err = daemon.client().install("hello", CallOptions::default()).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::AlreadyInstalled));
}

#[tokio::test]
async fn common_headers_are_sent() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/system-info", FakeReply::sync(json!({"series": "16", "version": "2.61"})));
    let client = Client::new(daemon.config().auth(AuthData::new("m").discharge("d1")));

    let info = client.system_info().await.unwrap();

    assert_eq!(info.version, "2.61");
    let headers = &daemon.requests()[0].headers;
    assert_eq!(headers.get("Host"), Some(""));
    assert_eq!(headers.get("Connection"), Some("keep-alive"));
    assert_eq!(headers.get("User-Agent"), Some("snapd-client-test"));
    assert_eq!(headers.get("Accept-Language"), Some("en"));
    assert_eq!(headers.get("X-Allow-Interaction"), Some("true"));
    assert_eq!(headers.get("Authorization"), Some(r#"Macaroon root="m",discharge="d1""#));
}

#[tokio::test]
async fn settings_changes_apply_to_later_requests() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/system-info", FakeReply::sync(json!({})));
    let client = daemon.client();

    client.set_allow_interaction(false);
    client.set_user_agent("other/1.0");
    client.system_info().await.unwrap();

    let headers = &daemon.requests()[0].headers;
    assert!(!headers.contains("X-Allow-Interaction"));
    assert!(!headers.contains("Authorization"));
    assert_eq!(headers.get("User-Agent"), Some("other/1.0"));
}

#[tokio::test]
async fn maintenance_follows_latest_json_response() {
    let daemon = FakeDaemon::start().await;
    let restarting = json!({
        "type": "sync",
        "status-code": 200,
        "result": {},
        "maintenance": {"kind": "daemon-restart", "message": "daemon is restarting"},
    });
    daemon
        .on("GET", "/v2/system-info", FakeReply::json(200, restarting))
        .on("GET", "/v2/system-info", FakeReply::sync(json!({})));
    let client = daemon.client();

    client.system_info().await.unwrap();
    let maintenance = client.maintenance().unwrap();
    assert_eq!(maintenance.kind, snapd_core::MaintenanceKind::DaemonRestart);
    assert_eq!(maintenance.message, "daemon is restarting");

    client.system_info().await.unwrap();
    assert_eq!(client.maintenance(), None);
}

#[tokio::test]
async fn concurrent_calls_get_their_own_responses() {
    let daemon = FakeDaemon::start().await;
    for name in ["a", "b", "c"] {
        daemon.on("GET", &format!("/v2/snaps/{name}"), FakeReply::sync(snap_json(name)));
    }
    let client = daemon.client();

    let (a, b, c) = tokio::join!(client.get_snap("a"), client.get_snap("b"), client.get_snap("c"));

    assert_eq!(a.unwrap().name, "a");
    assert_eq!(b.unwrap().name, "b");
    assert_eq!(c.unwrap().name, "c");
    assert_eq!(daemon.connections(), 1);
    assert_eq!(client.pending_requests(), 0);
}

#[tokio::test]
async fn log_records_arrive_before_the_stream_ends() {
    let daemon = FakeDaemon::start().await;
    let gate = Arc::new(tokio::sync::Notify::new());
    let records = vec![
        json!({"message": "started", "sid": "snap.hello.hello", "pid": "1"}),
        json!({"message": "ready", "sid": "snap.hello.hello", "pid": "1"}),
    ];
    daemon.on("GET", "/v2/logs", FakeReply::json_seq(records).hold_until(Arc::clone(&gate)));
    let client = daemon.client();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let logs = GetLogs::new(["hello"]).follow(true).on_entry(move |entry| {
        let _ = tx.send(entry.message);
    });
    let call = tokio::spawn(async move { client.logs(logs, CallOptions::default()).await });

    assert_eq!(rx.recv().await.as_deref(), Some("started"));
    assert_eq!(rx.recv().await.as_deref(), Some("ready"));
    assert!(!call.is_finished());

    gate.notify_one();
    let collected = call.await.unwrap().unwrap();
    assert!(collected.is_empty());
}

#[tokio::test]
async fn log_records_are_collected_without_a_sink() {
    let daemon = FakeDaemon::start().await;
    daemon.on("GET", "/v2/logs", FakeReply::json_seq(vec![json!({"message": "one"}), json!({"message": "two"})]));

    let entries = daemon.client().logs(GetLogs::new(["hello"]).limit(2), CallOptions::default()).await.unwrap();

    let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["one", "two"]);
}

#[tokio::test]
async fn followed_logs_without_a_sink_return_when_the_stream_ends() {
    let daemon = FakeDaemon::start().await;
    let gate = Arc::new(Notify::new());
    daemon.on("GET", "/v2/logs", FakeReply::json_seq(vec![json!({"message": "one"})]).hold_until(Arc::clone(&gate)));
    let client = daemon.client();

    let call = tokio::spawn(async move { client.logs(GetLogs::new(["hello"]).follow(true), CallOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!call.is_finished());

    gate.notify_one();
    let entries = call.await.unwrap().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "one");
}

#[tokio::test]
async fn download_reads_filename_and_bytes() {
    let daemon = FakeDaemon::start().await;
    daemon.on(
        "POST",
        "/v2/download",
        FakeReply::raw(200, "application/octet-stream", b"snap-bytes".to_vec())
            .header("Content-Disposition", "attachment; filename=hello_42.snap"),
    );

    let downloaded = daemon.client().download(DownloadSnap::new("hello"), CallOptions::default()).await.unwrap();

    assert_eq!(downloaded.filename.as_deref(), Some("hello_42.snap"));
    assert_eq!(downloaded.data, b"snap-bytes");
}

#[tokio::test]
async fn cancelled_before_sending_never_connects() {
    let daemon = FakeDaemon::start().await;
    let token = CancellationToken::new();
    token.cancel();

    let err = daemon.client().call(GetSystemInfo, CallOptions::new().cancel(token)).await.unwrap_err();

    assert_eq!(err, ClientError::Cancelled);
    assert_eq!(daemon.connections(), 0);
}

#[test]
fn blocking_client_runs_calls_to_completion() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let daemon = runtime.block_on(FakeDaemon::start());
    daemon.on("GET", "/v2/snaps", FakeReply::sync(json!([snap_json("core"), snap_json("hello")])));

    let client = BlockingClient::new(daemon.config()).unwrap();
    let snaps = client.list_snaps().unwrap();

    assert_eq!(snaps.len(), 2);
    assert_eq!(client.maintenance(), None);
}
