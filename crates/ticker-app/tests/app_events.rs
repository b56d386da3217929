//! Application-level event handling and configuration loading.

use std::time::Duration;
use ticker_app::{AppConfig, AppError, Application};
use ticker_core::{ConnectionStatus, Direction, TransportEvent};
use ticker_render::{ChannelSink, RenderPatch};
use ticker_ws::WsEvent;

fn message(raw: &str) -> WsEvent {
    WsEvent::Transport(TransportEvent::Message(raw.to_string()))
}

#[tokio::test]
async fn test_patches_reach_added_sink_in_order() {
    let mut app = Application::new(AppConfig::default()).unwrap();
    let (sink, mut rx) = ChannelSink::new();
    app.add_sink(Box::new(sink));

    app.handle_event(WsEvent::Transport(TransportEvent::Open));
    app.handle_event(message(
        r#"{"symbol":"EURUSD","bid":1.10000,"ask":1.10020,"timestamp":1000}"#,
    ));
    app.handle_event(message(
        r#"{"symbol":"EURUSD","bid":1.10010,"ask":1.10015,"timestamp":1001}"#,
    ));

    assert_eq!(
        rx.recv().await,
        Some(RenderPatch::Status {
            status: ConnectionStatus::Connected
        })
    );
    let Some(RenderPatch::Quote(first)) = rx.recv().await else {
        panic!("expected first quote patch");
    };
    assert_eq!(first.bid_direction, Direction::NoBaseline);
    let Some(RenderPatch::Quote(second)) = rx.recv().await else {
        panic!("expected second quote patch");
    };
    assert_eq!(second.bid_direction, Direction::Up);
    assert_eq!(second.ask_direction, Direction::Down);
}

#[tokio::test]
async fn test_rejected_payloads_emit_nothing() {
    let mut app = Application::new(AppConfig::default()).unwrap();
    let (sink, mut rx) = ChannelSink::new();
    app.add_sink(Box::new(sink));

    assert!(app.handle_event(message("{not json")).is_none());
    assert!(app
        .handle_event(message(
            r#"{"symbol":"AUDUSD","bid":0.65,"ask":0.6502,"timestamp":1}"#
        ))
        .is_none());
    assert!(app
        .handle_event(message(r#"{"symbol":"EURUSD","bid":1.1,"timestamp":1}"#))
        .is_none());

    assert!(rx.try_recv().is_err());
    assert_eq!(app.engine().stats().parse_errors(), 2);
    assert_eq!(app.engine().stats().unknown_instruments(), 1);
}

#[test]
fn test_connection_lifecycle() {
    let mut app = Application::new(AppConfig::default()).unwrap();

    app.handle_event(WsEvent::Transport(TransportEvent::Open));
    app.handle_event(WsEvent::Transport(TransportEvent::Error(
        "connection reset".to_string(),
    )));
    assert_eq!(app.engine().status(), ConnectionStatus::Disconnected);

    app.handle_event(WsEvent::Reconnecting {
        attempt: 1,
        delay: Duration::from_millis(1000),
    });
    assert_eq!(app.engine().status(), ConnectionStatus::Connecting);

    app.handle_event(WsEvent::Transport(TransportEvent::Open));
    assert_eq!(app.engine().status(), ConnectionStatus::Connected);
}

#[test]
fn test_config_from_toml() {
    let config = AppConfig::from_toml_str(
        r#"
        instruments = ["EURUSD", "USDJPY"]
        history_capacity = 10

        [websocket]
        url = "ws://feed.example:9002"

        [dashboard]
        enabled = true
        port = 8088
        "#,
    )
    .unwrap();

    assert_eq!(config.instruments, vec!["EURUSD", "USDJPY"]);
    assert_eq!(config.history_capacity, 10);
    assert_eq!(config.websocket.url, "ws://feed.example:9002");
    assert_eq!(config.websocket.reconnect_base_delay_ms, 1000);
    assert_eq!(config.dashboard.port, 8088);
    assert_eq!(config.dashboard.max_connections, 10);
}

#[test]
fn test_config_validation_errors() {
    let cases = [
        "history_capacity = 1",
        "instruments = []",
        r#"instruments = ["EURUSD", "EURUSD"]"#,
        r#"instruments = ["EUR/USD"]"#,
        "[websocket]\nurl = \"http://localhost:9002\"",
        "[websocket]\nreconnect_base_delay_ms = 5000\nreconnect_max_delay_ms = 1000",
    ];
    for case in cases {
        let err = AppConfig::from_toml_str(case).unwrap_err();
        assert!(
            matches!(err, AppError::Config(_) | AppError::Core(_)),
            "unexpected error for {case:?}: {err}"
        );
    }
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("ticker-config-{}.toml", std::process::id()));
    std::fs::write(&path, "history_capacity = 12\n[telemetry]\nlog_filter = \"debug\"\n").unwrap();

    let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.history_capacity, 12);
    assert_eq!(config.telemetry.log_filter, "debug");
    assert_eq!(config.instruments.len(), 3);
}

#[test]
fn test_missing_config_file() {
    let err = AppConfig::from_file("/nonexistent/ticker.toml").unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_shipped_default_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
    let config = AppConfig::from_toml_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(config.history_capacity, 30);
    assert!(!config.dashboard.enabled);
}
