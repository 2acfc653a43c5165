//! End-to-end test against a fake driver: a real websocket server that
//! pushes a status feed and records every command the client sends.

use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use tungstenite::Message;
use vestlink::client::PlayerConfig;
use vestlink::transport::DriverEndpoint;
use vestlink::{Panel, Player, Position};

/// Spawn a one-connection fake driver. It greets the client with `status`,
/// then records inbound text frames until the client disconnects.
fn spawn_fake_driver(status: &'static str) -> (DriverEndpoint, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener.local_addr().expect("addr should resolve").port();

    let handle = thread::spawn(move || {
        let (stream, _addr) = listener.accept().expect("accept should succeed");
        let mut socket = tungstenite::accept(stream).expect("websocket handshake should succeed");
        socket
            .send(Message::Text(status.to_string()))
            .expect("status push should succeed");

        let mut received = Vec::new();
        loop {
            match socket.read() {
                Ok(Message::Text(text)) => received.push(text),
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        received
    });

    (DriverEndpoint::new("127.0.0.1", port), handle)
}

fn wait_until(what: &str, predicate: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !predicate() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn full_session_against_fake_driver() {
    let (endpoint, driver) =
        spawn_fake_driver(r#"{"ActiveKeys":["heartbeat"],"ConnectedPositions":["Vest","VestFront"]}"#);

    let player = Player::with_config(PlayerConfig {
        endpoint,
        stop_linger: Duration::ZERO,
    });
    player.initialize().expect("initialize should succeed");
    assert!(player.is_initialized());

    wait_until("status feed", || player.is_playing_key("heartbeat"));
    assert!(player.is_playing());
    assert!(player.is_device_connected(Position::Vest));
    assert!(player.is_device_connected(Position::VestFront));
    assert!(!player.is_device_connected(Position::GloveL));

    player
        .activate_discrete(Panel::Front, 3, 100, 40)
        .expect("activation should validate");
    player.submit_registered("heartbeat");
    player.stop_all();
    assert!(!player.is_initialized());

    let received = driver.join().expect("driver thread should complete");
    assert_eq!(received.len(), 3, "unexpected commands: {received:?}");

    let activation: serde_json::Value =
        serde_json::from_str(&received[0]).expect("activation should be JSON");
    assert_eq!(activation["Submit"][0]["Type"], "frame");
    assert_eq!(activation["Submit"][0]["Frame"]["position"], "VestFront");
    assert_eq!(activation["Submit"][0]["Frame"]["dotPoints"][0]["index"], 3);

    assert_eq!(
        received[1],
        r#"{"Submit":[{"Type":"key","Key":"heartbeat"}]}"#
    );
    assert_eq!(received[2], r#"{"Stop":[{"Key":"heartbeat"}]}"#);
}

#[test]
fn initialize_surfaces_connect_failure() {
    // Bind-then-drop to get a port with nothing listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        listener.local_addr().expect("addr should resolve").port()
    };

    let player = Player::with_config(PlayerConfig {
        endpoint: DriverEndpoint::new("127.0.0.1", port),
        stop_linger: Duration::ZERO,
    });

    assert!(player.initialize().is_err());
    assert!(!player.is_initialized());
}

#[test]
fn driver_crash_is_observable_and_last_snapshot_stays_readable() {
    // A driver that pushes one status frame and then dies without a
    // websocket closing handshake.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener.local_addr().expect("addr should resolve").port();
    let driver = thread::spawn(move || {
        let (stream, _addr) = listener.accept().expect("accept should succeed");
        let mut socket = tungstenite::accept(stream).expect("websocket handshake should succeed");
        socket
            .send(Message::Text(
                r#"{"ActiveKeys":["p1"],"ConnectedPositions":["Vest"]}"#.to_string(),
            ))
            .expect("status push should succeed");
        // Socket dropped here: TCP reset, no close frame.
    });

    let player = Player::with_config(PlayerConfig {
        endpoint: DriverEndpoint::new("127.0.0.1", port),
        stop_linger: Duration::ZERO,
    });
    player.initialize().expect("initialize should succeed");
    wait_until("status feed", || player.is_playing_key("p1"));

    driver.join().expect("driver thread should complete");
    wait_until("disconnect", || !player.is_initialized());

    // Stale but available: the last published snapshot still answers.
    assert!(player.is_playing_key("p1"));
    assert!(player.is_device_connected(Position::Vest));
}
