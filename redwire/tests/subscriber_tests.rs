//! Subscriber tests against in-process mock servers.

use std::time::Duration;

use redwire::{Error, Subscriber};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::timeout;

async fn bind() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    (listener, port)
}

#[tokio::test]
async fn subscribe_ack_arrives_before_published_messages() {
    let (listener, port) = bind().await;

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = vec![0u8; 4096];

        let read = socket.read(&mut buffer).await.expect("read SUBSCRIBE");
        let request = String::from_utf8_lossy(&buffer[..read]).into_owned();
        assert!(request.contains("SUBSCRIBE"), "got {request:?}");
        assert!(request.contains("stuff"));

        socket
            .write_all(b"*3\r\n$9\r\nsubscribe\r\n$5\r\nstuff\r\n:1\r\n")
            .await
            .expect("write ack");
        socket
            .write_all(b"*3\r\n$7\r\nmessage\r\n$5\r\nstuff\r\n$5\r\nhello\r\n")
            .await
            .expect("write message");

        // hold the connection open until the client disconnects
        let _ = socket.read(&mut buffer).await;
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();
    assert!(subscriber.running());

    subscriber.subscribe("stuff").await.expect("subscribe");

    let ack = timeout(Duration::from_secs(1), subscriber.read())
        .await
        .expect("ack should arrive");
    assert!(ack.error().is_none());
    let items = ack.value().as_array().expect("ack is an array");
    assert_eq!(items[0].as_string().as_deref(), Some("subscribe"));
    assert!(ack.message().is_none(), "an ack is not a message");

    let published = timeout(Duration::from_secs(1), subscriber.read())
        .await
        .expect("message should arrive");
    let message = published.message().expect("published message");
    assert_eq!(message.channel, "stuff");
    assert_eq!(message.contents, "hello");
    assert!(message.pattern.is_empty());

    subscriber.stop().await;
}

#[tokio::test]
async fn pattern_messages_carry_their_pattern() {
    let (listener, port) = bind().await;

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = vec![0u8; 4096];

        let _ = socket.read(&mut buffer).await.expect("read PSUBSCRIBE");
        socket
            .write_all(b"*3\r\n$10\r\npsubscribe\r\n$6\r\nnews.*\r\n:1\r\n")
            .await
            .expect("write ack");
        socket
            .write_all(b"*4\r\n$8\r\npmessage\r\n$6\r\nnews.*\r\n$9\r\nnews.tech\r\n$4\r\nbody\r\n")
            .await
            .expect("write pmessage");

        let _ = socket.read(&mut buffer).await;
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();
    subscriber.psubscribe("news.*").await.expect("psubscribe");

    let _ack = timeout(Duration::from_secs(1), subscriber.read())
        .await
        .expect("ack should arrive");

    let published = timeout(Duration::from_secs(1), subscriber.read())
        .await
        .expect("pmessage should arrive");
    let message = published.message().expect("pattern message");
    assert_eq!(message.pattern, "news.*");
    assert_eq!(message.channel, "news.tech");
    assert_eq!(message.contents, "body");

    subscriber.stop().await;
}

#[tokio::test]
async fn stop_interrupts_a_blocked_read_loop() {
    let (listener, port) = bind().await;

    tokio::spawn(async move {
        // accept and then stay silent so the read loop blocks
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = vec![0u8; 16];
        let _ = socket.read(&mut buffer).await;
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();

    // give the loop time to connect and block on the socket
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(subscriber.running());

    timeout(Duration::from_secs(1), subscriber.stop())
        .await
        .expect("stop should not hang on a blocked read");
    assert!(!subscriber.running());

    let reply = timeout(Duration::from_secs(1), subscriber.read())
        .await
        .expect("read after stop should not hang");
    assert_eq!(reply.error(), Some(&Error::Disconnected));
}

#[tokio::test]
async fn start_is_idempotent() {
    let (listener, port) = bind().await;

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = vec![0u8; 16];
        let _ = socket.read(&mut buffer).await;
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();
    subscriber.start();
    subscriber.start();
    assert!(subscriber.running());

    timeout(Duration::from_secs(1), subscriber.stop())
        .await
        .expect("one task to wait for");
    assert!(!subscriber.running());
}

#[tokio::test]
async fn slow_consumer_loses_nothing() {
    let (listener, port) = bind().await;

    // 20 messages, well past the delivery channel's depth, in one burst
    let mut burst = Vec::new();
    for i in 0..20 {
        let body = format!("msg-{i:02}");
        burst.extend_from_slice(
            format!("*3\r\n$7\r\nmessage\r\n$4\r\nchan\r\n$6\r\n{body}\r\n").as_bytes(),
        );
    }

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        socket.write_all(&burst).await.expect("write burst");
        let mut buffer = vec![0u8; 16];
        let _ = socket.read(&mut buffer).await;
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();

    // let the producer run into the channel bound before consuming
    tokio::time::sleep(Duration::from_millis(100)).await;

    for i in 0..20 {
        let reply = timeout(Duration::from_secs(1), subscriber.read())
            .await
            .expect("every message should arrive");
        let message = reply.message().expect("message");
        assert_eq!(message.contents, format!("msg-{i:02}"), "message order");
    }

    subscriber.stop().await;
}

#[tokio::test]
async fn ping_requires_a_running_subscriber() {
    let subscriber = Subscriber::with_address("127.0.0.1", 6379);
    assert!(!subscriber.running());
    assert_eq!(subscriber.ping().await, Err(Error::Disconnected));
}

#[tokio::test]
async fn reset_writes_the_inline_form() {
    let (listener, port) = bind().await;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = vec![0u8; 64];
        let read = socket.read(&mut buffer).await.expect("read RESET");
        buffer[..read].to_vec()
    });

    let mut subscriber = Subscriber::with_address("127.0.0.1", port);
    subscriber.start();
    subscriber.reset().await.expect("reset");

    let request = server.await.expect("server task");
    assert_eq!(request, b"RESET\r\n".to_vec());

    subscriber.stop().await;
}
