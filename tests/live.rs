//! Exchanges against a real HTTP endpoint. Run with
//! `cargo test --features std -- --ignored`.

#![cfg(feature = "std")]

use dotenvy::dotenv;
use libpost::message::{BufferedContext, RawMessage};
use libpost::network::application::http::{ErrorKind, HttpMessageSender, Options, State};
use libpost::network::tcp::TcpConnector;
use std::env;
use std::time::Duration;

fn endpoint(path: &str) -> String {
    dotenv().ok();
    let address = env::var("TEST_HTTP_ADDRESS").unwrap_or("httpbin.org:80".to_string());
    format!("http://{address}{path}")
}

#[test]
#[ignore = "requires network access"]
fn test_live_post_round_trip() {
    let url = endpoint("/post");
    let connector = TcpConnector::with_timeout(Duration::from_secs(10));
    let mut sender = HttpMessageSender::new(connector, Options::new(&url));

    let request = RawMessage::new(b"{\"hello\":\"libpost\"}").with_content_type("application/json");
    let mut context: BufferedContext<'_, _, 8192> = BufferedContext::new(&request);
    sender.send_and_receive(&mut context).unwrap();

    let response = context.take_response().unwrap();
    assert_eq!(response.status_code, 200);
    assert!(response.body_str().unwrap().contains("libpost"));
    assert_eq!(sender.state(), State::Closed);
}

#[test]
#[ignore = "requires network access"]
fn test_live_not_found_is_unsuccessful() {
    let url = endpoint("/status/404");
    let mut sender = HttpMessageSender::new(TcpConnector::default(), Options::new(&url));

    let request = RawMessage::new(b"<Envelope/>");
    let mut context: BufferedContext<'_, _> = BufferedContext::new(&request);
    let err = sender.send_and_receive(&mut context).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsuccessfulResponse);
    assert!(context.response().is_none());
}
