use kiteutil::Config;
use kiteutil::core::analytics::{Event, EventSink, MeasurementProtocolSink, Tracker};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn measurement_protocol_posts_event_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collect"))
        .and(body_string_contains("tid=UA-1234-5"))
        .and(body_string_contains("t=event"))
        .and(body_string_contains("ec=link"))
        .and(body_string_contains("ea=click"))
        .and(body_string_contains("el=docs"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = MeasurementProtocolSink::new(
        reqwest::Client::new(),
        format!("{}/collect", server.uri()),
        "UA-1234-5",
        "anonymous",
    );

    sink.send(&Event::link_click("docs")).await.unwrap();
}

#[tokio::test]
async fn endpoint_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = MeasurementProtocolSink::new(
        reqwest::Client::new(),
        format!("{}/collect", server.uri()),
        "UA-1234-5",
        "anonymous",
    );

    assert!(sink.send(&Event::link_click("docs")).await.is_err());
}

#[tokio::test]
async fn configured_tracker_respects_opt_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.analytics.tracking_id = "UA-1234-5".to_string();
    config.analytics.endpoint = format!("{}/collect", server.uri());

    let tracker = Tracker::from_config(&config).unwrap();
    assert!(!tracker.track_link(Some("docs")).await.unwrap());
}

#[tokio::test]
async fn configured_tracker_sends_when_opted_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collect"))
        .and(body_string_contains("el=release-notes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.general.tracking = true;
    config.analytics.tracking_id = "UA-1234-5".to_string();
    config.analytics.endpoint = format!("{}/collect", server.uri());

    let tracker = Tracker::from_config(&config).unwrap();
    assert!(tracker.track_link(Some("release-notes")).await.unwrap());
}
