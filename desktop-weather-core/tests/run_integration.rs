//! End-to-end runs against a wiremock provider with a recording notifier.

use std::sync::Mutex;

use desktop_weather_core::{
    App, Config, NetworkError, NotificationRequest, Notifier, OpenWeatherProvider, Settings,
    WeatherError, WeatherProvider, WeatherQuery, notify_current_weather,
};
use reqwest::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<NotificationRequest>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, request: &NotificationRequest) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _request: &NotificationRequest) -> anyhow::Result<()> {
        anyhow::bail!("org.freedesktop.Notifications is not available")
    }
}

fn gulu_body() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 32.3, "lat": 2.77 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": { "temp": 24.5, "feels_like": 24.6, "humidity": 61 },
        "name": "Gulu",
        "cod": 200
    })
}

fn settings_for(server: &MockServer, api_key: Option<&str>) -> Settings {
    let config = Config {
        endpoint: Some(format!("{}{WEATHER_PATH}", server.uri())),
        ..Config::default()
    };
    Settings::resolve(&config, api_key.map(str::to_string), None)
}

#[tokio::test]
async fn well_formed_response_dispatches_exact_notification() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("q", "Gulu"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gulu_body()))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::default();
    let app = App::new(settings_for(&server, Some("TEST_KEY")), &notifier);

    let request = app.run().await.expect("run should succeed");

    assert_eq!(request.title, "Weather in Gulu");
    assert_eq!(request.message, "clear sky, 24.5°C");
    assert_eq!(notifier.sent(), vec![request]);
}

#[tokio::test]
async fn missing_credential_makes_no_request_and_no_notification() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gulu_body()))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::default();
    let app = App::new(settings_for(&server, None), &notifier);

    let err = app.run().await.unwrap_err();

    assert!(matches!(err, WeatherError::MissingCredential));
    assert!(notifier.sent().is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn non_success_status_is_network_error() {
    let server = MockServer::start().await;

    for status in [401, 404, 500] {
        server.reset().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({ "cod": status, "message": "nope" })),
            )
            .mount(&server)
            .await;

        let notifier = RecordingNotifier::default();
        let app = App::new(settings_for(&server, Some("KEY")), &notifier);

        match app.run().await.unwrap_err() {
            WeatherError::Network(NetworkError::Status { status: got, body }) => {
                assert_eq!(got.as_u16(), status);
                assert!(body.contains("nope"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(notifier.sent().is_empty());
    }
}

#[tokio::test]
async fn invalid_json_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::default();
    let app = App::new(settings_for(&server, Some("KEY")), &notifier);

    let err = app.run().await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(NetworkError::Decode(_))));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    let config = Config {
        endpoint: Some(format!("http://127.0.0.1:1{WEATHER_PATH}")),
        ..Config::default()
    };
    let settings = Settings::resolve(&config, Some("KEY".into()), None);

    let notifier = RecordingNotifier::default();
    let err = App::new(settings, &notifier).run().await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(NetworkError::Transport(_))));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn missing_fields_never_notify() {
    let bodies = [
        serde_json::json!({ "weather": [{ "description": "clear sky" }], "main": { "temp": 20.0 } }),
        serde_json::json!({ "name": "Gulu", "main": { "temp": 20.0 } }),
        serde_json::json!({ "name": "Gulu", "weather": [{ "description": "clear sky" }] }),
    ];

    for body in bodies {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let notifier = RecordingNotifier::default();
        let err = App::new(settings_for(&server, Some("KEY")), &notifier)
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::DataShape { .. }));
        assert!(notifier.sent().is_empty());
    }
}

#[tokio::test]
async fn two_runs_produce_two_identical_notifications() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gulu_body()))
        .expect(2)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::default();
    let app = App::new(settings_for(&server, Some("KEY")), &notifier);

    app.run().await.unwrap();
    app.run().await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
}

#[tokio::test]
async fn notifier_failure_is_unanticipated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gulu_body()))
        .mount(&server)
        .await;

    let err = App::new(settings_for(&server, Some("KEY")), FailingNotifier)
        .run()
        .await
        .unwrap_err();

    assert!(err.is_unanticipated());
    assert!(format!("{err:?}").contains("not available"));
}

#[tokio::test]
async fn provider_response_matches_what_was_served() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gulu_body()))
        .mount(&server)
        .await;

    let provider =
        OpenWeatherProvider::with_endpoint(Client::new(), format!("{}{WEATHER_PATH}", server.uri()));
    let query = WeatherQuery { city: "Gulu".into(), api_key: "KEY".into() };

    let response = provider.fetch(&query).await.unwrap();
    assert_eq!(response.raw(), &gulu_body());

    let notifier = RecordingNotifier::default();
    let request = notify_current_weather(&provider, &notifier, &query).await.unwrap();
    assert_eq!(request.title, "Weather in Gulu");
}
