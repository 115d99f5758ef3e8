use futures::future::join_all;
use logging_middleware::sender::{
    ClientConfig, CollectorTransport, HyperTransport, LogSubmitter, MemoryDiagnostics,
    ReqwestTransport, Transport,
};
use logging_middleware::SubmitError;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const LOGS_PATH: &str = "/evaluation-service/logs";

fn client_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        endpoint: format!("{}{}", server.uri(), LOGS_PATH),
        timeout: Some(Duration::from_secs(5)),
        connect_timeout: Duration::from_secs(2),
        user_agent: "logging-middleware-test/1.0".to_string(),
    }
}

fn reqwest_submitter(
    server: &MockServer,
) -> (LogSubmitter<ReqwestTransport, MemoryDiagnostics>, MemoryDiagnostics) {
    let diagnostics = MemoryDiagnostics::new();
    let transport = ReqwestTransport::new(client_config(server)).unwrap();
    (
        LogSubmitter::with_diagnostics(transport, diagnostics.clone()),
        diagnostics,
    )
}

/// Endpoint on a port nothing listens on any more.
fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}{LOGS_PATH}")
}

#[tokio::test]
async fn test_valid_record_posted_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "stack": "frontend",
            "level": "info",
            "package": "page",
            "message": "loaded"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, diagnostics) = reqwest_submitter(&mock_server);

    assert!(submitter.submit("frontend", "info", "page", "loaded").await);
    assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn test_created_status_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "logID": "a1b2" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, _diagnostics) = reqwest_submitter(&mock_server);

    let status = submitter
        .try_submit("backend", "fatal", "db", "connection lost")
        .await
        .unwrap();
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_invalid_records_never_reach_collector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (submitter, diagnostics) = reqwest_submitter(&mock_server);

    assert!(!submitter.submit("mobile", "info", "page", "loaded").await);
    assert!(!submitter.submit("frontend", "trace", "page", "loaded").await);
    assert!(!submitter.submit("frontend", "info", "widget", "loaded").await);
    assert!(!submitter.submit("backend", "info", "component", "loaded").await);
    assert!(!submitter.submit("frontend", "info", "page", "").await);

    let reports = diagnostics.reports();
    assert_eq!(reports.len(), 5);
    assert!(reports[0].starts_with("Invalid stack: mobile"));
    assert!(reports[1].starts_with("Invalid level: trace"));
    assert!(reports[2].starts_with("Invalid package: widget"));
    assert_eq!(
        reports[3],
        "Package 'component' is not allowed for stack 'backend'"
    );
    assert_eq!(reports[4], "Message must be a non-empty string");
    assert!(diagnostics.echoes().is_empty());
}

#[tokio::test]
async fn test_shared_package_accepted_for_frontend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "stack": "frontend",
            "level": "warn",
            "package": "auth",
            "message": "session expired"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, _diagnostics) = reqwest_submitter(&mock_server);

    assert!(submitter.warn("frontend", "auth", "session expired").await);
}

#[tokio::test]
async fn test_non_success_status_returns_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, diagnostics) = reqwest_submitter(&mock_server);

    assert!(!submitter.error("backend", "handler", "request failed").await);
    assert_eq!(diagnostics.reports(), vec!["Logging failed with status: 500"]);
    assert_eq!(
        diagnostics.echoes(),
        vec!["[backend][error][handler] request failed"]
    );
}

#[tokio::test]
async fn test_unavailable_collector_echoes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, diagnostics) = reqwest_submitter(&mock_server);

    assert!(!submitter.submit("frontend", "info", "page", "loaded").await);
    assert_eq!(diagnostics.reports(), vec!["Logging failed with status: 503"]);
    assert_eq!(diagnostics.echoes(), vec!["[frontend][info][page] loaded"]);
}

#[tokio::test]
async fn test_accepted_but_not_created_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (submitter, _diagnostics) = reqwest_submitter(&mock_server);

    let err = submitter
        .try_submit("backend", "info", "service", "queued")
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Rejected { status: 202 }));
}

#[tokio::test]
async fn test_network_failure_echoes_record() {
    let config = ClientConfig {
        timeout: Some(Duration::from_secs(2)),
        ..ClientConfig::with_endpoint(dead_endpoint())
    };
    let diagnostics = MemoryDiagnostics::new();
    let submitter =
        LogSubmitter::with_diagnostics(ReqwestTransport::new(config).unwrap(), diagnostics.clone());

    assert!(!submitter.submit("frontend", "info", "page", "loaded").await);

    let reports = diagnostics.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("Failed to send log to server"));

    let echoes = diagnostics.echoes();
    assert_eq!(echoes, vec!["[frontend][info][page] loaded"]);
    for part in ["frontend", "info", "page", "loaded"] {
        assert!(echoes[0].contains(part));
    }
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        timeout: Some(Duration::from_millis(100)),
        ..client_config(&mock_server)
    };
    let diagnostics = MemoryDiagnostics::new();
    let submitter =
        LogSubmitter::with_diagnostics(ReqwestTransport::new(config).unwrap(), diagnostics.clone());

    let err = submitter
        .try_submit("backend", "debug", "cron_job", "tick")
        .await
        .unwrap_err();
    assert!(err.is_transport());

    assert!(!submitter.debug("backend", "cron_job", "tick").await);
    assert_eq!(diagnostics.echoes(), vec!["[backend][debug][cron_job] tick"]);
}

#[tokio::test]
async fn test_concurrent_submissions_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(20)
        .mount(&mock_server)
        .await;

    let (submitter, diagnostics) = reqwest_submitter(&mock_server);

    let messages: Vec<String> = (0..20).map(|i| format!("request {i} handled")).collect();
    let handles = messages.iter().map(|message| {
        let submitter = submitter.clone();
        async move { submitter.info("backend", "controller", message).await }
    });

    let results = join_all(handles).await;
    assert!(results.into_iter().all(|accepted| accepted));
    assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn test_spawned_submissions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(4)
        .mount(&mock_server)
        .await;

    let (submitter, _diagnostics) = reqwest_submitter(&mock_server);

    let tasks: Vec<_> = ["cache", "db", "route", "utils"]
        .into_iter()
        .map(|package| {
            let submitter = submitter.clone();
            tokio::spawn(async move { submitter.info("backend", package, "warmed up").await })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap());
    }
}

#[tokio::test]
async fn test_hyper_transport_posts_same_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "stack": "frontend",
            "level": "info",
            "package": "page",
            "message": "loaded"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        timeout: None,
        ..client_config(&mock_server)
    };
    let diagnostics = MemoryDiagnostics::new();
    let submitter =
        LogSubmitter::with_diagnostics(HyperTransport::new(config).unwrap(), diagnostics.clone());

    assert!(submitter.submit("frontend", "info", "page", "loaded").await);
    assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn test_hyper_transport_timeout_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        timeout: Some(Duration::from_millis(100)),
        ..client_config(&mock_server)
    };
    let diagnostics = MemoryDiagnostics::new();
    let submitter =
        LogSubmitter::with_diagnostics(HyperTransport::new(config).unwrap(), diagnostics.clone());

    assert!(!submitter.submit("backend", "warn", "middleware", "slow upstream").await);
    assert_eq!(
        diagnostics.echoes(),
        vec!["[backend][warn][middleware] slow upstream"]
    );
}

#[tokio::test]
async fn test_hyper_transport_connection_refused() {
    let transport = HyperTransport::new(ClientConfig::with_endpoint(dead_endpoint())).unwrap();
    let diagnostics = MemoryDiagnostics::new();
    let submitter = LogSubmitter::with_diagnostics(transport, diagnostics.clone());

    assert!(!submitter.fatal("backend", "repository", "disk full").await);
    assert_eq!(diagnostics.echoes(), vec!["[backend][fatal][repository] disk full"]);
}

#[tokio::test]
async fn test_collector_transport_dispatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&mock_server)
        .await;

    let transports: [CollectorTransport; 2] = [
        ReqwestTransport::new(client_config(&mock_server)).unwrap().into(),
        HyperTransport::new(client_config(&mock_server)).unwrap().into(),
    ];

    for transport in transports {
        assert!(transport.endpoint().ends_with(LOGS_PATH));
        let submitter = LogSubmitter::new(transport);
        assert!(submitter.info("frontend", "hook", "useStats resolved").await);
    }
}
