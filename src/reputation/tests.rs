//! Tests for the AbuseIPDB client.

use std::net::IpAddr;
use std::sync::Arc;

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

use super::*;
use crate::config::ApiKey;
use crate::error_handling::ReputationError;
use crate::models::ResolvedAddress;

fn client_for(server: &Server) -> AbuseIpDbClient {
    AbuseIpDbClient::new(
        Arc::new(reqwest::Client::new()),
        format!("http://{}", server.addr()),
    )
}

fn address(ip: &str) -> ResolvedAddress {
    ResolvedAddress::new(ip.parse::<IpAddr>().unwrap())
}

#[tokio::test]
async fn test_check_sends_key_and_address() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/api/v2/check"),
            request::query(url_decoded(contains(("ipAddress", "93.184.216.34")))),
            request::headers(contains(("key", "test-key"))),
            request::headers(contains(("accept", "application/json"))),
        ])
        .respond_with(status_code(200).body(
            r#"{"data":{"ipAddress":"93.184.216.34","abuseConfidenceScore":0,"countryCode":"US"}}"#,
        )),
    );

    let report = client_for(&server)
        .check(&address("93.184.216.34"), &ApiKey::new("test-key"))
        .await
        .expect("check should succeed");

    assert_eq!(report.result.ip_address, "93.184.216.34");
    assert_eq!(report.result.country_code, "US");
}

#[tokio::test]
async fn test_raw_body_is_kept_verbatim() {
    let body = "{ \"data\" : {\n  \"ipAddress\": \"192.0.2.7\",\n  \"abuseConfidenceScore\": 88,\n  \"isp\": \"Example Net\", \"totalReports\": 311\n} }\n";
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/check"))
            .respond_with(status_code(200).body(body)),
    );

    let report = client_for(&server)
        .check(&address("192.0.2.7"), &ApiKey::new("k"))
        .await
        .unwrap();

    assert_eq!(report.raw_body, body);
    assert_eq!(report.result.abuse_confidence_score, 88);
    assert_eq!(report.result.isp, "Example Net");
}

#[tokio::test]
async fn test_ipv6_address_is_sent_as_query_parameter() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/api/v2/check"),
            request::query(url_decoded(contains(("ipAddress", "2001:db8::1")))),
        ])
        .respond_with(status_code(200).body(
            r#"{"data":{"ipAddress":"2001:db8::1","abuseConfidenceScore":5}}"#,
        )),
    );

    let report = client_for(&server)
        .check(&address("2001:db8::1"), &ApiKey::new("k"))
        .await
        .unwrap();
    assert_eq!(report.result.ip_address, "2001:db8::1");
}

#[tokio::test]
async fn test_non_200_status_is_an_error() {
    for code in [201u16, 401, 404, 429, 500] {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/api/v2/check"))
                .respond_with(status_code(code).body(r#"{"errors":[{"detail":"nope"}]}"#)),
        );

        let result = client_for(&server)
            .check(&address("192.0.2.1"), &ApiKey::new("k"))
            .await;
        match result {
            Err(ReputationError::Status { status }) => assert_eq!(status, code),
            other => panic!("expected status error for {code}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_unparseable_body_is_an_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/check"))
            .respond_with(status_code(200).body("<html>maintenance</html>")),
    );

    let result = client_for(&server)
        .check(&address("192.0.2.1"), &ApiKey::new("k"))
        .await;
    assert!(matches!(result, Err(ReputationError::MalformedJson(_))));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/check")).respond_with(
            status_code(200).body(r#"{"data":{"ipAddress":"192.0.2.1","abuseConfidenceScore":1}}"#),
        ),
    );

    let client = AbuseIpDbClient::new(
        Arc::new(reqwest::Client::new()),
        format!("http://{}/", server.addr()),
    );
    assert!(client
        .check(&address("192.0.2.1"), &ApiKey::new("k"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_connection_failure_is_a_request_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = AbuseIpDbClient::new(
        Arc::new(reqwest::Client::new()),
        format!("http://127.0.0.1:{port}"),
    );

    let result = client
        .check(&address("192.0.2.1"), &ApiKey::new("k"))
        .await;
    assert!(matches!(result, Err(ReputationError::Request(_))));
}
