//! Integration tests for the Google Sheets client against a mock Google
//!
//! Run with: cargo test -p scorecore --test sheets_client_test

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scorecore::i18n;
use scorecore::{GoogleSheetsClient, ScoreResolver, SheetSource, SheetsConfig, SheetsError};

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_service_account_key.pem");
const VALUES_PATH: &str = "/v4/spreadsheets/sheet-id/values/'Scores'";

/// Writes a service-account key file whose token endpoint is the mock server.
fn write_key_file(server: &MockServer) -> NamedTempFile {
    let key = json!({
        "type": "service_account",
        "project_id": "scorebot-test",
        "client_email": "scorebot@scorebot-test.iam.gserviceaccount.com",
        "private_key": TEST_PRIVATE_KEY,
        "token_uri": format!("{}/token", server.uri()),
    });
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(key.to_string().as_bytes()).unwrap();
    file
}

fn client_for(server: &MockServer, key_path: PathBuf, timeout: Duration) -> GoogleSheetsClient {
    GoogleSheetsClient::new(SheetsConfig {
        credentials_path: key_path,
        spreadsheet_id: "sheet-id".to_string(),
        sheet_name: "Scores".to_string(),
        api_base: server.uri(),
        timeout,
    })
    .unwrap()
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_values(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .and(query_param("majorDimension", "ROWS"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_all_rows_as_strings() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_values(
        &server,
        json!({
            "range": "Scores!A1:Z1000",
            "majorDimension": "ROWS",
            "values": [["Phone", "Score"], ["+7 999-111-22-33", "150"], ["79991112234"], ["79991112235", 42]]
        }),
    )
    .await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));

    let rows = client.fetch_all_rows().await.unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["Phone".to_string(), "Score".to_string()],
            vec!["+7 999-111-22-33".to_string(), "150".to_string()],
            vec!["79991112234".to_string(), String::new()],
            vec!["79991112235".to_string(), "42".to_string()],
        ]
    );
}

#[tokio::test]
async fn empty_sheet_has_no_values_field() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_values(&server, json!({ "range": "Scores!A1:Z1000", "majorDimension": "ROWS" })).await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));

    assert!(client.fetch_all_rows().await.unwrap().is_empty());
}

#[tokio::test]
async fn reconnects_on_every_fetch() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    mount_values(&server, json!({ "values": [["Phone", "Score"]] })).await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));

    client.fetch_all_rows().await.unwrap();
    client.fetch_all_rows().await.unwrap();
    // `expect(2)` on the token mock is verified when the server drops.
}

#[tokio::test]
async fn permission_denied_is_a_connection_failure() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("The caller does not have permission"))
        .mount(&server)
        .await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));

    let err = client.fetch_all_rows().await.unwrap_err();
    match &err {
        SheetsError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("permission"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_connection_failure());
}

#[tokio::test]
async fn rejected_token_request_stops_before_reading_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));

    let err = client.fetch_all_rows().await.unwrap_err();
    assert!(matches!(err, SheetsError::HttpStatus { .. }));
}

#[tokio::test]
async fn missing_key_file_is_a_credentials_error() {
    let server = MockServer::start().await;
    let client = client_for(&server, PathBuf::from("/nonexistent/scorebot-key.json"), Duration::from_secs(5));

    let err = client.fetch_all_rows().await.unwrap_err();
    assert!(matches!(err, SheetsError::CredentialsIo(_)));
    assert!(err.is_connection_failure());
}

#[tokio::test]
async fn hung_backend_times_out() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "values": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_millis(500));

    let err = client.fetch_all_rows().await.unwrap_err();
    assert!(matches!(err, SheetsError::Http(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn resolver_answers_through_google_client() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_values(
        &server,
        json!({ "values": [["Phone", "Score"], ["+7 999-111-22-33", "150"]] }),
    )
    .await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));
    let resolver = ScoreResolver::new(Arc::new(client));

    let text = resolver.resolve("+79991112233", &i18n::lang_from_code("en")).await;
    assert_eq!(text, "Your score:\nNumber: +79991112233\nScore: 150");
}

#[tokio::test]
async fn blank_score_cell_is_reported_as_empty_score() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    // Trailing empty cells are left out of the response.
    mount_values(&server, json!({ "values": [["Phone", "Score"], ["79991112233"]] })).await;

    let key_file = write_key_file(&server);
    let client = client_for(&server, key_file.path().to_path_buf(), Duration::from_secs(5));
    let resolver = ScoreResolver::new(Arc::new(client));

    let text = resolver.resolve("79991112233", &i18n::lang_from_code("en")).await;
    assert_eq!(text, "Your score:\nNumber: 79991112233\nScore: ");
}
