//! Google Sheets access
//!
//! [`SheetSource`] is the seam the resolver reads through. The production
//! implementation, [`GoogleSheetsClient`], authenticates as a service account
//! and reads a whole worksheet with the Sheets API v4 `values.get` call.
//!
//! Every fetch reconnects from scratch: the key file is re-read and a fresh
//! access token is requested. Nothing is cached between lookups.

use std::path::Path;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{self, SheetsConfig};
use crate::error::SheetsError;

/// A full, point-in-time read of a worksheet: rows of cell strings.
pub type Snapshot = Vec<Vec<String>>;

/// Read access to the score table
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetches every row of the configured sheet, header included.
    async fn fetch_all_rows(&self) -> Result<Snapshot, SheetsError>;
}

/// Fields of a Google service-account key file that we need
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parses a service-account key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        serde_json::from_str(json).map_err(|e| SheetsError::CredentialsFormat(e.to_string()))
    }

    /// Reads and parses a service-account key file.
    pub async fn from_file(path: &Path) -> Result<Self, SheetsError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

/// JWT claims of the OAuth 2.0 service-account assertion
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

/// Reads the score sheet from Google Sheets as a service account
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
}

impl GoogleSheetsClient {
    /// Creates a client; the HTTP client carries the configured request timeout.
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Signs the RS256 assertion for the token exchange.
    fn sign_assertion(key: &ServiceAccountKey, now: i64) -> Result<String, SheetsError> {
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: config::sheets::SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + config::sheets::ASSERTION_LIFETIME_SECS,
        };
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
    }

    /// Exchanges a signed assertion for a bearer access token.
    async fn access_token(&self, key: &ServiceAccountKey) -> Result<String, SheetsError> {
        let assertion = Self::sign_assertion(key, chrono::Utc::now().timestamp())?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::CredentialsFormat(format!("token response: {}", e)))?;
        Ok(token.access_token)
    }

    /// URL of the `values.get` call for the whole configured sheet.
    pub fn values_url(&self) -> Result<Url, SheetsError> {
        let range = sheet_range(&self.config.sheet_name);
        let mut url = Url::parse(&self.config.api_base)?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");
        Ok(url)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_all_rows(&self) -> Result<Snapshot, SheetsError> {
        let key = ServiceAccountKey::from_file(&self.config.credentials_path).await?;
        let token = self.access_token(&key).await?;

        let response = self.http.get(self.values_url()?).bearer_auth(token).send().await?;
        let response = ensure_success(response).await?;

        let body: ValueRange = response.json().await.map_err(|e| SheetsError::Decode(e.to_string()))?;
        let rows = body
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        Ok(pad_rows(rows))
    }
}

/// Turns non-2xx responses into [`SheetsError::HttpStatus`], keeping the body for logs.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::HttpStatus { status, body })
}

/// A1 range naming a whole sheet: the name in single quotes, inner quotes doubled.
///
/// Unquoted, a name like `Q1` or `Totals!B2` would be read as a cell range.
fn sheet_range(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

/// Pads every row with empty cells up to the widest row.
///
/// The API omits trailing empty cells, so a blank score would otherwise turn
/// a customer's row into a one-cell row.
fn pad_rows(mut rows: Snapshot) -> Snapshot {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

/// Formatted values arrive as strings; anything else is rendered as JSON text.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
