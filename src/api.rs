// API client module: a small blocking HTTP client for the bo.gg backend.
// Every call blocks until the server answers; a spinner is drawn on stderr
// meanwhile so the user knows the menu is waiting on the network.

use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{ClientError, Result};

/// Path of the token endpoint, relative to the API base.
pub const TOKEN_PATH: &str = "/api-token-auth/";

/// Whether an entry adds calories (food) or removes them (exercise).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    #[serde(rename = "C")]
    Consumption,
    #[serde(rename = "E")]
    Expenditure,
}

/// Body of `POST /api/entries/`. `calories` is already signed:
/// expenditure entries carry a negative value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EntryPayload {
    pub entry_type: EntryType,
    pub calories: i64,
    pub note: String,
    #[serde(rename = "dt_occurred")]
    pub occurred_on: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
}

/// Nested profile part of the enrollment payload. The backend calls the
/// object `bogger`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub gender: Gender,
    pub birthdate: String,
    pub auto_update_goal: bool,
}

/// Data shape used to create a user. Field names mirror the backend's
/// serializer, which is also what its validation errors are keyed by.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EnrollmentPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub daily_weight_goal: f64,
    pub height: i64,
    pub weight: i64,
    pub activity_factor: f64,
    #[serde(rename = "bogger")]
    pub profile: Profile,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    #[serde(default)]
    pub current_calorie_goal: Value,
}

/// User record returned by a successful enrollment.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub username: String,
    #[serde(rename = "bogger")]
    pub profile: ProfileRecord,
}

/// Aggregate for a single day. `calories_expended` arrives negative;
/// `calories_remaining` is null while the user has no goal.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyStatus {
    pub calories_consumed: i64,
    pub calories_expended: i64,
    pub calories_remaining: Option<i64>,
}

/// One row of the recent log.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calories_expended: i64,
    pub calories_remaining: Option<i64>,
}

#[derive(Deserialize)]
struct LogPage {
    results: Vec<DailyLog>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Messages the server attached to one rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}

/// Field-level validation failures, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: Vec<FieldErrors>,
}

impl ValidationErrors {
    /// Decode a DRF-style error body. Nested objects (the `bogger`
    /// profile) are flattened to their inner field names. Returns `None`
    /// when the body is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut errors = ValidationErrors::default();
        errors.collect(map);
        Some(errors)
    }

    fn collect(&mut self, map: &serde_json::Map<String, Value>) {
        for (field, detail) in map {
            let messages = match detail {
                Value::Object(inner) => {
                    self.collect(inner);
                    continue;
                }
                Value::Array(items) => items.iter().map(message_text).collect(),
                other => vec![message_text(other)],
            };
            self.fields.push(FieldErrors {
                field: field.clone(),
                messages,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn message_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Outcome of submitting an enrollment payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrollment {
    Accepted(UserRecord),
    Rejected(ValidationErrors),
}

/// The backend operations the interactive core consumes. `ApiClient` is the
/// real implementation; tests script their own.
pub trait CalorieService {
    /// `POST /api/create/`.
    fn create_user(&self, payload: &EnrollmentPayload) -> Result<Enrollment>;

    /// Exchange credentials for a session token. Rejected credentials
    /// come back as [`ClientError::InvalidCredentials`].
    fn obtain_token(&self, username: &str, password: &str) -> Result<String>;

    /// `POST /api/entries/`. Any non-success status is
    /// [`ClientError::EntryRejected`].
    fn create_entry(&self, payload: &EntryPayload, token: &str) -> Result<()>;

    /// `GET /api/daily/{date}`. `Ok(None)` when the day has no entries.
    fn daily_status(&self, date: NaiveDate, token: &str) -> Result<Option<DailyStatus>>;

    /// `GET /api/daily/`.
    fn recent_log(&self, token: &str) -> Result<Vec<DailyLog>>;
}

/// Blocking API client: a reqwest client plus the API base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.resolved_api_base())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with a spinner on screen until the response arrives.
    fn send(&self, message: &'static str, req: RequestBuilder) -> Result<Response> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        let res = req.send();
        spinner.finish_and_clear();
        let res = res?;
        tracing::debug!(url = %res.url(), status = %res.status(), "response");
        Ok(res)
    }

    fn unexpected(endpoint: &str, res: Response) -> ClientError {
        let status = res.status();
        let body = res.text().unwrap_or_default();
        ClientError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status,
            body,
        }
    }
}

impl CalorieService for ApiClient {
    fn create_user(&self, payload: &EnrollmentPayload) -> Result<Enrollment> {
        let req = self.client.post(self.url("/api/create/")).json(payload);
        let res = self.send("Creating account...", req)?;
        let status = res.status();
        if status.is_success() {
            return Ok(Enrollment::Accepted(res.json()?));
        }
        if !status.is_client_error() {
            return Err(Self::unexpected("/api/create/", res));
        }
        let body = res.text()?;
        let errors = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| ValidationErrors::from_value(&v));
        match errors {
            Some(errors) if !errors.is_empty() => Ok(Enrollment::Rejected(errors)),
            _ => Err(ClientError::UnexpectedStatus {
                endpoint: "/api/create/".into(),
                status,
                body,
            }),
        }
    }

    fn obtain_token(&self, username: &str, password: &str) -> Result<String> {
        let req = self
            .client
            .post(self.url(TOKEN_PATH))
            .json(&TokenRequest { username, password });
        let res = self.send("Logging in...", req)?;
        match res.status() {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(ClientError::InvalidCredentials)
            }
            s if s.is_success() => {
                let body: TokenResponse = res.json()?;
                Ok(body.token)
            }
            _ => Err(Self::unexpected(TOKEN_PATH, res)),
        }
    }

    fn create_entry(&self, payload: &EntryPayload, token: &str) -> Result<()> {
        let req = self
            .client
            .post(self.url("/api/entries/"))
            .header(AUTHORIZATION, format!("Token {token}"))
            .json(payload);
        let res = self.send("Logging entry...", req)?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let body = res.text().unwrap_or_default();
        let payload =
            serde_json::to_string(payload).unwrap_or_else(|_| format!("{payload:?}"));
        Err(ClientError::EntryRejected {
            payload,
            status,
            body,
        })
    }

    fn daily_status(&self, date: NaiveDate, token: &str) -> Result<Option<DailyStatus>> {
        let path = format!("/api/daily/{date}");
        let req = self
            .client
            .get(self.url(&path))
            .header(AUTHORIZATION, format!("Token {token}"));
        let res = self.send("Fetching status...", req)?;
        match res.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(res.json()?)),
            _ => Err(Self::unexpected(&path, res)),
        }
    }

    fn recent_log(&self, token: &str) -> Result<Vec<DailyLog>> {
        let req = self
            .client
            .get(self.url("/api/daily/"))
            .header(AUTHORIZATION, format!("Token {token}"));
        let res = self.send("Fetching log...", req)?;
        if !res.status().is_success() {
            return Err(Self::unexpected("/api/daily/", res));
        }
        let page: LogPage = res.json()?;
        Ok(page.results)
    }
}
