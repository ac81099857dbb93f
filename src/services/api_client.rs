//! API gateway for the patient records REST API.
//!
//! Each public method maps one endpoint to a typed payload:
//! - protected calls refuse to run without a token (no request is built)
//! - 2xx responses are parsed into the payload type
//! - other statuses become [`ClientError::Request`] carrying the server message
//! - network failures, timeouts and unreadable payloads become
//!   [`ClientError::Transport`]
//!
//! Every call is attempted exactly once. Retrying is the caller's decision.

use std::time::{Duration, Instant};

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, SetupError};
use crate::models::{
    Ack, Appointment, AppointmentForm, AppointmentList, AppointmentStats, AppointmentUpdate,
    Created, DoctorCount, ErrorBody, LoginResponse, Patient, PatientForm, PatientPage,
    SearchResults,
};
use crate::services::metrics::ApiClientMetrics;
use crate::utils::redact_sensitive_data;

/// Header carrying the issued token on every protected call
pub const TOKEN_HEADER: &str = "x-access-token";

/// Header correlating client logs with server logs
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// How a call authenticates
enum Credentials<'a> {
    Basic { username: &'a str, password: &'a str },
    Token(&'a str),
}

/// A single endpoint invocation
struct Call<'a> {
    operation: &'static str,
    method: Method,
    segments: Vec<&'a str>,
    query: Vec<(&'static str, String)>,
    form: Option<Vec<(&'static str, String)>>,
    credentials: Credentials<'a>,
}

impl<'a> Call<'a> {
    fn new(operation: &'static str, method: Method, segments: Vec<&'a str>, token: &'a str) -> Self {
        Self {
            operation,
            method,
            segments,
            query: Vec::new(),
            form: None,
            credentials: Credentials::Token(token),
        }
    }

    fn query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    fn form(mut self, fields: Vec<(&'static str, String)>) -> Self {
        self.form = Some(fields);
        self
    }
}

/// Typed gateway to the patient records API
pub struct ApiClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
    metrics: Option<ApiClientMetrics>,
}

impl ApiClient {
    /// Create a new gateway, validating the configured base URL
    pub fn new(config: ClientConfig, metrics: Option<ApiClientMetrics>) -> Result<Self, SetupError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| SetupError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(SetupError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(std::cmp::max(config.read_timeout(), config.write_timeout()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
            metrics,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn metrics(&self) -> Option<&ApiClientMetrics> {
        self.metrics.as_ref()
    }

    /// Exchange Basic credentials for a session token.
    ///
    /// A 401/403 answer is reported as [`ClientError::Auth`], as is a 2xx
    /// answer that carries no token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let call = Call {
            operation: "login",
            method: Method::GET,
            segments: vec!["auth", "login"],
            query: Vec::new(),
            form: None,
            credentials: Credentials::Basic { username, password },
        };

        match self.execute::<LoginResponse>(call).await {
            Ok(response) => response
                .into_token()
                .ok_or_else(|| ClientError::Auth("Login response did not include a token".to_string())),
            Err(ClientError::Request { status, message }) if status == 401 || status == 403 => {
                Err(ClientError::Auth(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Tell the server the token is no longer in use
    pub async fn logout(&self, token: Option<&str>) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        self.execute(Call::new("logout", Method::GET, vec!["auth", "logout"], token))
            .await
    }

    /// Ask the server whether the token is still accepted
    pub async fn verify_token(&self, token: Option<&str>) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        self.execute(Call::new("verify_token", Method::GET, vec!["auth", "verify"], token))
            .await
    }

    pub async fn list_patients(
        &self,
        token: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<PatientPage, ClientError> {
        let token = require_token(token)?;
        let call = Call::new("list_patients", Method::GET, vec!["patients"], token)
            .query(vec![("page", page.to_string()), ("limit", limit.to_string())]);
        self.execute(call).await
    }

    pub async fn get_patient(&self, token: Option<&str>, id: &str) -> Result<Patient, ClientError> {
        let token = require_token(token)?;
        self.execute(Call::new("get_patient", Method::GET, vec!["patients", id], token))
            .await
    }

    pub async fn create_patient(
        &self,
        token: Option<&str>,
        form: &PatientForm,
    ) -> Result<Created, ClientError> {
        let token = require_token(token)?;
        let call = Call::new("create_patient", Method::POST, vec!["patients"], token).form(form.fields());
        self.execute(call).await
    }

    pub async fn update_patient(
        &self,
        token: Option<&str>,
        id: &str,
        form: &PatientForm,
    ) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        let call =
            Call::new("update_patient", Method::PUT, vec!["patients", id], token).form(form.fields());
        self.execute(call).await
    }

    pub async fn delete_patient(&self, token: Option<&str>, id: &str) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        self.execute(Call::new("delete_patient", Method::DELETE, vec!["patients", id], token))
            .await
    }

    pub async fn list_appointments(
        &self,
        token: Option<&str>,
        patient_id: &str,
    ) -> Result<AppointmentList, ClientError> {
        let token = require_token(token)?;
        let call = Call::new(
            "list_appointments",
            Method::GET,
            vec!["patients", patient_id, "appointments"],
            token,
        );
        self.execute(call).await
    }

    pub async fn add_appointment(
        &self,
        token: Option<&str>,
        patient_id: &str,
        form: &AppointmentForm,
    ) -> Result<Created, ClientError> {
        let token = require_token(token)?;
        let call = Call::new(
            "add_appointment",
            Method::POST,
            vec!["patients", patient_id, "appointments"],
            token,
        )
        .form(form.fields());
        self.execute(call).await
    }

    pub async fn get_appointment(
        &self,
        token: Option<&str>,
        patient_id: &str,
        appointment_id: &str,
    ) -> Result<Appointment, ClientError> {
        let token = require_token(token)?;
        let call = Call::new(
            "get_appointment",
            Method::GET,
            vec!["patients", patient_id, "appointments", appointment_id],
            token,
        );
        self.execute(call).await
    }

    /// Change some fields of an appointment; fields left unset are not sent
    pub async fn update_appointment(
        &self,
        token: Option<&str>,
        patient_id: &str,
        appointment_id: &str,
        update: &AppointmentUpdate,
    ) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        let call = Call::new(
            "update_appointment",
            Method::PUT,
            vec!["patients", patient_id, "appointments", appointment_id],
            token,
        )
        .form(update.fields());
        self.execute(call).await
    }

    pub async fn delete_appointment(
        &self,
        token: Option<&str>,
        patient_id: &str,
        appointment_id: &str,
    ) -> Result<Ack, ClientError> {
        let token = require_token(token)?;
        let call = Call::new(
            "delete_appointment",
            Method::DELETE,
            vec!["patients", patient_id, "appointments", appointment_id],
            token,
        );
        self.execute(call).await
    }

    /// Free-text search; the query string is passed through untouched
    pub async fn search_patients(
        &self,
        token: Option<&str>,
        query: &str,
    ) -> Result<SearchResults, ClientError> {
        let token = require_token(token)?;
        let call = Call::new("search_patients", Method::GET, vec!["search"], token)
            .query(vec![("q", query.to_string())]);
        self.execute(call).await
    }

    /// Appointment counts per doctor, in server order
    pub async fn appointment_stats(&self, token: Option<&str>) -> Result<Vec<DoctorCount>, ClientError> {
        let token = require_token(token)?;
        let stats: AppointmentStats = self
            .execute(Call::new(
                "appointment_stats",
                Method::GET,
                vec!["stats", "appointments"],
                token,
            ))
            .await?;
        Ok(stats.into_rows())
    }

    /// Record an action refused before reaching the network
    pub fn record_preflight_rejection(&self, reason: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.preflight_rejections_total.with_label_values(&[reason]).inc();
        }
    }

    /// Build the URL for a path below the base URL, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport(format!("base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn build_request(&self, call: &Call<'_>, url: Url, request_id: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(call.method.clone(), url)
            .header(REQUEST_ID_HEADER, request_id);

        builder = match call.credentials {
            Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
            Credentials::Token(token) => builder.header(TOKEN_HEADER, token),
        };

        if !call.query.is_empty() {
            builder = builder.query(&call.query);
        }

        if let Some(fields) = &call.form {
            let form = fields
                .iter()
                .fold(Form::new(), |form, (name, value)| form.text(*name, value.clone()));
            builder = builder.multipart(form);
        }

        builder
    }

    /// Issue one request and translate the outcome
    async fn execute<T: DeserializeOwned>(&self, call: Call<'_>) -> Result<T, ClientError> {
        let url = self.endpoint(&call.segments)?;
        let request_id = Uuid::new_v4().to_string();
        let request = self.build_request(&call, url, &request_id);

        let timeout = if call.method == Method::GET {
            self.config.read_timeout()
        } else {
            self.config.write_timeout()
        };

        if let Some(metrics) = &self.metrics {
            metrics.requests_issued_total.inc();
        }

        let start = Instant::now();
        let outcome = match tokio::time::timeout(timeout, send(request)).await {
            Ok(Ok((status, body))) => interpret(status, &body),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClientError::Transport(format!(
                "request timed out after {}s",
                timeout.as_secs()
            ))),
        };
        let duration = start.elapsed();

        self.log_outcome(&call, &request_id, duration, &outcome);
        self.record_metrics(&call, duration, &outcome);

        outcome
    }

    fn log_outcome<T>(
        &self,
        call: &Call<'_>,
        request_id: &str,
        duration: Duration,
        outcome: &Result<T, ClientError>,
    ) {
        match outcome {
            Ok(_) => {
                if self.config.enable_detailed_logging {
                    info!(
                        operation = call.operation,
                        method = %call.method,
                        request_id = %request_id,
                        duration_ms = duration.as_millis(),
                        "API call completed successfully"
                    );
                }
            }
            Err(ClientError::Request { status, message }) => {
                warn!(
                    operation = call.operation,
                    method = %call.method,
                    request_id = %request_id,
                    status = *status,
                    message = %redact_sensitive_data(message),
                    duration_ms = duration.as_millis(),
                    "API call rejected by server"
                );
            }
            Err(e) => {
                error!(
                    operation = call.operation,
                    method = %call.method,
                    request_id = %request_id,
                    error = %redact_sensitive_data(&e.to_string()),
                    duration_ms = duration.as_millis(),
                    "API call failed"
                );
            }
        }
    }

    fn record_metrics<T>(&self, call: &Call<'_>, duration: Duration, outcome: &Result<T, ClientError>) {
        if let Some(metrics) = &self.metrics {
            let label = match outcome {
                Ok(_) => "success",
                Err(ClientError::Request { .. }) => "rejected",
                Err(ClientError::Auth(_)) => "unauthorized",
                Err(ClientError::Transport(_)) => "transport_error",
            };
            let method = call.method.as_str();

            metrics
                .requests_total
                .with_label_values(&[call.operation, method, label])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[call.operation, method])
                .observe(duration.as_secs_f64());
        }
    }
}

/// Fail fast when a protected call has no token
fn require_token(token: Option<&str>) -> Result<&str, ClientError> {
    token.filter(|t| !t.is_empty()).ok_or_else(ClientError::not_logged_in)
}

async fn send(request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body.to_vec()))
}

/// Map a status and body onto the payload or a typed failure
fn interpret<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if status.is_success() {
        // Acknowledgements may come back with no body at all
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };
        return serde_json::from_slice(body)
            .map_err(|e| ClientError::Transport(format!("malformed response payload: {e}")));
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            debug!(status = status.as_u16(), "Error response carried no message");
            generic_message(status)
        });

    Err(ClientError::Request {
        status: status.as_u16(),
        message,
    })
}

fn generic_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: HTTP {} {}", status.as_u16(), reason),
        None => format!("Request failed: HTTP {}", status.as_u16()),
    }
}
