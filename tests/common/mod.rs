//! In-process mock of the patient records API for integration tests.
//!
//! Credentials: `admin/admin123` gets an admin token, `nurse/user123` a
//! regular one, and `broken/broken` a token whose claims cannot be decoded.
//! Every request is recorded so tests can assert on what went over the wire.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::{Service, ServerHandle};
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use patient_records_client::{ApiClient, ClientConfig, Controller, fields};
use serde_json::{Value, json};

const PREFIX: &str = "/api/v1.0";

/// One request as received by the mock
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: String,
    pub token: Option<String>,
    pub request_id: Option<String>,
}

pub struct MockState {
    hits: Mutex<Vec<Hit>>,
    patients: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
    /// Make `/auth/logout` answer 500
    pub fail_logout: AtomicBool,
    /// Delay before answering `GET /patients`
    pub list_delay_ms: AtomicU64,
    /// Delay before answering `/auth/logout`
    pub logout_delay_ms: AtomicU64,
    /// Multipart fields of the last create/update/book request
    pub last_form: Mutex<HashMap<String, String>>,
}

impl MockState {
    fn new(patients: Vec<Value>) -> Self {
        Self {
            hits: Mutex::new(Vec::new()),
            patients: Mutex::new(patients),
            next_id: AtomicUsize::new(1000),
            fail_logout: AtomicBool::new(false),
            list_delay_ms: AtomicU64::new(0),
            logout_delay_ms: AtomicU64::new(0),
            last_form: Mutex::new(HashMap::new()),
        }
    }

    fn record(&self, hit: Hit) {
        self.hits.lock().unwrap().push(hit);
    }

    pub fn patients(&self) -> Vec<Value> {
        self.patients.lock().unwrap().clone()
    }
}

pub struct MockApi {
    pub state: web::Data<MockState>,
    base_url: String,
    handle: ServerHandle,
}

impl MockApi {
    pub async fn start(patients: Vec<Value>) -> Self {
        let state = web::Data::new(MockState::new(patients));
        let data = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .wrap_fn(|req, srv| {
                    if let Some(state) = req.app_data::<web::Data<MockState>>() {
                        let header_value = |name: &str| {
                            req.headers()
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string)
                        };
                        state.record(Hit {
                            method: req.method().to_string(),
                            path: req.path().to_string(),
                            query: req.query_string().to_string(),
                            token: header_value("x-access-token"),
                            request_id: header_value("x-request-id"),
                        });
                    }
                    srv.call(req)
                })
                .service(
                    web::scope(PREFIX)
                        .service(web::resource("/auth/login").route(web::get().to(login)))
                        .service(web::resource("/auth/logout").route(web::get().to(logout)))
                        .service(web::resource("/auth/verify").route(web::get().to(verify)))
                        .service(
                            web::resource("/patients")
                                .route(web::get().to(list_patients))
                                .route(web::post().to(create_patient)),
                        )
                        .service(
                            web::resource("/patients/{id}")
                                .route(web::get().to(get_patient))
                                .route(web::put().to(update_patient))
                                .route(web::delete().to(delete_patient)),
                        )
                        .service(
                            web::resource("/patients/{id}/appointments")
                                .route(web::get().to(list_appointments))
                                .route(web::post().to(add_appointment)),
                        )
                        .service(
                            web::resource("/patients/{id}/appointments/{aid}")
                                .route(web::get().to(get_appointment))
                                .route(web::put().to(update_appointment))
                                .route(web::delete().to(delete_appointment)),
                        )
                        .service(web::resource("/search").route(web::get().to(search)))
                        .service(
                            web::resource("/stats/appointments").route(web::get().to(appointment_stats)),
                        ),
                )
        })
        .workers(1)
        .disable_signals()
        .shutdown_timeout(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock API");

        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            state,
            base_url: format!("http://127.0.0.1:{port}{PREFIX}"),
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            read_timeout_seconds: 5,
            write_timeout_seconds: 5,
            page_limit: 2,
            ..ClientConfig::default()
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config(), None).expect("client")
    }

    pub fn controller(&self) -> Controller {
        Controller::new(self.client())
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.state.hits.lock().unwrap().len()
    }

    /// Requests with this method to this path below the API prefix
    pub fn hits_to(&self, method: &str, path: &str) -> usize {
        let full = format!("{PREFIX}{path}");
        self.hits()
            .iter()
            .filter(|h| h.method == method && h.path == full)
            .count()
    }

    pub fn last_form(&self) -> HashMap<String, String> {
        self.state.last_form.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// A controller signed in through the login handler
pub async fn signed_in(mock: &MockApi, username: &str, password: &str) -> Controller {
    let mut controller = mock.controller();
    controller.inputs_mut().set(fields::USERNAME, username);
    controller.inputs_mut().set(fields::PASSWORD, password);
    controller
        .login()
        .await
        .expect("login against the mock API");
    controller
}

pub fn patient(id: &str, name: &str, age: u32, condition: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "age": age,
        "condition": condition,
        "appointments": [],
    })
}

pub fn appointment(id: &str, doctor: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "doctor": doctor,
        "date": "2025-03-05T14:30",
        "notes": "Follow-up",
        "status": status,
    })
}

pub fn fake_token(user: &str, admin: bool) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(
        json!({"user": user, "admin": admin, "exp": 4_102_444_800u64})
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{claims}.c2lnbmF0dXJl")
}

enum Role {
    Admin,
    User,
}

fn role(req: &HttpRequest) -> Result<Role, HttpResponse> {
    let token = req
        .headers()
        .get("x-access-token")
        .and_then(|v| v.to_str().ok());
    match token {
        Some(t) if t == fake_token("admin", true) => Ok(Role::Admin),
        Some(t) if t == fake_token("nurse", false) => Ok(Role::User),
        Some(_) => Err(HttpResponse::Unauthorized().json(json!({"error": "Token is invalid!"}))),
        None => Err(HttpResponse::Unauthorized().json(json!({"error": "Token is missing!"}))),
    }
}

fn require_admin(req: &HttpRequest) -> Result<(), HttpResponse> {
    match role(req)? {
        Role::Admin => Ok(()),
        Role::User => Err(HttpResponse::Forbidden().json(json!({"error": "Admin access required"}))),
    }
}

macro_rules! authorize {
    ($check:expr) => {
        if let Err(response) = $check {
            return response;
        }
    };
}

/// Crude multipart reader: `name="x"` followed by the part body
fn form_fields(body: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(body);
    text.split("name=\"")
        .skip(1)
        .filter_map(|part| {
            let (name, rest) = part.split_once('"')?;
            let (_, value) = rest.split_once("\r\n\r\n")?;
            let value = value.split("\r\n--").next()?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": "Patient not found"}))
}

async fn login(req: HttpRequest) -> HttpResponse {
    let credentials = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|b| STANDARD.decode(b).ok())
        .and_then(|b| String::from_utf8(b).ok());

    match credentials.as_deref() {
        Some("admin:admin123") => HttpResponse::Ok().json(json!({"token": fake_token("admin", true)})),
        // Older servers nest the token under `data`
        Some("nurse:user123") => {
            HttpResponse::Ok().json(json!({"data": {"token": fake_token("nurse", false)}}))
        }
        Some("broken:broken") => HttpResponse::Ok().json(json!({"token": "not-a-token"})),
        _ => HttpResponse::Unauthorized().json(json!({"error": "Could not verify"})),
    }
}

async fn logout(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    authorize!(role(&req));
    let delay = state.logout_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
    }
    if state.fail_logout.load(Ordering::SeqCst) {
        return HttpResponse::InternalServerError().json(json!({"error": "Logout failed"}));
    }
    HttpResponse::Ok().json(json!({"message": "Successfully logged out"}))
}

async fn verify(req: HttpRequest) -> HttpResponse {
    authorize!(role(&req));
    HttpResponse::Ok().json(json!({"message": "Token is valid"}))
}

async fn list_patients(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));

    let delay = state.list_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
    }

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let all = state.patients();

    let listed: Vec<Value> = all
        .iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .map(|p| {
            let count = p["appointments"].as_array().map_or(0, Vec::len);
            json!({
                "id": p["_id"],
                "name": p["name"],
                "age": p["age"],
                "condition": p["condition"],
                "appointment_count": count,
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "patients": listed,
        "count": listed.len(),
        "total": all.len(),
        "page": page,
    }))
}

async fn create_patient(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    authorize!(role(&req));

    let form = form_fields(&body);
    *state.last_form.lock().unwrap() = form.clone();
    let (Some(name), Some(age), Some(condition)) = (form.get("name"), form.get("age"), form.get("condition")) else {
        return HttpResponse::BadRequest().json(json!({"error": "Missing required fields"}));
    };
    let Ok(age) = age.parse::<u32>() else {
        return HttpResponse::BadRequest().json(json!({"error": "Age must be a number"}));
    };

    let id = format!("p{}", state.next_id.fetch_add(1, Ordering::SeqCst));
    state
        .patients
        .lock()
        .unwrap()
        .push(patient(&id, name, age, condition));
    HttpResponse::Created().json(json!({"message": "Patient added successfully", "id": id}))
}

async fn get_patient(req: HttpRequest, path: web::Path<String>, state: web::Data<MockState>) -> HttpResponse {
    authorize!(role(&req));
    let id = path.into_inner();
    match state.patients().into_iter().find(|p| p["_id"] == id.as_str()) {
        Some(p) => HttpResponse::Ok().json(p),
        None => not_found(),
    }
}

async fn update_patient(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));
    let id = path.into_inner();
    let form = form_fields(&body);
    *state.last_form.lock().unwrap() = form.clone();

    let mut patients = state.patients.lock().unwrap();
    let Some(p) = patients.iter_mut().find(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    if let Some(name) = form.get("name") {
        p["name"] = json!(name);
    }
    if let Some(condition) = form.get("condition") {
        p["condition"] = json!(condition);
    }
    if let Some(age) = form.get("age").and_then(|a| a.parse::<u32>().ok()) {
        p["age"] = json!(age);
    }
    HttpResponse::Ok().json(json!({"message": "Patient updated successfully"}))
}

async fn delete_patient(req: HttpRequest, path: web::Path<String>, state: web::Data<MockState>) -> HttpResponse {
    authorize!(require_admin(&req));
    let id = path.into_inner();
    let mut patients = state.patients.lock().unwrap();
    let before = patients.len();
    patients.retain(|p| p["_id"] != id.as_str());
    if patients.len() == before {
        return not_found();
    }
    HttpResponse::Ok().json(json!({"message": "Patient deleted successfully"}))
}

async fn list_appointments(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));
    let id = path.into_inner();
    match state.patients().into_iter().find(|p| p["_id"] == id.as_str()) {
        Some(p) => HttpResponse::Ok().json(json!({"appointments": p["appointments"]})),
        None => not_found(),
    }
}

async fn add_appointment(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));
    let id = path.into_inner();
    let form = form_fields(&body);
    *state.last_form.lock().unwrap() = form.clone();

    let appointment_id = format!("a{}", state.next_id.fetch_add(1, Ordering::SeqCst));
    let mut patients = state.patients.lock().unwrap();
    let Some(p) = patients.iter_mut().find(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    let field = |name: &str| form.get(name).cloned().unwrap_or_default();
    if let Some(list) = p["appointments"].as_array_mut() {
        list.push(json!({
            "_id": appointment_id,
            "doctor": field("doctor"),
            "date": field("date"),
            "notes": field("notes"),
            "status": field("status"),
        }));
    }
    HttpResponse::Created().json(json!({
        "message": "Appointment added successfully",
        "appointment_id": appointment_id,
    }))
}

fn appointment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": "Appointment not found"}))
}

async fn get_appointment(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));
    let (id, appointment_id) = path.into_inner();
    let found = state
        .patients()
        .into_iter()
        .find(|p| p["_id"] == id.as_str())
        .and_then(|p| {
            p["appointments"]
                .as_array()
                .into_iter()
                .flatten()
                .find(|a| a["_id"] == appointment_id.as_str())
                .cloned()
        });
    match found {
        Some(a) => HttpResponse::Ok().json(a),
        None => appointment_not_found(),
    }
}

async fn update_appointment(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(require_admin(&req));
    let (id, appointment_id) = path.into_inner();
    let form = form_fields(&body);
    *state.last_form.lock().unwrap() = form.clone();
    if form.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "No valid fields to update"}));
    }

    let mut patients = state.patients.lock().unwrap();
    let appointment = patients
        .iter_mut()
        .find(|p| p["_id"] == id.as_str())
        .and_then(|p| p["appointments"].as_array_mut())
        .and_then(|list| list.iter_mut().find(|a| a["_id"] == appointment_id.as_str()));
    let Some(appointment) = appointment else {
        return appointment_not_found();
    };
    for (name, value) in &form {
        appointment[name.as_str()] = json!(value);
    }
    HttpResponse::Ok().json(json!({"message": "Appointment updated"}))
}

async fn delete_appointment(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(require_admin(&req));
    let (id, appointment_id) = path.into_inner();
    let mut patients = state.patients.lock().unwrap();
    let Some(p) = patients.iter_mut().find(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    if let Some(list) = p["appointments"].as_array_mut() {
        list.retain(|a| a["_id"] != appointment_id.as_str());
    }
    HttpResponse::Ok().json(json!({"message": "Appointment deleted successfully"}))
}

async fn search(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<MockState>,
) -> HttpResponse {
    authorize!(role(&req));
    let q = query.get("q").cloned().unwrap_or_default();
    let needle = q.to_lowercase();
    let results: Vec<Value> = state
        .patients()
        .into_iter()
        .filter(|p| {
            ["name", "condition"].iter().any(|field| {
                p[field]
                    .as_str()
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
        })
        .collect();
    HttpResponse::Ok().json(json!({"results": results, "query": q}))
}

async fn appointment_stats(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    authorize!(require_admin(&req));

    let mut counts: Vec<(String, u64)> = Vec::new();
    for p in state.patients() {
        for a in p["appointments"].as_array().into_iter().flatten() {
            let doctor = a["doctor"].as_str().unwrap_or_default().to_string();
            match counts.iter_mut().find(|(d, _)| *d == doctor) {
                Some((_, n)) => *n += 1,
                None => counts.push((doctor, 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let results: Vec<Value> = counts
        .into_iter()
        .map(|(doctor, count)| json!({"doctor": doctor, "count": count}))
        .collect();
    HttpResponse::Ok().json(json!({"results": results}))
}
