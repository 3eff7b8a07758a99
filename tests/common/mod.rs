#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use job_board::{
    config::{get_config, init_config_with, Config, LogFormat},
    database::{MemoryStore, Store},
    models::{
        company::{Company, CompanyChanges},
        speciality::NewSpeciality,
        user::NewUser,
        vacancy::VacancyChanges,
    },
    routes, utils, AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub const NOT_FOUND_TEXT: &str = "Oops, page not found!";

pub fn init() {
    let media_root = std::env::temp_dir().join("job-board-tests-media");
    let _ = init_config_with(Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        jwt_secret: "test_secret_key".into(),
        token_ttl_minutes: 60,
        media_root: media_root.to_string_lossy().to_string(),
        seed_demo_data: false,
        log_format: LogFormat::Text,
    });
}

pub struct Fixture {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub company: Company,
    /// "Rust Engineer" (backend), "Frontend Developer" (frontend),
    /// "Site Reliability" (backend).
    pub vacancy_ids: Vec<i64>,
}

pub async fn fixture() -> Fixture {
    init();
    let store = Arc::new(MemoryStore::new());

    let mut speciality_ids = Vec::new();
    for (code, title) in [("backend", "Backend"), ("frontend", "Frontend"), ("design", "Design")] {
        let speciality = store
            .insert_speciality(NewSpeciality {
                code: code.into(),
                title: title.into(),
                picture: format!("speciality_images/specty_{}.png", code),
            })
            .await
            .unwrap();
        speciality_ids.push(speciality.id);
    }

    let company = store
        .insert_company(CompanyChanges {
            name: "workiro".into(),
            location: "london".into(),
            description: "the best company in the world".into(),
            logo: "company_images/logo1.png".into(),
            employee_count: 10_000,
            owner_id: None,
        })
        .await
        .unwrap();

    let rows = [
        ("Rust Engineer", "tokio, axum", "Build services", speciality_ids[0]),
        (
            "Frontend Developer",
            "React",
            "Work on UI with Kubernetes knowledge",
            speciality_ids[1],
        ),
        ("Site Reliability", "Terraform", "On-call rotation", speciality_ids[0]),
    ];
    let mut vacancy_ids = Vec::new();
    for (title, skills, text, speciality_id) in rows {
        let vacancy = store
            .insert_vacancy(VacancyChanges {
                title: title.into(),
                skills: skills.into(),
                text: text.into(),
                salary_min: Some(100_000),
                salary_max: Some(150_000),
                speciality_id,
                company_id: company.id,
            })
            .await
            .unwrap();
        vacancy_ids.push(vacancy.id);
    }

    let app = routes::router(AppState::new(store.clone()));
    Fixture {
        app,
        store,
        company,
        vacancy_ids,
    }
}

/// Creates a user directly in the store and returns a bearer token for them.
pub async fn signed_in(store: &MemoryStore, username: &str) -> (i64, String) {
    let user = store
        .insert_user(NewUser {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: format!("{}@example.com", username),
            password_hash: utils::crypto::hash_password("irrelevant-pw").unwrap(),
        })
        .await
        .unwrap();
    let config = get_config();
    let token =
        utils::token::issue_token(&config.jwt_secret, user.id, &user.username, 60).unwrap();
    (user.id, token)
}

pub fn encode_form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    pairs: &[(&str, &str)],
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    app.clone()
        .oneshot(builder.body(Body::from(encode_form(pairs))).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(resp: Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn assert_not_found(resp: Response) {
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(text_body(resp).await, NOT_FOUND_TEXT);
}
