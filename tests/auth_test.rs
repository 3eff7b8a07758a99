mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::*;
use job_board::{config::get_config, database::Store, utils::token::issue_token};
use tower::ServiceExt;

fn set_cookie(resp: &axum::response::Response) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn register_login_and_use_the_session_cookie() {
    let fx = fixture().await;

    let page = json_body(get(&fx.app, "/registration/", None).await).await;
    assert_eq!(page["template"], "vacancy/register.html");

    let resp = post_form(
        &fx.app,
        "/registration/",
        &[
            ("username", "new.user"),
            ("first_name", "New"),
            ("last_name", "User"),
            ("email", "new.user@example.com"),
            ("password1", "hunter2hunter2"),
            ("password2", "hunter2hunter2"),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");
    let user = fx.store.user_by_username("new.user").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "hunter2hunter2");

    let resp = post_form(
        &fx.app,
        "/login/",
        &[("username", "new.user"), ("password", "hunter2hunter2")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let cookie = set_cookie(&resp);
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    let body = json_body(resp).await;
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["token_type"], "Bearer");

    let req = Request::builder()
        .uri("/myresume/")
        .header(header::COOKIE, format!("access_token={}", token))
        .body(Body::empty())
        .unwrap();
    let resp = fx.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["template"], "vacancy/resume-create.html");

    let resp = get(&fx.app, "/login/", Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let resp = get(&fx.app, "/registration/", Some(&token)).await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn wrong_password_re_renders_with_a_non_field_error() {
    let fx = fixture().await;
    signed_in(&fx.store, "known").await;

    let resp = post_form(
        &fx.app,
        "/login/",
        &[("username", "known"), ("password", "not-the-password")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookie(&resp).is_empty());
    let page = json_body(resp).await;
    assert_eq!(page["template"], "vacancy/login.html");
    assert!(page["context"]["form"]["errors"]["__all__"].is_array());
    assert_eq!(page["context"]["form"]["values"]["username"], "known");
    assert!(page["context"]["form"]["values"].get("password").is_none());
}

#[tokio::test]
async fn registration_rejects_duplicates_and_weak_passwords() {
    let fx = fixture().await;
    signed_in(&fx.store, "taken").await;

    let page = json_body(
        post_form(
            &fx.app,
            "/registration/",
            &[
                ("username", "taken"),
                ("email", "x@example.com"),
                ("password1", "12345678"),
                ("password2", "12345678"),
            ],
            None,
        )
        .await,
    )
    .await;
    let errors = &page["context"]["form"]["errors"];
    assert!(errors["username"].is_array());
    assert!(errors["password2"].is_array());
    assert!(page["context"]["form"]["values"].get("password1").is_none());
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let fx = fixture().await;
    let resp = get(&fx.app, "/logout/", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert!(set_cookie(&resp).contains("Max-Age=0"));
}

#[tokio::test]
async fn tampered_tokens_are_treated_as_anonymous() {
    let fx = fixture().await;
    let resp = get(&fx.app, "/mycompany/", Some("not-a-jwt")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");
}

#[tokio::test]
async fn tokens_for_missing_users_cannot_create_anything() {
    let fx = fixture().await;
    let token = issue_token(&get_config().jwt_secret, 424242, "ghost", 60).unwrap();
    let companies_before = fx.store.company_count().await;

    let resp = post_form(
        &fx.app,
        "/mycompany/edit/",
        &[("name", "Ghost Inc"), ("employee_count", "1")],
        Some(&token),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");
    assert_eq!(fx.store.company_count().await, companies_before);

    let resp = get(&fx.app, "/myresume/edit/", Some(&token)).await;
    assert_eq!(location(&resp), "/login/");
    assert!(fx.store.resume_by_user(424242).await.unwrap().is_none());
}
