mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn home_lists_specialities_and_companies_with_counts() {
    let fx = fixture().await;
    let resp = get(&fx.app, "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["template"], "vacancy/index.html");

    let specialities = page["context"]["specialities"].as_array().unwrap();
    assert_eq!(specialities.len(), 3);
    let backend = specialities.iter().find(|s| s["code"] == "backend").unwrap();
    assert_eq!(backend["vacancies_count"], 2);
    let design = specialities.iter().find(|s| s["code"] == "design").unwrap();
    assert_eq!(design["vacancies_count"], 0);

    let companies = page["context"]["companies"].as_array().unwrap();
    assert_eq!(companies[0]["name"], "workiro");
    assert_eq!(companies[0]["vacancies_count"], 3);
}

#[tokio::test]
async fn every_vacancy_detail_resolves_and_unknown_ids_do_not() {
    let fx = fixture().await;
    for id in &fx.vacancy_ids {
        let resp = get(&fx.app, &format!("/vacancies/{}/", id), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let page = json_body(resp).await;
        assert_eq!(page["template"], "vacancy/vacancy.html");
        assert_eq!(page["context"]["vacancy"]["id"], *id);
        assert_eq!(page["context"]["vacancy"]["company_name"], "workiro");
        assert_eq!(page["context"]["form"]["errors"], serde_json::json!({}));
    }

    assert_not_found(get(&fx.app, "/vacancies/99999/", None).await).await;
    assert_not_found(get(&fx.app, "/vacancies/abc/", None).await).await;
}

#[tokio::test]
async fn all_vacancies_page_lists_every_row_in_id_order() {
    let fx = fixture().await;
    let page = json_body(get(&fx.app, "/vacancies/", None).await).await;
    assert_eq!(page["context"]["title"], "All vacancies");
    assert_eq!(page["context"]["count"], 3);
    let ids: Vec<i64> = page["context"]["vacancies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, fx.vacancy_ids);
}

#[tokio::test]
async fn category_returns_exact_rows_or_not_found() {
    let fx = fixture().await;

    let page = json_body(get(&fx.app, "/vacancies/cat/backend", None).await).await;
    assert_eq!(page["context"]["title"], "Backend");
    let titles: Vec<&str> = page["context"]["vacancies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust Engineer", "Site Reliability"]);

    let page = json_body(get(&fx.app, "/vacancies/cat/frontend", None).await).await;
    assert_eq!(page["context"]["count"], 1);

    assert_not_found(get(&fx.app, "/vacancies/cat/design", None).await).await;
    assert_not_found(get(&fx.app, "/vacancies/cat/astrology", None).await).await;
}

async fn search_titles(fx: &Fixture, query: &str) -> Vec<String> {
    let uri = format!("/vacancies/search/?{}", encode_form(&[("search", query)]));
    let resp = get(&fx.app, &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["context"]["title"], "Found vacancies");
    assert_eq!(page["context"]["query"], query);
    page["context"]["vacancies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn search_matches_each_column_case_insensitively() {
    let fx = fixture().await;
    assert_eq!(search_titles(&fx, "reliab").await, vec!["Site Reliability"]);
    assert_eq!(search_titles(&fx, "TOKIO").await, vec!["Rust Engineer"]);
    assert_eq!(search_titles(&fx, "kubernetes").await, vec!["Frontend Developer"]);
    assert!(search_titles(&fx, "cobol").await.is_empty());
    assert!(search_titles(&fx, "%").await.is_empty());
}

#[tokio::test]
async fn empty_search_returns_everything() {
    let fx = fixture().await;
    assert_eq!(search_titles(&fx, "").await.len(), 3);
    assert_eq!(search_titles(&fx, "   ").await.len(), 3);

    let page = json_body(get(&fx.app, "/vacancies/search/", None).await).await;
    assert_eq!(page["context"]["count"], 3);
}

#[tokio::test]
async fn company_detail_shows_its_vacancies() {
    let fx = fixture().await;
    let page = json_body(get(&fx.app, &format!("/companies/{}/", fx.company.id), None).await).await;
    assert_eq!(page["template"], "vacancy/company.html");
    assert_eq!(page["context"]["company"]["name"], "workiro");
    assert_eq!(page["context"]["vacancies"].as_array().unwrap().len(), 3);

    assert_not_found(get(&fx.app, "/companies/424242/", None).await).await;
}

#[tokio::test]
async fn unknown_routes_use_the_custom_not_found_body() {
    let fx = fixture().await;
    assert_not_found(get(&fx.app, "/no/such/page", None).await).await;
}

#[tokio::test]
async fn health_reports_the_memory_store() {
    let fx = fixture().await;
    let resp = get(&fx.app, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}
