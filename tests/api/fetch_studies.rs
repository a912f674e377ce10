use fake::{faker::internet::en::SafeEmail, Fake};
use reqwest::StatusCode;
use wiremock::{
    matchers::{any, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::helpers::{last_update_window, study, App};

#[tokio::test]
async fn fetch_studies_returns_400_when_sponsors_are_empty() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.registry_server)
        .await;

    for sponsors in ["", " , ,", ",", "   "] {
        let response = app.get_fetch_studies(sponsors, "someone@example.com").await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "The API did not fail with 400 when sponsors were {:?}",
            sponsors
        );

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No sponsors provided." }));
    }
}

#[tokio::test]
async fn fetch_studies_rejects_requests_with_missing_parameters() {
    let app = App::new().await;

    let test_cases = [
        ("/fetch-studies?email=someone%40example.com", "missing sponsors"),
        ("/fetch-studies?sponsors=Pfizer", "missing email"),
        ("/fetch-studies", "missing both"),
    ];

    for (path, description) in test_cases {
        let response = app.get(path).await;

        assert!(
            response.status().is_client_error(),
            "The API did not reject the request when {}",
            description
        );
    }
}

#[tokio::test]
async fn fetch_studies_sends_the_expected_query_to_the_registry() {
    let app = App::new().await;
    let (yesterday, today) = last_update_window();
    let expected_term = format!(
        r#"(AREA[LeadSponsor]"AcmeCorp" OR AREA[LeadSponsor]"BetaInc") AND AREA[LastUpdatePostDate]RANGE[{},{}]"#,
        yesterday, today
    );

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("query.term", expected_term.as_str()))
        .and(query_param("sort", "LastUpdatePostDate:desc"))
        .and(query_param("pageSize", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "studies": [] })))
        .expect(1)
        .mount(&app.registry_server)
        .await;

    let response = app
        .get_fetch_studies("Acme Corp, Beta Inc", "someone@example.com")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fetch_studies_returns_only_studies_with_an_nct_id() {
    let app = App::new().await;

    Mock::given(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "studies": [
                study("NCT05000001", "Acme Corp"),
                study("", "Acme Corp"),
            ]
        })))
        .expect(1)
        .mount(&app.registry_server)
        .await;

    let response = app.get_fetch_studies("Acme Corp", "someone@example.com").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "email": "someone@example.com",
            "results": [
                {
                    "nctId": "NCT05000001",
                    "leadSponsor": "Acme Corp",
                    "link": "https://clinicaltrials.gov/study/NCT05000001",
                }
            ]
        })
    );
}

#[tokio::test]
async fn fetch_studies_reports_no_new_studies_as_a_message() {
    let app = App::new().await;

    let upstream_bodies = [
        serde_json::json!({ "studies": [] }),
        serde_json::json!({}),
    ];

    for upstream_body in upstream_bodies {
        let _mock_guard = Mock::given(path("/api/v2/studies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body))
            .expect(1)
            .mount_as_scoped(&app.registry_server)
            .await;

        let response = app.get_fetch_studies("Pfizer", "someone@example.com").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["results"], "No new studies found.");
    }
}

#[tokio::test]
async fn fetch_studies_returns_500_when_the_registry_fails() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.registry_server)
        .await;

    let response = app.get_fetch_studies("Pfizer", "someone@example.com").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(body["trace"].is_string());
}

#[tokio::test]
async fn fetch_studies_returns_500_on_malformed_registry_response() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .expect(1)
        .mount(&app.registry_server)
        .await;

    let response = app.get_fetch_studies("Pfizer", "someone@example.com").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn fetch_studies_returns_500_when_the_registry_times_out() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(std::time::Duration::from_secs(180)),
        )
        .expect(1)
        .mount(&app.registry_server)
        .await;

    let response = app.get_fetch_studies("Pfizer", "someone@example.com").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn email_is_echoed_verbatim() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&app.registry_server)
        .await;

    let fake_email: String = SafeEmail().fake();
    let emails = [fake_email.as_str(), "  not an email ", "", "Ünïcødé+tag@x"];

    for email in emails {
        let response = app.get_fetch_studies("Pfizer", email).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["email"], email);
    }
}
