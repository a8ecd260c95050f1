use axum::{body::Body, http::Request, http::StatusCode};
use mangashelf::{auth::encode_jwt, config::Jwt, model::LibraryEntry};

use crate::{AppStateTest, random_subject, read_json};

fn with_authorization(uri: &str, value: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(axum::http::header::AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn invalid_token_should_be_treated_as_anonymous() {
    let test_state = AppStateTest::new().await;

    let response = test_state
        .generate_response(with_authorization("/library", "bearer random-string"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entries: Vec<LibraryEntry> = read_json(response).await;
    assert!(entries.is_empty());

    let response = test_state
        .generate_response(with_authorization("/library/1", "bearer random-string"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn header_without_bearer_scheme_should_be_anonymous() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(with_authorization("/library/1", &token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(with_authorization(
            "/library/1",
            &format!("basic {}", token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(with_authorization(
            "/library/1",
            &format!("Bearer {}", token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_signed_with_other_secret_should_be_anonymous() {
    let test_state = AppStateTest::new().await;

    let foreign = Jwt {
        secret: "another secret".into(),
        iss: test_state.app_state.config.jwt.iss.clone(),
        aud: test_state.app_state.config.jwt.aud.clone(),
    };
    let token = encode_jwt(&random_subject(), &foreign).unwrap();

    let response = test_state
        .generate_response(with_authorization(
            "/favorites/1",
            &format!("bearer {}", token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_should_ignore_authorization() {
    let test_state = AppStateTest::new().await;

    let response = test_state
        .generate_response(with_authorization("/manga", "bearer random-string"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
