use axum::http::StatusCode;
use mangashelf::{
    controllers::{EntryIdResponse, library::InLibraryResponse},
    model::LibraryEntry,
};
use serde_json::json;

use crate::{AppStateTest, delete, get, json, random_subject, read_json};

#[tokio::test]
async fn index_should_be_empty_when_anonymous() {
    let test_state = AppStateTest::new().await;

    let response = test_state.generate_response(get("/library", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries: Vec<LibraryEntry> = read_json(response).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn membership_and_mutations_should_require_authentication() {
    let test_state = AppStateTest::new().await;

    let response = test_state.generate_response(get("/library/1", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test_state
        .generate_response(json("POST", "/library", None, json!({ "mangaId": "1" })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test_state.generate_response(delete("/library/1", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adding_twice_should_keep_one_entry_with_latest_progress() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    let response = test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "42", "chapter": 3 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first: EntryIdResponse = read_json(response).await;

    let entries: Vec<LibraryEntry> =
        read_json(test_state.generate_response(get("/library", Some(&token))).await).await;
    let first_entry = entries[0].clone();
    assert_eq!(first_entry.chapter, Some(3.0));
    assert_eq!(first_entry.last_read, Some(first_entry.added_at));

    let response = test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "42", "chapter": 7.5 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second: EntryIdResponse = read_json(response).await;
    assert_eq!(first.id, second.id);

    let entries: Vec<LibraryEntry> =
        read_json(test_state.generate_response(get("/library", Some(&token))).await).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].manga_id, "42");
    assert_eq!(entries[0].chapter, Some(7.5));
    assert_eq!(entries[0].added_at, first_entry.added_at);
    assert!(entries[0].last_read.unwrap() >= first_entry.last_read.unwrap());
}

#[tokio::test]
async fn adding_again_without_chapter_should_clear_it() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    for body in [json!({ "mangaId": "9", "chapter": 12 }), json!({ "mangaId": "9" })] {
        let response = test_state
            .generate_response(json("POST", "/library", Some(&token), body))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let entries: Vec<LibraryEntry> =
        read_json(test_state.generate_response(get("/library", Some(&token))).await).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].chapter, None);
}

#[tokio::test]
async fn index_should_list_newest_first_and_only_own_entries() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());
    let other_token = test_state.token_for(&random_subject());

    for manga_id in ["a", "b", "c"] {
        test_state
            .generate_response(json(
                "POST",
                "/library",
                Some(&token),
                json!({ "mangaId": manga_id }),
            ))
            .await;
    }
    test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&other_token),
            json!({ "mangaId": "z" }),
        ))
        .await;

    let entries: Vec<LibraryEntry> =
        read_json(test_state.generate_response(get("/library", Some(&token))).await).await;
    let manga_ids: Vec<&str> = entries.iter().map(|e| e.manga_id.as_str()).collect();
    assert_eq!(manga_ids, vec!["c", "b", "a"]);

    let membership: InLibraryResponse = read_json(
        test_state
            .generate_response(get("/library/z", Some(&token)))
            .await,
    )
    .await;
    assert!(!membership.in_library);
}

#[tokio::test]
async fn show_should_reflect_membership() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    let membership: InLibraryResponse =
        read_json(test_state.generate_response(get("/library/5", Some(&token))).await).await;
    assert!(!membership.in_library);

    test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "5" }),
        ))
        .await;

    let membership: InLibraryResponse =
        read_json(test_state.generate_response(get("/library/5", Some(&token))).await).await;
    assert!(membership.in_library);

    let response = test_state
        .generate_response(delete("/library/5", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let membership: InLibraryResponse =
        read_json(test_state.generate_response(get("/library/5", Some(&token))).await).await;
    assert!(!membership.in_library);
}

#[tokio::test]
async fn removing_a_non_member_should_be_a_no_op() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "kept" }),
        ))
        .await;

    let response = test_state
        .generate_response(delete("/library/missing", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let entries: Vec<LibraryEntry> =
        read_json(test_state.generate_response(get("/library", Some(&token))).await).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].manga_id, "kept");
}

#[tokio::test]
async fn store_should_reject_invalid_body() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "mangaId": "1", "chapter": -1 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(json(
            "POST",
            "/library",
            Some(&token),
            json!({ "chapter": 1 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
