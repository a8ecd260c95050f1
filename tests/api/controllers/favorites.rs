use axum::http::StatusCode;
use mangashelf::{
    controllers::{EntryIdResponse, favorites::InFavoritesResponse},
    model::FavoriteEntry,
};
use serde_json::json;

use crate::{AppStateTest, delete, get, json, random_subject, read_json};

#[tokio::test]
async fn index_should_be_empty_when_anonymous() {
    let test_state = AppStateTest::new().await;

    let response = test_state.generate_response(get("/favorites", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries: Vec<FavoriteEntry> = read_json(response).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn membership_and_mutations_should_require_authentication() {
    let test_state = AppStateTest::new().await;

    let response = test_state
        .generate_response(get("/favorites/1", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test_state
        .generate_response(json("POST", "/favorites", None, json!({ "mangaId": "1" })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test_state
        .generate_response(delete("/favorites/1", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adding_twice_should_keep_the_first_entry() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    let first: EntryIdResponse = read_json(
        test_state
            .generate_response(json(
                "POST",
                "/favorites",
                Some(&token),
                json!({ "mangaId": "7" }),
            ))
            .await,
    )
    .await;
    let entries: Vec<FavoriteEntry> =
        read_json(test_state.generate_response(get("/favorites", Some(&token))).await).await;
    let first_entry = entries[0].clone();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let second: EntryIdResponse = read_json(
        test_state
            .generate_response(json(
                "POST",
                "/favorites",
                Some(&token),
                json!({ "mangaId": "7" }),
            ))
            .await,
    )
    .await;
    assert_eq!(first.id, second.id);

    let entries: Vec<FavoriteEntry> =
        read_json(test_state.generate_response(get("/favorites", Some(&token))).await).await;
    assert_eq!(entries, vec![first_entry]);
}

#[tokio::test]
async fn show_should_toggle_with_add_and_remove() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    let membership: InFavoritesResponse = read_json(
        test_state
            .generate_response(get("/favorites/3", Some(&token)))
            .await,
    )
    .await;
    assert!(!membership.in_favorites);

    let response = test_state
        .generate_response(json(
            "POST",
            "/favorites",
            Some(&token),
            json!({ "mangaId": "3" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let membership: InFavoritesResponse = read_json(
        test_state
            .generate_response(get("/favorites/3", Some(&token)))
            .await,
    )
    .await;
    assert!(membership.in_favorites);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(delete("/favorites/3", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let membership: InFavoritesResponse = read_json(
        test_state
            .generate_response(get("/favorites/3", Some(&token)))
            .await,
    )
    .await;
    assert!(!membership.in_favorites);

    // -----------------------------------------------------------------------
    let response = test_state
        .generate_response(delete("/favorites/3", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn index_should_only_list_own_entries_newest_first() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());
    let other_token = test_state.token_for(&random_subject());

    for manga_id in ["first", "second"] {
        test_state
            .generate_response(json(
                "POST",
                "/favorites",
                Some(&token),
                json!({ "mangaId": manga_id }),
            ))
            .await;
    }
    test_state
        .generate_response(json(
            "POST",
            "/favorites",
            Some(&other_token),
            json!({ "mangaId": "theirs" }),
        ))
        .await;

    let entries: Vec<FavoriteEntry> =
        read_json(test_state.generate_response(get("/favorites", Some(&token))).await).await;
    let manga_ids: Vec<&str> = entries.iter().map(|e| e.manga_id.as_str()).collect();
    assert_eq!(manga_ids, vec!["second", "first"]);

    let entries: Vec<FavoriteEntry> = read_json(
        test_state
            .generate_response(get("/favorites", Some(&other_token)))
            .await,
    )
    .await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].manga_id, "theirs");
}

#[tokio::test]
async fn store_should_reject_empty_manga_id() {
    let test_state = AppStateTest::new().await;
    let token = test_state.token_for(&random_subject());

    let response = test_state
        .generate_response(json(
            "POST",
            "/favorites",
            Some(&token),
            json!({ "mangaId": "" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
