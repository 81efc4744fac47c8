//! HTTP-level tests for the book instance (copy) pages.

mod common;

use axum::http::StatusCode;
use common::{body_text, build_test_app, get, post_form, redirect_target, TestApp};

async fn seeded() -> (TestApp, i32) {
    let app = build_test_app();
    let book = app.store.add_book("The Left Hand of Darkness", None, &[]).await;
    (app, book.id)
}

async fn create_copy(app: &TestApp, body: &str) -> String {
    let response = post_form(app, "/instances/create", body).await;
    redirect_target(&response)
}

#[tokio::test]
async fn empty_list() {
    let app = build_test_app();
    let response = get(&app, "/instances").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("There are no book copies"));
}

#[tokio::test]
async fn create_form_offers_books() {
    let (app, book_id) = seeded().await;
    let response = get(&app, "/instances/create").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains(&format!(
        "<option value=\"{}\">The Left Hand of Darkness</option>",
        book_id
    )));
}

#[tokio::test]
async fn create_redirects_to_new_copy() {
    let (app, book_id) = seeded().await;
    let location = create_copy(
        &app,
        &format!("book={}&imprint=Ace+Books%2C+1969&status=Loaned&due_back=2031-04-02", book_id),
    )
    .await;
    assert!(location.starts_with("/instances/"));

    let page = body_text(get(&app, &location).await).await;
    assert!(page.contains("<title>Copy: The Left Hand of Darkness</title>"));
    assert!(page.contains("Ace Books, 1969"));
    assert!(page.contains("(Due: Apr 2, 2031)"));

    let list = body_text(get(&app, "/instances").await).await;
    assert!(list.contains(&format!("href=\"{}\"", location)));
}

#[tokio::test]
async fn due_back_round_trips_as_the_same_date() {
    let (app, book_id) = seeded().await;
    let location = create_copy(
        &app,
        &format!("book={}&imprint=x&status=Reserved&due_back=2024-02-29T23%3A30%3A00-05%3A00", book_id),
    )
    .await;

    let form = body_text(get(&app, &format!("{}/update", location)).await).await;
    assert!(form.contains("value=\"2024-02-29\""));
}

#[tokio::test]
async fn invalid_create_rerenders_with_errors() {
    let (app, book_id) = seeded().await;
    let response = post_form(
        &app,
        "/instances/create",
        &format!("book={}&imprint=%3Cb%3EBold%3C%2Fb%3E&due_back=not-a-date", book_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Invalid date"));
    assert!(page.contains("value=\"&lt;b&gt;Bold&lt;&#x2F;b&gt;\""));
    assert!(page.contains(&format!("<option value=\"{}\" selected>", book_id)));
    assert!(body_text(get(&app, "/instances").await).await.contains("There are no book copies"));
}

#[tokio::test]
async fn empty_required_fields_are_rejected() {
    let (app, _) = seeded().await;
    let response = post_form(&app, "/instances/create", "book=&imprint=+++").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Book must be specified"));
    assert!(page.contains("Imprint must be specified"));
}

#[tokio::test]
async fn missing_copy_detail_is_not_found() {
    let app = build_test_app();
    let response = get(&app, "/instances/4242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book copy not found"));
}

#[tokio::test]
async fn missing_copy_forms_redirect_to_list() {
    let app = build_test_app();
    assert_eq!(redirect_target(&get(&app, "/instances/4242/delete").await), "/instances");
    assert_eq!(redirect_target(&get(&app, "/instances/4242/update").await), "/instances");
}

#[tokio::test]
async fn delete_removes_copy() {
    let (app, book_id) = seeded().await;
    let location = create_copy(&app, &format!("book={}&imprint=Doomed", book_id)).await;
    let id = location.trim_start_matches("/instances/");

    let confirm = get(&app, &format!("{}/delete", location)).await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert!(body_text(confirm).await.contains("Do you really want to delete this copy?"));

    let response = post_form(&app, &format!("{}/delete", location), &format!("instance_id={}", id)).await;
    assert_eq!(redirect_target(&response), "/instances");
    assert_eq!(get(&app, &location).await.status(), StatusCode::NOT_FOUND);

    // Deleting again is not an error
    let response = post_form(&app, &format!("{}/delete", location), "").await;
    assert_eq!(redirect_target(&response), "/instances");
}

#[tokio::test]
async fn delete_with_mismatched_hidden_id_is_rejected() {
    let (app, book_id) = seeded().await;
    let location = create_copy(&app, &format!("book={}&imprint=Kept", book_id)).await;

    let response = post_form(&app, &format!("{}/delete", location), "instance_id=999999").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, &location).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_replaces_fields_in_place() {
    let (app, book_id) = seeded().await;
    let other = app.store.add_book("Emma", None, &[]).await;
    let location = create_copy(
        &app,
        &format!("book={}&imprint=First&status=Loaned&due_back=2030-01-01", book_id),
    )
    .await;

    let form = body_text(get(&app, &format!("{}/update", location)).await).await;
    assert!(form.contains("value=\"First\""));
    assert!(form.contains("<option value=\"Loaned\" selected>"));

    let response = post_form(
        &app,
        &format!("{}/update", location),
        &format!("book={}&imprint=Second&status=Available&due_back=", other.id),
    )
    .await;
    assert_eq!(redirect_target(&response), location);

    let page = body_text(get(&app, &location).await).await;
    assert!(page.contains("<title>Copy: Emma</title>"));
    assert!(page.contains("Second"));
    assert!(!page.contains("Due:"));
}

#[tokio::test]
async fn invalid_update_rerenders_and_keeps_record() {
    let (app, book_id) = seeded().await;
    let location = create_copy(&app, &format!("book={}&imprint=Original", book_id)).await;

    let response = post_form(
        &app,
        &format!("{}/update", location),
        &format!("book={}&imprint=&status=Lost", book_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Imprint must be specified"));
    assert!(page.contains("Invalid status"));

    assert!(body_text(get(&app, &location).await).await.contains("Original"));
}

#[tokio::test]
async fn update_of_vanished_copy_is_not_found() {
    let (app, book_id) = seeded().await;
    let response = post_form(&app, "/instances/4242/update", &format!("book={}&imprint=x", book_id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_book_is_a_store_failure() {
    let app = build_test_app();
    let response = post_form(&app, "/instances/create", "book=31337&imprint=Ghost").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn store_failure_yields_generic_error_page() {
    let app = build_test_app();
    app.store.set_unavailable(true);

    let response = get(&app, "/instances").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let page = body_text(response).await;
    assert!(page.contains("Database error"));
    assert!(!page.contains("store unavailable"));
}
