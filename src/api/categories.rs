//! Category pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use super::check_hidden_id;
use crate::{
    error::AppResult,
    models::{CategoryForm, DeleteCategoryForm, SubmittedForm},
    services::categories::DeleteOutcome,
    views, AppState,
};

const LIST_URL: &str = "/categories";

/// List all categories by name
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Html<String>> {
    let categories = state.services.categories.list().await?;
    Ok(views::categories::list(&categories))
}

/// Show a category with its books
pub async fn category_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let detail = state.services.categories.detail(id).await?;
    Ok(views::categories::detail(&detail))
}

/// Empty create form
pub async fn create_category_form() -> Html<String> {
    views::categories::form("Create Category", &CategoryForm::default(), &[])
}

/// Handle the create form; an existing name redirects to that category
pub async fn create_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    let (form, errors) = form.sanitize_and_validate();
    if !errors.is_empty() {
        tracing::debug!("create category rejected: {:?}", errors);
        return Ok(views::categories::form("Create Category", &form, &errors).into_response());
    }

    let outcome = state.services.categories.create(&form.name).await?;
    Ok(Redirect::to(&outcome.category().url()).into_response())
}

/// Delete confirmation; a missing category sends the user back to the list
pub async fn delete_category_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.categories.find_with_books(id).await? {
        Some(detail) => Ok(views::categories::delete(&detail).into_response()),
        None => {
            tracing::debug!("delete form for missing category {}", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
    }
}

/// Handle the delete form; still-referenced categories get the
/// confirmation page again
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteCategoryForm>,
) -> AppResult<Response> {
    check_hidden_id(id, form.category_id)?;

    match state.services.categories.delete(id).await? {
        DeleteOutcome::Referenced(detail) => Ok(views::categories::delete(&detail).into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

/// Pre-populated update form; a missing category sends the user back to
/// the list
pub async fn update_category_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(category) = state.services.categories.get(id).await? else {
        tracing::debug!("update form for missing category {}", id);
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    Ok(views::categories::form("Update Category", &CategoryForm::from(&category), &[]).into_response())
}

/// Handle the update form; renaming onto an existing name redirects to
/// that category and leaves this one untouched
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    let (form, errors) = form.sanitize_and_validate();
    if !errors.is_empty() {
        tracing::debug!("update of category {} rejected: {:?}", id, errors);
        return Ok(views::categories::form("Update Category", &form, &errors).into_response());
    }

    let outcome = state.services.categories.rename(id, &form.name).await?;
    Ok(Redirect::to(&outcome.category().url()).into_response())
}
