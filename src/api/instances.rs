//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use super::check_hidden_id;
use crate::{
    error::AppResult,
    models::{DeleteInstanceForm, InstanceForm, SubmittedForm},
    views, AppState,
};

const LIST_URL: &str = "/instances";

/// List all copies
pub async fn list_instances(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.instances.list().await?;
    Ok(views::instances::list(&instances))
}

/// Show one copy
pub async fn instance_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let instance = state.services.instances.detail(id).await?;
    Ok(views::instances::detail(&instance))
}

/// Empty create form
pub async fn create_instance_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.instances.book_titles().await?;
    Ok(views::instances::form(
        "Create BookInstance",
        &books,
        &InstanceForm::default(),
        &[],
    ))
}

/// Handle the create form
pub async fn create_instance(
    State(state): State<AppState>,
    Form(form): Form<InstanceForm>,
) -> AppResult<Response> {
    let (form, errors) = form.sanitize_and_validate();

    let Some(data) = form.to_data().filter(|_| errors.is_empty()) else {
        tracing::debug!("create book instance rejected: {:?}", errors);
        let books = state.services.instances.book_titles().await?;
        return Ok(views::instances::form("Create BookInstance", &books, &form, &errors).into_response());
    };

    let created = state.services.instances.create(&data).await?;
    Ok(Redirect::to(&created.url()).into_response())
}

/// Delete confirmation; a missing copy sends the user back to the list
pub async fn delete_instance_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.instances.find(id).await? {
        Some(instance) => Ok(views::instances::delete(&instance).into_response()),
        None => {
            tracing::debug!("delete form for missing book instance {}", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
    }
}

/// Handle the delete form
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteInstanceForm>,
) -> AppResult<Redirect> {
    check_hidden_id(id, form.instance_id)?;
    state.services.instances.delete(id).await?;
    Ok(Redirect::to(LIST_URL))
}

/// Pre-populated update form; a missing copy sends the user back to the list
pub async fn update_instance_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (books, instance) = state.services.instances.edit_context(id).await?;

    let Some(instance) = instance else {
        tracing::debug!("update form for missing book instance {}", id);
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    Ok(views::instances::form(
        "Update BookInstance",
        &books,
        &InstanceForm::from(&instance),
        &[],
    )
    .into_response())
}

/// Handle the update form
pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<InstanceForm>,
) -> AppResult<Response> {
    let (form, errors) = form.sanitize_and_validate();

    let Some(data) = form.to_data().filter(|_| errors.is_empty()) else {
        tracing::debug!("update of book instance {} rejected: {:?}", id, errors);
        let books = state.services.instances.book_titles().await?;
        return Ok(views::instances::form("Update BookInstance", &books, &form, &errors).into_response());
    };

    let updated = state.services.instances.update(id, &data).await?;
    Ok(Redirect::to(&updated.url()).into_response())
}
