use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::warn;

use super::view;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::BookId;

pub const ADDED_BODY: &str = "Data received and added successfully!";
pub const DELETED_BODY: &str = "Data deleted successfully!";
pub const UPDATED_BODY: &str = "Rating updated successfully!";

#[derive(Deserialize)]
pub struct AddBookForm {
    book_name: Option<String>,
    book_author: Option<String>,
    book_rating: Option<String>,
}

#[derive(Deserialize)]
pub struct EditRatingForm {
    new_rating: Option<String>,
    book_id: Option<String>,
}

pub async fn index_handler(State(catalog): State<Arc<Catalog>>) -> Result<Html<String>> {
    let books = catalog.list_books().await?;
    Ok(Html(view::index_page(&books)?))
}

pub async fn delete_handler(
    State(catalog): State<Arc<Catalog>>,
    Path((author, title)): Path<(String, String)>,
) -> Result<&'static str> {
    catalog.delete_book(&author, &title).await?;
    Ok(DELETED_BODY)
}

pub async fn edit_select_handler(
    State(catalog): State<Arc<Catalog>>,
    Path((author, rating, title)): Path<(String, String, String)>,
) -> Result<Html<String>> {
    let form = catalog.select_edit(&author, &rating, &title).await?;
    Ok(Html(view::edit_page(&form)?))
}

pub async fn add_form_handler() -> Result<Html<String>> {
    Ok(Html(view::add_page()?))
}

pub async fn add_submit_handler(
    State(catalog): State<Arc<Catalog>>,
    form: std::result::Result<Form<AddBookForm>, FormRejection>,
) -> Result<&'static str> {
    let Form(form) = form?;
    catalog
        .add_book(
            form.book_name.as_deref(),
            form.book_author.as_deref(),
            form.book_rating.as_deref(),
        )
        .await?;
    Ok(ADDED_BODY)
}

pub async fn edit_commit_handler(
    State(catalog): State<Arc<Catalog>>,
    form: std::result::Result<Form<EditRatingForm>, FormRejection>,
) -> Result<&'static str> {
    let Form(form) = form?;
    let book_id = parse_book_id(form.book_id.as_deref())?;
    catalog
        .commit_edit(form.new_rating.as_deref(), book_id)
        .await?;
    Ok(UPDATED_BODY)
}

pub async fn health_handler(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    match catalog.db().health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

pub async fn method_not_allowed_handler() -> Error {
    Error::MethodNotAllowed
}

/// An absent or blank `book_id` means "use the pending queue".
fn parse_book_id(raw: Option<&str>) -> Result<Option<BookId>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidInput(format!("book id {raw:?} is not a number"))),
    }
}
