//! Catalog entry (book) models
//!
//! Books are read-only here: copies point at one, categories are
//! referenced by many.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry as listed under a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: Option<String>,
}

/// Id + title projection used for dropdowns and copy listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookTitle {
    pub id: i32,
    pub title: String,
}

impl From<&Book> for BookTitle {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}
