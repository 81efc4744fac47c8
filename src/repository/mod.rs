//! Repository layer for database operations
//!
//! Each record kind sits behind a store trait. `Repository` bundles one
//! implementation of each, backed either by PostgreSQL or by the
//! in-memory store.

pub mod books;
pub mod categories;
pub mod instances;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookTitle, Category, Instance, InstanceData, InstanceDetails},
};

/// Read-only access to catalog entries
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every book, projected to id + title, ordered by title
    async fn list_titles(&self) -> AppResult<Vec<BookTitle>>;
    /// Books filed under the given category
    async fn find_by_category(&self, category_id: i32) -> AppResult<Vec<Book>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> AppResult<Vec<Category>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;
    /// Exact, case-sensitive match
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    async fn create(&self, name: &str) -> AppResult<Category>;
    /// `None` when no category has this id
    async fn rename(&self, id: i32, name: &str) -> AppResult<Option<Category>>;
    /// `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait InstanceStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<InstanceDetails>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<InstanceDetails>>;
    async fn create(&self, data: &InstanceData) -> AppResult<Instance>;
    /// Replace every mutable field; `None` when no instance has this id
    async fn update(&self, id: i32, data: &InstanceData) -> AppResult<Option<Instance>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Main repository struct holding one store per record kind
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub instances: Arc<dyn InstanceStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            categories: Arc::new(categories::CategoriesRepository::new(pool.clone())),
            instances: Arc::new(instances::InstancesRepository::new(pool)),
        }
    }

    /// Create a repository over a shared in-memory store
    pub fn in_memory(store: Arc<memory::MemoryStore>) -> Self {
        Self {
            books: store.clone(),
            categories: store.clone(),
            instances: store,
        }
    }
}
