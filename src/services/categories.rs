//! Category service
//!
//! Create and rename merge into an existing category of the same name
//! instead of writing. The duplicate check and the write are separate
//! store calls, so two concurrent submissions of one new name can both
//! pass the check.

use crate::{
    error::{AppError, AppResult},
    models::{Book, Category},
    repository::Repository,
};

/// Result of a create or rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Another category already holds the name; nothing was written
    Existing(Category),
    /// The category was created or renamed
    Saved(Category),
}

impl SaveOutcome {
    pub fn category(&self) -> &Category {
        match self {
            SaveOutcome::Existing(c) | SaveOutcome::Saved(c) => c,
        }
    }
}

/// A category with the books filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithBooks {
    pub category: Category,
    pub books: Vec<Book>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing to delete
    Missing,
    /// Books still reference the category; it was kept
    Referenced(CategoryWithBooks),
}

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<Category>> {
        self.repository.categories.find_by_id(id).await
    }

    /// Fetch the category and its books concurrently
    pub async fn find_with_books(&self, id: i32) -> AppResult<Option<CategoryWithBooks>> {
        let (category, books) = tokio::try_join!(
            self.repository.categories.find_by_id(id),
            self.repository.books.find_by_category(id)
        )?;
        Ok(category.map(|category| CategoryWithBooks { category, books }))
    }

    pub async fn detail(&self, id: i32) -> AppResult<CategoryWithBooks> {
        self.find_with_books(id).await?.ok_or_else(|| {
            tracing::debug!("category {} not found", id);
            AppError::NotFound("Category not found".to_string())
        })
    }

    /// Create a category unless one with the exact name exists
    pub async fn create(&self, name: &str) -> AppResult<SaveOutcome> {
        if let Some(existing) = self.repository.categories.find_by_name(name).await? {
            tracing::debug!("category {:?} already exists as id={}", name, existing.id);
            return Ok(SaveOutcome::Existing(existing));
        }

        let created = self.repository.categories.create(name).await?;
        tracing::info!("created category id={} name={:?}", created.id, created.name);
        Ok(SaveOutcome::Saved(created))
    }

    /// Rename a category unless the name is already taken
    ///
    /// The category holding the name may be the target itself, in which
    /// case nothing changes either.
    pub async fn rename(&self, id: i32, name: &str) -> AppResult<SaveOutcome> {
        if let Some(existing) = self.repository.categories.find_by_name(name).await? {
            tracing::debug!(
                "rename of category {} to {:?} collapses into id={}",
                id,
                name,
                existing.id
            );
            return Ok(SaveOutcome::Existing(existing));
        }

        let renamed = self
            .repository
            .categories
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
        tracing::info!("renamed category id={} to {:?}", renamed.id, renamed.name);
        Ok(SaveOutcome::Saved(renamed))
    }

    /// Delete a category that no book references
    ///
    /// References are read again here, whatever the confirmation page
    /// showed.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        let Some(current) = self.find_with_books(id).await? else {
            tracing::debug!("category {} already gone", id);
            return Ok(DeleteOutcome::Missing);
        };

        if !current.books.is_empty() {
            tracing::debug!(
                "category {} still referenced by {} book(s)",
                id,
                current.books.len()
            );
            return Ok(DeleteOutcome::Referenced(current));
        }

        if self.repository.categories.delete(id).await? {
            tracing::info!("deleted category id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
