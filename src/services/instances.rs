//! Book instance service

use crate::{
    error::{AppError, AppResult},
    models::{BookTitle, Instance, InstanceData, InstanceDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct InstancesService {
    repository: Repository,
}

impl InstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies with their book resolved
    pub async fn list(&self) -> AppResult<Vec<InstanceDetails>> {
        self.repository.instances.list().await
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<InstanceDetails>> {
        self.repository.instances.find_by_id(id).await
    }

    pub async fn detail(&self, id: i32) -> AppResult<InstanceDetails> {
        self.find(id).await?.ok_or_else(|| {
            tracing::debug!("book instance {} not found", id);
            AppError::NotFound("Book copy not found".to_string())
        })
    }

    /// Books offered in the copy form
    pub async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.repository.books.list_titles().await
    }

    /// Book list and target copy, fetched concurrently
    pub async fn edit_context(&self, id: i32) -> AppResult<(Vec<BookTitle>, Option<InstanceDetails>)> {
        tokio::try_join!(
            self.repository.books.list_titles(),
            self.repository.instances.find_by_id(id)
        )
    }

    pub async fn create(&self, data: &InstanceData) -> AppResult<Instance> {
        let created = self.repository.instances.create(data).await?;
        tracing::info!("created book instance id={} book={}", created.id, created.book_id);
        Ok(created)
    }

    /// Replace every mutable field of the copy
    pub async fn update(&self, id: i32, data: &InstanceData) -> AppResult<Instance> {
        let updated = self
            .repository
            .instances
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("updated book instance id={}", updated.id);
        Ok(updated)
    }

    /// Delete unconditionally; a missing copy is not an error
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.instances.delete(id).await? {
            tracing::info!("deleted book instance id={}", id);
        } else {
            tracing::debug!("book instance {} already gone", id);
        }
        Ok(())
    }
}
