//! In-memory store
//!
//! Mirrors the PostgreSQL repositories closely enough to run the server
//! without a database: names sort in byte order, instance writes reject
//! unknown book ids the way the foreign key would.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, CategoryStore, InstanceStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookTitle, Category, Instance, InstanceData, InstanceDetails},
};

#[derive(Default)]
struct Tables {
    books: BTreeMap<i32, Book>,
    book_categories: Vec<(i32, i32)>,
    categories: BTreeMap<i32, Category>,
    instances: BTreeMap<i32, Instance>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn details(&self, instance: &Instance) -> AppResult<InstanceDetails> {
        let book = self.books.get(&instance.book_id).ok_or_else(|| {
            AppError::Storage(format!(
                "instance {} references missing book {}",
                instance.id, instance.book_id
            ))
        })?;
        Ok(InstanceDetails {
            id: instance.id,
            book: BookTitle::from(book),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        })
    }

    fn check_book(&self, book_id: i32) -> AppResult<()> {
        if self.books.contains_key(&book_id) {
            Ok(())
        } else {
            Err(AppError::Storage(format!(
                "book_instances.book_id references missing book {}",
                book_id
            )))
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog entry filed under the given categories
    pub async fn add_book(&self, title: &str, summary: Option<&str>, category_ids: &[i32]) -> Book {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let book = Book {
            id,
            title: title.to_string(),
            summary: summary.map(str::to_string),
        };
        tables.books.insert(id, book.clone());
        for category_id in category_ids {
            tables.book_categories.push((id, *category_id));
        }
        book
    }

    /// Make every subsequent call fail as a store error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut titles: Vec<BookTitle> = tables.books.values().map(BookTitle::from).collect();
        titles.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(titles)
    }

    async fn find_by_category(&self, category_id: i32) -> AppResult<Vec<Book>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut books: Vec<Book> = tables
            .book_categories
            .iter()
            .filter(|(_, c)| *c == category_id)
            .filter_map(|(b, _)| tables.books.get(b).cloned())
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Category>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        self.check_available()?;
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }

    async fn create(&self, name: &str) -> AppResult<Category> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let category = Category {
            id,
            name: name.to_string(),
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn rename(&self, id: i32, name: &str) -> AppResult<Option<Category>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables.categories.get_mut(&id).map(|category| {
            category.name = name.to_string();
            category.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.check_available()?;
        Ok(self.tables.write().await.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl InstanceStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<InstanceDetails>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables.instances.values().map(|i| tables.details(i)).collect()
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<InstanceDetails>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables.instances.get(&id).map(|i| tables.details(i)).transpose()
    }

    async fn create(&self, data: &InstanceData) -> AppResult<Instance> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.check_book(data.book_id)?;
        let id = tables.next_id();
        let instance = Instance {
            id,
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        tables.instances.insert(id, instance.clone());
        Ok(instance)
    }

    async fn update(&self, id: i32, data: &InstanceData) -> AppResult<Option<Instance>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.check_book(data.book_id)?;
        Ok(tables.instances.get_mut(&id).map(|instance| {
            instance.book_id = data.book_id;
            instance.imprint = data.imprint.clone();
            instance.status = data.status;
            instance.due_back = data.due_back;
            instance.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.check_available()?;
        Ok(self.tables.write().await.instances.remove(&id).is_some())
    }
}
