//! Data models for LocalLibrary

pub mod book;
pub mod category;
pub mod form;
pub mod instance;

// Re-export commonly used types
pub use book::{Book, BookTitle};
pub use category::{Category, CategoryForm, DeleteCategoryForm};
pub use form::{FieldError, SubmittedForm};
pub use instance::{
    DeleteInstanceForm, Instance, InstanceData, InstanceDetails, InstanceForm, InstanceStatus,
};
