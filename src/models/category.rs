//! Category model and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::form::{sanitize_text, SubmittedForm};

/// Category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    /// Unique by convention only; nothing in storage enforces it
    pub name: String,
}

impl Category {
    pub fn url(&self) -> String {
        format!("/categories/{}", self.id)
    }
}

/// Create / update category form body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Category name required"))]
    pub name: String,
}

impl SubmittedForm for CategoryForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn sanitize(self) -> Self {
        Self {
            name: sanitize_text(&self.name),
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
        }
    }
}

/// Delete confirmation form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteCategoryForm {
    pub category_id: Option<i32>,
}
