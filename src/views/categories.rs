//! Category pages

use std::fmt::Write;

use axum::response::Html;

use super::{error_list, escape, layout};
use crate::{
    models::{Book, Category, CategoryForm, FieldError},
    services::categories::CategoryWithBooks,
};

pub fn list(categories: &[Category]) -> Html<String> {
    let mut body = String::new();
    if categories.is_empty() {
        body.push_str("<p>There are no categories.</p>\n");
    } else {
        body.push_str("<ul class=\"categories\">\n");
        for category in categories {
            let _ = writeln!(
                body,
                "<li><a href=\"{}\">{}</a></li>",
                category.url(),
                category.name
            );
        }
        body.push_str("</ul>\n");
    }
    layout("Category List", &body)
}

fn book_listing(books: &[Book]) -> String {
    let mut out = String::from("<dl class=\"books\">\n");
    for book in books {
        let _ = writeln!(out, "<dt>{}</dt>", escape(&book.title));
        let _ = writeln!(
            out,
            "<dd>{}</dd>",
            escape(book.summary.as_deref().unwrap_or(""))
        );
    }
    out.push_str("</dl>\n");
    out
}

pub fn detail(detail: &CategoryWithBooks) -> Html<String> {
    let category = &detail.category;
    let mut body = format!("<h2>Category: {}</h2>\n<h3>Books</h3>\n", category.name);
    if detail.books.is_empty() {
        body.push_str("<p>This category has no books.</p>\n");
    } else {
        body.push_str(&book_listing(&detail.books));
    }
    let _ = writeln!(
        body,
        "<p><a href=\"{url}/delete\">Delete category</a> <a href=\"{url}/update\">Update category</a></p>",
        url = category.url()
    );
    layout("Category Detail", &body)
}

/// Create / update form; `form` holds sanitized values
pub fn form(title: &str, form: &CategoryForm, errors: &[FieldError]) -> Html<String> {
    let body = format!(
        r#"<form method="POST" action="">
    <label for="name">Category:</label>
    <input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." required value="{name}">
    <button type="submit">Submit</button>
</form>
{errors}"#,
        name = form.name,
        errors = error_list(errors),
    );
    layout(title, &body)
}

/// Delete confirmation, or the list of books blocking the delete
pub fn delete(detail: &CategoryWithBooks) -> Html<String> {
    let category = &detail.category;
    let mut body = format!("<h2>{}</h2>\n", category.name);
    if detail.books.is_empty() {
        let _ = write!(
            body,
            r#"<p>Do you really want to delete this category?</p>
<form method="POST" action="">
    <input type="hidden" name="category_id" value="{id}">
    <button type="submit">Delete</button>
</form>
"#,
            id = category.id
        );
    } else {
        let _ = writeln!(
            body,
            "<p class=\"blocked\">Delete the following {} book(s) before attempting to delete this category.</p>",
            detail.books.len()
        );
        body.push_str(&book_listing(&detail.books));
    }
    layout("Delete Category", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poetry(books: Vec<Book>) -> CategoryWithBooks {
        CategoryWithBooks {
            category: Category {
                id: 4,
                name: "Poetry".into(),
            },
            books,
        }
    }

    #[test]
    fn test_delete_offers_form_when_unreferenced() {
        let Html(page) = delete(&poetry(vec![]));
        assert!(page.contains("name=\"category_id\" value=\"4\""));
    }

    #[test]
    fn test_delete_lists_blocking_books() {
        let Html(page) = delete(&poetry(vec![Book {
            id: 1,
            title: "Odes & Sonnets".into(),
            summary: None,
        }]));
        assert!(!page.contains("category_id"));
        assert!(page.contains("following 1 book(s)"));
        assert!(page.contains("Odes &amp; Sonnets"));
    }
}
