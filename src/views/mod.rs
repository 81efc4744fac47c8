//! Server-rendered HTML views
//!
//! Category names and imprints are escaped when they are stored, so they
//! are written out as-is. Everything else (book titles, raw form input,
//! error messages) goes through [`escape`] here.

pub mod categories;
pub mod instances;

use std::fmt::Write;

use axum::{http::StatusCode, response::Html};

pub use crate::models::form::escape;
use crate::models::FieldError;

/// Wrap a page body in the site layout
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
    </head>
    <body>
        <nav>
            <a href="/instances">All copies</a>
            <a href="/instances/create">Create copy</a>
            <a href="/categories">All categories</a>
            <a href="/categories/create">Create category</a>
        </nav>
        <main>
            <h1>{title}</h1>
{body}
        </main>
    </body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

/// Field errors as a list, or nothing
pub fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ul class=\"errors\">\n");
    for error in errors {
        let _ = writeln!(
            out,
            "<li data-field=\"{}\">{}</li>",
            error.field,
            escape(&error.message)
        );
    }
    out.push_str("</ul>\n");
    out
}

/// Generic error page
pub fn error_page(status: StatusCode, code: u32, message: &str) -> Html<String> {
    let body = format!(
        "<p class=\"error\">{}</p>\n<p>Status {} (code {})</p>\n",
        escape(message),
        status.as_u16(),
        code
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_escapes_title() {
        let Html(page) = layout("<Copy>", "<p>body</p>");
        assert!(page.contains("<title>&lt;Copy&gt;</title>"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_error_list() {
        assert_eq!(error_list(&[]), "");
        let html = error_list(&[FieldError {
            field: "name",
            message: "Category name required".into(),
        }]);
        assert!(html.contains("<li data-field=\"name\">Category name required</li>"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let Html(page) = error_page(StatusCode::NOT_FOUND, 20, "Book copy not found");
        assert!(page.contains("Book copy not found"));
        assert!(page.contains("Status 404"));
    }
}
