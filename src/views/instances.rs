//! Book instance pages

use std::fmt::Write;

use axum::response::Html;

use super::{error_list, escape, layout};
use crate::models::{BookTitle, FieldError, InstanceDetails, InstanceForm, InstanceStatus};

fn status_class(status: InstanceStatus) -> &'static str {
    match status {
        InstanceStatus::Available => "text-success",
        InstanceStatus::Maintenance => "text-danger",
        InstanceStatus::Loaned | InstanceStatus::Reserved => "text-warning",
    }
}

fn status_line(instance: &InstanceDetails) -> String {
    let mut out = format!(
        "<span class=\"{}\">{}</span>",
        status_class(instance.status),
        instance.status
    );
    if instance.status != InstanceStatus::Available && instance.due_back.is_some() {
        let _ = write!(out, " (Due: {})", instance.due_back_formatted());
    }
    out
}

pub fn list(instances: &[InstanceDetails]) -> Html<String> {
    let mut body = String::new();
    if instances.is_empty() {
        body.push_str("<p>There are no book copies in this library.</p>\n");
    } else {
        body.push_str(
            "<table class=\"instances\">\n<tr><th>Copy</th><th>Imprint</th><th>Status</th></tr>\n",
        );
        for instance in instances {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
                instance.url(),
                escape(&instance.book.title),
                instance.imprint,
                status_line(instance)
            );
        }
        body.push_str("</table>\n");
    }
    layout("Book Instance List", &body)
}

pub fn detail(instance: &InstanceDetails) -> Html<String> {
    let body = format!(
        r#"<p><strong>Title:</strong> {title}</p>
<p><strong>Imprint:</strong> {imprint}</p>
<p><strong>Status:</strong> {status}</p>
<p><a href="{url}/delete">Delete copy</a> <a href="{url}/update">Update copy</a></p>
"#,
        title = escape(&instance.book.title),
        imprint = instance.imprint,
        status = status_line(instance),
        url = instance.url(),
    );
    layout(&format!("Copy: {}", instance.book.title), &body)
}

/// Create / update form; `form` holds sanitized values
pub fn form(
    title: &str,
    books: &[BookTitle],
    form: &InstanceForm,
    errors: &[FieldError],
) -> Html<String> {
    let selected_book = form.book_id();
    let mut book_options = String::new();
    for book in books {
        let _ = writeln!(
            book_options,
            "<option value=\"{}\"{}>{}</option>",
            book.id,
            if selected_book == Some(book.id) { " selected" } else { "" },
            escape(&book.title)
        );
    }

    let selected_status = form.status.parse::<InstanceStatus>().unwrap_or_default();
    let mut status_options = String::new();
    for status in InstanceStatus::ALL {
        let _ = writeln!(
            status_options,
            "<option value=\"{s}\"{sel}>{s}</option>",
            s = status,
            sel = if status == selected_status { " selected" } else { "" }
        );
    }

    let body = format!(
        r#"<form method="POST" action="">
    <label for="book">Book:</label>
    <select id="book" name="book" required>
        <option value="">-- select a book --</option>
{book_options}    </select>
    <label for="imprint">Imprint:</label>
    <input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" required value="{imprint}">
    <label for="due_back">Date when book available:</label>
    <input id="due_back" type="date" name="due_back" value="{due_back}">
    <label for="status">Status:</label>
    <select id="status" name="status" required>
{status_options}    </select>
    <button type="submit">Submit</button>
</form>
{errors}"#,
        book_options = book_options,
        imprint = form.imprint,
        due_back = escape(&form.due_back),
        status_options = status_options,
        errors = error_list(errors),
    );
    layout(title, &body)
}

pub fn delete(instance: &InstanceDetails) -> Html<String> {
    let body = format!(
        r#"<p><strong>Title:</strong> {title}</p>
<p><strong>Imprint:</strong> {imprint}</p>
<p><strong>Status:</strong> {status}</p>
<p>Do you really want to delete this copy?</p>
<form method="POST" action="">
    <input type="hidden" name="instance_id" value="{id}">
    <button type="submit">Delete</button>
</form>
"#,
        title = escape(&instance.book.title),
        imprint = instance.imprint,
        status = status_line(instance),
        id = instance.id,
    );
    layout("Delete Book Instance", &body)
}
