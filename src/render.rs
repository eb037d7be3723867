//! Server-side page rendering.
//!
//! No template engine: every page is a small formatted string behind this
//! module seam, so the handlers only ever hand over data.

use serde_json::Value;

/// Shared HTML shell.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Escape text destined for element content or attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn flash_banner(flash: Option<&str>) -> String {
    match flash {
        Some(message) => format!("<p class=\"flash\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

pub fn registration_page(flash: Option<&str>) -> String {
    let body = format!(
        "{}<h1>Register</h1>\n\
         <form action=\"/registrations\" method=\"post\">\n\
         <label>Name <input type=\"text\" name=\"name\"></label><br>\n\
         <label>Email <input type=\"text\" name=\"email\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Register</button>\n\
         </form>",
        flash_banner(flash)
    );
    page("Registration", &body)
}

pub fn sign_in_page(flash: Option<&str>) -> String {
    let body = format!(
        "{}<h1>Sign in</h1>\n\
         <form action=\"/auth\" method=\"post\">\n\
         <label>Email <input type=\"text\" name=\"email\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>",
        flash_banner(flash)
    );
    page("Sign in", &body)
}

pub fn success_page(message: &str) -> String {
    let body = format!("<h1>Success</h1>\n<p>{}</p>", escape(message));
    page("Success", &body)
}

/// Render a list of JSON objects as an HTML table, one column per key.
///
/// Column order follows the serialized key order of the first row; rows
/// missing a key render an empty cell.
pub fn json_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return page("People", "<p>No records.</p>");
    };

    let columns: Vec<&String> = first.keys().collect();

    let mut table = String::from("<table border=\"1\">\n<thead><tr>");
    for column in &columns {
        table.push_str(&format!("<th>{}</th>", escape(column)));
    }
    table.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        table.push_str("<tr>");
        for column in &columns {
            let cell = match row.get(column.as_str()) {
                Some(Value::String(s)) => escape(s),
                Some(Value::Null) | None => String::new(),
                Some(other) => escape(&other.to_string()),
            };
            table.push_str(&format!("<td>{}</td>", cell));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</tbody>\n</table>");

    page("People", &table)
}
