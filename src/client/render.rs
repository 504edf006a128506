//! Plain-text presentation of responses and JSON values.

use serde_json::Value;
use std::fmt::Write;

use super::model::{ResponseView, SavedQuery};
use crate::shared::StatusClass;

const INDENT: &str = "  ";

/// Pretty-prints a JSON value, one member per line, two-space indentation.
pub fn render_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(members) => {
            if members.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (i, (key, member)) in members.iter().enumerate() {
                push_indent(out, depth + 1);
                write_string(out, key);
                out.push_str(": ");
                write_value(out, member, depth + 1);
                if i + 1 < members.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push_str(&Value::String(s.to_string()).to_string());
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn status_label(class: StatusClass) -> &'static str {
    match class {
        StatusClass::Success => "success",
        StatusClass::Redirect => "redirect",
        StatusClass::ClientError => "client error",
        StatusClass::ServerError => "server error",
        StatusClass::Other => "error",
    }
}

/// Status line, headers, blank line, body. Text bodies are printed as-is,
/// structured bodies through `render_json`.
pub fn render_response(response: &ResponseView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({}ms) [{}]",
        response.status,
        response.status_text,
        response.time,
        status_label(StatusClass::of(response.status))
    );

    for (key, value) in &response.headers {
        let _ = writeln!(out, "{}: {}", key, value);
    }
    out.push('\n');

    match &response.data {
        Value::String(text) => out.push_str(text),
        other => out.push_str(&render_json(other)),
    }
    out.push('\n');
    out
}

/// One line per saved query: id, method, URL and creation time.
pub fn render_saved_query(query: &SavedQuery) -> String {
    let created = chrono::DateTime::from_timestamp_millis(query.timestamp)
        .map(|t| t.format("%b %-d, %Y %-I:%M %p").to_string())
        .unwrap_or_default();
    format!("{}  {:<7} {}  {}", query.id, query.method, query.url, created)
}
