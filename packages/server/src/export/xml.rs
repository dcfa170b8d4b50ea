use chrono::SecondsFormat;

use crate::entity::review;

pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escape the five XML special characters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

pub fn to_xml(reviews: &[review::Model]) -> String {
    let mut out = String::from(DECLARATION);
    out.push('\n');

    if reviews.is_empty() {
        out.push_str("<reviews></reviews>");
        return out;
    }

    out.push_str("<reviews>\n");
    for r in reviews {
        out.push_str("  <review>\n");
        let fields = [
            ("id", escape(&r.id)),
            ("customerId", escape(&r.customer_id)),
            ("customerName", escape(&r.customer_name)),
            ("rating", r.rating.to_string()),
            ("title", escape(&r.title)),
            ("comment", escape(&r.comment)),
            ("status", r.status.as_str().to_string()),
            (
                "createdAt",
                r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            (
                "updatedAt",
                r.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ];
        for (name, value) in fields {
            out.push_str(&format!("    <{name}>{value}</{name}>\n"));
        }
        out.push_str("  </review>\n");
    }
    out.push_str("</reviews>");
    out
}
