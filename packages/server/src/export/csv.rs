use chrono::SecondsFormat;

use crate::entity::review;

pub const HEADER: &str = "id,customerId,customerName,rating,title,comment,status,createdAt,updatedAt";

/// Render reviews as CSV. Every non-numeric field is quoted; rows end with `\n`
/// separators only (no trailing newline).
pub fn to_csv(reviews: &[review::Model]) -> String {
    let mut lines = Vec::with_capacity(reviews.len() + 1);
    lines.push(HEADER.to_string());

    for r in reviews {
        let fields = [
            quote(&r.id),
            quote(&r.customer_id),
            quote(&r.customer_name),
            r.rating.to_string(),
            quote(&r.title),
            quote(&r.comment),
            quote(r.status.as_str()),
            quote(&r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            quote(&r.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
