//! Whole-collection export as CSV, XML or JSON.

pub mod csv;
pub mod summary;
pub mod xml;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::entity::review;
use crate::models::review::ReviewResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xml,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Xml => "application/xml; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    fn matches(self, media_type: &str) -> bool {
        match self {
            Self::Csv => matches!(media_type, "text/csv" | "application/csv"),
            Self::Xml => matches!(media_type, "application/xml" | "text/xml"),
            Self::Json => media_type == "application/json",
        }
    }

    /// Pick a format from an `Accept` header.
    ///
    /// `q` weights are ignored: CSV wins over XML, which wins over JSON, whenever the
    /// header lists it anywhere. A missing header or one naming none of them gives JSON.
    pub fn negotiate(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Json;
        };
        let candidates: Vec<String> = accept
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
            .filter(|media| !media.is_empty())
            .collect();

        [Self::Csv, Self::Xml, Self::Json]
            .into_iter()
            .find(|format| candidates.iter().any(|c| format.matches(c)))
            .unwrap_or(Self::Json)
    }

    /// `reviews-2024-05-01.csv`
    pub fn filename(self, date: NaiveDate) -> String {
        format!("reviews-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: DateTime<Utc>,
    pub total_records: u64,
    pub format: ExportFormat,
    #[schema(example = "customer-reviews")]
    pub source: String,
}

/// Body of a JSON export.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct JsonExport {
    pub metadata: ExportMetadata,
    pub data: Vec<ReviewResponse>,
}

/// A rendered export ready to be written to the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    pub format: ExportFormat,
    pub body: String,
    pub content_type: &'static str,
}

/// Serialize the full collection in `format`. `source` and `exported_at` only
/// appear in JSON metadata.
pub fn render(
    reviews: Vec<review::Model>,
    format: ExportFormat,
    source: &str,
    exported_at: DateTime<Utc>,
) -> Result<ExportOutput, serde_json::Error> {
    let body = match format {
        ExportFormat::Csv => csv::to_csv(&reviews),
        ExportFormat::Xml => xml::to_xml(&reviews),
        ExportFormat::Json => {
            let export = JsonExport {
                metadata: ExportMetadata {
                    export_date: exported_at,
                    total_records: reviews.len() as u64,
                    format,
                    source: source.to_string(),
                },
                data: reviews.into_iter().map(ReviewResponse::from).collect(),
            };
            serde_json::to_string(&export)?
        }
    };

    Ok(ExportOutput {
        format,
        body,
        content_type: format.content_type(),
    })
}
