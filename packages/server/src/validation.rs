//! Payload validation for review mutations.
//!
//! `validate_create` / `validate_update` collect every failing field and never fail
//! themselves. `parse_create` / `parse_update` run the same checks and, on success,
//! produce the owned values the store accepts.

use common::ReviewStatus;
use serde::Serialize;

use crate::error::{AppError, FieldError};
use crate::models::review::{CreateReviewRequest, UpdateReviewRequest};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// A validated review ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub customer_id: String,
    pub customer_name: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub status: ReviewStatus,
}

/// A validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub status: Option<ReviewStatus>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn validate_create(req: &CreateReviewRequest) -> ValidationResult {
    let mut errors = Vec::new();

    required_text(&mut errors, "customerId", req.customer_id.as_deref());
    required_text(&mut errors, "customerName", req.customer_name.as_deref());
    required_text(&mut errors, "title", req.title.as_deref());
    required_text(&mut errors, "comment", req.comment.as_deref());

    match &req.rating {
        Some(value) => {
            if let Err(e) = parse_rating(value) {
                errors.push(e);
            }
        }
        None => errors.push(FieldError::new("rating", "Rating is required")),
    }

    if let Some(status) = req.status.as_deref()
        && let Err(e) = parse_status(status)
    {
        errors.push(e);
    }

    ValidationResult::from_errors(errors)
}

pub fn validate_update(req: &UpdateReviewRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let texts = [
        ("customerId", req.customer_id.as_deref()),
        ("customerName", req.customer_name.as_deref()),
        ("title", req.title.as_deref()),
        ("comment", req.comment.as_deref()),
    ];
    for (field, value) in texts {
        if value.is_some() {
            required_text(&mut errors, field, value);
        }
    }

    if let Some(value) = &req.rating
        && let Err(e) = parse_rating(value)
    {
        errors.push(e);
    }

    if let Some(status) = req.status.as_deref()
        && let Err(e) = parse_status(status)
    {
        errors.push(e);
    }

    ValidationResult::from_errors(errors)
}

/// Validate a create payload and convert it into a [`NewReview`].
pub fn parse_create(req: CreateReviewRequest) -> Result<NewReview, AppError> {
    let result = validate_create(&req);
    if !result.is_valid {
        return Err(AppError::InvalidPayload(result.errors));
    }

    let (Some(customer_id), Some(customer_name), Some(title), Some(comment), Some(rating)) = (
        req.customer_id,
        req.customer_name,
        req.title,
        req.comment,
        req.rating,
    ) else {
        return Err(AppError::Validation("Missing required fields".into()));
    };

    Ok(NewReview {
        customer_id: customer_id.trim().to_string(),
        customer_name: customer_name.trim().to_string(),
        rating: parse_rating(&rating).map_err(|e| AppError::InvalidPayload(vec![e]))?,
        title: title.trim().to_string(),
        comment: comment.trim().to_string(),
        status: match req.status.as_deref() {
            Some(s) => parse_status(s).map_err(|e| AppError::InvalidPayload(vec![e]))?,
            None => ReviewStatus::default(),
        },
    })
}

/// Validate an update payload and convert it into [`ReviewChanges`].
pub fn parse_update(req: UpdateReviewRequest) -> Result<ReviewChanges, AppError> {
    let result = validate_update(&req);
    if !result.is_valid {
        return Err(AppError::InvalidPayload(result.errors));
    }

    let rating = req
        .rating
        .as_ref()
        .map(parse_rating)
        .transpose()
        .map_err(|e| AppError::InvalidPayload(vec![e]))?;
    let status = req
        .status
        .as_deref()
        .map(parse_status)
        .transpose()
        .map_err(|e| AppError::InvalidPayload(vec![e]))?;

    Ok(ReviewChanges {
        customer_id: req.customer_id.map(|s| s.trim().to_string()),
        customer_name: req.customer_name.map(|s| s.trim().to_string()),
        rating,
        title: req.title.map(|s| s.trim().to_string()),
        comment: req.comment.map(|s| s.trim().to_string()),
        status,
    })
}

fn required_text(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => {}
        Some(_) => errors.push(FieldError::new(field, format!("{field} must not be empty"))),
        None => errors.push(FieldError::new(field, format!("{field} is required"))),
    }
}

/// Accepts JSON integers, and floats with no fractional part (`4.0`).
fn parse_rating(value: &serde_json::Value) -> Result<i32, FieldError> {
    let invalid = || {
        FieldError::new(
            "rating",
            format!("Rating must be an integer between {MIN_RATING} and {MAX_RATING}"),
        )
    };

    let n = match value.as_i64() {
        Some(n) => n,
        None => match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f.is_finite() => f as i64,
            _ => return Err(invalid()),
        },
    };

    if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&n) {
        Ok(n as i32)
    } else {
        Err(invalid())
    }
}

fn parse_status(raw: &str) -> Result<ReviewStatus, FieldError> {
    raw.parse::<ReviewStatus>()
        .map_err(|e| FieldError::new("status", e.to_string()))
}
