use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Offset, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("startDate must not be after endDate")]
    Inverted,
    #[error("Date range must not exceed {max_days} days")]
    TooLong { max_days: i64 },
    #[error("Date range cannot be shifted back one year")]
    OutOfRange,
}

/// Build the configured local offset. Out-of-range minute values fall back to UTC.
pub fn local_offset(utc_offset_minutes: i32) -> FixedOffset {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Calendar date of `instant` as seen from `offset`.
pub fn local_date(instant: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    instant.with_timezone(offset).date_naive()
}

/// Today's date as seen from `offset`.
pub fn today(offset: &FixedOffset) -> NaiveDate {
    local_date(&Utc::now(), offset)
}

/// An inclusive `[start, end]` span of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// `[start_date 00:00:00.000, end_date 23:59:59.999]` in `offset`.
    pub fn from_dates(start_date: NaiveDate, end_date: NaiveDate, offset: &FixedOffset) -> Self {
        Self {
            start: day_start(start_date, offset),
            end: day_start(end_date, offset) + Duration::days(1) - Duration::milliseconds(1),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// The window of equal length ending 1 ms before this one starts.
    pub fn previous(&self) -> Self {
        let end = self.start - Duration::milliseconds(1);
        Self {
            start: end - (self.end - self.start),
            end,
        }
    }

    pub fn start_date(&self, offset: &FixedOffset) -> NaiveDate {
        local_date(&self.start, offset)
    }

    pub fn end_date(&self, offset: &FixedOffset) -> NaiveDate {
        local_date(&self.end, offset)
    }
}

/// The same calendar window one year earlier. Feb 29 clamps to Feb 28.
pub fn last_year(
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset: &FixedOffset,
) -> Result<DateWindow, RangeError> {
    let shift = |d: NaiveDate| d.checked_sub_months(Months::new(12));
    match (shift(start_date), shift(end_date)) {
        (Some(start), Some(end)) => Ok(DateWindow::from_dates(start, end, offset)),
        _ => Err(RangeError::OutOfRange),
    }
}

fn day_start(date: NaiveDate, offset: &FixedOffset) -> DateTime<Utc> {
    let local_midnight = date.and_time(NaiveTime::MIN);
    (local_midnight - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// Parse a `YYYY-MM-DD` date. Full RFC 3339 timestamps are also accepted and reduced
/// to their calendar date in `offset`.
pub fn parse_date(
    field: &'static str,
    raw: &str,
    offset: &FixedOffset,
) -> Result<NaiveDate, RangeError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| local_date(&dt.with_timezone(&Utc), offset))
        .map_err(|_| RangeError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Resolve optional `startDate`/`endDate` query values.
///
/// `endDate` defaults to `today`; `startDate` defaults to 29 days before `endDate`,
/// giving a 30-day window.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
    offset: &FixedOffset,
    max_days: i64,
) -> Result<(NaiveDate, NaiveDate), RangeError> {
    let end_date = match end {
        Some(raw) if !raw.trim().is_empty() => parse_date("endDate", raw, offset)?,
        _ => today,
    };
    let start_date = match start {
        Some(raw) if !raw.trim().is_empty() => parse_date("startDate", raw, offset)?,
        _ => end_date - Duration::days(29),
    };

    if start_date > end_date {
        return Err(RangeError::Inverted);
    }
    if (end_date - start_date).num_days() + 1 > max_days {
        return Err(RangeError::TooLong { max_days });
    }

    Ok((start_date, end_date))
}
