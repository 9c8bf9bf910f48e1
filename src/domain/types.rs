//! Timestamp handling shared by posts and subscribers.
//!
//! The content API emits timezone-naive ISO-8601 strings, with or without a
//! fractional second component.

use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::FormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use super::error::DomainError;

pub const NAIVE_ISO_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);
pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a wire timestamp. Values carrying an offset are accepted and the
/// offset is dropped, since the rest of the system treats times as naive.
pub fn parse_naive_timestamp(raw: &str) -> Result<PrimitiveDateTime, DomainError> {
    let trimmed = raw.trim();
    if let Ok(value) = PrimitiveDateTime::parse(trimmed, NAIVE_ISO_FORMAT) {
        return Ok(value);
    }

    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map(|value| PrimitiveDateTime::new(value.date(), value.time()))
        .map_err(|err| DomainError::validation(format!("invalid timestamp `{trimmed}`: {err}")))
}

pub fn human_date(value: PrimitiveDateTime) -> String {
    value
        .format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| value.date().to_string())
}

pub fn iso_date(value: PrimitiveDateTime) -> String {
    value
        .format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| value.date().to_string())
}
