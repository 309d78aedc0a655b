//! Raw form input and the helpers used to validate it.
//!
//! Forms arrive as a list of key-value pairs where a key may repeat (e.g. one
//! `tags` entry per selected tag). [RawForm] keeps them exactly as sent and
//! the entity modules turn them into validated types, collecting every
//! problem in [FieldErrors] so the user sees all of them at once.

use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::Error;

/// Untyped form fields as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: Vec<(String, String)>,
}

impl RawForm {
    /// Wrap already-decoded key-value pairs.
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// The first value submitted for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted for `name`, in submission order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The first value for `name`, or an empty string when the field is absent.
    ///
    /// Missing and empty fields are treated the same by every validator.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Replace all values for `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields.retain(|(key, _)| key != name);
        self.fields.push((name.to_owned(), value.to_owned()));
    }
}

impl From<Vec<(String, String)>> for RawForm {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self::new(fields)
    }
}

impl<K, V> FromIterator<(K, V)> for RawForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Field-level validation messages for one form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    /// Record `message` as a problem with the form.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Return the value of `result`, recording its message if it failed.
    pub fn check<T>(&mut self, result: Result<T, &'static str>) -> Option<T> {
        result.inspect_err(|message| self.push(*message)).ok()
    }

    /// Whether no problems have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded messages in the order they were found.
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Combine the messages into a single [Error::Validation].
    pub fn into_error(self) -> Error {
        Error::Validation(format!("Validation failed: {}", self.0.join(", ")))
    }
}

/// Trim `value` and reject it with `message` if nothing is left.
pub(crate) fn required_text(value: &str, message: &'static str) -> Result<String, &'static str> {
    let value = value.trim();

    if value.is_empty() {
        Err(message)
    } else {
        Ok(value.to_owned())
    }
}

pub(crate) const AMOUNT_NOT_POSITIVE: &str = "Amount must be a positive number";
pub(crate) const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a number";
pub(crate) const AMOUNT_NOT_WHOLE: &str = "Amount must be a whole number";
pub(crate) const DATE_INVALID: &str = "Date must be valid";

/// Coerce `value` to a strictly positive whole number.
///
/// An empty value counts as zero and is therefore rejected as not positive.
/// Decimal notation is accepted when it has no fractional part, e.g. "12.0".
pub(crate) fn positive_integer(value: &str) -> Result<i64, &'static str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AMOUNT_NOT_POSITIVE);
    }

    if let Ok(integer) = value.parse::<i64>() {
        return if integer > 0 {
            Ok(integer)
        } else {
            Err(AMOUNT_NOT_POSITIVE)
        };
    }

    let number: f64 = value.parse().map_err(|_| AMOUNT_NOT_A_NUMBER)?;

    if !number.is_finite() {
        return Err(AMOUNT_NOT_A_NUMBER);
    }

    if number.fract() != 0.0 {
        return Err(AMOUNT_NOT_WHOLE);
    }

    if number <= 0.0 {
        return Err(AMOUNT_NOT_POSITIVE);
    }

    if number >= i64::MAX as f64 {
        return Err(AMOUNT_NOT_A_NUMBER);
    }

    Ok(number as i64)
}

/// Coerce `value` to a calendar date.
///
/// Accepts the `YYYY-MM-DD` format sent by HTML date inputs, or an RFC 3339
/// date-time whose date part is used as is.
///
/// Years before 1 are rejected. Dates are stored as ISO 8601 text and sorted
/// as text, which is only chronological for unsigned four digit years.
pub(crate) fn calendar_date(value: &str) -> Result<Date, &'static str> {
    let value = value.trim();

    let date = Date::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| OffsetDateTime::parse(value, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| DATE_INVALID)?;

    if date.year() < 1 {
        return Err(DATE_INVALID);
    }

    Ok(date)
}
