//! Partial birthday assembly from optional provider date fields.
//!
//! Providers ship birthday parts as loose numbers or strings, and frequently
//! omit the year (or everything). [`DateField`] makes the numeric-or-string
//! shape explicit at the boundary, and [`birthday`] keeps the three-way
//! distinction between a full date, a year-less date, and insufficient data.

/// A raw day, month, or year value as received from a provider.
///
/// Coercion is lenient in the way scripting-language integer casts are:
/// leading whitespace and sign are accepted, leading digits are parsed, and
/// anything else coerces to `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateField {
    /// An already-numeric field.
    Number(i64),
    /// A textual field, coerced on demand.
    Text(String),
}

impl DateField {
    /// Coerces the field to an integer.
    pub fn to_i64(&self) -> i64 {
        match self {
            DateField::Number(n) => *n,
            DateField::Text(text) => lenient_int(text),
        }
    }
}

impl From<i64> for DateField {
    fn from(value: i64) -> Self {
        DateField::Number(value)
    }
}

impl From<i32> for DateField {
    fn from(value: i32) -> Self {
        DateField::Number(i64::from(value))
    }
}

impl From<&str> for DateField {
    fn from(value: &str) -> Self {
        DateField::Text(value.to_string())
    }
}

impl From<String> for DateField {
    fn from(value: String) -> Self {
        DateField::Text(value)
    }
}

/// A contact's birthday, possibly without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday {
    /// Day of month.
    pub day: i64,
    /// Month of year.
    pub month: i64,
    /// Year, absent when the provider withheld it.
    pub year: Option<i64>,
}

/// Assembles a [`Birthday`] from optional day/month/year fields.
///
/// Day and month are both required; year may independently be absent. A year
/// alone (or any input missing day or month) is insufficient and yields
/// `None`.
pub fn birthday(
    day: Option<DateField>,
    month: Option<DateField>,
    year: Option<DateField>,
) -> Option<Birthday> {
    let day = day?.to_i64();
    let month = month?.to_i64();
    Some(Birthday {
        day,
        month,
        year: year.map(|y| y.to_i64()),
    })
}

// Leading-digits integer coercion: skip leading whitespace, accept one sign,
// parse the run of digits that follows, fall back to 0.
fn lenient_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    };
    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}
