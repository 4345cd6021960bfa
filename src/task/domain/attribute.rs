//! Typed task attributes and their comparison semantics.

use super::ParseAttributeTypeError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of attribute type tags supported by the task source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// Primary title text.
    Title,
    /// Free-form text.
    RichText,
    /// Optional number.
    Number,
    /// Single option from a fixed list.
    Select,
    /// Workflow status option.
    Status,
    /// Any number of options from a fixed list.
    MultiSelect,
    /// Date or date range.
    Date,
    /// Assigned people.
    People,
    /// Boolean flag.
    Checkbox,
    /// Web link.
    Url,
    /// Email address.
    Email,
    /// Phone number.
    PhoneNumber,
}

impl AttributeType {
    /// Every supported type tag, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Title,
        Self::RichText,
        Self::Number,
        Self::Select,
        Self::Status,
        Self::MultiSelect,
        Self::Date,
        Self::People,
        Self::Checkbox,
        Self::Url,
        Self::Email,
        Self::PhoneNumber,
    ];

    /// Returns the canonical tag used by the task source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Status => "status",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::People => "people",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
        }
    }
}

impl TryFrom<&str> for AttributeType {
    type Error = ParseAttributeTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseAttributeTypeError(value.to_owned()))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named option of a select, status or multi-select attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Option label.
    pub name: String,
    /// Display colour assigned by the source.
    #[serde(default)]
    pub color: String,
}

impl SelectOption {
    /// Creates an option with the default colour.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: "default".to_owned(),
        }
    }
}

/// Person referenced by a people attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name.
    pub name: String,
    /// Avatar image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Date attribute payload. Only `start` takes part in filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// ISO 8601 start date or instant.
    pub start: String,
    /// ISO 8601 end date or instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Attribute payload, tagged with its attribute type.
///
/// The payload shape follows the tag, so an attribute can never carry a
/// value of a different type than the one it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Title text.
    Title {
        /// Plain text of the title.
        #[serde(default)]
        title: String,
    },
    /// Free-form text.
    RichText {
        /// Plain text content.
        #[serde(default)]
        rich_text: String,
    },
    /// Optional number.
    Number {
        /// Numeric value.
        number: Option<f64>,
    },
    /// Single select.
    Select {
        /// Selected option.
        select: Option<SelectOption>,
    },
    /// Workflow status.
    Status {
        /// Current status option.
        status: Option<SelectOption>,
    },
    /// Multi select.
    MultiSelect {
        /// Selected options in source order.
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    /// Date or date range.
    Date {
        /// Date range.
        date: Option<DateRange>,
    },
    /// Assigned people.
    People {
        /// People in source order.
        #[serde(default)]
        people: Vec<Person>,
    },
    /// Boolean flag.
    Checkbox {
        /// Flag state.
        #[serde(default)]
        checkbox: bool,
    },
    /// Web link.
    Url {
        /// Link target.
        url: Option<String>,
    },
    /// Email address.
    Email {
        /// Address.
        email: Option<String>,
    },
    /// Phone number.
    PhoneNumber {
        /// Number as entered.
        phone_number: Option<String>,
    },
    /// Payload with a tag this crate does not recognise.
    #[serde(other)]
    Unknown,
}

impl AttributeValue {
    /// Returns the type tag, or `None` for unrecognised payloads.
    #[must_use]
    pub const fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            Self::Title { .. } => Some(AttributeType::Title),
            Self::RichText { .. } => Some(AttributeType::RichText),
            Self::Number { .. } => Some(AttributeType::Number),
            Self::Select { .. } => Some(AttributeType::Select),
            Self::Status { .. } => Some(AttributeType::Status),
            Self::MultiSelect { .. } => Some(AttributeType::MultiSelect),
            Self::Date { .. } => Some(AttributeType::Date),
            Self::People { .. } => Some(AttributeType::People),
            Self::Checkbox { .. } => Some(AttributeType::Checkbox),
            Self::Url { .. } => Some(AttributeType::Url),
            Self::Email { .. } => Some(AttributeType::Email),
            Self::PhoneNumber { .. } => Some(AttributeType::PhoneNumber),
            Self::Unknown => None,
        }
    }

    /// Reduces the payload to a primitive suitable for ordering and equality.
    #[must_use]
    pub fn comparable(&self) -> ComparableValue {
        match self {
            Self::Title { title: text } | Self::RichText { rich_text: text } => {
                ComparableValue::Text(text.clone())
            }
            Self::Number { number } => {
                number.map_or(ComparableValue::Null, ComparableValue::Number)
            }
            Self::Select { select: option } | Self::Status { status: option } => option
                .as_ref()
                .filter(|option| !option.name.is_empty())
                .map_or(ComparableValue::Null, |option| {
                    ComparableValue::Text(option.name.clone())
                }),
            Self::MultiSelect { multi_select } => ComparableValue::Text(join_names(
                multi_select.iter().map(|option| option.name.as_str()),
            )),
            Self::People { people } => {
                ComparableValue::Text(join_names(people.iter().map(|person| person.name.as_str())))
            }
            Self::Date { date } => date
                .as_ref()
                .filter(|range| !range.start.is_empty())
                .map_or(ComparableValue::Null, |range| {
                    ComparableValue::Date(range.start.clone())
                }),
            Self::Checkbox { checkbox } => ComparableValue::Bool(*checkbox),
            Self::Url { url: text }
            | Self::Email { email: text }
            | Self::PhoneNumber { phone_number: text } => text
                .clone()
                .map_or(ComparableValue::Null, ComparableValue::Text),
            Self::Unknown => ComparableValue::Null,
        }
    }

    /// Returns `true` when the payload is semantically absent.
    ///
    /// Checkboxes always hold a value and are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Title { title: text } | Self::RichText { rich_text: text } => text.is_empty(),
            Self::Url { url: text }
            | Self::Email { email: text }
            | Self::PhoneNumber { phone_number: text } => {
                text.as_deref().is_none_or(str::is_empty)
            }
            Self::Number { number } => number.is_none(),
            Self::Select { select: option } | Self::Status { status: option } => option.is_none(),
            Self::MultiSelect { multi_select } => multi_select.is_empty(),
            Self::People { people } => people.is_empty(),
            Self::Date { date } => date.is_none(),
            Self::Checkbox { .. } => false,
            Self::Unknown => true,
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// One named, typed field on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Source identifier of the attribute.
    pub id: String,
    /// Attribute name, unique within a task.
    pub name: String,
    /// Tagged payload.
    pub value: AttributeValue,
}

impl Attribute {
    /// Creates an attribute whose identifier equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            value,
        }
    }

    /// Returns the attribute type tag, or `None` for unrecognised payloads.
    #[must_use]
    pub const fn attribute_type(&self) -> Option<AttributeType> {
        self.value.attribute_type()
    }
}

/// Primitive projection of an attribute used for filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparableValue {
    /// Absent value; sorts before everything else.
    Null,
    /// Text, including joined multi-select and people names.
    Text(String),
    /// Number.
    Number(f64),
    /// Checkbox state.
    Bool(bool),
    /// ISO 8601 date or instant (the start of a date range).
    Date(String),
}

impl ComparableValue {
    /// Returns `true` for [`ComparableValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Coerces the value to a number. Only numbers and numeric text coerce.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => parse_number(text),
            Self::Null | Self::Bool(_) | Self::Date(_) => None,
        }
    }

    /// Coerces the value to an instant. Only dates and date-like text coerce.
    #[must_use]
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(text) | Self::Text(text) => parse_instant(text),
            Self::Null | Self::Number(_) | Self::Bool(_) => None,
        }
    }

    /// Returns the textual representation used by string operators and by
    /// mixed-type ordering. Null renders as an empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(text) | Self::Date(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

/// Parses trimmed text as a finite number.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Parses RFC 3339 instants, naive date-times (taken as UTC) and plain dates
/// (midnight UTC).
#[must_use]
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}
