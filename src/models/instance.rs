//! Book instance (physical copy) model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use validator::{Validate, ValidationError};

use super::{
    book::BookTitle,
    form::{parse_calendar_date, sanitize_text, validate_optional_date, SubmittedForm},
};

/// Loan availability of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Maintenance,
        InstanceStatus::Available,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            _ => Err(format!("Invalid instance status: {}", s)),
        }
    }
}

// Stored as TEXT
impl sqlx::Type<Postgres> for InstanceStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for InstanceStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for InstanceStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Book instance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Instance with its parent book resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetails {
    pub id: i32,
    pub book: BookTitle,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl Instance {
    pub fn url(&self) -> String {
        format!("/instances/{}", self.id)
    }
}

impl InstanceDetails {
    pub fn url(&self) -> String {
        format!("/instances/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Mutable fields of an instance, as written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceData {
    pub book_id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Create / update instance form body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validate_book_reference")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub due_back: String,
}

fn validate_book_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<i32>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("book");
    err.message = Some("Invalid book".into());
    Err(err)
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<InstanceStatus>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("status");
    err.message = Some("Invalid status".into());
    Err(err)
}

impl SubmittedForm for InstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn sanitize(self) -> Self {
        Self {
            book: sanitize_text(&self.book),
            imprint: sanitize_text(&self.imprint),
            status: sanitize_text(&self.status),
            due_back: self.due_back.trim().to_string(),
        }
    }
}

impl InstanceForm {
    /// The selected book id, if the field holds one
    pub fn book_id(&self) -> Option<i32> {
        self.book.parse().ok()
    }

    /// Convert a sanitized form that passed validation
    pub fn to_data(&self) -> Option<InstanceData> {
        let status = if self.status.is_empty() {
            InstanceStatus::default()
        } else {
            self.status.parse().ok()?
        };
        let due_back = if self.due_back.is_empty() {
            None
        } else {
            Some(parse_calendar_date(&self.due_back)?)
        };

        Some(InstanceData {
            book_id: self.book_id()?,
            imprint: self.imprint.clone(),
            status,
            due_back,
        })
    }
}

impl From<&InstanceDetails> for InstanceForm {
    fn from(instance: &InstanceDetails) -> Self {
        Self {
            book: instance.book.id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Delete confirmation form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteInstanceForm {
    pub instance_id: Option<i32>,
}
