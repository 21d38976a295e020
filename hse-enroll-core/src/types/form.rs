//! Registration form types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hse_enroll_api::{RegistrationAck, RegistrationRequest};

use crate::error::CoreError;

/// Registration form fields.
///
/// Serialized with the camelCase keys the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Surname,
    Name,
    /// Optional
    Patronymic,
    Email,
    ProgramId,
    YearAdmission,
    Group,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 7] = [
        Self::Surname,
        Self::Name,
        Self::Patronymic,
        Self::Email,
        Self::ProgramId,
        Self::YearAdmission,
        Self::Group,
    ];

    /// Wire/storage key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Surname => "surname",
            Self::Name => "name",
            Self::Patronymic => "patronymic",
            Self::Email => "email",
            Self::ProgramId => "programId",
            Self::YearAdmission => "yearAdmission",
            Self::Group => "group",
        }
    }

    /// Everything except patronymic must be filled in.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Patronymic)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// Current field values, as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<FormField, String>,
}

impl FormState {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field; untouched fields read as empty.
    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Registration payload carrying every field exactly as entered.
    pub fn to_registration_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            surname: self.get(FormField::Surname).to_string(),
            name: self.get(FormField::Name).to_string(),
            patronymic: self.get(FormField::Patronymic).to_string(),
            email: self.get(FormField::Email).to_string(),
            program_id: self.get(FormField::ProgramId).to_string(),
            year_admission: self.get(FormField::YearAdmission).to_string(),
            group: self.get(FormField::Group).to_string(),
        }
    }
}

/// Validity of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum FieldValidity {
    /// Not validated since the last change (or never touched).
    Unvalidated,
    Valid,
    /// Invalid, with a reason to show under the field.
    Invalid(String),
    /// Email only: availability check in flight.
    Pending,
}

impl FieldValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Reason to display, if invalid.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Invalid(reason) => Some(reason),
            _ => None,
        }
    }
}

static UNVALIDATED: FieldValidity = FieldValidity::Unvalidated;

/// Registration submission progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "camelCase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    /// Backend accepted the registration.
    Succeeded(RegistrationAck),
    /// Last attempt failed; retry is allowed.
    Failed(String),
}

impl SubmissionState {
    /// `submit()` may start from here.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed(_))
    }
}

/// Immutable result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSnapshot {
    fields: BTreeMap<FormField, FieldValidity>,
    is_submittable: bool,
    submission: SubmissionState,
}

impl ValidationSnapshot {
    /// Build a snapshot; submittability is derived from `fields`.
    pub fn new(fields: BTreeMap<FormField, FieldValidity>, submission: SubmissionState) -> Self {
        let is_submittable = FormField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .all(|field| fields.get(&field).is_some_and(FieldValidity::is_valid));
        Self {
            fields,
            is_submittable,
            submission,
        }
    }

    /// Validity of a field (`Unvalidated` when absent).
    pub fn validity(&self, field: FormField) -> &FieldValidity {
        self.fields.get(&field).unwrap_or(&UNVALIDATED)
    }

    /// All field validities, in field order.
    pub fn fields(&self) -> &BTreeMap<FormField, FieldValidity> {
        &self.fields
    }

    /// True iff every required field is `Valid`.
    pub fn is_submittable(&self) -> bool {
        self.is_submittable
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// Inline error messages, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.fields
            .iter()
            .filter_map(|(field, validity)| validity.reason().map(|reason| (*field, reason)))
    }

    /// Whether the availability check for the email is still running.
    pub fn is_email_pending(&self) -> bool {
        matches!(self.validity(FormField::Email), FieldValidity::Pending)
    }
}
