//! Synchronous field rules

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FieldValidity, FormField, FormState};

pub const REQUIRED: &str = "field is required";
pub const EMAIL_DOMAIN: &str = "email must be an @edu.hse.ru address";
pub const EMAIL_TAKEN: &str = "email taken";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@edu\.hse\.ru$";

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Whether `value` is a university mailbox. Case-sensitive on the domain.
pub fn is_university_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Sync rule for one field.
///
/// An email that passes returns `Valid`; availability is checked separately.
pub fn validate_field(field: FormField, value: &str) -> FieldValidity {
    if !field.is_required() {
        return FieldValidity::Valid;
    }
    if value.trim().is_empty() {
        return FieldValidity::Invalid(REQUIRED.to_string());
    }
    if field == FormField::Email && !is_university_email(value) {
        return FieldValidity::Invalid(EMAIL_DOMAIN.to_string());
    }
    FieldValidity::Valid
}

/// Run every sync rule over `state`. Pure; no I/O.
pub fn validate_sync(state: &FormState) -> BTreeMap<FormField, FieldValidity> {
    FormField::ALL
        .into_iter()
        .map(|field| (field, validate_field(field, state.get(field))))
        .collect()
}
