use regex::Regex;
use std::collections::BTreeMap;

use super::inquiry::InquiryForm;

/// Minimum length of an inquiry message, in characters after trimming
pub const MIN_MESSAGE_CHARS: usize = 10;

/// A failed field rule. `Display` is the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .0.noun())]
    Required(InquiryField),

    #[error("Please enter a valid email address")]
    InvalidEmail(InquiryField),

    #[error("{} must be at least {min} characters", .field.noun())]
    TooShort { field: InquiryField, min: usize },

    #[error("{} must be at most {max} characters", .field.noun())]
    TooLong { field: InquiryField, max: usize },
}

impl ValidationError {
    pub fn field(&self) -> InquiryField {
        match self {
            ValidationError::Required(field)
            | ValidationError::InvalidEmail(field)
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. } => *field,
        }
    }
}

/// Common validation functions
pub struct Validators;

impl Validators {
    /// Validate that a string is not empty after trimming
    pub fn not_empty(value: &str, field: InquiryField) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::Required(field))
        } else {
            Ok(())
        }
    }

    /// Validate the trimmed length in characters
    pub fn char_length(
        value: &str,
        field: InquiryField,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.trim().chars().count();

        if let Some(min) = min {
            if len < min {
                return Err(ValidationError::TooShort { field, min });
            }
        }

        if let Some(max) = max {
            if len > max {
                return Err(ValidationError::TooLong { field, max });
            }
        }

        Ok(())
    }

    /// Validate email format: `local@domain.tld`, no whitespace, at least
    /// one dot in the domain part
    pub fn email(value: &str, field: InquiryField) -> Result<(), ValidationError> {
        let valid = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .map(|email_regex| email_regex.is_match(value.trim()))
            .unwrap_or(false);

        if valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidEmail(field))
        }
    }
}

/// Fields of the inquiry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InquiryField {
    CollectorName,
    CollectorEmail,
    CollectorPhone,
    Message,
}

impl InquiryField {
    pub const ALL: [InquiryField; 4] = [
        InquiryField::CollectorName,
        InquiryField::CollectorEmail,
        InquiryField::CollectorPhone,
        InquiryField::Message,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryField::CollectorName => "collector_name",
            InquiryField::CollectorEmail => "collector_email",
            InquiryField::CollectorPhone => "collector_phone",
            InquiryField::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Short name used in error messages
    pub fn noun(&self) -> &'static str {
        match self {
            InquiryField::CollectorName => "Name",
            InquiryField::CollectorEmail => "Email",
            InquiryField::CollectorPhone => "Phone",
            InquiryField::Message => "Message",
        }
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            InquiryField::CollectorName => "Your Name",
            InquiryField::CollectorEmail => "Email Address",
            InquiryField::CollectorPhone => "Phone Number (Optional)",
            InquiryField::Message => "Message",
        }
    }
}

impl std::fmt::Display for InquiryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-field error messages; a field without an entry is valid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<InquiryField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: InquiryField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: InquiryField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: InquiryField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drop the error for one field, leaving the others untouched
    pub fn clear(&mut self, field: InquiryField) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InquiryField, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Check one inquiry field against its rules
pub fn check_field(field: InquiryField, value: &str) -> Result<(), ValidationError> {
    match field {
        InquiryField::CollectorName => Validators::not_empty(value, field),
        InquiryField::CollectorEmail => {
            Validators::not_empty(value, field)?;
            Validators::email(value, field)
        }
        InquiryField::Message => {
            Validators::not_empty(value, field)?;
            Validators::char_length(value, field, Some(MIN_MESSAGE_CHARS), None)
        }
        InquiryField::CollectorPhone => Ok(()),
    }
}

/// Validate a single inquiry field, returning the message to show under it
pub fn validate_field(field: InquiryField, value: &str) -> Option<String> {
    check_field(field, value).err().map(|error| error.to_string())
}

/// Validate every field of the inquiry form
pub fn validate_inquiry(form: &InquiryForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in InquiryField::ALL {
        if let Some(message) = validate_field(field, form.value(field)) {
            errors.insert(field, message);
        }
    }
    errors
}
