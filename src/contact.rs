use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long the simulated submission takes before reporting success.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a message")]
    MissingMessage,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::MissingName => Field::Name,
            Self::InvalidEmail => Field::Email,
            Self::MissingMessage => Field::Message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn validate_field(&self, field: Field) -> Result<(), FieldError> {
        match field {
            Field::Name if self.name.trim().is_empty() => Err(FieldError::MissingName),
            Field::Email if !is_valid_email(&self.email) => Err(FieldError::InvalidEmail),
            Field::Message if self.message.trim().is_empty() => Err(FieldError::MissingMessage),
            _ => Ok(()),
        }
    }

    /// Checks every field, reporting all failures in field order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors = Field::ALL
            .iter()
            .filter_map(|f| self.validate_field(*f).err())
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Editing,
    Sending,
    Sent,
}

impl SubmitState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Sending)
    }
}
