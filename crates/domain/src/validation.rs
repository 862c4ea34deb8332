use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Error, FieldError};

/// Ten-digit Indian mobile number, optionally prefixed with +91
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+91[\-\s]?)?[6-9]\d{9}$").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone.trim())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Collects field errors so a form reports every problem at once
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(FieldError::new(field, "This field is required"));
        }
        self
    }

    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(FieldError::new(field, "This field is required"));
        } else if !is_valid_phone(value) {
            self.0.push(FieldError::new(field, "Enter a valid 10-digit mobile number"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(FieldError::new(field, "This field is required"));
        } else if !is_valid_email(value) {
            self.0.push(FieldError::new(field, "Enter a valid email address"));
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.0.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidFields(std::mem::take(&mut self.0)))
        }
    }
}
