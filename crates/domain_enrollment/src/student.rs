//! Student entity

use chrono::{DateTime, Utc};
use core_kernel::StudentId;
use serde::{Deserialize, Serialize};

/// A person enrolled (or enrollable) in training sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all students
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a new student with a fresh time-ordered identifier
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: StudentId::new_v7(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches a phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Full display name, first name first
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Updates contact details, leaving unset fields untouched
    pub fn update_contact(&mut self, email: Option<String>, phone: Option<String>) {
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = Some(phone);
        }
        self.updated_at = Utc::now();
    }
}
