//! Registration form and its field-level validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::result::ValidationReason;

/// Date-of-birth format accepted at registration
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Age approximation: whole 365-day years, not calendar-aware
const DAYS_PER_YEAR: i64 = 365;

/// Raw registration input as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub username: String,
    pub pin: String,
    pub confirm_pin: String,
}

impl Registration {
    /// Trim every field in place
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.dob,
            &mut self.gender,
            &mut self.phone,
            &mut self.email,
            &mut self.username,
            &mut self.pin,
            &mut self.confirm_pin,
        ] {
            let t = field.trim();
            if t.len() != field.len() {
                *field = t.to_string();
            }
        }
        self
    }

    /// Run the input checks in order: presence, PIN confirmation, then age
    ///
    /// Returns the parsed date of birth. Username uniqueness needs the
    /// ledger and is checked by the caller.
    pub fn validate(&self, today: NaiveDate, minimum_age: u32) -> Result<NaiveDate, ValidationReason> {
        let fields = [
            ("name", &self.name),
            ("dob", &self.dob),
            ("gender", &self.gender),
            ("phone", &self.phone),
            ("email", &self.email),
            ("username", &self.username),
            ("pin", &self.pin),
            ("confirm_pin", &self.confirm_pin),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.is_empty()) {
            return Err(ValidationReason::MissingField(*field));
        }

        if self.pin != self.confirm_pin {
            return Err(ValidationReason::PinMismatch);
        }

        let dob = NaiveDate::parse_from_str(&self.dob, DOB_FORMAT)
            .map_err(|_| ValidationReason::InvalidDob)?;
        if age_in_years(dob, today) < i64::from(minimum_age) {
            return Err(ValidationReason::Underage { minimum: minimum_age });
        }

        Ok(dob)
    }
}

/// floor((today - dob) / 365 days); negative for future dates
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i64 {
    (today - dob).num_days().div_euclid(DAYS_PER_YEAR)
}
