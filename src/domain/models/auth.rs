//! Account forms submitted to the auth API.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Check both fields are filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(())
    }
}

/// Registration form as filled in by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest<'a> {
    pub username: &'a str,
    /// Account email.
    pub email: &'a str,
    /// Chosen password.
    pub password: &'a str,
}

impl Registration {
    /// Check fields in form order, reporting the first problem.
    pub fn validate(&self) -> Result<RegistrationRequest<'_>, ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.confirm_password.is_empty() {
            return Err(ValidationError::MissingPasswordConfirmation);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegistrationRequest {
            username: &self.username,
            email: &self.email,
            password: &self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Registration {
        Registration {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_registration_reports_first_missing_field() {
        let form = Registration::default();
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingUsername);

        let form = Registration {
            email: String::new(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingEmail);

        let form = Registration {
            confirm_password: String::new(),
            ..filled()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingPasswordConfirmation
        );
    }

    #[test]
    fn test_registration_password_mismatch() {
        let form = Registration {
            confirm_password: "hunter3".to_string(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::PasswordMismatch);
    }

    #[test]
    fn test_valid_registration_builds_request() {
        let form = filled();
        let request = form.validate().unwrap();
        assert_eq!(request.username, "ada");
        assert_eq!(request.email, "ada@example.com");
    }

    #[test]
    fn test_credentials_validation() {
        let creds = Credentials {
            email: " ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(creds.validate().unwrap_err(), ValidationError::MissingEmail);
    }
}
