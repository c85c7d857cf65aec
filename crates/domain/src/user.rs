//! Signup form rules applied by the caller before registration.
//!
//! The credential resolver only requires non-empty fields; these rules are
//! the stricter checks the signup screen runs first.

use safacycle_core::{AppError, AppResult, Role};

/// Minimum number of characters accepted for a new password.
const PASSWORD_MIN_LENGTH: usize = 6;

/// Minimum number of characters accepted for a phone number.
const PHONE_NUMBER_MIN_LENGTH: usize = 10;

/// Raw input collected by the signup screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Display name.
    pub name: String,
    /// Email used as the account key.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Requested role.
    pub role: Role,
}

impl SignupForm {
    /// Validates the form, returning the first rule it breaks.
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.phone_number,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(AppError::Validation("Please fill all fields".to_owned()));
        }

        if self.password != self.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_owned()));
        }

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters long"
            )));
        }

        if self.phone_number.chars().count() < PHONE_NUMBER_MIN_LENGTH {
            return Err(AppError::Validation(
                "Please enter a valid phone number".to_owned(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Alice".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "pw12345".to_owned(),
            confirm_password: "pw12345".to_owned(),
            phone_number: "0712345678".to_owned(),
            role: Role::Driver,
        }
    }

    #[test]
    fn valid_form_is_accepted() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn missing_name_is_rejected() {
        let form = SignupForm {
            name: String::new(),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let form = SignupForm {
            confirm_password: "pw12346".to_owned(),
            ..valid_form()
        };
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation(message)) if message == "Passwords do not match"
        ));
    }

    #[test]
    fn short_phone_number_is_rejected() {
        let form = SignupForm {
            phone_number: "071234".to_owned(),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    proptest! {
        #[test]
        fn short_passwords_are_always_rejected(password in "[a-z0-9]{1,5}") {
            let form = SignupForm {
                password: password.clone(),
                confirm_password: password,
                ..valid_form()
            };
            prop_assert!(form.validate().is_err());
        }

        #[test]
        fn long_enough_matching_passwords_are_accepted(password in "[a-zA-Z0-9]{6,32}") {
            let form = SignupForm {
                password: password.clone(),
                confirm_password: password,
                ..valid_form()
            };
            prop_assert!(form.validate().is_ok());
        }
    }
}
