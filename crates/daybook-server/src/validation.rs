//! Typed request schemas and their validation functions.
//!
//! Each schema is a plain struct with explicit field constraints,
//! checked by a dedicated function that itemizes every violation
//! rather than stopping at the first. All fields deserialize as
//! optional so that a missing field is reported as a validation error,
//! not a deserialization failure.
//!
//! This layer is independent of the credential hasher's strength
//! policy: both must pass.

use daybook_auth::service::{LoginInput, RegisterInput};
use serde::Deserialize;

const EMAIL_MAX_LENGTH: usize = 255;
const PASSWORD_MIN_LENGTH: usize = 12;
const PASSWORD_MAX_LENGTH: usize = 128;
const NAME_MAX_LENGTH: usize = 50;

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Defined for the password-change flow; no endpoint exposes it yet.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Structural email check: one `@`, non-empty local part, and a domain
/// with at least two non-empty dot-separated segments.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let segments: Vec<&str> = domain.split('.').collect();
    segments.len() >= 2 && segments.iter().all(|s| !s.is_empty())
}

/// The four-class complexity pattern: lowercase, uppercase, digit, and
/// one of the accepted special characters.
fn has_complexity(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// Normalize, validate, and itemize `email`; pushes messages into
/// `errors` and returns the normalized value when present.
fn check_email(email: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    match email {
        None => {
            errors.push("Email is required".into());
            None
        }
        Some(raw) => {
            let email = raw.trim().to_lowercase();
            if email.is_empty() {
                errors.push("Email is required".into());
                return None;
            }
            if email.chars().count() > EMAIL_MAX_LENGTH {
                errors.push("Email must be less than 255 characters".into());
            }
            if !is_valid_email(&email) {
                errors.push("Please provide a valid email address".into());
            }
            Some(email)
        }
    }
}

fn check_new_password(password: Option<&str>, errors: &mut Vec<String>, label: &str) {
    match password {
        None => errors.push(format!("{label} is required")),
        Some(password) => {
            if password.chars().count() < PASSWORD_MIN_LENGTH {
                errors.push(format!(
                    "{label} must be at least {PASSWORD_MIN_LENGTH} characters long"
                ));
            }
            if password.chars().count() > PASSWORD_MAX_LENGTH {
                errors.push(format!("{label} must be less than 128 characters"));
            }
            if !has_complexity(password) {
                errors.push(format!(
                    "{label} must contain uppercase, lowercase, number, and special character"
                ));
            }
        }
    }
}

fn check_name(name: Option<String>, errors: &mut Vec<String>, label: &str) -> Option<String> {
    let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(ref name) = name {
        if name.chars().count() > NAME_MAX_LENGTH {
            errors.push(format!("{label} must be less than 50 characters"));
        }
        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
        {
            errors.push(format!(
                "{label} can only contain letters, spaces, hyphens, and apostrophes"
            ));
        }
    }
    name
}

pub fn validate_register(request: RegisterRequest) -> Result<RegisterInput, Vec<String>> {
    let mut errors = Vec::new();

    let email = check_email(request.email, &mut errors);
    check_new_password(request.password.as_deref(), &mut errors, "Password");
    let first_name = check_name(request.first_name, &mut errors, "First name");
    let last_name = check_name(request.last_name, &mut errors, "Last name");

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RegisterInput {
        email: email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        first_name,
        last_name,
    })
}

pub fn validate_login(request: LoginRequest) -> Result<LoginInput, Vec<String>> {
    let mut errors = Vec::new();

    let email = check_email(request.email, &mut errors);

    match request.password.as_deref() {
        None => errors.push("Password is required".into()),
        Some(password) if password.chars().count() > PASSWORD_MAX_LENGTH => {
            errors.push("Invalid password format".into());
        }
        Some(_) => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LoginInput {
        email: email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
    })
}

pub fn validate_refresh(request: RefreshRequest) -> Result<String, Vec<String>> {
    match request.refresh_token.filter(|t| !t.is_empty()) {
        Some(token) => Ok(token),
        None => Err(vec!["Refresh token is required".into()]),
    }
}

/// Validated `(current, new)` password pair for the (not yet exposed)
/// password-change flow.
pub fn validate_change_password(
    request: ChangePasswordRequest,
) -> Result<(String, String), Vec<String>> {
    let mut errors = Vec::new();

    if request.current_password.is_none() {
        errors.push("Current password is required".into());
    }
    check_new_password(request.new_password.as_deref(), &mut errors, "New password");

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok((
        request.current_password.unwrap_or_default(),
        request.new_password.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn valid_register_passes() {
        let input = validate_register(register_request("a@b.com", "Abcdef123456!")).unwrap();
        assert_eq!(input.email, "a@b.com");
    }

    #[test]
    fn email_is_normalized() {
        let input = validate_register(register_request("  Alice@Example.COM ", "Abcdef123456!"))
            .unwrap();
        assert_eq!(input.email, "alice@example.com");
    }

    #[test]
    fn missing_fields_are_itemized_together() {
        let errors = validate_register(RegisterRequest::default()).unwrap_err();
        assert!(errors.iter().any(|e| e == "Email is required"));
        assert!(errors.iter().any(|e| e == "Password is required"));
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        let errors = validate_register(register_request("a@b", "Abcdef123456!")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("valid email")));
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = validate_register(register_request("a@b.com", "Ab1!")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least 12 characters")));
    }

    #[test]
    fn password_without_complexity_is_rejected() {
        let errors =
            validate_register(register_request("a@b.com", "abcdefghijklmnop")).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.contains("uppercase, lowercase, number, and special character"))
        );
    }

    #[test]
    fn name_constraints() {
        let mut request = register_request("a@b.com", "Abcdef123456!");
        request.first_name = Some("Jean-Luc O'Neil".into());
        assert!(validate_register(request).is_ok());

        let mut request = register_request("a@b.com", "Abcdef123456!");
        request.first_name = Some("Robert; DROP TABLE".into());
        let errors = validate_register(request).unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("First name")));
    }

    #[test]
    fn login_accepts_any_password_shape_within_bounds() {
        // Login must not re-apply the strength policy — existing users
        // may predate it.
        let input = validate_login(LoginRequest {
            email: Some("a@b.com".into()),
            password: Some("weak".into()),
        })
        .unwrap();
        assert_eq!(input.password, "weak");
    }

    #[test]
    fn login_oversized_password_is_rejected() {
        let errors = validate_login(LoginRequest {
            email: Some("a@b.com".into()),
            password: Some("x".repeat(200)),
        })
        .unwrap_err();
        assert!(errors.iter().any(|e| e == "Invalid password format"));
    }

    #[test]
    fn refresh_token_required() {
        let errors = validate_refresh(RefreshRequest::default()).unwrap_err();
        assert_eq!(errors, vec!["Refresh token is required".to_string()]);

        assert!(validate_refresh(RefreshRequest {
            refresh_token: Some("some.jwt.token".into()),
        })
        .is_ok());
    }

    #[test]
    fn change_password_schema_checks_both_fields() {
        let errors = validate_change_password(ChangePasswordRequest::default()).unwrap_err();
        assert!(errors.iter().any(|e| e == "Current password is required"));
        assert!(errors.iter().any(|e| e.starts_with("New password")));

        let ok = validate_change_password(ChangePasswordRequest {
            current_password: Some("old-password".into()),
            new_password: Some("Abcdef123456!".into()),
        });
        assert!(ok.is_ok());
    }
}
