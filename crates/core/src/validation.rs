//! Client-side validation run before any write reaches the store.
//!
//! Each check returns [`CoreError::Validation`] carrying the exact message
//! the view shows inline.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::EntityId;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const MSG_PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const MSG_PROJECT_TITLE_REQUIRED: &str = "Please enter a project title";
pub const MSG_TASK_FIELDS_REQUIRED: &str = "Please fill in all required fields";
pub const MSG_COMMENT_REQUIRED: &str = "Please enter a comment";
pub const MSG_GENERATION_TITLE_REQUIRED: &str = "Please enter a task title first";

fn invalid(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_blank(email) {
        return Err(invalid("Please enter your email"));
    }
    if !email.trim().to_string().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(MSG_PASSWORD_TOO_SHORT));
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(invalid(MSG_PASSWORDS_DIFFER));
    }
    Ok(())
}

/// Full signup form check: email, then length, then confirmation.
pub fn validate_signup(email: &str, password: &str, confirmation: &str) -> Result<(), CoreError> {
    validate_email(email)?;
    validate_password(password)?;
    validate_password_confirmation(password, confirmation)
}

pub fn validate_project_title(title: &str) -> Result<(), CoreError> {
    if is_blank(title) {
        return Err(invalid(MSG_PROJECT_TITLE_REQUIRED));
    }
    Ok(())
}

/// A task needs a title, a project and an assignee.
pub fn validate_task_fields(
    title: &str,
    project_id: Option<EntityId>,
    assignee_id: Option<EntityId>,
) -> Result<(), CoreError> {
    if is_blank(title) || project_id.is_none() || assignee_id.is_none() {
        return Err(invalid(MSG_TASK_FIELDS_REQUIRED));
    }
    Ok(())
}

pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    if is_blank(body) {
        return Err(invalid(MSG_COMMENT_REQUIRED));
    }
    Ok(())
}

/// Title check performed before asking the generator for a description.
pub fn validate_generation_title(title: &str) -> Result<(), CoreError> {
    if is_blank(title) {
        return Err(invalid(MSG_GENERATION_TITLE_REQUIRED));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn message(result: Result<(), CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn five_character_password_is_rejected() {
        assert_eq!(message(validate_password("abcde")), MSG_PASSWORD_TOO_SHORT);
        assert!(validate_password("abcdef").is_ok());
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        assert!(validate_password("ääääää").is_ok());
        assert!(validate_password("äääää").is_err());
    }

    #[test]
    fn signup_checks_length_before_confirmation() {
        let msg = message(validate_signup("a@example.com", "abc", "xyz"));
        assert_eq!(msg, MSG_PASSWORD_TOO_SHORT);

        let msg = message(validate_signup("a@example.com", "abcdef", "abcdeg"));
        assert_eq!(msg, MSG_PASSWORDS_DIFFER);

        assert!(validate_signup("a@example.com", "abcdef", "abcdef").is_ok());
    }

    #[test]
    fn signup_rejects_malformed_email() {
        assert_matches!(
            validate_signup("not-an-email", "abcdef", "abcdef"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn task_requires_project_and_assignee() {
        let id = Some(EntityId::new_v4());
        assert_eq!(
            message(validate_task_fields("Write README", None, id)),
            MSG_TASK_FIELDS_REQUIRED
        );
        assert_eq!(
            message(validate_task_fields("Write README", id, None)),
            MSG_TASK_FIELDS_REQUIRED
        );
        assert_eq!(message(validate_task_fields("  ", id, id)), MSG_TASK_FIELDS_REQUIRED);
        assert!(validate_task_fields("Write README", id, id).is_ok());
    }

    #[test]
    fn blank_comment_and_titles_are_rejected() {
        assert_eq!(message(validate_comment_body(" \n")), MSG_COMMENT_REQUIRED);
        assert_eq!(message(validate_project_title("")), MSG_PROJECT_TITLE_REQUIRED);
        assert_eq!(
            message(validate_generation_title("   ")),
            MSG_GENERATION_TITLE_REQUIRED
        );
    }
}
