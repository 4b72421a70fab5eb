//! Publish-time validation for new entries

use crate::error::{CoreError, CoreResult};
use crate::types::NewEntry;

/// Check the creation invariant and normalize a publish payload.
///
/// The website label must be non-blank, and at least one of a non-empty
/// cookie set or a non-blank username/password must be present. Website and
/// credentials are trimmed; blank credentials are dropped entirely.
pub fn validate_new_entry(new: NewEntry) -> CoreResult<NewEntry> {
    let website = validate_website(&new.website)?;

    let username = new
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ToString::to_string);
    let password = new
        .password
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string);

    if new.cookies.is_empty() && username.is_none() && password.is_none() {
        return Err(CoreError::validation(
            "Either cookies or username/password is required",
        ));
    }

    Ok(NewEntry {
        website,
        cookies: new.cookies,
        username,
        password,
    })
}

/// Trim the website label; a blank label is rejected.
///
/// Split out so callers can check the label before touching the rest of
/// the payload; it is the first rung of the validation ladder.
pub fn validate_website(website: &str) -> CoreResult<String> {
    let website = website.trim();
    if website.is_empty() {
        return Err(CoreError::validation("Website name is required"));
    }
    Ok(website.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cookie;

    #[test]
    fn website_label_is_trimmed() {
        assert_eq!(validate_website("  Netflix ").unwrap(), "Netflix");
        let err = validate_website("   ").unwrap_err();
        assert_eq!(err.to_string(), "Website name is required");
    }

    #[test]
    fn blank_website_is_rejected() {
        let result = validate_new_entry(NewEntry {
            website: "   ".to_string(),
            cookies: vec![Cookie::new("a", "b")],
            username: None,
            password: None,
        });
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn website_alone_is_not_enough() {
        let result = validate_new_entry(NewEntry {
            website: "X".to_string(),
            cookies: vec![],
            username: Some("  ".to_string()),
            password: None,
        });
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either cookies or username/password is required"
        );
    }

    #[test]
    fn cookies_satisfy_the_invariant() {
        let validated = validate_new_entry(NewEntry {
            website: " Netflix ".to_string(),
            cookies: vec![Cookie::new("NetflixId", "v")],
            username: None,
            password: None,
        })
        .unwrap();
        assert_eq!(validated.website, "Netflix");
        assert!(validated.username.is_none());
    }

    #[test]
    fn lone_password_satisfies_the_invariant() {
        let validated = validate_new_entry(NewEntry {
            website: "HBO".to_string(),
            cookies: vec![],
            username: None,
            password: Some(" hunter2 ".to_string()),
        })
        .unwrap();
        assert_eq!(validated.password.as_deref(), Some("hunter2"));
    }
}
