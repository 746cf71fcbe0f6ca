use crate::domain::types::{NewProfileFields, ProfileFields, ProfilePatch};
use crate::error::ApiError;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const NAME_MAX_LEN: usize = 50;
pub const BIO_MAX_LEN: usize = 500;
pub const LOCATION_MAX_LEN: usize = 100;
pub const GITHUB_MAX_LEN: usize = 100;
pub const LINKEDIN_MAX_LEN: usize = 100;

/// Every password-policy rule the password breaks, in a fixed order.
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        violations.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one number");
    }
    violations
}

pub fn check_password(password: &str) -> Result<(), ApiError> {
    into_result(password_violations(password))
}

/// Validate fields for a new profile. Empty optional strings are stored as absent.
pub fn validate_new_profile(fields: ProfileFields) -> Result<NewProfileFields, ApiError> {
    let mut violations = Vec::new();

    let first_name = fields.first_name.unwrap_or_default();
    if first_name.is_empty() {
        violations.push("First name is required");
    } else if too_long(&first_name, NAME_MAX_LEN) {
        violations.push("First name too long");
    }
    let last_name = fields.last_name.unwrap_or_default();
    if last_name.is_empty() {
        violations.push("Last name is required");
    } else if too_long(&last_name, NAME_MAX_LEN) {
        violations.push("Last name too long");
    }

    let bio = non_empty(fields.bio);
    let location = non_empty(fields.location);
    let github = non_empty(fields.github);
    let linkedin = non_empty(fields.linkedin);
    check_optional_lengths(
        &mut violations,
        bio.as_deref(),
        location.as_deref(),
        github.as_deref(),
        linkedin.as_deref(),
    );

    into_result(violations)?;
    Ok(NewProfileFields {
        first_name,
        last_name,
        bio,
        location,
        website: non_empty(fields.website),
        github,
        linkedin,
        skills: fields.skills.unwrap_or_default(),
        avatar: non_empty(fields.avatar),
    })
}

/// Validate a sparse update. Absent and empty strings are dropped from the patch;
/// `skills` is kept whenever it was sent.
pub fn validate_patch(fields: ProfileFields) -> Result<ProfilePatch, ApiError> {
    let patch = ProfilePatch {
        first_name: non_empty(fields.first_name),
        last_name: non_empty(fields.last_name),
        bio: non_empty(fields.bio),
        location: non_empty(fields.location),
        website: non_empty(fields.website),
        github: non_empty(fields.github),
        linkedin: non_empty(fields.linkedin),
        skills: fields.skills,
        avatar: non_empty(fields.avatar),
    };

    let mut violations = Vec::new();
    if patch
        .first_name
        .as_deref()
        .is_some_and(|v| too_long(v, NAME_MAX_LEN))
    {
        violations.push("First name too long");
    }
    if patch
        .last_name
        .as_deref()
        .is_some_and(|v| too_long(v, NAME_MAX_LEN))
    {
        violations.push("Last name too long");
    }
    check_optional_lengths(
        &mut violations,
        patch.bio.as_deref(),
        patch.location.as_deref(),
        patch.github.as_deref(),
        patch.linkedin.as_deref(),
    );

    into_result(violations)?;
    Ok(patch)
}

fn check_optional_lengths(
    violations: &mut Vec<&'static str>,
    bio: Option<&str>,
    location: Option<&str>,
    github: Option<&str>,
    linkedin: Option<&str>,
) {
    let rules = [
        (bio, BIO_MAX_LEN, "Bio too long"),
        (location, LOCATION_MAX_LEN, "Location too long"),
        (github, GITHUB_MAX_LEN, "GitHub username too long"),
        (linkedin, LINKEDIN_MAX_LEN, "LinkedIn profile too long"),
    ];
    for (value, max, message) in rules {
        if value.is_some_and(|v| too_long(v, max)) {
            violations.push(message);
        }
    }
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn into_result(violations: Vec<&'static str>) -> Result<(), ApiError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations.join(", ")))
    }
}
