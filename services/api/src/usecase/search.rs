use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::ApiError;

/// Queries shorter than this (after trimming) return nothing.
pub const MIN_QUERY_LEN: usize = 2;
/// How many stored profiles one search looks at.
pub const SEARCH_SCAN_LIMIT: u64 = 100;
pub const SEARCH_RESULT_LIMIT: usize = 10;

pub struct SearchUsersUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> SearchUsersUseCase<R> {
    /// Case-insensitive substring match over name, email, bio, location and skills.
    /// Results keep storage order; there is no ranking.
    pub async fn execute(&self, query: &str) -> Result<Vec<Profile>, ApiError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        let profiles = self.repo.scan_profiles(SEARCH_SCAN_LIMIT).await?;
        Ok(profiles
            .into_iter()
            .filter(|p| is_match(p, &needle))
            .take(SEARCH_RESULT_LIMIT)
            .collect())
    }
}

fn is_match(profile: &Profile, needle: &str) -> bool {
    let full_name = format!("{} {}", profile.first_name, profile.last_name);
    let skills = profile.skills.join(" ");
    [
        Some(full_name.as_str()),
        profile.email.as_deref(),
        profile.bio.as_deref(),
        profile.location.as_deref(),
        Some(skills.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}
