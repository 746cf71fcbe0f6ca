use chrono::{DateTime, Utc};

use collab_domain::id::{ProfileId, ProjectId, UserId};
use collab_domain::project::ProjectStatus;

/// A signed-up account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(email: String) -> Self {
        Self {
            id: UserId::generate(),
            email,
            created_at: Utc::now(),
        }
    }

    /// Part of the email before the first `@` (the whole email when there is none).
    pub fn email_local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

/// Stored password hash for an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_id: UserId,
    pub email: String,
    pub password_hash: String,
}

/// Display and collaboration details of one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// The profile every identity gets on signup or first signin: first name from the
    /// email's local part, empty last name.
    pub fn default_for(identity: &Identity) -> Self {
        Self {
            id: ProfileId::generate(),
            user_id: identity.id,
            first_name: identity.email_local_part().to_owned(),
            last_name: String::new(),
            email: Some(identity.email.clone()),
            bio: None,
            location: None,
            website: None,
            github: None,
            linkedin: None,
            skills: Vec::new(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    /// Build a profile from validated create fields.
    pub fn from_fields(user_id: UserId, email: Option<String>, fields: NewProfileFields) -> Self {
        Self {
            id: ProfileId::generate(),
            user_id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email,
            bio: fields.bio,
            location: fields.location,
            website: fields.website,
            github: fields.github,
            linkedin: fields.linkedin,
            skills: fields.skills,
            avatar: fields.avatar,
            created_at: Utc::now(),
        }
    }

    /// Apply a sparse update in place.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        fn set_opt(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }
        set(&mut self.first_name, &patch.first_name);
        set(&mut self.last_name, &patch.last_name);
        set_opt(&mut self.bio, &patch.bio);
        set_opt(&mut self.location, &patch.location);
        set_opt(&mut self.website, &patch.website);
        set_opt(&mut self.github, &patch.github);
        set_opt(&mut self.linkedin, &patch.linkedin);
        set(&mut self.skills, &patch.skills);
        set_opt(&mut self.avatar, &patch.avatar);
    }
}

/// Profile fields as they arrive from a client. Nothing is validated yet.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Option<Vec<String>>,
    pub avatar: Option<String>,
}

/// Validated fields for a new profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
}

/// Validated sparse update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Option<Vec<String>>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A project row exactly as stored. Older or hand-written rows may lack any of the
/// optional columns; [`ProjectRecord::normalize`] fills the gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub owner_profile_id: ProfileId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub max_members: Option<i32>,
    pub current_members: Option<i32>,
    pub repository_url: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    /// Coerce a stored row into a [`Project`]. A missing timestamp becomes `now`, an
    /// unknown status becomes planning, and a zero or missing member count becomes 1.
    pub fn normalize(self, now: DateTime<Utc>) -> Project {
        Project {
            id: self.id,
            owner_profile_id: self.owner_profile_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            max_members: self.max_members,
            current_members: self.current_members.filter(|n| *n != 0).unwrap_or(1),
            repository_url: self.repository_url,
            contact_info: self.contact_info.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// A project listing with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub owner_profile_id: ProfileId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub max_members: Option<i32>,
    pub current_members: i32,
    pub repository_url: Option<String>,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
}

/// A project joined with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListing {
    pub project: Project,
    pub author: String,
}

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Author line for a project: the owner's full name, else their email, else
/// [`UNKNOWN_AUTHOR`].
pub fn author_name(owner: Option<&Profile>) -> String {
    let Some(owner) = owner else {
        return UNKNOWN_AUTHOR.to_owned();
    };
    if !owner.first_name.is_empty() {
        return format!("{} {}", owner.first_name, owner.last_name)
            .trim()
            .to_owned();
    }
    match owner.email.as_deref() {
        Some(email) if !email.is_empty() => email.to_owned(),
        _ => UNKNOWN_AUTHOR.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn identity(email: &str) -> Identity {
        Identity {
            id: UserId::generate(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }

    fn record() -> ProjectRecord {
        ProjectRecord {
            id: ProjectId::generate(),
            owner_profile_id: ProfileId::generate(),
            title: "Rust CLI".into(),
            description: None,
            tags: None,
            status: None,
            max_members: None,
            current_members: None,
            repository_url: None,
            contact_info: None,
            created_at: None,
        }
    }

    #[test]
    fn should_build_default_profile_from_email_local_part() {
        let id = identity("jane.doe@example.com");
        let profile = Profile::default_for(&id);
        assert_eq!(profile.user_id, id.id);
        assert_eq!(profile.first_name, "jane.doe");
        assert_eq!(profile.last_name, "");
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
    }

    #[test]
    fn should_use_whole_email_when_no_at_sign() {
        assert_eq!(identity("nobody").email_local_part(), "nobody");
    }

    #[test]
    fn should_fill_defaults_when_normalizing_sparse_record() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let project = record().normalize(now);
        assert_eq!(project.description, "");
        assert!(project.tags.is_empty());
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.current_members, 1);
        assert_eq!(project.contact_info, "");
        assert_eq!(project.created_at, now);
        assert_eq!(project.max_members, None);
    }

    #[test]
    fn should_default_unknown_status_to_planning() {
        let mut rec = record();
        rec.status = Some("archived".into());
        assert_eq!(rec.normalize(Utc::now()).status, ProjectStatus::Planning);
    }

    #[test]
    fn should_keep_stored_values_when_present() {
        let created = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let mut rec = record();
        rec.status = Some("looking-for-members".into());
        rec.current_members = Some(3);
        rec.max_members = Some(5);
        rec.tags = Some(vec!["rust".into()]);
        rec.created_at = Some(created);
        let project = rec.normalize(Utc::now());
        assert_eq!(project.status, ProjectStatus::LookingForMembers);
        assert_eq!(project.current_members, 3);
        assert_eq!(project.max_members, Some(5));
        assert_eq!(project.tags, vec!["rust".to_owned()]);
        assert_eq!(project.created_at, created);
    }

    #[test]
    fn should_resolve_author_from_full_name() {
        let mut owner = Profile::default_for(&identity("ann@example.com"));
        owner.first_name = "Ann".into();
        owner.last_name = "Lee".into();
        assert_eq!(author_name(Some(&owner)), "Ann Lee");
    }

    #[test]
    fn should_trim_author_when_last_name_empty() {
        let owner = Profile::default_for(&identity("ann@example.com"));
        assert_eq!(author_name(Some(&owner)), "ann");
    }

    #[test]
    fn should_fall_back_to_email_then_unknown() {
        let mut owner = Profile::default_for(&identity("ann@example.com"));
        owner.first_name.clear();
        assert_eq!(author_name(Some(&owner)), "ann@example.com");
        owner.email = None;
        assert_eq!(author_name(Some(&owner)), UNKNOWN_AUTHOR);
        assert_eq!(author_name(None), UNKNOWN_AUTHOR);
    }

    #[test]
    fn should_apply_only_patched_fields() {
        let mut profile = Profile::default_for(&identity("ann@example.com"));
        profile.bio = Some("old bio".into());
        profile.apply(&ProfilePatch {
            last_name: Some("Smith".into()),
            skills: Some(vec!["go".into()]),
            ..Default::default()
        });
        assert_eq!(profile.first_name, "ann");
        assert_eq!(profile.last_name, "Smith");
        assert_eq!(profile.bio.as_deref(), Some("old bio"));
        assert_eq!(profile.skills, vec!["go".to_owned()]);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());
        assert!(
            !ProfilePatch {
                avatar: Some("a.png".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
