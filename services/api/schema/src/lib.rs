pub mod credentials;
pub mod identities;
pub mod profiles;
pub mod projects;
