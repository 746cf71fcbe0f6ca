mod auth_test;
mod config_test;
mod helpers;
mod profile_test;
mod project_test;
mod search_test;
