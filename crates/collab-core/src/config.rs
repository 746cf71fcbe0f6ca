/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; every field that a service can run
/// without should be an `Option` or carry a `#[serde(default)]`, so that a
/// missing variable is reported by the service instead of aborting startup.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit list of `(name, value)` pairs. Used by tests.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}

/// Read a required value, naming the variable when it is absent or blank.
pub fn require<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, MissingVar> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MissingVar(name)),
    }
}

/// A required environment variable that was not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingVar(pub &'static str);
