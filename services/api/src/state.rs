use crate::infra::password::BcryptHasher;
use crate::infra::session::SessionSigner;
use crate::infra::store::Store;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub hasher: BcryptHasher,
    pub sessions: SessionSigner,
}
