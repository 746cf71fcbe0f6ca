use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use collab_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::{session, signin, signup},
    health::{healthz, readyz},
    profile::{create_profile, get_profile, get_public_profile, update_profile},
    project::{create_project, get_project, list_projects},
    search::search_users,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/session", get(session))
        // Profiles
        .route(
            "/profile",
            get(get_profile).post(create_profile).put(update_profile),
        )
        .route("/profiles/{id}", get(get_public_profile))
        // Projects
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project))
        // Search
        .route("/users/search", get(search_users))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
