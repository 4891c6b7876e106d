pub mod applications;
pub mod auth;
pub mod companies;
pub mod events;
pub mod health;
pub mod jobs;
pub mod questions;
pub mod statuses;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::require_token_auth, AppState};

/// Builds the full route table. Everything except registration, login and the
/// health probe sits behind token authentication.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/api-token-auth", post(auth::obtain_token));

    let protected = Router::new()
        .route("/candidates/me", get(auth::me))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route("/statuses", get(statuses::list_statuses))
        .route("/statuses/:id", get(statuses::get_status))
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/:id",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/questions/:id",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/applications/:id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route_layer(from_fn_with_state(state.clone(), require_token_auth));

    public.merge(protected).with_state(state)
}
