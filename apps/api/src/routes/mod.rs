pub mod catalog;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::contact::handlers::handle_contact;
use crate::errors::AppError;
use crate::rate_limit::global_rate_limit;
use crate::resume::handlers;
use crate::state::AppState;

async fn not_found() -> Result<(), AppError> {
    Err(AppError::NotFound("Route not found".to_string()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/contact", post(handle_contact))
        .route("/api/projects", get(catalog::handle_projects))
        .route("/api/skills", get(catalog::handle_skills))
        .route(
            "/api/placeholder/:width/:height",
            get(catalog::handle_placeholder),
        )
        // Raw resume sections
        .route("/api/resume-experience", get(handlers::handle_experience_text))
        .route("/api/resume-skills", get(handlers::handle_skills_text))
        .route(
            "/api/resume-certificates",
            get(handlers::handle_certificates_text),
        )
        .route("/api/resume-education", get(handlers::handle_education_text))
        // Parsed resume
        .route("/api/resume/timeline", get(handlers::handle_timeline))
        .route(
            "/api/resume/skill-categories",
            get(handlers::handle_skill_categories),
        )
        .route("/api/resume/profile", get(handlers::handle_profile))
        .route("/api/resume/download", get(handlers::handle_download))
        .route("/resume.pdf", get(handlers::handle_static_pdf))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            global_rate_limit,
        ))
        .with_state(state)
}
