//! Axum route handlers for resume data and the PDF download.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::models::{SkillCategory, TimelineItem};
use crate::resume::skills::parse_skills;
use crate::resume::source::{load_or_empty, ResumeSection};
use crate::resume::timeline::timeline_from_resume;
use crate::resume::{load_resume, ParsedResume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

async fn section_text(
    state: &AppState,
    section: ResumeSection,
) -> Result<Json<DataResponse<String>>, AppError> {
    let text = state.sources.fetch(section).await?;
    Ok(DataResponse::ok(text))
}

/// GET /api/resume-experience
pub async fn handle_experience_text(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<String>>, AppError> {
    section_text(&state, ResumeSection::Experience).await
}

/// GET /api/resume-skills
pub async fn handle_skills_text(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<String>>, AppError> {
    section_text(&state, ResumeSection::Skills).await
}

/// GET /api/resume-certificates
pub async fn handle_certificates_text(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<String>>, AppError> {
    section_text(&state, ResumeSection::Certificates).await
}

/// GET /api/resume-education
pub async fn handle_education_text(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<String>>, AppError> {
    section_text(&state, ResumeSection::Education).await
}

/// GET /api/resume/timeline
///
/// Re-parses every section on each call; missing sections contribute nothing.
pub async fn handle_timeline(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<TimelineItem>>> {
    let resume = load_resume(state.sources.as_ref()).await;
    let timeline = timeline_from_resume(
        &resume.experience,
        &resume.certificates,
        &resume.education,
        &state.timeline_copy,
    );
    DataResponse::ok(timeline)
}

/// GET /api/resume/skill-categories
pub async fn handle_skill_categories(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<SkillCategory>>> {
    let text = load_or_empty(state.sources.as_ref(), ResumeSection::Skills).await;
    DataResponse::ok(parse_skills(&text))
}

/// GET /api/resume/profile
pub async fn handle_profile(State(state): State<AppState>) -> Json<DataResponse<ParsedResume>> {
    DataResponse::ok(load_resume(state.sources.as_ref()).await)
}

/// GET /api/resume/download
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let pdf = state.compiler.compile().await?;
    info!("Serving compiled resume ({} bytes)", pdf.len());

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                state.config.resume_download_name
            ),
        ),
    ];
    Ok((headers, pdf).into_response())
}

/// GET /resume.pdf
pub async fn handle_static_pdf() -> Result<(), AppError> {
    Err(AppError::NotFound(
        "Resume file not found. Use /api/resume/download for dynamic generation.".to_string(),
    ))
}
