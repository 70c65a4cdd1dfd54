use std::sync::Arc;

use crate::config::Config;
use crate::contact::Notifier;
use crate::rate_limit::RateLimiter;
use crate::render::DocumentCompiler;
use crate::resume::source::SourceProvider;
use crate::resume::timeline::TimelineCopy;

/// Shared application state injected into all route handlers via Axum extractors.
/// Collaborators sit behind trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sources: Arc<dyn SourceProvider>,
    pub compiler: Arc<dyn DocumentCompiler>,
    pub notifier: Arc<dyn Notifier>,
    /// Applied to every request by middleware.
    pub global_limiter: Arc<dyn RateLimiter>,
    /// Applied to contact form submissions only.
    pub contact_limiter: Arc<dyn RateLimiter>,
    pub timeline_copy: Arc<TimelineCopy>,
}
