//! Where resume section text comes from.
//!
//! Handlers go through `SourceProvider` so tests can substitute in-memory text.
//! `FsSourceProvider` reads `<dir>/<section>.tex`.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeSection {
    Experience,
    Skills,
    Certificates,
    Education,
}

impl ResumeSection {
    /// Stable identifier, also the file stem.
    pub fn id(&self) -> &'static str {
        match self {
            ResumeSection::Experience => "experience",
            ResumeSection::Skills => "skills",
            ResumeSection::Certificates => "certificates",
            ResumeSection::Education => "education",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.tex", self.id())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {section} source at {}: {source}", .path.display())]
    Io {
        section: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch(&self, section: ResumeSection) -> Result<String, SourceError>;
}

#[derive(Debug, Clone)]
pub struct FsSourceProvider {
    dir: PathBuf,
}

impl FsSourceProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, section: ResumeSection) -> PathBuf {
        self.dir.join(section.file_name())
    }
}

#[async_trait]
impl SourceProvider for FsSourceProvider {
    async fn fetch(&self, section: ResumeSection) -> Result<String, SourceError> {
        let path = self.path_for(section);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                section: section.id(),
                path,
                source,
            })
    }
}

/// Fetches a section, treating any failure as an empty section.
pub async fn load_or_empty(provider: &dyn SourceProvider, section: ResumeSection) -> String {
    match provider.fetch(section).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Using empty {} section: {e}", section.id());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_section_file_names() {
        let names: Vec<_> = [
            ResumeSection::Experience,
            ResumeSection::Skills,
            ResumeSection::Certificates,
            ResumeSection::Education,
        ]
        .iter()
        .map(|s| s.file_name())
        .collect();
        assert_eq!(
            names,
            vec!["experience.tex", "skills.tex", "certificates.tex", "education.tex"]
        );
    }

    #[tokio::test]
    async fn test_fs_provider_reads_section_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("skills.tex")).unwrap();
        writeln!(file, "\\cvskill").unwrap();

        let provider = FsSourceProvider::new(dir.path());
        let text = provider.fetch(ResumeSection::Skills).await.unwrap();
        assert!(text.contains("\\cvskill"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsSourceProvider::new(dir.path());
        let err = provider.fetch(ResumeSection::Education).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { section: "education", .. }));
    }

    #[tokio::test]
    async fn test_load_or_empty_swallows_failure() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsSourceProvider::new(dir.path());
        assert_eq!(load_or_empty(&provider, ResumeSection::Experience).await, "");
    }
}
