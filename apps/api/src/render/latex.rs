use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::render::{CompileError, DocumentCompiler};

const LOG_TAIL_LINES: usize = 20;

/// Compiles `<workdir>/<main_file>` with a LaTeX engine into a scratch directory
/// that is removed once the PDF has been read.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    args: Vec<String>,
    workdir: PathBuf,
    main_file: String,
    timeout: Duration,
}

impl LatexCompiler {
    /// `command` is the engine plus any leading arguments, e.g. `xelatex` or
    /// `latexmk -xelatex`.
    pub fn new(
        command: &str,
        workdir: impl Into<PathBuf>,
        main_file: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next().unwrap_or_else(|| "xelatex".to_string());
        Self {
            program,
            args: parts.collect(),
            workdir: workdir.into(),
            main_file: main_file.into(),
            timeout,
        }
    }

    fn pdf_name(&self) -> PathBuf {
        let stem = Path::new(&self.main_file)
            .file_stem()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("resume"));
        stem.with_extension("pdf")
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self) -> Result<Bytes, CompileError> {
        let out_dir = tempfile::tempdir()?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(format!("-output-directory={}", out_dir.path().display()))
            .arg(&self.main_file)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        info!(
            "Compiling {} in {} with {}",
            self.main_file,
            self.workdir.display(),
            self.program
        );

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                warn!("LaTeX compilation exceeded {:?}", self.timeout);
                return Err(CompileError::Timeout(self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            return Err(CompileError::Failed {
                status: output.status.to_string(),
                log_tail: log_tail(&output.stdout, LOG_TAIL_LINES),
            });
        }

        let pdf_path = out_dir.path().join(self.pdf_name());
        match tokio::fs::read(&pdf_path).await {
            Ok(pdf) => {
                debug!("Read {} bytes from {}", pdf.len(), pdf_path.display());
                Ok(Bytes::from(pdf))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompileError::MissingOutput),
            Err(e) => Err(e.into()),
        }
    }
}

/// Last `lines` non-blank lines of the compiler's stdout.
fn log_tail(stdout: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stdout);
    let tail: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .rev()
        .take(lines)
        .collect();
    tail.into_iter().rev().collect::<Vec<_>>().join("\n")
}
