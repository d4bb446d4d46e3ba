//! Static site output: renders every route to a file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_core::{project_path, ContentSource, Loadable};
use folio_engine::{page_file_name, AtomicFileWriter, PersistError};
use folio_logging::{folio_info, folio_warn};
use thiserror::Error;

use super::app::PageShell;

pub const NOT_FOUND_FILE: &str = "404.html";
/// Address used to render the generic not-found page.
const NOT_FOUND_ADDRESS: &str = "/404";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{0} did not settle in time")]
    Timeout(String),
    #[error("could not load {document}: {message}")]
    Content {
        document: &'static str,
        message: String,
    },
    #[error("no output file for {0}")]
    UnmappablePath(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Visits the root page, every project page and the not-found page, writing
/// each rendering under `output_dir`. Returns the written files.
pub fn build_site(
    shell: &mut PageShell,
    output_dir: &Path,
    limit: Duration,
) -> Result<Vec<PathBuf>, PublishError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let mut written = Vec::new();

    render_route(shell, "/", limit)?;
    if let Loadable::Failed(message) = shell.state().projects() {
        return Err(PublishError::Content {
            document: ContentSource::Projects.file_name(),
            message: message.clone(),
        });
    }
    let index = page_file_name("/").ok_or_else(|| PublishError::UnmappablePath("/".to_string()))?;
    written.push(writer.write(&index, shell.html())?);

    let slugs: Vec<String> = shell
        .state()
        .projects()
        .items()
        .iter()
        .map(|project| project.slug())
        .collect();
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug.clone()) {
            folio_warn!("skipping duplicate project page {:?}", slug);
            continue;
        }
        let path = project_path(&slug);
        let Some(file) = page_file_name(&path) else {
            folio_warn!("skipping project page {:?}: no output file for its slug", path);
            continue;
        };
        render_route(shell, &path, limit)?;
        written.push(writer.write(&file, shell.html())?);
    }

    render_route(shell, NOT_FOUND_ADDRESS, limit)?;
    written.push(writer.write(Path::new(NOT_FOUND_FILE), shell.html())?);

    folio_info!("wrote {} pages to {:?}", written.len(), output_dir);
    Ok(written)
}

fn render_route(shell: &mut PageShell, path: &str, limit: Duration) -> Result<(), PublishError> {
    shell.visit(path);
    if shell.run_until_idle(limit) {
        Ok(())
    } else {
        Err(PublishError::Timeout(path.to_string()))
    }
}
