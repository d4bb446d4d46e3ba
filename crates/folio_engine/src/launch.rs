use std::sync::Mutex;

use folio_logging::folio_info;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not open {href}: {reason}")]
pub struct LaunchError {
    pub href: String,
    pub reason: String,
}

/// Hands a `mailto:` link or document URL to the desktop.
pub trait Launcher: Send + Sync {
    fn launch(&self, href: &str) -> Result<(), LaunchError>;
}

/// Opens links with the system's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, href: &str) -> Result<(), LaunchError> {
        webbrowser::open(href).map_err(|err| LaunchError {
            href: href.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Records links instead of opening them.
#[derive(Debug, Default)]
pub struct LogOnlyLauncher {
    launched: Mutex<Vec<String>>,
}

impl LogOnlyLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched
            .lock()
            .map(|links| links.clone())
            .unwrap_or_default()
    }
}

impl Launcher for LogOnlyLauncher {
    fn launch(&self, href: &str) -> Result<(), LaunchError> {
        folio_info!("would open {}", href);
        let mut links = self.launched.lock().map_err(|err| LaunchError {
            href: href.to_string(),
            reason: err.to_string(),
        })?;
        links.push(href.to_string());
        Ok(())
    }
}
