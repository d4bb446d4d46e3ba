use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use folio_logging::{folio_debug, folio_warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::fetch::{ContentFetcher, ContentOrigin, FetchSettings};
use crate::launch::{LaunchError, Launcher};
use crate::submit::{ContactMessage, ContactSubmitter, ReqwestSubmitter, SubmitError};
use crate::{EngineEvent, FailureKind, FetchError, RequestId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub origin: ContentOrigin,
    pub fetch: FetchSettings,
    pub form_endpoint: Option<Url>,
    pub submit_timeout: Duration,
}

enum EngineCommand {
    Fetch {
        request: RequestId,
        document: String,
    },
    Submit {
        message: ContactMessage,
    },
    Launch {
        href: String,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: CancellationToken,
}

#[derive(Clone)]
struct Workers {
    fetcher: Arc<dyn ContentFetcher>,
    submitter: Arc<dyn ContactSubmitter>,
    launcher: Arc<dyn Launcher>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, launcher: Arc<dyn Launcher>) -> std::io::Result<Self> {
        let fetcher = config.origin.fetcher(config.fetch);
        let submitter = Arc::new(ReqwestSubmitter::new(
            config.form_endpoint,
            config.submit_timeout,
        ));
        Self::with_workers(fetcher, submitter, launcher)
    }

    /// Builds an engine around caller-supplied workers.
    pub fn with_workers(
        fetcher: Arc<dyn ContentFetcher>,
        submitter: Arc<dyn ContactSubmitter>,
        launcher: Arc<dyn Launcher>,
    ) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let runtime = tokio::runtime::Runtime::new()?;
        let workers = Workers {
            fetcher,
            submitter,
            launcher,
        };

        let token = cancel.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let workers = workers.clone();
                let event_tx = event_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    let on_cancel = cancelled_event(&command);
                    let event = tokio::select! {
                        _ = token.cancelled() => on_cancel,
                        event = handle_command(&workers, command) => event,
                    };
                    let _ = event_tx.send(event);
                });
            }
            runtime.shutdown_timeout(Duration::from_millis(100));
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            cancel,
        })
    }

    pub fn fetch(&self, request: RequestId, document: impl Into<String>) {
        self.send(EngineCommand::Fetch {
            request,
            document: document.into(),
        });
    }

    pub fn submit(&self, message: ContactMessage) {
        self.send(EngineCommand::Submit { message });
    }

    pub fn launch(&self, href: impl Into<String>) {
        self.send(EngineCommand::Launch { href: href.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Cancels in-flight work; each cancelled command still reports an event.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            folio_warn!("engine worker has stopped; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(workers: &Workers, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Fetch { request, document } => {
            folio_debug!("fetching {} for request {}", document, request);
            let result = workers.fetcher.fetch(&document).await;
            EngineEvent::ContentFetched {
                request,
                document,
                result,
            }
        }
        EngineCommand::Submit { message } => EngineEvent::ContactSubmitted {
            result: workers.submitter.submit(&message).await,
        },
        EngineCommand::Launch { href } => {
            let launcher = workers.launcher.clone();
            let target = href.clone();
            let joined = tokio::task::spawn_blocking(move || launcher.launch(&target)).await;
            let result = joined.unwrap_or_else(|err| {
                Err(LaunchError {
                    href: href.clone(),
                    reason: err.to_string(),
                })
            });
            EngineEvent::Launched { href, result }
        }
    }
}

fn cancelled_event(command: &EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Fetch { request, document } => EngineEvent::ContentFetched {
            request: *request,
            document: document.clone(),
            result: Err(FetchError::new(FailureKind::Cancelled, "engine shut down")),
        },
        EngineCommand::Submit { .. } => EngineEvent::ContactSubmitted {
            result: Err(SubmitError::Cancelled),
        },
        EngineCommand::Launch { href } => EngineEvent::Launched {
            href: href.clone(),
            result: Err(LaunchError {
                href: href.clone(),
                reason: "engine shut down".to_string(),
            }),
        },
    }
}
