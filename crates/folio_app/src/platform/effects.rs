use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use folio_core::{decode_content, ContactFields, ContentSource, Effect, Msg, RequestId};
use folio_engine::{ContactMessage, EngineEvent, EngineHandle};
use folio_logging::{folio_debug, folio_info, folio_warn};

/// Executes the IO effects: content fetches, contact submission, external
/// links and timers. Engine completions come back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    requests: HashMap<RequestId, ContentSource>,
    in_flight: usize,
    timers: Arc<AtomicUsize>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            engine,
            msg_tx,
            requests: HashMap::new(),
            in_flight: 0,
            timers: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchContent { request, source } => {
                folio_info!("FetchContent request={} document={}", request, source.file_name());
                self.requests.insert(request, source);
                self.in_flight += 1;
                self.engine.fetch(request, source.file_name());
            }
            Effect::SubmitContact { fields } => {
                folio_info!("SubmitContact subject_len={}", fields.subject.len());
                self.in_flight += 1;
                self.engine.submit(contact_message(fields));
            }
            Effect::LaunchMailto { href } | Effect::OpenDocument { href } => {
                folio_info!("Launch {}", href);
                self.in_flight += 1;
                self.engine.launch(href);
            }
            Effect::Schedule { after, msg } => self.schedule(after, *msg),
            other => {
                folio_warn!("effect {:?} is handled by the page shell", other);
            }
        }
    }

    /// True when no engine work or timer is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.timers.load(Ordering::SeqCst) == 0
    }

    /// Converts finished engine work into messages.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if let Some(msg) = self.map_event(event) {
                msgs.push(msg);
            }
        }
        msgs
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn schedule(&self, after: Duration, msg: Msg) {
        let timers = self.timers.clone();
        let msg_tx = self.msg_tx.clone();
        timers.fetch_add(1, Ordering::SeqCst);
        thread::spawn(move || {
            thread::sleep(after);
            let _ = msg_tx.send(msg);
            timers.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn map_event(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::ContentFetched {
                request,
                document,
                result,
            } => {
                let Some(source) = self.requests.remove(&request) else {
                    folio_warn!("result for unknown request {} ({})", request, document);
                    return None;
                };
                let result = match result {
                    Ok(output) => {
                        folio_debug!("{} read from {}", document, output.metadata.origin);
                        decode_content(source, &output.bytes).map_err(|err| err.to_string())
                    }
                    Err(err) => Err(err.to_string()),
                };
                Some(Msg::ContentLoaded {
                    request,
                    source,
                    result,
                })
            }
            EngineEvent::ContactSubmitted { result } => Some(match result {
                Ok(()) => Msg::SubmitSucceeded,
                Err(err) => Msg::SubmitFailed {
                    reason: err.to_string(),
                },
            }),
            EngineEvent::Launched { href, result } => match result {
                Ok(()) => None,
                Err(err) if href.starts_with("mailto:") => Some(Msg::MailtoLaunchFailed {
                    reason: err.to_string(),
                }),
                Err(err) => {
                    folio_warn!("{}", err);
                    None
                }
            },
        }
    }
}

fn contact_message(fields: ContactFields) -> ContactMessage {
    ContactMessage::new(fields.name, fields.email, fields.subject, fields.message)
}
