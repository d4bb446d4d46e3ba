use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use folio_core::{
    update, AppState, Effect, Location, Msg, ScrollController, Section, SectionLayout, Viewport,
};
use folio_engine::EngineHandle;
use folio_logging::{folio_debug, folio_error, folio_info, folio_trace, folio_warn};

use super::effects::EffectRunner;
use super::ui::layout::DocumentLayout;
use super::ui::render::{render_page, PageChrome};

/// Simulated animation frame length.
const FRAME: Duration = Duration::from_millis(16);
/// How long to wait for engine work or timers between polls.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Headless page host: owns the state, the single scroll controller and the
/// effect runner, and serializes every change through one message inbox.
pub struct PageShell {
    state: AppState,
    scroll: ScrollController<DocumentLayout>,
    effects: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    viewport_height: f64,
    chrome: PageChrome,
    history: Vec<String>,
    /// Section boxes last reported to the state; reset on every page load.
    measured: Option<SectionLayout>,
    html: String,
    frames: u64,
}

impl PageShell {
    pub fn new(
        state: AppState,
        engine: EngineHandle,
        chrome: PageChrome,
        viewport_height: f64,
        smooth_scroll: bool,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let view = state.view();
        let layout = DocumentLayout::for_view(&view, viewport_height);
        let scroll = if smooth_scroll {
            ScrollController::smooth(layout)
        } else {
            ScrollController::native(layout)
        };
        let html = render_page(&view, &chrome).unwrap_or_default();
        Self {
            state,
            scroll,
            effects: EffectRunner::new(engine, msg_tx.clone()),
            msg_tx,
            msg_rx,
            viewport_height,
            chrome,
            history: Vec::new(),
            measured: None,
            html,
            frames: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.viewport().scroll_offset()
    }

    pub fn active_section(&self) -> Option<Section> {
        self.state.nav().active()
    }

    /// Addresses visited, latest last, with fragments as currently shown.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Queues a message as if it came from user input.
    pub fn post(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Opens `address` as a full page load.
    pub fn visit(&mut self, address: &str) {
        match Location::parse(address) {
            Ok(location) => {
                self.history.push(address.to_string());
                self.measured = None;
                self.dispatch(Msg::PageLoaded(location));
            }
            Err(err) => folio_warn!("{}", err),
        }
    }

    /// Processes messages, engine results, timers and animation frames until
    /// nothing is pending. Returns false when `limit` passed first.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        loop {
            let mut progressed = self.drain_inbox();
            for msg in self.effects.poll() {
                self.dispatch(msg);
                progressed = true;
            }
            if self.scroll.is_animating() {
                self.advance_frame();
                progressed = true;
            } else if !progressed && self.effects.is_idle() && !self.drain_inbox() {
                return true;
            }
            if Instant::now() >= deadline {
                folio_warn!("page shell still busy after {:?}", limit);
                return false;
            }
            if !progressed {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }

    pub fn shutdown(&self) {
        self.effects.shutdown();
    }

    fn drain_inbox(&mut self) -> bool {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let any = !inbox.is_empty();
        for msg in inbox {
            self.dispatch(msg);
        }
        any
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for effect in effects {
            self.apply(effect);
        }
        if was_dirty {
            self.refresh();
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ResetScroll => {
                let offset = self.scroll.jump_to(0.0);
                self.post(Msg::Scrolled { offset });
            }
            Effect::ClearFragment => {
                if let Some(current) = self.history.last_mut() {
                    if let Some(index) = current.find('#') {
                        current.truncate(index);
                    }
                }
            }
            Effect::ScrollToElement { selector, options } => {
                match self.scroll.scroll_to_element(&selector, options) {
                    Ok(target) => {
                        folio_debug!("scrolling to {} (target {})", selector, target);
                        self.after_scroll_command();
                    }
                    Err(err) => folio_warn!("{}", err),
                }
            }
            Effect::ScrollToTop { duration } => {
                self.scroll.scroll_to_top(duration);
                self.after_scroll_command();
            }
            Effect::Navigate { href, replace } => {
                folio_info!("navigate to {} (replace={})", href, replace);
                if replace {
                    self.history.pop();
                }
                self.visit(&href);
            }
            other => self.effects.run(other),
        }
    }

    /// A native-mode scroll lands immediately and needs its own report.
    fn after_scroll_command(&mut self) {
        if !self.scroll.is_animating() {
            let offset = self.scroll.viewport().scroll_offset();
            self.post(Msg::Scrolled { offset });
        }
    }

    fn advance_frame(&mut self) {
        self.frames += 1;
        folio_logging::set_frame(self.frames);
        if let Some(offset) = self.scroll.advance(FRAME) {
            folio_trace!("frame {} offset {:.1}", self.frames, offset);
            self.dispatch(Msg::Scrolled { offset });
        }
    }

    /// Re-lays out the document and re-renders after a state change.
    fn refresh(&mut self) {
        let view = self.state.view();
        let next = DocumentLayout::for_view(&view, self.viewport_height);
        let before = self.scroll.viewport().scroll_offset();
        self.scroll.viewport_mut().relayout(next);
        let after = self.scroll.viewport().scroll_offset();
        if after != before {
            self.post(Msg::Scrolled { offset: after });
        }
        match render_page(&view, &self.chrome) {
            Ok(html) => self.html = html,
            Err(err) => folio_error!("rendering {} failed: {}", view.route.path(), err),
        }

        let sections = self.scroll.viewport().section_layout();
        if self.measured.as_ref() != Some(&sections) {
            self.measured = Some(sections.clone());
            self.post(Msg::LayoutMeasured(sections));
        }
    }
}
