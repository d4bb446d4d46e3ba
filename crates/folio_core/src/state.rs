use crate::content::{Achievement, ContentPayload, ContentSource, Project};
use crate::contact::ContactFields;
use crate::route::Route;
use crate::section::{active_section_at, ActiveUpdate, Section, SectionLayout, SCROLLED_THRESHOLD};
use crate::view_model::AppViewModel;

pub type RequestId = u64;

/// Site-wide values the state machine needs but does not own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Recipient of the `mailto:` fallback and of the failure notice.
    pub contact_address: String,
    /// Path of the downloadable resume document.
    pub resume_href: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            contact_address: "hello@example.com".to_string(),
            resume_href: "/resume.pdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading {
        request: RequestId,
    },
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Loadable::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Loadable::Loading { .. })
    }

    fn awaits(&self, request: RequestId) -> bool {
        matches!(self, Loadable::Loading { request: r } if *r == request)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    pub(crate) active: Option<Section>,
    pub(crate) menu_open: bool,
    pub(crate) scrolled: bool,
    pub(crate) show_scroll_to_top: bool,
    /// Generation of the click whose transition guard is still up.
    pub(crate) click_guard: Option<u64>,
}

impl NavigationState {
    pub fn active(&self) -> Option<Section> {
        self.active
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn transitions_enabled(&self) -> bool {
        self.click_guard.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub(crate) fn new(kind: NotificationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactState {
    pub(crate) fields: ContactFields,
    pub(crate) phase: SubmitPhase,
    pub(crate) notification: Option<Notification>,
    /// Generation of the delayed clear scheduled after the fallback ran.
    pub(crate) pending_clear: Option<u64>,
}

impl ContactState {
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: SiteSettings,
    pub(crate) route: Route,
    pub(crate) nav: NavigationState,
    pub(crate) layout: SectionLayout,
    pub(crate) scroll_offset: f64,
    pub(crate) projects: Loadable<Project>,
    pub(crate) achievements: Loadable<Achievement>,
    pub(crate) contact: ContactState,
    next_request: RequestId,
    /// Shared by every scheduled timer and never reset, so a timer started
    /// on an earlier page cannot match one started later.
    timer_generation: u64,
    stale_results: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SiteSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn contact(&self) -> &ContactState {
        &self.contact
    }

    pub fn projects(&self) -> &Loadable<Project> {
        &self.projects
    }

    pub fn achievements(&self) -> &Loadable<Achievement> {
        &self.achievements
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Number of content results dropped because a newer request superseded them.
    pub fn stale_results(&self) -> u64 {
        self.stale_results
    }

    /// True while any content document is still loading.
    pub fn has_pending_content(&self) -> bool {
        self.projects.is_pending() || self.achievements.is_pending()
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Resets everything that lives only as long as one page visit.
    pub(crate) fn enter_route(&mut self, route: Route) {
        self.route = route;
        self.nav = NavigationState::default();
        self.layout = SectionLayout::default();
        self.scroll_offset = 0.0;
        self.projects = Loadable::Idle;
        self.achievements = Loadable::Idle;
        self.contact = ContactState::default();
        self.mark_dirty();
    }

    pub(crate) fn next_timer_generation(&mut self) -> u64 {
        self.timer_generation += 1;
        self.timer_generation
    }

    /// Marks `source` as loading under a fresh request id and returns it.
    pub(crate) fn begin_request(&mut self, source: ContentSource) -> RequestId {
        self.next_request += 1;
        let request = self.next_request;
        match source {
            ContentSource::Projects => self.projects = Loadable::Loading { request },
            ContentSource::Achievements => self.achievements = Loadable::Loading { request },
        }
        request
    }

    /// Applies a finished request; returns false when it was superseded.
    pub(crate) fn finish_request(
        &mut self,
        request: RequestId,
        source: ContentSource,
        result: Result<ContentPayload, String>,
    ) -> bool {
        let awaited = match source {
            ContentSource::Projects => self.projects.awaits(request),
            ContentSource::Achievements => self.achievements.awaits(request),
        };
        if !awaited {
            self.stale_results += 1;
            return false;
        }
        match (source, result) {
            (ContentSource::Projects, Ok(ContentPayload::Projects(items))) => {
                self.projects = Loadable::Ready(items);
            }
            (ContentSource::Achievements, Ok(ContentPayload::Achievements(items))) => {
                self.achievements = Loadable::Ready(items);
            }
            (_, Ok(other)) => {
                let message = format!(
                    "expected {} but received {}",
                    source.file_name(),
                    other.source().file_name()
                );
                self.fail(source, message);
            }
            (_, Err(message)) => self.fail(source, message),
        }
        self.mark_dirty();
        true
    }

    fn fail(&mut self, source: ContentSource, message: String) {
        match source {
            ContentSource::Projects => self.projects = Loadable::Failed(message),
            ContentSource::Achievements => self.achievements = Loadable::Failed(message),
        }
    }

    /// Recomputes the scroll-derived navigation flags for `offset`.
    pub(crate) fn apply_scroll(&mut self, offset: f64) {
        let before = self.nav.clone();
        self.scroll_offset = offset;
        self.nav.scrolled = offset > SCROLLED_THRESHOLD;
        let viewport = self.layout.viewport_height;
        self.nav.show_scroll_to_top = viewport > 0.0 && offset > viewport * 2.0;
        match active_section_at(&self.layout, offset) {
            ActiveUpdate::Clear => self.nav.active = None,
            ActiveUpdate::Set(section) => self.nav.active = Some(section),
            ActiveUpdate::Keep => {}
        }
        if self.nav != before {
            self.mark_dirty();
        }
    }
}
