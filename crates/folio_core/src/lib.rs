//! Folio core: pure state machine, content model and view-model helpers.
mod contact;
mod content;
mod effect;
mod format;
mod msg;
mod route;
mod scroll;
mod section;
mod slug;
mod state;
mod tech;
mod update;
mod view_model;

pub use contact::{
    compose_mailto, ContactFields, FormField, MailtoError, ValidationError, FALLBACK_CLEAR_DELAY,
};
pub use content::{
    decode_content, Achievement, AlignmentIssue, ContentError, ContentPayload, ContentSource, Pair,
    Project,
};
pub use effect::Effect;
pub use format::{short_month_date, truncate_excerpt, EXCERPT_CHARS};
pub use msg::{Msg, NavTarget};
pub use route::{home_section_href, project_path, Location, LocationError, Route};
pub use scroll::{
    ease_out_expo, ScrollAnimation, ScrollController, ScrollError, ScrollOptions, Viewport,
    CONTACT_SCROLL_OFFSET, DEFAULT_SCROLL_DURATION, LINK_SCROLL_DURATION,
};
pub use section::{
    active_section_at, ActiveUpdate, Section, SectionBox, SectionLayout, NAV_BAR_HEIGHT,
    SCROLLED_THRESHOLD, TOP_THRESHOLD,
};
pub use slug::{duplicate_slugs, resolve, slugify, Slugged};
pub use state::{
    AppState, ContactState, Loadable, NavigationState, Notification, NotificationKind, RequestId,
    SiteSettings, SubmitPhase,
};
pub use tech::{category_icon, tag_style, TagStyle};
pub use update::{update, CLICK_GUARD_WINDOW, FRAGMENT_SETTLE_DELAY};
pub use view_model::{
    AchievementCardView, AppViewModel, ContactView, DetailView, ListView, NavLinkView, NavView,
    ProjectCardView, ProjectDetailView, StackGroupView, TagView, CARD_TAG_LIMIT,
};
