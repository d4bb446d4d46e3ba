use std::time::Duration;

use folio_logging::{folio_debug, folio_info, folio_warn};

use crate::contact::{compose_mailto, FALLBACK_CLEAR_DELAY};
use crate::route::home_section_href;
use crate::scroll::LINK_SCROLL_DURATION;
use crate::slug::duplicate_slugs;
use crate::state::{Notification, NotificationKind, SubmitPhase};
use crate::{
    AppState, ContentPayload, ContentSource, Effect, Location, Msg, NavTarget, RequestId, Route,
    ScrollOptions, Section,
};

/// How long link transitions stay suppressed after a nav click.
pub const CLICK_GUARD_WINDOW: Duration = Duration::from_millis(100);
/// Delay between page load and the fragment scroll, to let layout settle.
pub const FRAGMENT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded(location) => load_page(&mut state, location),
        Msg::HashChanged { fragment } => match fragment.filter(|f| !f.is_empty()) {
            Some(fragment) => vec![scroll_to_fragment(&fragment)],
            None => Vec::new(),
        },
        Msg::FragmentSettled { fragment } => vec![scroll_to_fragment(&fragment)],
        Msg::LayoutMeasured(layout) => {
            state.layout = layout;
            let offset = state.scroll_offset;
            state.apply_scroll(offset);
            Vec::new()
        }
        Msg::Scrolled { offset } => {
            state.apply_scroll(offset);
            Vec::new()
        }
        Msg::NavLinkClicked(target) => nav_clicked(&mut state, target),
        Msg::ClickGuardElapsed { generation } => {
            if state.nav.click_guard == Some(generation) {
                state.nav.click_guard = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MenuToggled => {
            state.nav.menu_open = !state.nav.menu_open;
            state.mark_dirty();
            Vec::new()
        }
        Msg::MenuDismissed => {
            if state.nav.menu_open {
                state.nav.menu_open = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DetailContactClicked => vec![Effect::Navigate {
            href: home_section_href(Section::Contact),
            replace: true,
        }],
        Msg::ContentLoaded {
            request,
            source,
            result,
        } => {
            content_loaded(&mut state, request, source, result);
            Vec::new()
        }
        Msg::FieldEdited { field, value } => {
            state.contact.fields.set(field, value);
            // New input must survive a clear scheduled for the old message.
            state.contact.pending_clear = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => submit_clicked(&mut state),
        Msg::SubmitSucceeded => {
            if state.contact.phase == SubmitPhase::Submitting {
                let contact = &mut state.contact;
                contact.phase = SubmitPhase::Idle;
                contact.fields.clear();
                contact.notification = Some(Notification::new(
                    NotificationKind::Success,
                    "Thank you! Your message has been sent successfully.",
                ));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitFailed { reason } => submit_failed(&mut state, &reason),
        Msg::MailtoLaunchFailed { reason } => {
            folio_warn!("mail client launch failed: {}", reason);
            state.contact.pending_clear = None;
            report_terminal_failure(&mut state);
            Vec::new()
        }
        Msg::FallbackClearElapsed { generation } => {
            if state.contact.pending_clear == Some(generation) {
                state.contact.pending_clear = None;
                state.contact.fields.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NotificationDismissed => {
            if state.contact.notification.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_page(state: &mut AppState, location: Location) -> Vec<Effect> {
    folio_info!(
        "page load {} fragment={:?}",
        location.route.path(),
        location.fragment
    );
    let sources: &[ContentSource] = match &location.route {
        Route::Home => &ContentSource::ALL,
        Route::ProjectDetail { .. } => &[ContentSource::Projects],
        Route::NotFound { .. } => &[],
    };
    state.enter_route(location.route);

    let mut effects = vec![Effect::ResetScroll];
    for source in sources {
        let request = state.begin_request(*source);
        effects.push(Effect::FetchContent {
            request,
            source: *source,
        });
    }
    if let Some(fragment) = location.fragment.filter(|f| !f.is_empty()) {
        effects.push(Effect::ClearFragment);
        effects.push(Effect::Schedule {
            after: FRAGMENT_SETTLE_DELAY,
            msg: Box::new(Msg::FragmentSettled { fragment }),
        });
    }
    effects
}

fn scroll_to_fragment(fragment: &str) -> Effect {
    let selector = format!("#{fragment}");
    let options = ScrollOptions::for_link(&selector);
    Effect::ScrollToElement { selector, options }
}

fn nav_clicked(state: &mut AppState, target: NavTarget) -> Vec<Effect> {
    let section = match target {
        NavTarget::Resume => {
            return vec![Effect::OpenDocument {
                href: state.settings().resume_href.clone(),
            }];
        }
        NavTarget::Top => {
            close_menu(state);
            if state.route.is_home() {
                return vec![Effect::ScrollToTop {
                    duration: LINK_SCROLL_DURATION,
                }];
            }
            return vec![Effect::Navigate {
                href: "/".to_string(),
                replace: false,
            }];
        }
        NavTarget::Section(section) => section,
    };

    close_menu(state);
    if !state.route.is_home() {
        return vec![Effect::Navigate {
            href: home_section_href(section),
            replace: false,
        }];
    }

    state.nav.active = Some(section);
    let generation = state.next_timer_generation();
    state.nav.click_guard = Some(generation);
    state.mark_dirty();

    let selector = section.selector();
    let options = ScrollOptions::for_link(&selector);
    vec![
        Effect::ScrollToElement { selector, options },
        Effect::Schedule {
            after: CLICK_GUARD_WINDOW,
            msg: Box::new(Msg::ClickGuardElapsed { generation }),
        },
    ]
}

fn close_menu(state: &mut AppState) {
    if state.nav.menu_open {
        state.nav.menu_open = false;
        state.mark_dirty();
    }
}

fn content_loaded(
    state: &mut AppState,
    request: RequestId,
    source: ContentSource,
    result: Result<ContentPayload, String>,
) {
    if let Err(message) = &result {
        folio_warn!("failed to load {}: {}", source.file_name(), message);
    }
    if !state.finish_request(request, source, result) {
        folio_debug!(
            "dropping superseded result for {} (request {})",
            source.file_name(),
            request
        );
        return;
    }
    if source == ContentSource::Projects {
        report_project_issues(state);
    }
}

fn report_project_issues(state: &AppState) {
    let projects = state.projects.items();
    for (slug, indices) in duplicate_slugs(projects) {
        folio_warn!(
            "projects {:?} share slug {:?}; only the first is reachable",
            indices,
            slug
        );
    }
    for project in projects {
        for issue in project.alignment_issues() {
            folio_warn!(
                "project {:?}: {} has {} titles but {} descriptions",
                project.title,
                issue.field,
                issue.titles,
                issue.descriptions
            );
        }
    }
}

fn submit_clicked(state: &mut AppState) -> Vec<Effect> {
    if state.contact.phase == SubmitPhase::Submitting {
        return Vec::new();
    }
    if let Err(err) = state.contact.fields.validate() {
        state.contact.notification = Some(Notification::new(
            NotificationKind::Error,
            capitalize(&err.to_string()),
        ));
        state.mark_dirty();
        return Vec::new();
    }
    state.contact.phase = SubmitPhase::Submitting;
    state.contact.notification = None;
    state.contact.pending_clear = None;
    state.mark_dirty();
    vec![Effect::SubmitContact {
        fields: state.contact.fields.clone(),
    }]
}

fn submit_failed(state: &mut AppState, reason: &str) -> Vec<Effect> {
    if state.contact.phase != SubmitPhase::Submitting {
        return Vec::new();
    }
    folio_warn!("contact submission failed, falling back to mailto: {}", reason);
    state.contact.phase = SubmitPhase::Idle;

    let href = match compose_mailto(&state.settings().contact_address, &state.contact.fields) {
        Ok(href) => href,
        Err(err) => {
            folio_warn!("mailto fallback unavailable: {}", err);
            report_terminal_failure(state);
            return Vec::new();
        }
    };

    let generation = state.next_timer_generation();
    state.contact.pending_clear = Some(generation);
    state.contact.notification = Some(Notification::new(
        NotificationKind::Info,
        "Opening your email client to send the message instead.",
    ));
    state.mark_dirty();
    vec![
        Effect::LaunchMailto { href },
        Effect::Schedule {
            after: FALLBACK_CLEAR_DELAY,
            msg: Box::new(Msg::FallbackClearElapsed { generation }),
        },
    ]
}

fn report_terminal_failure(state: &mut AppState) {
    let text = format!(
        "Sorry, your message could not be sent. Please email me directly at {}.",
        state.settings().contact_address
    );
    state.contact.phase = SubmitPhase::Idle;
    state.contact.notification = Some(Notification::new(NotificationKind::Error, text));
    state.mark_dirty();
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
