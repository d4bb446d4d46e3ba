use std::sync::Once;

use folio_core::{
    update, AppState, ContactFields, Effect, FormField, Location, Msg, NotificationKind,
    SiteSettings, SubmitPhase, FALLBACK_CLEAR_DELAY,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(folio_logging::initialize_for_tests);
}

fn settings() -> SiteSettings {
    SiteSettings {
        contact_address: "me@folio.dev".to_string(),
        ..SiteSettings::default()
    }
}

fn filled_form() -> AppState {
    let (state, _) = update(
        AppState::with_settings(settings()),
        Msg::PageLoaded(Location::home()),
    );
    fill(state)
}

fn fill(mut state: AppState) -> AppState {
    for (field, value) in [
        (FormField::Name, "Ada"),
        (FormField::Email, "ada@example.com"),
        (FormField::Subject, "Hello there"),
        (FormField::Message, "Let's talk & build"),
    ] {
        state = update(
            state,
            Msg::FieldEdited {
                field,
                value: value.to_string(),
            },
        )
        .0;
    }
    state
}

fn submitted() -> AppState {
    let (state, effects) = update(filled_form(), Msg::SubmitClicked);
    assert_eq!(state.contact().phase(), SubmitPhase::Submitting);
    assert_eq!(effects.len(), 1);
    state
}

#[test]
fn submit_emits_request_with_current_fields() {
    init_logging();
    let (state, effects) = update(filled_form(), Msg::SubmitClicked);

    assert!(state.view().contact.submitting);
    assert_eq!(
        effects,
        vec![Effect::SubmitContact {
            fields: ContactFields {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                subject: "Hello there".to_string(),
                message: "Let's talk & build".to_string(),
            }
        }]
    );
}

#[test]
fn second_click_while_submitting_is_ignored() {
    init_logging();
    let state = submitted();
    let (next, effects) = update(state.clone(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(next.contact(), state.contact());
}

#[test]
fn success_clears_fields_and_thanks_the_sender() {
    init_logging();
    let (state, effects) = update(submitted(), Msg::SubmitSucceeded);
    let view = state.view();

    assert!(effects.is_empty());
    assert!(!view.contact.submitting);
    assert!(view.contact.fields.is_empty());
    let notification = view.contact.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(
        notification.text,
        "Thank you! Your message has been sent successfully."
    );
}

#[test]
fn failure_launches_exactly_one_mailto_and_keeps_fields_until_clear() {
    init_logging();
    let (state, effects) = update(
        submitted(),
        Msg::SubmitFailed {
            reason: "HTTP 500".to_string(),
        },
    );

    let launches: Vec<&String> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::LaunchMailto { href } => Some(href),
            _ => None,
        })
        .collect();
    assert_eq!(
        launches,
        vec![
            "mailto:me@folio.dev?subject=Hello%20there&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0ALet%27s%20talk%20%26%20build"
        ]
    );
    assert_eq!(
        effects[1],
        Effect::Schedule {
            after: FALLBACK_CLEAR_DELAY,
            msg: Box::new(Msg::FallbackClearElapsed { generation: 1 }),
        }
    );

    let view = state.view();
    assert!(!view.contact.submitting);
    assert_eq!(view.contact.fields.name, "Ada");
    assert_eq!(
        view.contact.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Info)
    );

    let (state, _) = update(state, Msg::FallbackClearElapsed { generation: 1 });
    assert!(state.contact().fields().is_empty());
}

#[test]
fn editing_after_fallback_cancels_the_delayed_clear() {
    init_logging();
    let (state, _) = update(
        submitted(),
        Msg::SubmitFailed {
            reason: "timeout".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: FormField::Message,
            value: "second thoughts".to_string(),
        },
    );
    let (state, _) = update(state, Msg::FallbackClearElapsed { generation: 1 });

    assert_eq!(state.contact().fields().message, "second thoughts");
    assert_eq!(state.contact().fields().name, "Ada");
}

#[test]
fn fallback_clear_from_previous_visit_leaves_new_form_alone() {
    init_logging();
    let failed = |state: AppState| {
        let (state, _) = update(state, Msg::SubmitClicked);
        update(
            state,
            Msg::SubmitFailed {
                reason: "HTTP 500".to_string(),
            },
        )
    };
    let (state, first) = failed(filled_form());
    let Effect::Schedule { msg: old_timer, .. } = first[1].clone() else {
        panic!("expected a scheduled clear, got {first:?}");
    };

    let (state, _) = update(state, Msg::PageLoaded(Location::home()));
    let (state, second) = failed(fill(state));
    assert_ne!(
        second[1],
        Effect::Schedule {
            after: FALLBACK_CLEAR_DELAY,
            msg: old_timer.clone(),
        }
    );

    let (state, _) = update(state, *old_timer);
    assert_eq!(state.contact().fields().name, "Ada");
    assert_eq!(state.contact().fields().message, "Let's talk & build");
}

#[test]
fn dismissing_the_notification_hides_it() {
    init_logging();
    let (mut state, _) = update(submitted(), Msg::SubmitSucceeded);
    state.consume_dirty();
    assert!(state.contact().notification().is_some());

    let (mut state, _) = update(state, Msg::NotificationDismissed);
    assert!(state.consume_dirty());
    assert_eq!(state.contact().notification(), None);

    let (mut state, effects) = update(state, Msg::NotificationDismissed);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn mailto_launch_failure_reports_the_address() {
    init_logging();
    let (state, _) = update(
        submitted(),
        Msg::SubmitFailed {
            reason: "offline".to_string(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::MailtoLaunchFailed {
            reason: "no handler".to_string(),
        },
    );
    let (state, _) = update(state, Msg::FallbackClearElapsed { generation: 1 });

    assert!(effects.is_empty());
    let notification = state.contact().notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification.text.contains("me@folio.dev"));
    assert_eq!(state.contact().fields().name, "Ada");
}

#[test]
fn invalid_recipient_skips_mailto_and_shows_error() {
    init_logging();
    let settings = SiteSettings {
        contact_address: "not-an-address".to_string(),
        ..SiteSettings::default()
    };
    let (mut state, _) = update(
        AppState::with_settings(settings),
        Msg::PageLoaded(Location::home()),
    );
    for field in FormField::ALL {
        let value = if field == FormField::Email {
            "ada@example.com"
        } else {
            "x"
        };
        state = update(
            state,
            Msg::FieldEdited {
                field,
                value: value.to_string(),
            },
        )
        .0;
    }
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(
        state,
        Msg::SubmitFailed {
            reason: "HTTP 503".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.contact().notification().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
    assert!(!state.contact().fields().is_empty());
}

#[test]
fn missing_fields_block_submission() {
    init_logging();
    let (state, _) = update(
        AppState::with_settings(settings()),
        Msg::FieldEdited {
            field: FormField::Name,
            value: "Ada".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.contact().phase(), SubmitPhase::Idle);
    assert_eq!(
        state.contact().notification().map(|n| n.text.as_str()),
        Some("Please fill in: Email, Subject, Message")
    );
}

#[test]
fn late_result_without_pending_submit_is_ignored() {
    init_logging();
    let state = filled_form();
    let (next, effects) = update(
        state.clone(),
        Msg::SubmitFailed {
            reason: "late".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.contact(), state.contact());
}
