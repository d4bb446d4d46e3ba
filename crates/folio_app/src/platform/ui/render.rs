//! HTML rendering of the view model through askama templates.
//!
//! Each page kind has its own template extending `base.html`; the shared
//! navigation bar and footer are partials fed from [`Frame`].

use askama::Template;
use folio_core::{
    AchievementCardView, AppViewModel, ContactView, DetailView, FormField, ListView, NavView,
    NotificationKind, ProjectCardView, ProjectDetailView, Route,
};

/// Site-wide text that does not come from state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChrome {
    pub site_title: String,
    pub owner_name: String,
    pub year: i32,
}

/// What every page shares: head title, navigation, footer.
struct Frame<'a> {
    title: String,
    chrome: &'a PageChrome,
    nav: &'a NavView,
    show_scroll_to_top: bool,
}

struct FieldRow {
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    value: String,
    multiline: bool,
}

struct Notice {
    class: &'static str,
    text: String,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage<'a> {
    frame: Frame<'a>,
    projects: &'a ListView<ProjectCardView>,
    achievements: &'a ListView<AchievementCardView>,
    fields: Vec<FieldRow>,
    submitting: bool,
    notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailPage<'a> {
    frame: Frame<'a>,
    detail: &'a ProjectDetailView,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundPage<'a> {
    frame: Frame<'a>,
    back_href: &'a str,
    back_label: &'static str,
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingPage<'a> {
    frame: Frame<'a>,
}

pub fn render_page(view: &AppViewModel, chrome: &PageChrome) -> askama::Result<String> {
    let frame = |title: String| Frame {
        title,
        chrome,
        nav: &view.nav,
        show_scroll_to_top: view.show_scroll_to_top,
    };
    match (&view.route, &view.detail) {
        (Route::Home, _) => HomePage {
            frame: frame(chrome.site_title.clone()),
            projects: &view.projects,
            achievements: &view.achievements,
            fields: field_rows(&view.contact),
            submitting: view.contact.submitting,
            notice: notice(&view.contact),
        }
        .render(),
        (Route::ProjectDetail { .. }, Some(DetailView::Found(detail))) => DetailPage {
            frame: frame(format!("{} | {}", detail.title, chrome.site_title)),
            detail,
        }
        .render(),
        (Route::ProjectDetail { .. }, Some(DetailView::NotFound { back_href })) => NotFoundPage {
            frame: frame(format!("Project Not Found | {}", chrome.site_title)),
            back_href,
            back_label: "Back to Projects",
        }
        .render(),
        (Route::ProjectDetail { .. }, _) => LoadingPage {
            frame: frame(format!("Project Not Found | {}", chrome.site_title)),
        }
        .render(),
        (Route::NotFound { .. }, _) => NotFoundPage {
            frame: frame(format!("Not Found | {}", chrome.site_title)),
            back_href: "/",
            back_label: "Back to Home",
        }
        .render(),
    }
}

fn field_rows(contact: &ContactView) -> Vec<FieldRow> {
    FormField::ALL
        .into_iter()
        .map(|field| FieldRow {
            id: field.id(),
            label: field.label(),
            input_type: if field == FormField::Email {
                "email"
            } else {
                "text"
            },
            value: contact.fields.get(field).to_string(),
            multiline: field == FormField::Message,
        })
        .collect()
}

fn notice(contact: &ContactView) -> Option<Notice> {
    contact.notification.as_ref().map(|notification| Notice {
        class: match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        },
        text: notification.text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use folio_core::{
        update, AppState, ContentPayload, ContentSource, FormField, Location, Msg, Project, Section,
    };

    use super::super::constants::{ACHIEVEMENTS_ID, FOOTER_ID, HERO_ID};
    use super::*;

    fn chrome() -> PageChrome {
        PageChrome {
            site_title: "Folio".to_string(),
            owner_name: "Ada <Dev>".to_string(),
            year: 2026,
        }
    }

    fn loaded_state(address: &str, projects: Vec<Project>) -> AppState {
        let (state, _) = update(
            AppState::new(),
            Msg::PageLoaded(Location::parse(address).unwrap()),
        );
        let (state, _) = update(
            state,
            Msg::ContentLoaded {
                request: 1,
                source: ContentSource::Projects,
                result: Ok(ContentPayload::Projects(projects)),
            },
        );
        state
    }

    fn render(state: &AppState) -> String {
        render_page(&state.view(), &chrome()).unwrap()
    }

    #[test]
    fn home_page_has_every_anchor_and_the_footer_year() {
        let html = render(&loaded_state("/", Vec::new()));
        for section in Section::TRACKED {
            assert!(html.contains(&format!("id=\"{}\"", section.anchor())));
        }
        for id in [HERO_ID, ACHIEVEMENTS_ID, FOOTER_ID] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
        assert!(html.contains("&copy; 2026 Ada &lt;Dev&gt;"));
        assert!(html.contains("href=\"#expertise\">Skills</a>"));
    }

    #[test]
    fn content_and_form_input_are_escaped() {
        let project = Project {
            title: "<script>x</script>".to_string(),
            ..Project::default()
        };
        let state = loaded_state("/", vec![project]);
        let (state, _) = update(
            state,
            Msg::FieldEdited {
                field: FormField::Name,
                value: "\"><b>".to_string(),
            },
        );
        let html = render(&state);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;x&lt;"));
        assert!(!html.contains("\"><b>"));
        assert!(html.contains("&quot;&gt;&lt;b&gt;"));
    }

    #[test]
    fn loading_lists_show_placeholder() {
        let (state, _) = update(AppState::new(), Msg::PageLoaded(Location::home()));
        let html = render(&state);
        assert!(html.contains("<p class=\"loading\">Loading...</p>"));
    }

    #[test]
    fn project_card_shows_four_tags_and_the_rest_as_a_count() {
        let project = Project {
            title: "Weather App".to_string(),
            front_end: ["React", "Vue", "Svelte", "Angular", "Solid"]
                .map(String::from)
                .to_vec(),
            ..Project::default()
        };
        let html = render(&loaded_state("/", vec![project]));
        assert!(html.contains(">Angular</span>"));
        assert!(!html.contains(">Solid</span>"));
        assert!(html.contains("+1 more"));
    }

    #[test]
    fn detail_page_renders_project_and_tag_styles() {
        let project = Project {
            title: "My Cool App".to_string(),
            front_end: vec!["React".to_string(), "Brainfuck".to_string()],
            live: "https://app.example.com".to_string(),
            ..Project::default()
        };
        let html = render(&loaded_state("/projects/my-cool-app", vec![project]));

        assert!(html.contains("<title>My Cool App | Folio</title>"));
        assert!(html.contains(">Brainfuck</span>"));
        assert!(html.contains("Live Demo"));
        assert!(!html.contains("Source Code"));
        assert!(html.contains("#about\""));
    }

    #[test]
    fn unknown_slug_renders_not_found_with_back_link() {
        let html = render(&loaded_state("/projects/nonexistent-slug", Vec::new()));
        assert!(html.contains("Project Not Found"));
        assert!(html.contains("#projects\">Back to Projects</a>"));
    }

    #[test]
    fn notification_is_rendered_with_its_kind() {
        let state = loaded_state("/", Vec::new());
        let (state, _) = update(state, Msg::SubmitClicked);
        let html = render(&state);
        assert!(html.contains("class=\"notification error\""));
        assert!(html.contains("Please fill in: Name, Email, Subject, Message"));
    }
}
