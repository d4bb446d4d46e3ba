use std::sync::Once;

use folio_core::{
    decode_content, update, AppState, ContentSource, DetailView, Effect, ListView, Location, Msg,
    RequestId, Route,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(folio_logging::initialize_for_tests);
}

const PROJECTS: &str = r#"[
    {
        "title": "Weather App",
        "subTitle": "Forecasts",
        "category": "Web App",
        "date": "2024",
        "projectDescription": "Shows the weather.",
        "keyFeatureTitles": ["Search", "Maps"],
        "keyFeatureDescription": ["Find a city"],
        "frontEnd": ["React", "Tailwind"],
        "backEnd": ["Node.js", "Express"],
        "databaseDeploy": ["MongoDB", "Vercel"],
        "live": "https://weather.example.com",
        "github": "https://github.com/example/weather"
    },
    { "title": "Weather  App", "frontEnd": ["Vue"] },
    { "title": "Weather App", "subTitle": "Duplicate" }
]"#;

fn fetch_requests(effects: &[Effect]) -> Vec<(RequestId, ContentSource)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::FetchContent { request, source } => Some((*request, *source)),
            _ => None,
        })
        .collect()
}

fn projects_loaded(request: RequestId) -> Msg {
    Msg::ContentLoaded {
        request,
        source: ContentSource::Projects,
        result: decode_content(ContentSource::Projects, PROJECTS.as_bytes())
            .map_err(|err| err.to_string()),
    }
}

fn open(state: AppState, address: &str) -> (AppState, Vec<(RequestId, ContentSource)>) {
    let location = Location::parse(address).unwrap();
    let (state, effects) = update(state, Msg::PageLoaded(location));
    (state, fetch_requests(&effects))
}

#[test]
fn home_fetches_both_documents_and_detail_only_projects() {
    init_logging();
    let (state, home) = open(AppState::new(), "/");
    assert_eq!(
        home.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
        vec![ContentSource::Projects, ContentSource::Achievements]
    );
    assert!(state.has_pending_content());

    let (_, detail) = open(state, "/projects/weather-app");
    assert_eq!(
        detail.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
        vec![ContentSource::Projects]
    );

    let (state, missing) = open(AppState::new(), "/nowhere");
    assert!(missing.is_empty());
    assert!(matches!(state.route(), Route::NotFound { .. }));
}

#[test]
fn detail_page_resolves_first_matching_slug() {
    init_logging();
    let (state, requests) = open(AppState::new(), "/projects/weather-app");
    let (state, _) = update(state, projects_loaded(requests[0].0));

    let Some(DetailView::Found(detail)) = state.view().detail else {
        panic!("expected a resolved project");
    };
    assert_eq!(detail.subtitle, "Forecasts");
    assert_eq!(detail.features.len(), 2);
    assert_eq!(detail.features[1].description, "");
    assert_eq!(detail.stack[2].label, "Database & Deploy");
    assert_eq!(
        detail.stack[0]
            .tags
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>(),
        vec!["React", "Tailwind"]
    );
}

#[test]
fn slug_comparison_is_exact() {
    init_logging();
    let (state, requests) = open(AppState::new(), "/projects/Weather-App");
    let (state, _) = update(state, projects_loaded(requests[0].0));

    assert!(matches!(
        state.view().detail,
        Some(DetailView::NotFound { .. })
    ));
}

#[test]
fn unknown_slug_renders_not_found_with_back_link() {
    init_logging();
    let (state, requests) = open(AppState::new(), "/projects/does-not-exist");
    assert_eq!(state.view().detail, Some(DetailView::Loading));

    let (state, _) = update(state, projects_loaded(requests[0].0));
    assert_eq!(
        state.view().detail,
        Some(DetailView::NotFound {
            back_href: "/#projects".to_string()
        })
    );
}

#[test]
fn failed_fetch_on_detail_page_is_not_found() {
    init_logging();
    let (state, requests) = open(AppState::new(), "/projects/weather-app");
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            request: requests[0].0,
            source: ContentSource::Projects,
            result: Err("HTTP 404".to_string()),
        },
    );

    assert!(matches!(
        state.view().detail,
        Some(DetailView::NotFound { .. })
    ));
    assert!(!state.has_pending_content());
}

#[test]
fn superseded_result_is_discarded() {
    init_logging();
    let (state, first) = open(AppState::new(), "/");
    let (state, second) = open(state, "/");
    let stale = first[0].0;
    let fresh = second[0].0;
    assert_ne!(stale, fresh);

    let (state, _) = update(state, projects_loaded(stale));
    assert_eq!(state.stale_results(), 1);
    assert_eq!(state.view().projects, ListView::Loading);

    let (state, _) = update(state, projects_loaded(fresh));
    let view = state.view();
    assert_eq!(view.projects.items().len(), 3);
    assert_eq!(view.projects.items()[0].href, "/projects/weather-app");
}

#[test]
fn project_cards_show_four_tags_and_a_remainder() {
    init_logging();
    let (state, requests) = open(AppState::new(), "/");
    let (state, _) = update(state, projects_loaded(requests[0].0));

    let view = state.view();
    let card = &view.projects.items()[0];
    assert_eq!(
        card.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["React", "Tailwind", "Node.js", "Express"]
    );
    assert_eq!(card.more_tags, 2);
    assert_eq!(view.achievements, ListView::Loading);
}

#[test]
fn achievements_render_short_dates_and_excerpts() {
    init_logging();
    let body = format!(
        r#"[{{"title": "Hackathon", "date": "September 2023", "description": "{}"}}]"#,
        "a".repeat(200)
    );
    let (state, requests) = open(AppState::new(), "/");
    let (request, source) = requests[1];
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            request,
            source,
            result: decode_content(source, body.as_bytes()).map_err(|err| err.to_string()),
        },
    );

    let view = state.view();
    let card = &view.achievements.items()[0];
    assert_eq!(card.date, "Sep 2023");
    assert!(card.excerpt.ends_with("..."));
    assert_eq!(card.excerpt.chars().count(), 153);
}
