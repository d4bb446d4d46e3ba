use crate::content::{Achievement, Pair, Project};
use crate::format::{short_month_date, truncate_excerpt, EXCERPT_CHARS};
use crate::route::{home_section_href, project_path};
use crate::slug::resolve;
use crate::state::{Loadable, Notification, SubmitPhase};
use crate::tech::{category_icon, tag_style};
use crate::{AppState, ContactFields, NavTarget, Route, Section};

/// Tags shown on a project card before the "+N more" badge.
pub const CARD_TAG_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub route: Route,
    pub nav: NavView,
    pub show_scroll_to_top: bool,
    pub projects: ListView<ProjectCardView>,
    pub achievements: ListView<AchievementCardView>,
    /// Present only on a project detail route.
    pub detail: Option<DetailView>,
    pub contact: ContactView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub links: Vec<NavLinkView>,
    /// The highlighted "Get In Touch" button.
    pub contact_cta: NavLinkView,
    pub menu_open: bool,
    pub scrolled: bool,
    /// False during the short window after a click.
    pub transitions_enabled: bool,
}

impl NavView {
    pub fn active_links(&self) -> impl Iterator<Item = &NavLinkView> {
        self.links
            .iter()
            .chain(std::iter::once(&self.contact_cta))
            .filter(|link| link.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: &'static str,
    pub href: String,
    pub target: NavTarget,
    pub active: bool,
    /// Download link rather than an in-page scroll.
    pub is_document: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Loading,
    Ready(Vec<T>),
    /// The fetch failed; rendered as an empty section.
    Failed,
}

impl<T> ListView<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListView::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListView::Ready(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub name: String,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCardView {
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub image: String,
    pub icon: &'static str,
    pub tags: Vec<TagView>,
    pub more_tags: usize,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementCardView {
    pub title: String,
    pub subtitle: String,
    pub team: String,
    pub category: String,
    pub date: String,
    pub excerpt: String,
    pub quote: String,
    pub learning: Vec<String>,
    pub banner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    NotFound { back_href: String },
    Found(Box<ProjectDetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackGroupView {
    pub label: &'static str,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailView {
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub date: String,
    pub image: String,
    pub overview: String,
    pub features: Vec<Pair>,
    pub challenges: Vec<Pair>,
    pub improvements: Vec<String>,
    pub stack: Vec<StackGroupView>,
    pub live: String,
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub fields: ContactFields,
    pub submitting: bool,
    pub notification: Option<Notification>,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let home = state.route().is_home();
        Self {
            route: state.route().clone(),
            nav: nav_view(state, home),
            show_scroll_to_top: state.nav().show_scroll_to_top,
            projects: list_view(state.projects(), project_card),
            achievements: list_view(state.achievements(), achievement_card),
            detail: match state.route() {
                Route::ProjectDetail { slug } => Some(detail_view(state.projects(), slug)),
                _ => None,
            },
            contact: ContactView {
                fields: state.contact().fields().clone(),
                submitting: state.contact().phase() == SubmitPhase::Submitting,
                notification: state.contact().notification().cloned(),
            },
            dirty: state.is_dirty(),
        }
    }
}

fn nav_view(state: &AppState, home: bool) -> NavView {
    let active = state.nav().active();
    let section_link = |label: &'static str, section: Section| NavLinkView {
        label,
        href: if home {
            section.selector()
        } else {
            home_section_href(section)
        },
        target: NavTarget::Section(section),
        active: active == Some(section),
        is_document: false,
    };
    NavView {
        links: vec![
            section_link("About", Section::About),
            section_link("Skills", Section::Expertise),
            section_link("Education", Section::Education),
            section_link("Projects", Section::Projects),
            NavLinkView {
                label: "Resume",
                href: state.settings().resume_href.clone(),
                target: NavTarget::Resume,
                active: false,
                is_document: true,
            },
        ],
        contact_cta: section_link("Get In Touch", Section::Contact),
        menu_open: state.nav().menu_open(),
        scrolled: state.nav().scrolled(),
        transitions_enabled: state.nav().transitions_enabled(),
    }
}

fn list_view<T, V>(loadable: &Loadable<T>, card: fn(&T) -> V) -> ListView<V> {
    match loadable {
        Loadable::Idle | Loadable::Loading { .. } => ListView::Loading,
        Loadable::Ready(items) => ListView::Ready(items.iter().map(card).collect()),
        Loadable::Failed(_) => ListView::Failed,
    }
}

fn project_card(project: &Project) -> ProjectCardView {
    let all: Vec<&str> = project.all_technologies().collect();
    ProjectCardView {
        title: project.title.clone(),
        subtitle: project.subtitle.clone(),
        category: project.category.clone(),
        date: project.date.clone(),
        description: project.description.clone(),
        image: project.image.clone(),
        icon: category_icon(&project.category),
        tags: all
            .iter()
            .take(CARD_TAG_LIMIT)
            .map(|name| TagView {
                name: name.to_string(),
                class: tag_style(name).card_class(),
            })
            .collect(),
        more_tags: all.len().saturating_sub(CARD_TAG_LIMIT),
        href: project_path(&project.slug()),
    }
}

fn achievement_card(achievement: &Achievement) -> AchievementCardView {
    AchievementCardView {
        title: achievement.title.clone(),
        subtitle: achievement.subtitle.clone(),
        team: achievement.team.clone(),
        category: achievement.category.clone(),
        date: short_month_date(&achievement.date),
        excerpt: truncate_excerpt(&achievement.description, EXCERPT_CHARS),
        quote: achievement.quote.clone(),
        learning: achievement.learning.clone(),
        banner: achievement.banner.clone(),
    }
}

fn detail_view(projects: &Loadable<Project>, slug: &str) -> DetailView {
    let not_found = || DetailView::NotFound {
        back_href: home_section_href(Section::Projects),
    };
    match projects {
        Loadable::Idle | Loadable::Loading { .. } => DetailView::Loading,
        Loadable::Failed(_) => not_found(),
        Loadable::Ready(items) => match resolve(items, slug) {
            Some(project) => DetailView::Found(Box::new(project_detail(project))),
            None => not_found(),
        },
    }
}

fn badges(tags: &[String]) -> Vec<TagView> {
    tags.iter()
        .map(|name| TagView {
            name: name.clone(),
            class: tag_style(name).badge_class(),
        })
        .collect()
}

fn project_detail(project: &Project) -> ProjectDetailView {
    ProjectDetailView {
        title: project.title.clone(),
        subtitle: project.subtitle.clone(),
        category: project.category.clone(),
        date: project.date.clone(),
        image: project.image.clone(),
        overview: project.description.clone(),
        features: project.features(),
        challenges: project.challenges(),
        improvements: project.improvements.clone(),
        stack: vec![
            StackGroupView {
                label: "Frontend",
                tags: badges(&project.front_end),
            },
            StackGroupView {
                label: "Backend",
                tags: badges(&project.back_end),
            },
            StackGroupView {
                label: "Database & Deploy",
                tags: badges(&project.database_deploy),
            },
        ],
        live: project.live.clone(),
        github: project.github.clone(),
    }
}
