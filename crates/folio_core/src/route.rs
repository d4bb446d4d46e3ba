use url::Url;

use crate::section::Section;

const BASE: &str = "http://folio.invalid/";

/// Pages the site can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    ProjectDetail { slug: String },
    NotFound { path: String },
}

impl Route {
    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ProjectDetail { slug } => project_path(slug),
            Route::NotFound { path } => path.clone(),
        }
    }
}

/// Path of the detail page for `slug`.
pub fn project_path(slug: &str) -> String {
    format!("/projects/{}", urlencoding::encode(slug))
}

/// Root page path with `section`'s fragment.
pub fn home_section_href(section: Section) -> String {
    format!("/#{}", section.anchor())
}

/// A parsed page address: route plus optional fragment (without `#`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub route: Route,
    pub fragment: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot parse location {input:?}: {message}")]
pub struct LocationError {
    pub input: String,
    pub message: String,
}

impl Location {
    pub fn home() -> Self {
        Self::default()
    }

    /// Parses a site-relative address such as `/projects/my-app#contact`.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let base = Url::parse(BASE).map_err(|err| LocationError {
            input: input.to_string(),
            message: err.to_string(),
        })?;
        let url = base.join(input).map_err(|err| LocationError {
            input: input.to_string(),
            message: err.to_string(),
        })?;
        let fragment = url
            .fragment()
            .filter(|f| !f.is_empty())
            .map(|f| decode(f).into_owned());
        Ok(Self {
            route: route_for_path(url.path()),
            fragment,
        })
    }

    /// The fragment as a CSS id selector.
    pub fn fragment_selector(&self) -> Option<String> {
        self.fragment.as_ref().map(|f| format!("#{f}"))
    }
}

fn route_for_path(path: &str) -> Route {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Route::Home;
    }
    let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["projects", slug] if !slug.is_empty() => Route::ProjectDetail {
            slug: decode(slug).into_owned(),
        },
        _ => Route::NotFound {
            path: path.to_string(),
        },
    }
}

fn decode(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(std::borrow::Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_with_fragment() {
        let location = Location::parse("/#contact").unwrap();
        assert_eq!(location.route, Route::Home);
        assert_eq!(location.fragment.as_deref(), Some("contact"));
        assert_eq!(location.fragment_selector().as_deref(), Some("#contact"));
    }

    #[test]
    fn project_slug_is_percent_decoded() {
        let location = Location::parse("/projects/caf%C3%A9-app/").unwrap();
        assert_eq!(
            location.route,
            Route::ProjectDetail {
                slug: "café-app".into()
            }
        );
        assert_eq!(location.fragment, None);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for input in ["/projects", "/projects/a/b", "/blog"] {
            assert!(
                matches!(Location::parse(input).unwrap().route, Route::NotFound { .. }),
                "input {input}"
            );
        }
    }

    #[test]
    fn empty_fragment_is_ignored() {
        assert_eq!(Location::parse("/#").unwrap().fragment, None);
    }
}
