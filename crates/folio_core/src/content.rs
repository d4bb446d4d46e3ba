use serde::Deserialize;

use crate::slug::{slugify, Slugged};

/// Which static content document a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentSource {
    Projects,
    Achievements,
}

impl ContentSource {
    pub const ALL: [ContentSource; 2] = [ContentSource::Projects, ContentSource::Achievements];

    /// File name of the document as served next to the site.
    pub fn file_name(self) -> &'static str {
        match self {
            ContentSource::Projects => "projects.json",
            ContentSource::Achievements => "achievements.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    #[serde(rename = "subTitle")]
    pub subtitle: String,
    pub image: String,
    pub category: String,
    pub date: String,
    #[serde(rename = "projectDescription")]
    pub description: String,
    #[serde(rename = "keyFeatureTitles")]
    pub feature_titles: Vec<String>,
    #[serde(rename = "keyFeatureDescription")]
    pub feature_descriptions: Vec<String>,
    #[serde(rename = "challengesFacedTitle")]
    pub challenge_titles: Vec<String>,
    #[serde(rename = "challengesFacedDescription")]
    pub challenge_descriptions: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(rename = "frontEnd")]
    pub front_end: Vec<String>,
    #[serde(rename = "backEnd")]
    pub back_end: Vec<String>,
    #[serde(rename = "databaseDeploy")]
    pub database_deploy: Vec<String>,
    pub live: String,
    pub github: String,
}

/// A title with its description, taken from two index-aligned lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub title: String,
    pub description: String,
}

/// Names a pair of parallel lists whose lengths disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentIssue {
    pub field: &'static str,
    pub titles: usize,
    pub descriptions: usize,
}

impl Project {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn features(&self) -> Vec<Pair> {
        pair_up(&self.feature_titles, &self.feature_descriptions)
    }

    pub fn challenges(&self) -> Vec<Pair> {
        pair_up(&self.challenge_titles, &self.challenge_descriptions)
    }

    /// Frontend, backend and deploy tags in that order.
    pub fn all_technologies(&self) -> impl Iterator<Item = &str> {
        self.front_end
            .iter()
            .chain(&self.back_end)
            .chain(&self.database_deploy)
            .map(String::as_str)
    }

    pub fn alignment_issues(&self) -> Vec<AlignmentIssue> {
        let mut issues = Vec::new();
        if self.feature_titles.len() != self.feature_descriptions.len() {
            issues.push(AlignmentIssue {
                field: "keyFeature",
                titles: self.feature_titles.len(),
                descriptions: self.feature_descriptions.len(),
            });
        }
        if self.challenge_titles.len() != self.challenge_descriptions.len() {
            issues.push(AlignmentIssue {
                field: "challengesFaced",
                titles: self.challenge_titles.len(),
                descriptions: self.challenge_descriptions.len(),
            });
        }
        issues
    }
}

impl Slugged for Project {
    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub title: String,
    pub subtitle: String,
    pub team: String,
    pub about: String,
    pub description: String,
    pub quote: String,
    pub learning: Vec<String>,
    pub banner: String,
    #[serde(rename = "supportingImage")]
    pub supporting_image: String,
    pub category: String,
    pub date: String,
}

impl Slugged for Achievement {
    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("{source_file} is not a valid content list: {message}")]
    Decode {
        source_file: &'static str,
        message: String,
    },
}

/// Decoded body of one content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPayload {
    Projects(Vec<Project>),
    Achievements(Vec<Achievement>),
}

impl ContentPayload {
    pub fn source(&self) -> ContentSource {
        match self {
            ContentPayload::Projects(_) => ContentSource::Projects,
            ContentPayload::Achievements(_) => ContentSource::Achievements,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ContentPayload::Projects(items) => items.len(),
            ContentPayload::Achievements(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses the JSON array served for `source`.
pub fn decode_content(source: ContentSource, bytes: &[u8]) -> Result<ContentPayload, ContentError> {
    let map_err = |err: serde_json::Error| ContentError::Decode {
        source_file: source.file_name(),
        message: err.to_string(),
    };
    match source {
        ContentSource::Projects => serde_json::from_slice(bytes)
            .map(ContentPayload::Projects)
            .map_err(map_err),
        ContentSource::Achievements => serde_json::from_slice(bytes)
            .map(ContentPayload::Achievements)
            .map_err(map_err),
    }
}

fn pair_up(titles: &[String], descriptions: &[String]) -> Vec<Pair> {
    let len = titles.len().max(descriptions.len());
    (0..len)
        .map(|i| Pair {
            title: titles.get(i).cloned().unwrap_or_default(),
            description: descriptions.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_keys_map_onto_fields() {
        let json = br#"[{
            "title": "My Cool App",
            "subTitle": "Sub",
            "projectDescription": "Desc",
            "keyFeatureTitles": ["A"],
            "keyFeatureDescription": ["a"],
            "frontEnd": ["React.js"],
            "databaseDeploy": ["Vercel"]
        }]"#;
        let ContentPayload::Projects(projects) =
            decode_content(ContentSource::Projects, json).unwrap()
        else {
            panic!("expected projects");
        };
        let project = &projects[0];
        assert_eq!(project.subtitle, "Sub");
        assert_eq!(project.description, "Desc");
        assert_eq!(project.live, "");
        assert_eq!(
            project.all_technologies().collect::<Vec<_>>(),
            vec!["React.js", "Vercel"]
        );
    }

    #[test]
    fn short_description_list_pads_with_empty_text() {
        let project = Project {
            feature_titles: vec!["One".into(), "Two".into()],
            feature_descriptions: vec!["first".into()],
            ..Project::default()
        };
        let features = project.features();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].description, "");
        assert_eq!(
            project.alignment_issues(),
            vec![AlignmentIssue {
                field: "keyFeature",
                titles: 2,
                descriptions: 1
            }]
        );
    }

    #[test]
    fn object_instead_of_array_is_a_decode_error() {
        let err = decode_content(ContentSource::Achievements, br#"{"title":"x"}"#).unwrap_err();
        assert!(err.to_string().starts_with("achievements.json"));
    }
}
