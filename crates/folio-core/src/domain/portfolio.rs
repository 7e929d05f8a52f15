//! Portfolio entity and its embedded value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator used when flattening string lists into a single text column.
/// List elements must not contain it; the input boundary rejects them.
pub const LIST_SEPARATOR: char = ',';

/// A project embedded in a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
}

/// A social link embedded in a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// The caller-supplied portion of a portfolio. Updates are full overwrites
/// of exactly these fields, so they travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioContent {
    pub full_name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub programming_languages: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
}

/// Portfolio entity - one user's portfolio page.
///
/// File attachments are stored on disk; the entity only carries the stored
/// paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub programming_languages: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
    pub cv_path: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    /// Create a new portfolio for a user with generated ID and timestamps.
    pub fn new(user_id: Uuid, content: PortfolioContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name: content.full_name,
            description: content.description,
            technologies: content.technologies,
            spoken_languages: content.spoken_languages,
            programming_languages: content.programming_languages,
            projects: content.projects,
            social_links: content.social_links,
            cv_path: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all caller-supplied fields and bump `updated_at`.
    /// Stored file paths and ownership are untouched.
    pub fn overwrite(&mut self, content: PortfolioContent) {
        self.full_name = content.full_name;
        self.description = content.description;
        self.technologies = content.technologies;
        self.spoken_languages = content.spoken_languages;
        self.programming_languages = content.programming_languages;
        self.projects = content.projects;
        self.social_links = content.social_links;
        self.updated_at = Utc::now();
    }
}

/// Flatten an ordered string list into a single separator-joined text value.
pub fn encode_list(items: &[String]) -> String {
    items.join(&LIST_SEPARATOR.to_string())
}

/// Restore an ordered string list from its separator-joined text value.
/// The empty string decodes to the empty list.
pub fn decode_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LIST_SEPARATOR).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_round_trip_preserves_order() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(decode_list(&encode_list(&items)), items);
    }

    #[test]
    fn empty_list_round_trip() {
        let items: Vec<String> = Vec::new();
        assert_eq!(encode_list(&items), "");
        assert_eq!(decode_list(""), items);
    }

    #[test]
    fn single_element_list() {
        let items = vec!["rust".to_string()];
        assert_eq!(decode_list(&encode_list(&items)), items);
    }

    #[test]
    fn project_json_round_trip() {
        let projects = vec![
            Project {
                title: "folio".to_string(),
                description: Some("portfolio backend".to_string()),
                technologies: vec!["rust".to_string(), "actix".to_string()],
                year: Some(2025),
                image_url: None,
            },
            Project {
                title: "untitled".to_string(),
                description: None,
                technologies: Vec::new(),
                year: None,
                image_url: Some("https://example.com/shot.png".to_string()),
            },
        ];

        let json = serde_json::to_string(&projects).unwrap();
        let decoded: Vec<Project> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, projects);
    }

    #[test]
    fn social_link_json_round_trip() {
        let links = vec![SocialLink {
            platform: "github".to_string(),
            url: "https://github.com/alice".to_string(),
        }];

        let json = serde_json::to_string(&links).unwrap();
        let decoded: Vec<SocialLink> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, links);
    }

    #[test]
    fn overwrite_replaces_content_but_keeps_paths() {
        let user_id = Uuid::new_v4();
        let mut portfolio = Portfolio::new(
            user_id,
            PortfolioContent {
                full_name: "Alice".to_string(),
                description: None,
                technologies: vec!["rust".to_string()],
                spoken_languages: Vec::new(),
                programming_languages: Vec::new(),
                projects: Vec::new(),
                social_links: Vec::new(),
            },
        );
        portfolio.cv_path = Some("cv_x_resume.pdf".to_string());
        let id = portfolio.id;

        portfolio.overwrite(PortfolioContent {
            full_name: "Alice B.".to_string(),
            description: Some("hello".to_string()),
            technologies: Vec::new(),
            spoken_languages: vec!["english".to_string()],
            programming_languages: vec!["rust".to_string()],
            projects: Vec::new(),
            social_links: Vec::new(),
        });

        assert_eq!(portfolio.id, id);
        assert_eq!(portfolio.user_id, user_id);
        assert_eq!(portfolio.full_name, "Alice B.");
        assert_eq!(portfolio.cv_path.as_deref(), Some("cv_x_resume.pdf"));
        assert!(portfolio.technologies.is_empty());
    }
}
