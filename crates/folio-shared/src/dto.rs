//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use folio_core::domain::{Portfolio, PortfolioContent, Project, SocialLink, LIST_SEPARATOR};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
}

/// Response containing the issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
}

/// One line of a user's portfolio listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub id: String,
    pub full_name: String,
}

/// Response for the current-user endpoint: profile plus portfolio listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub portfolios: Vec<PortfolioSummary>,
}

/// A project as submitted or returned over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A social link as submitted or returned over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinkDto {
    pub platform: String,
    pub url: String,
}

/// The JSON part of a portfolio create/update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioPayload {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub spoken_languages: Vec<String>,
    #[serde(default)]
    pub programming_languages: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectDto>,
    #[serde(default)]
    pub social_links: Vec<SocialLinkDto>,
}

impl PortfolioPayload {
    /// Shape validation performed before any repository call.
    /// Returns every field-level problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push("full_name: must not be empty".to_string());
        }

        for (field, list) in [
            ("technologies", &self.technologies),
            ("spoken_languages", &self.spoken_languages),
            ("programming_languages", &self.programming_languages),
        ] {
            for item in list {
                if item.contains(LIST_SEPARATOR) {
                    errors.push(format!(
                        "{field}: element {item:?} must not contain '{LIST_SEPARATOR}'"
                    ));
                }
            }
        }

        for (i, project) in self.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                errors.push(format!("projects[{i}].title: must not be empty"));
            }
        }

        for (i, link) in self.social_links.iter().enumerate() {
            if link.platform.trim().is_empty() {
                errors.push(format!("social_links[{i}].platform: must not be empty"));
            }
            if url::Url::parse(&link.url).is_err() {
                errors.push(format!(
                    "social_links[{i}].url: {:?} is not a well-formed URL",
                    link.url
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Convert the validated payload into domain content.
    pub fn into_content(self) -> PortfolioContent {
        PortfolioContent {
            full_name: self.full_name,
            description: self.description,
            technologies: self.technologies,
            spoken_languages: self.spoken_languages,
            programming_languages: self.programming_languages,
            projects: self.projects.into_iter().map(ProjectDto::into_domain).collect(),
            social_links: self
                .social_links
                .into_iter()
                .map(SocialLinkDto::into_domain)
                .collect(),
        }
    }
}

impl ProjectDto {
    fn into_domain(self) -> Project {
        Project {
            title: self.title,
            description: self.description,
            technologies: self.technologies,
            year: self.year,
            image_url: self.image_url,
        }
    }

    fn from_domain(project: Project) -> Self {
        Self {
            title: project.title,
            description: project.description,
            technologies: project.technologies,
            year: project.year,
            image_url: project.image_url,
        }
    }
}

impl SocialLinkDto {
    fn into_domain(self) -> SocialLink {
        SocialLink {
            platform: self.platform,
            url: self.url,
        }
    }

    fn from_domain(link: SocialLink) -> Self {
        Self {
            platform: link.platform,
            url: link.url,
        }
    }
}

/// Response to a successful portfolio creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPortfolioResponse {
    pub id: String,
    pub cv_path: Option<String>,
    pub image_path: Option<String>,
}

/// Full portfolio view with decoded lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub programming_languages: Vec<String>,
    pub projects: Vec<ProjectDto>,
    pub social_links: Vec<SocialLinkDto>,
    pub cv_path: Option<String>,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(portfolio: Portfolio) -> Self {
        Self {
            id: portfolio.id.to_string(),
            user_id: portfolio.user_id.to_string(),
            full_name: portfolio.full_name,
            description: portfolio.description,
            technologies: portfolio.technologies,
            spoken_languages: portfolio.spoken_languages,
            programming_languages: portfolio.programming_languages,
            projects: portfolio
                .projects
                .into_iter()
                .map(ProjectDto::from_domain)
                .collect(),
            social_links: portfolio
                .social_links
                .into_iter()
                .map(SocialLinkDto::from_domain)
                .collect(),
            cv_path: portfolio.cv_path,
            image_path: portfolio.image_path,
            created_at: portfolio.created_at.to_rfc3339(),
            updated_at: portfolio.updated_at.to_rfc3339(),
        }
    }
}
