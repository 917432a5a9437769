use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portfolio entry - the sole persisted entity.
///
/// Field names on the wire keep the canonical document's camelCase keys so
/// a published `projects.json` stays readable by existing deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "inviteLink", default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(rename = "demoLink", default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    pub technologies: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Project {
    /// Create a new project. The id is assigned from the creation timestamp
    /// (epoch milliseconds) and never reassigned afterwards.
    #[must_use]
    pub fn new(title: String, description: String, category: ProjectCategory) -> Self {
        let created_at = Utc::now().timestamp_millis();
        Self {
            id: created_at.to_string(),
            title,
            description,
            category,
            image_url: None,
            invite_link: None,
            demo_link: None,
            cost: None,
            technologies: Vec::new(),
            created_at,
        }
    }
}

/// Closed set of gallery labels a project can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[serde(rename = "Discord Bot")]
    DiscordBot,
    #[serde(rename = "Telegram Bot")]
    TelegramBot,
    #[serde(rename = "Web Service")]
    WebService,
    Panel,
    #[serde(rename = "PC Software")]
    PcSoftware,
    #[serde(rename = "AI Agent")]
    AiAgent,
    Other,
}

impl ProjectCategory {
    /// Every category, in gallery display order.
    pub const ALL: [Self; 7] = [
        Self::DiscordBot,
        Self::TelegramBot,
        Self::WebService,
        Self::Panel,
        Self::PcSoftware,
        Self::AiAgent,
        Self::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DiscordBot => "Discord Bot",
            Self::TelegramBot => "Telegram Bot",
            Self::WebService => "Web Service",
            Self::Panel => "Panel",
            Self::PcSoftware => "PC Software",
            Self::AiAgent => "AI Agent",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {wanted}"))
    }
}

/// Where remote reads and publishes go. Persisted locally as a unit;
/// an empty token or repo disables remote publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub token: String,
    pub repo: String,
    pub branch: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            repo: String::new(),
            branch: "main".to_string(),
        }
    }
}

impl SyncConfig {
    /// Whether enough is configured to push to the remote repository.
    #[must_use]
    pub fn can_publish(&self) -> bool {
        !self.token.is_empty() && !self.repo.is_empty()
    }
}

/// Order a project set for display: newest first by creation timestamp.
pub fn sort_by_recency(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_round_trip() {
        for category in ProjectCategory::ALL {
            let parsed: ProjectCategory = category.label().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        let parsed: ProjectCategory = "discord bot".parse().unwrap();
        assert_eq!(parsed, ProjectCategory::DiscordBot);
        assert!("Mainframe".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn test_new_project_id_matches_created_at() {
        let project = Project::new(
            "Ticket Bot".to_string(),
            "Support tickets in threads".to_string(),
            ProjectCategory::DiscordBot,
        );
        assert_eq!(project.id, project.created_at.to_string());
    }

    #[test]
    fn test_project_serializes_with_wire_keys() {
        let mut project = Project::new(
            "Ticket Bot".to_string(),
            "Support tickets in threads".to_string(),
            ProjectCategory::DiscordBot,
        );
        project.image_url = Some("https://example.com/shot.png".to_string());

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["category"], "Discord Bot");
        assert_eq!(json["imageUrl"], "https://example.com/shot.png");
        assert!(json["createdAt"].is_i64());
        // Unset optional links stay out of the document entirely
        assert!(json.get("inviteLink").is_none());
        assert!(json.get("demoLink").is_none());
    }

    #[test]
    fn test_project_deserializes_canonical_document_entry() {
        let raw = r#"{
            "id": "1704067200000",
            "title": "Aegis",
            "description": "Moderation bot",
            "category": "Discord Bot",
            "inviteLink": "https://discord.gg/example",
            "technologies": ["C#", ".NET"],
            "createdAt": 1704067200000
        }"#;

        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.category, ProjectCategory::DiscordBot);
        assert_eq!(project.invite_link.as_deref(), Some("https://discord.gg/example"));
        assert_eq!(project.cost, None);
    }

    #[test]
    fn test_sort_by_recency_is_descending() {
        let mut projects = vec![
            Project {
                created_at: 100,
                ..Project::new("a".into(), String::new(), ProjectCategory::Other)
            },
            Project {
                created_at: 300,
                ..Project::new("b".into(), String::new(), ProjectCategory::Other)
            },
            Project {
                created_at: 200,
                ..Project::new("c".into(), String::new(), ProjectCategory::Other)
            },
        ];
        sort_by_recency(&mut projects);
        let order: Vec<i64> = projects.iter().map(|p| p.created_at).collect();
        assert_eq!(order, vec![300, 200, 100]);
    }

    #[test]
    fn test_sync_config_defaults_to_main_branch() {
        let config = SyncConfig::default();
        assert_eq!(config.branch, "main");
        assert!(!config.can_publish());

        let configured = SyncConfig {
            token: "ghp_example".to_string(),
            repo: "osama-dev/portfolio".to_string(),
            branch: "main".to_string(),
        };
        assert!(configured.can_publish());
    }
}
