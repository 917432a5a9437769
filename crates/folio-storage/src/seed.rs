//! Built-in example projects used to seed an empty store.

use crate::models::{Project, ProjectCategory};

/// The fixed seed set, newest first. Returned when neither the remote
/// document nor the local cache has anything to show.
#[must_use]
pub fn initial_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1717200000000".to_string(),
            title: "Aegis Moderation Bot".to_string(),
            description: "Discord moderation suite with raid protection, audit logging and \
                          configurable auto-actions."
                .to_string(),
            category: ProjectCategory::DiscordBot,
            image_url: None,
            invite_link: Some("https://discord.com/oauth2/authorize?client_id=aegis".to_string()),
            demo_link: None,
            cost: Some("$50".to_string()),
            technologies: vec!["C#".to_string(), ".NET".to_string(), "Discord.Net".to_string()],
            created_at: 1_717_200_000_000,
        },
        Project {
            id: "1712000000000".to_string(),
            title: "SignalFlow Alerts".to_string(),
            description: "Telegram bot streaming market alerts with per-user watchlists and \
                          quiet hours."
                .to_string(),
            category: ProjectCategory::TelegramBot,
            image_url: None,
            invite_link: Some("https://t.me/signalflowbot".to_string()),
            demo_link: None,
            cost: Some("Contact for Quote".to_string()),
            technologies: vec!["Python".to_string(), "aiogram".to_string(), "Redis".to_string()],
            created_at: 1_712_000_000_000,
        },
        Project {
            id: "1708000000000".to_string(),
            title: "Orders Control Panel".to_string(),
            description: "Dashboard for tracking client orders, invoices and delivery status \
                          in one place."
                .to_string(),
            category: ProjectCategory::Panel,
            image_url: None,
            invite_link: None,
            demo_link: Some("https://panel-demo.osama.dev".to_string()),
            cost: Some("$120".to_string()),
            technologies: vec!["React".to_string(), "FastAPI".to_string(), "PostgreSQL".to_string()],
            created_at: 1_708_000_000_000,
        },
        Project {
            id: "1704067200000".to_string(),
            title: "Uptime Sentinel".to_string(),
            description: "Web service that pings endpoints on a schedule and reports outages \
                          to a webhook."
                .to_string(),
            category: ProjectCategory::WebService,
            image_url: None,
            invite_link: None,
            demo_link: None,
            cost: Some("Free".to_string()),
            technologies: vec!["Python".to_string(), "Django".to_string()],
            created_at: 1_704_067_200_000,
        },
    ]
}
