/// Project CRUD and gallery listing command handlers
use anyhow::Result;
use tabled::{Table, Tabled};

use folio_storage::models::{Project, ProjectCategory};
use folio_storage::Database;
use folio_sync::ReadMode;

use super::helpers::{open_reconciler, split_list, truncate_str};

#[derive(clap::Args, Debug)]
pub struct NewProjectArgs {
    /// Project title
    #[arg(short, long)]
    pub title: String,
    /// Project description
    #[arg(short, long)]
    pub description: String,
    /// One of: Discord Bot, Telegram Bot, Web Service, Panel, PC Software, AI Agent, Other
    #[arg(short, long)]
    pub category: String,
    /// Comma-separated technology labels
    #[arg(long, default_value = "")]
    pub technologies: String,
    /// Display cost, e.g. "$50" or "Contact for Quote"
    #[arg(long)]
    pub cost: Option<String>,
    /// Cover image URL
    #[arg(long)]
    pub image_url: Option<String>,
    /// Invite or download link
    #[arg(long)]
    pub invite_link: Option<String>,
    /// Demo or website link
    #[arg(long)]
    pub demo_link: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct EditProjectArgs {
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Comma-separated technology labels (replaces the list)
    #[arg(long)]
    pub technologies: Option<String>,
    /// New display cost
    #[arg(long)]
    pub cost: Option<String>,
    /// New cover image URL
    #[arg(long)]
    pub image_url: Option<String>,
    /// New invite or download link
    #[arg(long)]
    pub invite_link: Option<String>,
    /// New demo or website link
    #[arg(long)]
    pub demo_link: Option<String>,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Technologies")]
    technologies: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub async fn handle_list(category: Option<&str>, local: bool) -> Result<()> {
    let wanted = category.map(str::parse::<ProjectCategory>).transpose()?;

    let reconciler = open_reconciler()?;
    let mode = if local {
        ReadMode::LocalOnly
    } else {
        ReadMode::RemoteFirst
    };
    let mut projects = reconciler.get_projects(mode).await;
    if let Some(wanted) = wanted {
        projects.retain(|p| p.category == wanted);
    }

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|project| ProjectRow {
            id: project.id.clone(),
            title: truncate_str(&project.title, 30),
            category: project.category.to_string(),
            technologies: truncate_str(&project.technologies.join(", "), 30),
            cost: project.cost.clone().unwrap_or_else(|| "Contact Me".to_string()),
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
    println!("\n{} projects", projects.len());

    Ok(())
}

pub fn handle_show(id: &str) -> Result<()> {
    let db = Database::new(None)?;
    let Some(project) = db.get_project(id)? else {
        println!("No project with id {id}");
        return Ok(());
    };

    println!("{} ({})", project.title, project.category);
    println!("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}");
    println!("  id: {}", project.id);
    println!("  description: {}", project.description);
    println!("  technologies: {}", project.technologies.join(", "));
    println!("  cost: {}", project.cost.as_deref().unwrap_or("Contact Me"));
    if let Some(url) = &project.image_url {
        println!("  image: {url}");
    }
    if let Some(url) = &project.invite_link {
        println!("  invite: {url}");
    }
    if let Some(url) = &project.demo_link {
        println!("  demo: {url}");
    }

    Ok(())
}

pub fn handle_add(args: NewProjectArgs) -> Result<()> {
    let category: ProjectCategory = args.category.parse()?;

    let mut project = Project::new(args.title, args.description, category);
    project.technologies = split_list(&args.technologies);
    project.cost = args.cost;
    project.image_url = args.image_url;
    project.invite_link = args.invite_link;
    project.demo_link = args.demo_link;

    let reconciler = open_reconciler()?;
    reconciler.save_project(&project)?;
    println!("Added \"{}\" with id {}", project.title, project.id);
    println!("The edit is local; run 'folio publish' to push it to GitHub.");

    Ok(())
}

pub fn handle_edit(id: &str, args: EditProjectArgs) -> Result<()> {
    let reconciler = open_reconciler()?;
    let Some(mut project) = reconciler.store().get_project(id)? else {
        println!("No project with id {id}");
        return Ok(());
    };

    if let Some(title) = args.title {
        project.title = title;
    }
    if let Some(description) = args.description {
        project.description = description;
    }
    if let Some(category) = args.category {
        project.category = category.parse()?;
    }
    if let Some(technologies) = args.technologies {
        project.technologies = split_list(&technologies);
    }
    if let Some(cost) = args.cost {
        project.cost = Some(cost);
    }
    if let Some(url) = args.image_url {
        project.image_url = Some(url);
    }
    if let Some(url) = args.invite_link {
        project.invite_link = Some(url);
    }
    if let Some(url) = args.demo_link {
        project.demo_link = Some(url);
    }

    // Full-record replace; the id and creation timestamp never change
    reconciler.save_project(&project)?;
    println!("Updated \"{}\"", project.title);
    println!("The edit is local; run 'folio publish' to push it to GitHub.");

    Ok(())
}

pub fn handle_categories() -> Result<()> {
    println!("Project Categories");
    println!("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}");
    for category in ProjectCategory::ALL {
        println!("  {category}");
    }
    Ok(())
}

pub fn handle_delete(id: &str) -> Result<()> {
    let reconciler = open_reconciler()?;
    if reconciler.delete_project(id)? {
        println!("Deleted project {id}");
        println!("The edit is local; run 'folio publish' to push it to GitHub.");
    } else {
        println!("No project with id {id}");
    }

    Ok(())
}
