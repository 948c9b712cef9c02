use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::utils::{confirm, output_cards, output_error, output_success};
use crate::cli::Context;
use crate::projects::SortMode;
use crate::types::{ProjectFields, ProjectId};
use crate::views::{require_session, CreateProjectForm, DashboardView};

#[derive(Args)]
pub struct LinkArgs {
    #[arg(long, help = "Website URL")]
    website: Option<String>,
    #[arg(long, help = "GitHub URL")]
    github: Option<String>,
    #[arg(long = "x-profile", help = "X (Twitter) profile URL")]
    x_profile: Option<String>,
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "List your projects")]
    List {
        #[arg(long, help = "most-viewed, latest or past (server order if omitted)")]
        sort: Option<SortMode>,
        #[arg(long, help = "Filter by title, creator or links")]
        search: Option<String>,
    },

    #[command(about = "Create a project")]
    Create {
        #[arg(long, help = "Project title")]
        title: String,
        #[command(flatten)]
        links: LinkArgs,
    },

    #[command(about = "Edit a project; omitted fields keep their current value")]
    Edit {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long, help = "Project title")]
        title: Option<String>,
        #[command(flatten)]
        links: LinkArgs,
    },

    #[command(about = "Delete a project")]
    Delete {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

async fn open_dashboard(ctx: &Context) -> anyhow::Result<DashboardView> {
    if let Err(route) = require_session(ctx.tokens.as_ref()) {
        output_error(&ctx.output, "Not logged in")?;
        anyhow::bail!("Not logged in; run `projcart auth login` first ({})", route.path());
    }
    let mut view = DashboardView::new(ctx.loading.clone());
    if view.load(&ctx.api).await.is_err() {
        let message = view.error().unwrap_or("Failed to load projects").to_string();
        output_error(&ctx.output, &message)?;
        anyhow::bail!(message);
    }
    Ok(view)
}

pub async fn handle(cmd: DashboardCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        DashboardCommands::List { sort, search } => {
            let mut view = open_dashboard(ctx).await?;
            view.set_sort(sort);
            view.set_search(search.unwrap_or_default());
            output_cards(
                &ctx.output,
                &view.cards(&ctx.config.display.screenshot_service),
                "No projects yet. Create one with `projcart dashboard create`.",
            )
        }
        DashboardCommands::Create { title, links } => {
            require_session(ctx.tokens.as_ref())
                .map_err(|_| anyhow::anyhow!("Not logged in; run `projcart auth login` first"))?;
            let mut form = CreateProjectForm::new(ProjectFields {
                title,
                website: links.website.unwrap_or_default(),
                github: links.github.unwrap_or_default(),
                x_profile: links.x_profile.unwrap_or_default(),
            });
            match form.submit(&ctx.api, &ctx.loading).await {
                Ok((project, _)) => output_success(
                    &ctx.output,
                    &format!("Project '{}' created", project.title),
                    Some(json!({ "project": project })),
                ),
                Err(e) => {
                    output_error(&ctx.output, &e.display_message())?;
                    Err(e.into())
                }
            }
        }
        DashboardCommands::Edit { id, title, links } => {
            let mut view = open_dashboard(ctx).await?;
            let id = ProjectId::from(id);
            if !view.open_edit(&id) {
                output_error(&ctx.output, &format!("Project '{}' not found", id))?;
                anyhow::bail!("Project '{}' not found", id);
            }
            if let Some(fields) = view.edit_fields_mut() {
                if let Some(title) = title {
                    fields.title = title;
                }
                if let Some(website) = links.website {
                    fields.website = website;
                }
                if let Some(github) = links.github {
                    fields.github = github;
                }
                if let Some(x_profile) = links.x_profile {
                    fields.x_profile = x_profile;
                }
            }
            match view.save_edit(&ctx.api).await {
                Ok(_) => {
                    let project = view.projects().get(&id);
                    output_success(
                        &ctx.output,
                        &format!("Project '{}' updated", id),
                        Some(json!({ "project": project })),
                    )
                }
                Err(e) => {
                    output_error(&ctx.output, &e.display_message())?;
                    Err(e.into())
                }
            }
        }
        DashboardCommands::Delete { id, yes } => {
            let mut view = open_dashboard(ctx).await?;
            let id = ProjectId::from(id);
            view.open_delete(&id);
            let prompt = format!(
                "Delete project '{}'? This will permanently delete the project and its metadata.",
                id
            );
            if !confirm(&prompt, yes)? {
                view.close_delete();
                return output_success(&ctx.output, "Cancelled", None);
            }
            match view.confirm_delete(&ctx.api).await {
                Ok(_) => output_success(
                    &ctx.output,
                    &format!("Project '{}' deleted", id),
                    Some(json!({ "remaining": view.count() })),
                ),
                Err(e) => {
                    output_error(&ctx.output, &e.message)?;
                    Err(e.into())
                }
            }
        }
    }
}
