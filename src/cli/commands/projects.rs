use clap::Subcommand;

use crate::cli::utils::{output_cards, output_error};
use crate::cli::Context;
use crate::projects::SortMode;
use crate::views::{DirectoryView, HomeView, ProjectCard};

#[derive(Subcommand)]
pub enum ProjectsCommands {
    #[command(about = "List all public projects")]
    List {
        #[arg(long, default_value = "most-viewed", help = "most-viewed, latest or past")]
        sort: SortMode,
        #[arg(long, help = "Filter by title, creator or links")]
        search: Option<String>,
    },

    #[command(about = "Show the most viewed projects")]
    Popular,
}

pub async fn handle(cmd: ProjectsCommands, ctx: &Context) -> anyhow::Result<()> {
    let screenshots = &ctx.config.display.screenshot_service;
    match cmd {
        ProjectsCommands::List { sort, search } => {
            let mut view = DirectoryView::new(ctx.loading.clone());
            if let Err(e) = view.load(&ctx.api).await {
                output_error(&ctx.output, &e.message)?;
                return Err(e.into());
            }
            view.set_sort(sort);
            view.set_search(search.unwrap_or_default());
            output_cards(&ctx.output, &view.cards(screenshots), "No projects found.")
        }
        ProjectsCommands::Popular => {
            let mut view = HomeView::new(ctx.config.display.popular_count, ctx.loading.clone());
            view.load(&ctx.api).await;
            let cards: Vec<ProjectCard> = view
                .popular()
                .into_iter()
                .map(|p| ProjectCard::new(p, screenshots))
                .collect();
            if matches!(ctx.output, crate::cli::OutputFormat::Text) {
                println!("Projects live: {}", view.project_count());
            }
            output_cards(&ctx.output, &cards, "No projects yet.")
        }
    }
}
