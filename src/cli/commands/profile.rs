use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{confirm, output_error, output_success};
use crate::cli::{Context, OutputFormat};
use crate::views::{require_session, ConfirmAction, ProfileView};

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show your profile")]
    Show,

    #[command(about = "Change your display name")]
    Rename {
        #[arg(help = "New display name")]
        name: String,
    },

    #[command(about = "Permanently delete your account and projects")]
    Delete {
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

async fn open_profile(ctx: &Context) -> anyhow::Result<ProfileView> {
    if require_session(ctx.tokens.as_ref()).is_err() {
        output_error(&ctx.output, "Not logged in")?;
        anyhow::bail!("Not logged in; run `projcart auth login` first");
    }
    let mut view = ProfileView::new(ctx.tokens.clone(), ctx.loading.clone());
    if view.load(&ctx.api).await.is_err() {
        let message = view.error().unwrap_or("Failed to load profile").to_string();
        output_error(&ctx.output, &message)?;
        anyhow::bail!(message);
    }
    Ok(view)
}

pub async fn handle(cmd: ProfileCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        ProfileCommands::Show => {
            let view = open_profile(ctx).await?;
            match (&ctx.output, view.user()) {
                (OutputFormat::Json, user) => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "user": user }))?);
                }
                (OutputFormat::Text, Some(user)) => {
                    println!("Name: {}", user.name);
                    if let Some(email) = &user.email {
                        println!("Email: {}", email);
                    }
                }
                (OutputFormat::Text, None) => println!("No profile information"),
            }
            Ok(())
        }
        ProfileCommands::Rename { name } => {
            let mut view = open_profile(ctx).await?;
            view.start_edit();
            view.set_name_input(name);
            match view.save_name(&ctx.api).await {
                Ok(()) => output_success(
                    &ctx.output,
                    &format!("Display name set to '{}'", view.name_input()),
                    Some(json!({ "user": view.user() })),
                ),
                Err(e) => {
                    output_error(&ctx.output, &e.display_message())?;
                    Err(e.into())
                }
            }
        }
        ProfileCommands::Delete { yes } => {
            let mut view = open_profile(ctx).await?;
            let action = ConfirmAction::Delete;
            view.open_confirm(action);
            let prompt = format!(
                "{}: {} This will permanently delete your account and projects.",
                action.title(),
                action.warning()
            );
            if !confirm(&prompt, yes)? {
                view.close_confirm();
                return output_success(&ctx.output, "Cancelled", None);
            }
            match view.confirm(&ctx.api).await {
                Ok(route) => output_success(
                    &ctx.output,
                    "Account deleted",
                    Some(json!({ "next": route.map(|r| r.path()) })),
                ),
                Err(e) => {
                    output_error(&ctx.output, &e.display_message())?;
                    Err(e.into())
                }
            }
        }
    }
}
