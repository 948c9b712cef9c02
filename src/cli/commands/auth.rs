use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success, read_line_if_missing};
use crate::cli::Context;
use crate::views::{capture_oauth_redirect, oauth_start_url, LoginForm, OAuthProvider, Route};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session token")]
    Logout,

    #[command(about = "Show whether a session token is stored")]
    Status,

    #[command(about = "Print the provider login URL to open in a browser")]
    OauthUrl {
        #[arg(help = "Provider: google or github")]
        provider: OAuthProvider,
    },

    #[command(about = "Store the token from an OAuth success redirect URL")]
    OauthCapture {
        #[arg(help = "Redirect URL or query string containing token=...")]
        redirect: String,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = read_line_if_missing(password, "Password")?;
            let mut form = LoginForm::new(email, password);
            match form.submit(&ctx.api, ctx.tokens.as_ref(), &ctx.loading).await {
                Ok(route) => output_success(
                    &ctx.output,
                    "Logged in",
                    Some(json!({ "next": route.path() })),
                ),
                Err(e) => {
                    output_error(&ctx.output, &e.display_message())?;
                    Err(e.into())
                }
            }
        }
        AuthCommands::Logout => {
            ctx.tokens.clear()?;
            output_success(&ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            let logged_in = ctx.tokens.is_logged_in();
            let message = if logged_in { "Logged in" } else { "Not logged in" };
            output_success(&ctx.output, message, Some(json!({ "logged_in": logged_in })))
        }
        AuthCommands::OauthUrl { provider } => {
            let url = oauth_start_url(ctx.api.base_url(), provider);
            output_success(&ctx.output, url.as_str(), Some(json!({ "url": url.as_str() })))
        }
        AuthCommands::OauthCapture { redirect } => {
            match capture_oauth_redirect(&redirect, ctx.tokens.as_ref())? {
                Route::Dashboard => output_success(&ctx.output, "Session stored", None),
                _ => {
                    output_error(&ctx.output, "Redirect did not contain a token")?;
                    anyhow::bail!("Redirect did not contain a token")
                }
            }
        }
    }
}
