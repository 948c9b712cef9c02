use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::views::ProjectCard;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Structured error body for JSON output. Text mode has none: the binary
/// prints the returned error once on exit.
pub fn error_payload(output_format: &OutputFormat, message: &str) -> Option<Value> {
    match output_format {
        OutputFormat::Json => Some(json!({
            "success": false,
            "error": message
        })),
        OutputFormat::Text => None,
    }
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    if let Some(payload) = error_payload(output_format, message) {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(())
}

/// Output project cards as a JSON array or one block per project
pub fn output_cards(
    output_format: &OutputFormat,
    cards: &[ProjectCard],
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "projects": cards }))?);
        }
        OutputFormat::Text if cards.is_empty() => {
            println!("{}", empty_message);
        }
        OutputFormat::Text => {
            for card in cards {
                println!("{}  [{}]", card.title, card.id);
                println!("  By {} · {} views", card.creator, card.views);
                for (label, link) in [
                    ("Website", &card.website_url),
                    ("GitHub", &card.github_url),
                    ("X", &card.x_url),
                ] {
                    if let Some(link) = link {
                        println!("  {}: {}", label, link);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Ask for confirmation on stdin unless `assume_yes` is set
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{} [y/N] ", prompt);
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Read a secret from stdin when it was not passed as a flag
pub fn read_line_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => {
            eprint!("{}: ", prompt);
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}
