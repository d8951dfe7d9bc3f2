//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{AtlanClient, ListRequest};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the tenant URL and API key, checks them with a one-record
/// group listing, then writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to atlanop!".bold().green());
    println!("Let's set up access to your Atlan tenant.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let theme = ColorfulTheme::default();
    let mut base_url_prompt = Input::<String>::with_theme(&theme)
        .with_prompt("Atlan tenant URL (e.g. https://acme.atlan.com)");
    if let Some(base_url) = opts.base_url.clone().or_else(|| config.base_url.clone()) {
        base_url_prompt = base_url_prompt.default(base_url);
    }
    let base_url = base_url_prompt.interact_text()?;

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your Atlan API key")
        .interact()?;

    println!("\n{}", "Checking credentials...".cyan());
    let client = AtlanClient::new(base_url.trim(), api_key.trim())?;
    let probe = client.list_groups(&ListRequest::groups().limit(1)).await?;
    println!("{}", "✓ Credentials accepted!".green());
    if let Some(total) = probe.total_count() {
        println!("Found {} groups on {}", total, client.base_url().bold());
    }

    config.base_url = Some(client.base_url().to_string());
    config.api_key = Some(api_key.trim().to_string());
    config.save_at(opts.config_ref())?;

    let config_path = match opts.config_ref() {
        Some(path) => std::path::PathBuf::from(path),
        None => Config::default_path()?,
    };
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - List groups", "atlanop group list".cyan());
    println!(
        "  {} - Check SSO group mappings",
        "atlanop sso diagnose --sso-alias <alias>".cyan()
    );

    Ok(())
}
