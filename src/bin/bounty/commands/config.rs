//! Config command - show effective configuration

use anyhow::Result;
use bounty_board::Config;

use crate::style::*;

pub fn run(config: &Config, base_url: &str) -> Result<()> {
    print_header("Bounty Board Configuration");

    println!();
    println!("API URL:          {}", style_cyan(base_url));
    println!("Timeout:          {}s", config.api.timeout_secs);
    println!(
        "Token file:       {}",
        style_dim(&config.token_path().display().to_string())
    );

    println!();
    println!("{}", style_bold("Environment overrides:"));
    println!("  BOUNTY_API_URL     API base URL");
    println!("  BOUNTY_TOKEN_PATH  session token location");

    Ok(())
}
