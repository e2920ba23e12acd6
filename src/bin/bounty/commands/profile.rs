//! Profile commands

use anyhow::Result;
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Input};

use bounty_board::models::{StartupProfile, StartupProfilePatch};
use bounty_board::{ApiClient, ProfileApi};

use crate::style::*;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your startup profile
    Show,

    /// Show your hacker profile
    Hacker,

    /// Create your startup profile (interactive)
    Create,

    /// Update startup profile fields
    Update {
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        team_size: Option<u32>,
    },
}

pub async fn run(api: &ApiClient, action: ProfileAction) -> Result<()> {
    let profiles = ProfileApi::new(api);

    match action {
        ProfileAction::Show => {
            let pb = spinner("Fetching profile...");
            let profile = profiles.startup().await;
            pb.finish_and_clear();
            let profile = profile?;

            print_header(&profile.company_name);
            if let Some(industry) = &profile.industry {
                println!("Industry:     {}", industry);
            }
            if let Some(location) = &profile.location {
                println!("Location:     {}", location);
            }
            if let Some(team_size) = profile.team_size {
                println!("Team size:    {}", team_size);
            }
            if let Some(revenue) = profile.yearly_revenue {
                println!("Revenue:      {:.0} USD/year", revenue);
            }
            if !profile.security_needs.is_empty() {
                println!("Needs:        {}", profile.security_needs.join(", "));
            }
            if let Some(description) = &profile.description {
                println!();
                println!("{}", description);
            }
        }
        ProfileAction::Hacker => {
            let pb = spinner("Fetching profile...");
            let profile = profiles.hacker().await;
            pb.finish_and_clear();
            let profile = profile?;

            print_header(&format!("@{}", profile.username));
            if let Some(reputation) = profile.reputation {
                println!("Reputation:   {:.1}", reputation);
            }
            if !profile.skills.is_empty() {
                println!("Skills:       {}", profile.skills.join(", "));
            }
            if let Some(bio) = &profile.bio {
                println!();
                println!("{}", bio);
            }
        }
        ProfileAction::Create => {
            let profile = prompt_profile()?;
            let pb = spinner("Creating profile...");
            let created = profiles.create_startup(&profile).await;
            pb.finish_and_clear();
            print_success(&format!("Profile created for {}", created?.company_name));
        }
        ProfileAction::Update {
            company_name,
            industry,
            description,
            location,
            team_size,
        } => {
            let patch = StartupProfilePatch {
                company_name,
                industry,
                description,
                location,
                team_size,
                ..Default::default()
            };
            let pb = spinner("Updating profile...");
            let updated = profiles.update_startup(&patch).await;
            pb.finish_and_clear();
            print_success(&format!("Profile updated for {}", updated?.company_name));
        }
    }

    Ok(())
}

fn prompt_profile() -> Result<StartupProfile> {
    let theme = ColorfulTheme::default();

    let company_name: String = Input::with_theme(&theme)
        .with_prompt("  Company name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Company name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let industry: String = Input::with_theme(&theme)
        .with_prompt("  Industry")
        .allow_empty(true)
        .interact_text()?;

    let location: String = Input::with_theme(&theme)
        .with_prompt("  Location")
        .allow_empty(true)
        .interact_text()?;

    let needs: String = Input::with_theme(&theme)
        .with_prompt("  Security needs (comma separated)")
        .allow_empty(true)
        .interact_text()?;
    let security_needs: Vec<String> = needs
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(StartupProfile {
        id: None,
        company_name,
        industry: if industry.is_empty() { None } else { Some(industry) },
        description: None,
        location: if location.is_empty() { None } else { Some(location) },
        team_size: None,
        security_needs,
        yearly_revenue: None,
        avatar_url: None,
    })
}
