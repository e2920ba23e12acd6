//! Program commands

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use bounty_board::models::{NewProgram, Program, ProgramPatch, ProgramStatus, RewardType};
use bounty_board::{ApiClient, ProgramsApi};

use crate::style::*;

#[derive(Subcommand)]
pub enum ProgramAction {
    /// List all visible programs
    #[command(visible_alias = "ls")]
    List {
        /// Filter by status (DRAFT, ACTIVE, PAUSED, COMPLETED, ARCHIVED)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Programs currently open for participation
    Active,

    /// Programs owned by the signed-in startup
    Mine,

    /// Show one program
    Show {
        /// Program id
        id: String,
    },

    /// Create a new program (interactive, starts in DRAFT)
    Create,

    /// Update program fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        min_reward: Option<f64>,
        #[arg(long)]
        max_reward: Option<f64>,
    },

    /// Change a program's status
    SetStatus {
        id: String,
        /// Target status (DRAFT, ACTIVE, PAUSED, COMPLETED, ARCHIVED)
        status: String,
    },

    /// Delete a DRAFT program
    #[command(visible_alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Join a program as a hacker
    Join {
        id: String,
    },

    /// Check whether you already participate in a program
    Check {
        id: String,
    },
}

pub async fn run(api: &ApiClient, action: ProgramAction) -> Result<()> {
    let programs = ProgramsApi::new(api);

    match action {
        ProgramAction::List { status } => {
            let status = parse_status(status.as_deref())?;
            let pb = spinner("Fetching programs...");
            let list = programs.list(status).await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ProgramAction::Active => {
            let pb = spinner("Fetching active programs...");
            let list = programs.active().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ProgramAction::Mine => {
            let pb = spinner("Fetching your programs...");
            let list = programs.mine().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ProgramAction::Show { id } => {
            let pb = spinner("Fetching program...");
            let program = programs.get(&id).await;
            pb.finish_and_clear();
            print_details(&program?);
        }
        ProgramAction::Create => {
            let new_program = prompt_new_program()?;
            let pb = spinner("Creating program...");
            let created = programs.create(&new_program).await;
            pb.finish_and_clear();
            let created = created?;
            print_success(&format!("Created program {} in DRAFT", created.id));
            println!("  Publish it with:");
            println!("    bounty programs set-status {} ACTIVE", created.id);
        }
        ProgramAction::Update {
            id,
            title,
            description,
            scope,
            min_reward,
            max_reward,
        } => {
            let patch = ProgramPatch {
                title,
                description,
                scope,
                min_reward,
                max_reward,
                ..Default::default()
            };
            let pb = spinner("Updating program...");
            let updated = programs.update(&id, &patch).await;
            pb.finish_and_clear();
            print_success(&format!("Updated program {}", updated?.id));
        }
        ProgramAction::SetStatus { id, status } => {
            let to: ProgramStatus = status.parse().map_err(|e: String| anyhow!(e))?;

            // Fetch the current status so the transition is checked locally
            let pb = spinner("Fetching program...");
            let current = programs.get(&id).await;
            pb.finish_and_clear();
            let current = current?;

            let pb = spinner("Updating status...");
            let updated = programs.update_status(&id, current.status, to).await;
            pb.finish_and_clear();
            let updated = updated?;
            print_success(&format!(
                "Program {} is now {}",
                updated.id,
                program_status(updated.status)
            ));
        }
        ProgramAction::Delete { id, yes } => {
            let pb = spinner("Fetching program...");
            let program = programs.get(&id).await;
            pb.finish_and_clear();
            let program = program?;

            if !program.status.is_deletable() {
                print_warning(&format!(
                    "Program {} is {}; published programs are archived, not deleted.",
                    id,
                    program_status(program.status)
                ));
                return Ok(());
            }

            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("  Delete draft program '{}'?", program.title))
                    .default(false)
                    .interact()?;
            if !confirmed {
                print_info("Cancelled.");
                return Ok(());
            }

            let pb = spinner("Deleting program...");
            let result = programs.delete(&id).await;
            pb.finish_and_clear();
            result?;
            print_success(&format!("Deleted program {}", id));
        }
        ProgramAction::Join { id } => {
            let pb = spinner("Joining program...");
            let result = programs.join(&id).await;
            pb.finish_and_clear();
            result?;
            print_success(&format!("Joined program {}", id));
        }
        ProgramAction::Check { id } => {
            let pb = spinner("Checking participation...");
            let joined = programs.check_participation(&id).await;
            pb.finish_and_clear();
            if joined? {
                print_success("You participate in this program.");
            } else {
                print_info("You have not joined this program yet.");
            }
        }
    }

    Ok(())
}

fn parse_status(status: Option<&str>) -> Result<Option<ProgramStatus>> {
    status
        .map(|s| s.parse::<ProgramStatus>().map_err(|e| anyhow!(e)))
        .transpose()
}

fn print_table(programs: &[Program]) {
    if programs.is_empty() {
        print_info("No programs found.");
        return;
    }

    println!();
    println!(
        "{:<14}  {:<32}  {:<10}  {:>8}  {:>8}  Type",
        "Id", "Title", "Status", "Min", "Max"
    );
    println!("{}", "─".repeat(88));

    for program in programs {
        let title = truncate_title(&program.title, 32);
        println!(
            "{:<14}  {:<32}  {:<10}  {:>8.0}  {:>8.0}  {}",
            style_dim(&truncate_id(&program.id)),
            title,
            program_status(program.status),
            program.min_reward,
            program.max_reward,
            program.reward_type
        );
    }

    println!();
    println!("Total: {}", programs.len());
}

fn print_details(program: &Program) {
    print_header(&program.title);
    println!("Id:           {}", program.id);
    println!("Status:       {}", program_status(program.status));
    println!(
        "Rewards:      {} - {} ({})",
        program.min_reward, program.max_reward, program.reward_type
    );
    println!("Starts:       {}", program.start_date.format("%Y-%m-%d"));
    if let Some(end) = program.end_date {
        println!("Ends:         {}", end.format("%Y-%m-%d"));
    }
    if !program.vulnerability_types.is_empty() {
        println!("In scope:     {}", program.vulnerability_types.join(", "));
    }
    if let Some(scope) = &program.scope {
        println!();
        println!("{}", style_bold("Scope"));
        println!("{}", scope);
    }
    if let Some(out) = &program.out_of_scope {
        println!();
        println!("{}", style_bold("Out of scope"));
        println!("{}", out);
    }
    if !program.description.is_empty() {
        println!();
        println!("{}", program.description);
    }
}

fn prompt_new_program() -> Result<NewProgram> {
    let theme = ColorfulTheme::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt("  Title")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Title is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("  Description")
        .allow_empty(true)
        .interact_text()?;

    let min_reward: f64 = Input::with_theme(&theme)
        .with_prompt("  Minimum reward")
        .default(50.0)
        .interact_text()?;

    let max_reward: f64 = Input::with_theme(&theme)
        .with_prompt("  Maximum reward")
        .default(500.0)
        .validate_with(|input: &f64| -> Result<(), &str> {
            if *input < min_reward {
                Err("Maximum must not be below the minimum")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let reward_types = [
        RewardType::Cash,
        RewardType::Swag,
        RewardType::Both,
        RewardType::Kudos,
    ];
    let selected = Select::with_theme(&theme)
        .with_prompt("  Reward type")
        .items(&["CASH", "SWAG", "BOTH", "KUDOS"])
        .default(0)
        .interact()?;

    let vuln_types: String = Input::with_theme(&theme)
        .with_prompt("  In-scope vulnerability types (comma separated)")
        .allow_empty(true)
        .interact_text()?;
    let vulnerability_types: Vec<String> = vuln_types
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(NewProgram {
        title,
        description,
        scope: None,
        out_of_scope: None,
        min_reward,
        max_reward,
        reward_type: reward_types[selected],
        start_date: Utc::now(),
        end_date: None,
        vulnerability_types,
    })
}
