//! Report commands

use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use bounty_board::models::{NewReport, Report, ReportPatch, ReportStatus, Severity};
use bounty_board::{ApiClient, ReportsApi};

use crate::style::*;

#[derive(Subcommand)]
pub enum ReportAction {
    /// List all reports visible to you
    #[command(visible_alias = "ls")]
    List {
        /// Filter by status (PENDING, ACCEPTED, REJECTED, DUPLICATE, INFORMATIVE, FIXED)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Reports you submitted
    Mine,

    /// Reports against one program
    ByProgram {
        /// Program id
        program_id: String,
    },

    /// Show one report
    Show {
        id: String,
    },

    /// Submit a report against a program (interactive)
    Submit {
        /// Target program id
        program_id: String,
    },

    /// Update report fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        impact: Option<String>,
    },

    /// Triage a report into a new status
    SetStatus {
        id: String,
        /// Target status (ACCEPTED, REJECTED, DUPLICATE, INFORMATIVE, FIXED)
        status: String,
        /// Review notes attached to the decision
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete one of your PENDING reports
    #[command(visible_alias = "rm")]
    Delete {
        id: String,
    },
}

pub async fn run(api: &ApiClient, action: ReportAction) -> Result<()> {
    let reports = ReportsApi::new(api);

    match action {
        ReportAction::List { status } => {
            let status = status
                .map(|s| s.parse::<ReportStatus>().map_err(|e| anyhow!(e)))
                .transpose()?;
            let pb = spinner("Fetching reports...");
            let list = reports.list(status).await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ReportAction::Mine => {
            let pb = spinner("Fetching your reports...");
            let list = reports.mine().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ReportAction::ByProgram { program_id } => {
            let pb = spinner("Fetching program reports...");
            let list = reports.by_program(&program_id).await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        ReportAction::Show { id } => {
            let pb = spinner("Fetching report...");
            let report = reports.get(&id).await;
            pb.finish_and_clear();
            print_details(&report?);
        }
        ReportAction::Submit { program_id } => {
            let new_report = prompt_new_report(program_id)?;
            let pb = spinner("Submitting report...");
            let created = reports.create(&new_report).await;
            pb.finish_and_clear();
            let created = created?;
            print_success(&format!(
                "Report {} submitted, awaiting triage.",
                created.id
            ));
        }
        ReportAction::Update {
            id,
            title,
            description,
            impact,
        } => {
            let patch = ReportPatch {
                title,
                description,
                impact,
                ..Default::default()
            };
            let pb = spinner("Updating report...");
            let updated = reports.update(&id, &patch).await;
            pb.finish_and_clear();
            print_success(&format!("Updated report {}", updated?.id));
        }
        ReportAction::SetStatus { id, status, notes } => {
            let to: ReportStatus = status.parse().map_err(|e: String| anyhow!(e))?;

            // Fetch the current status so the transition is checked locally
            let pb = spinner("Fetching report...");
            let current = reports.get(&id).await;
            pb.finish_and_clear();
            let current = current?;

            let pb = spinner("Updating status...");
            let updated = reports
                .update_status(&id, current.status, to, notes.as_deref())
                .await;
            pb.finish_and_clear();
            let updated = updated?;
            print_success(&format!(
                "Report {} is now {}",
                updated.id,
                report_status(updated.status)
            ));
        }
        ReportAction::Delete { id } => {
            let pb = spinner("Deleting report...");
            let result = reports.delete(&id).await;
            pb.finish_and_clear();
            result?;
            print_success(&format!("Deleted report {}", id));
        }
    }

    Ok(())
}

fn print_table(reports: &[Report]) {
    if reports.is_empty() {
        print_info("No reports found.");
        return;
    }

    println!();
    println!(
        "{:<14}  {:<36}  {:<11}  {:<8}  Program",
        "Id", "Title", "Status", "Severity"
    );
    println!("{}", "─".repeat(92));

    for report in reports {
        let title = truncate_title(&report.title, 36);
        let severity = report
            .severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<14}  {:<36}  {:<11}  {:<8}  {}",
            style_dim(&truncate_id(&report.id)),
            title,
            report_status(report.status),
            severity,
            style_dim(&truncate_id(&report.program_id))
        );
    }

    println!();
    println!("Total: {}", reports.len());
}

fn print_details(report: &Report) {
    print_header(&report.title);
    println!("Id:           {}", report.id);
    println!("Program:      {}", report.program_id);
    println!("Status:       {}", report_status(report.status));
    if let Some(severity) = report.severity {
        println!("Severity:     {}", severity);
    }
    if let Some(impact) = &report.impact {
        println!();
        println!("{}", style_bold("Impact"));
        println!("{}", impact);
    }
    if let Some(steps) = &report.steps_to_reproduce {
        println!();
        println!("{}", style_bold("Steps to reproduce"));
        println!("{}", steps);
    }
    if let Some(fix) = &report.fix_recommendation {
        println!();
        println!("{}", style_bold("Fix recommendation"));
        println!("{}", fix);
    }
    if !report.proof_urls.is_empty() {
        println!();
        println!("{}", style_bold("Proof of concept"));
        for url in &report.proof_urls {
            println!("  {}", style_cyan(url));
        }
    }
    if let Some(notes) = &report.review_notes {
        println!();
        println!("{}", style_bold("Review notes"));
        println!("{}", notes);
    }
}

fn prompt_new_report(program_id: String) -> Result<NewReport> {
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
        .interact_text()?;

    let selected = Select::with_theme(&theme)
        .with_prompt("  Severity estimate")
        .items(&["LOW", "MEDIUM", "HIGH", "CRITICAL"])
        .default(1)
        .interact()?;

    let impact: String = Input::with_theme(&theme)
        .with_prompt("  Impact")
        .allow_empty(true)
        .interact_text()?;

    let steps: String = Input::with_theme(&theme)
        .with_prompt("  Steps to reproduce")
        .allow_empty(true)
        .interact_text()?;

    let proof: String = Input::with_theme(&theme)
        .with_prompt("  Proof-of-concept URLs (comma separated)")
        .allow_empty(true)
        .interact_text()?;
    let proof_urls: Vec<String> = proof
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(NewReport {
        program_id,
        title,
        description,
        severity: Some(Severity::ALL[selected]),
        impact: if impact.is_empty() { None } else { Some(impact) },
        steps_to_reproduce: if steps.is_empty() { None } else { Some(steps) },
        fix_recommendation: None,
        proof_urls,
    })
}
