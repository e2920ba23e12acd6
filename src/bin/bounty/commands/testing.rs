//! Testing/scan commands

use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use futures::future::try_join;

use bounty_board::models::{
    Severity, TestingPatch, TestingResult, TestingStatus, TestingSubmission,
};
use bounty_board::{ApiClient, TestingApi};

use crate::style::*;

#[derive(Subcommand)]
pub enum TestingAction {
    /// Submit a vulnerability test (interactive)
    Submit,

    /// List submissions with optional filters
    #[command(visible_alias = "ls")]
    List {
        /// Filter by tester id
        #[arg(long)]
        tester: Option<String>,
        /// Filter by status (PENDING, IN_PROGRESS, COMPLETED, FAILED)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by severity (LOW, MEDIUM, HIGH, CRITICAL)
        #[arg(long)]
        severity: Option<String>,
    },

    /// Submissions you created
    Mine,

    /// Tests assigned to you
    Assigned,

    /// Show one submission
    Show {
        id: String,
    },

    /// Structured scan results for a completed submission
    Details {
        id: String,
    },

    /// Update submission metadata
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cvss: Option<f64>,
    },

    /// Advance a submission's status
    SetStatus {
        id: String,
        /// Target status (PENDING, IN_PROGRESS, COMPLETED, FAILED)
        status: String,
    },

    /// Mark a completed submission as verified
    Verify {
        id: String,
    },

    /// Delete a submission
    #[command(visible_alias = "rm")]
    Delete {
        id: String,
    },

    /// Global and personal statistics
    Stats,

    /// Your submission summary
    Summary,
}

pub async fn run(api: &ApiClient, action: TestingAction) -> Result<()> {
    let testing = TestingApi::new(api);

    match action {
        TestingAction::Submit => {
            let submission = prompt_submission()?;
            let pb = spinner("Submitting test...");
            let created = testing.submit(&submission).await;
            pb.finish_and_clear();
            let created = created?;
            print_success(&format!(
                "Test {} submitted against {}",
                created.id, created.target_url
            ));
        }
        TestingAction::List {
            tester,
            status,
            severity,
        } => {
            let status = status
                .map(|s| TestingStatus::parse(&s).map_err(|e| anyhow!(e)))
                .transpose()?;
            let severity = severity
                .map(|s| s.parse::<Severity>().map_err(|e| anyhow!(e)))
                .transpose()?;
            let pb = spinner("Fetching submissions...");
            let list = testing.list(tester.as_deref(), status, severity).await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        TestingAction::Mine => {
            let pb = spinner("Fetching your submissions...");
            let list = testing.my_submissions().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        TestingAction::Assigned => {
            let pb = spinner("Fetching assigned tests...");
            let list = testing.my_tests().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        TestingAction::Show { id } => {
            let pb = spinner("Fetching submission...");
            let result = testing.get(&id).await;
            pb.finish_and_clear();
            print_details(&result?);
        }
        TestingAction::Details { id } => {
            let pb = spinner("Fetching scan results...");
            let details = testing.details(&id).await;
            pb.finish_and_clear();
            let details = details?;

            print_header("Scan results");
            let counts = details.summary;
            println!(
                "Findings:     {} ({} critical, {} high, {} medium, {} low)",
                counts.total(),
                style_red(&counts.critical.to_string()),
                style_yellow(&counts.high.to_string()),
                counts.medium,
                counts.low
            );
            if let Some(score) = details.security_score {
                println!("Score:        {:.1}/100", score);
            }
            for finding in &details.vulnerabilities {
                println!();
                println!(
                    "  [{}] {}",
                    finding.severity,
                    style_bold(&finding.title)
                );
                if let Some(description) = &finding.description {
                    println!("  {}", style_dim(description));
                }
            }
            if let Some(analysis) = &details.analysis {
                println!();
                println!("{}", style_bold("Analysis"));
                println!("{}", analysis);
            }
        }
        TestingAction::Update {
            id,
            title,
            description,
            cvss,
        } => {
            let patch = TestingPatch {
                title,
                description,
                cvss_score: cvss,
                ..Default::default()
            };
            let pb = spinner("Updating submission...");
            let updated = testing.update(&id, &patch).await;
            pb.finish_and_clear();
            print_success(&format!("Updated submission {}", updated?.id));
        }
        TestingAction::SetStatus { id, status } => {
            let pb = spinner("Updating status...");
            let updated = testing.update_status(&id, &status).await;
            pb.finish_and_clear();
            let updated = updated?;
            print_success(&format!(
                "Submission {} is now {}",
                updated.id,
                testing_status(updated.status)
            ));
        }
        TestingAction::Verify { id } => {
            let pb = spinner("Verifying submission...");
            let updated = testing.verify(&id).await;
            pb.finish_and_clear();
            print_success(&format!("Submission {} verified.", updated?.id));
        }
        TestingAction::Delete { id } => {
            let pb = spinner("Deleting submission...");
            let result = testing.delete(&id).await;
            pb.finish_and_clear();
            result?;
            print_success(&format!("Deleted submission {}", id));
        }
        TestingAction::Stats => {
            let pb = spinner("Fetching statistics...");
            // Global and personal statistics are independent fetches
            let result = try_join(testing.statistics(), testing.summary()).await;
            pb.finish_and_clear();
            let (stats, summary) = result?;

            print_header("Platform statistics");
            println!("Total tests:  {}", stats.total);
            println!(
                "Verified:     {} ({} unverified)",
                style_green(&stats.verified.to_string()),
                stats.unverified
            );
            println!(
                "Severity:     {} critical, {} high, {} medium, {} low",
                style_red(&stats.by_severity.critical.to_string()),
                style_yellow(&stats.by_severity.high.to_string()),
                stats.by_severity.medium,
                stats.by_severity.low
            );

            print_header("Your submissions");
            print_summary_counts(summary.total, &[
                ("pending", summary.pending),
                ("in progress", summary.in_progress),
                ("completed", summary.completed),
                ("failed", summary.failed),
            ]);
        }
        TestingAction::Summary => {
            let pb = spinner("Fetching summary...");
            let summary = testing.summary().await;
            pb.finish_and_clear();
            let summary = summary?;

            print_header("Your submissions");
            print_summary_counts(summary.total, &[
                ("pending", summary.pending),
                ("in progress", summary.in_progress),
                ("completed", summary.completed),
                ("failed", summary.failed),
            ]);
            if !summary.recent.is_empty() {
                println!();
                println!("{}", style_bold("Recent"));
                print_table(&summary.recent);
            }
        }
    }

    Ok(())
}

fn print_summary_counts(total: u32, counts: &[(&str, u32)]) {
    println!("Total:        {}", total);
    let parts: Vec<String> = counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect();
    println!("By status:    {}", parts.join(", "));
}

fn print_table(results: &[TestingResult]) {
    if results.is_empty() {
        print_info("No submissions found.");
        return;
    }

    println!();
    println!(
        "{:<14}  {:<28}  {:<12}  {:<8}  {:<9}  Target",
        "Id", "Title", "Status", "Severity", "Verified"
    );
    println!("{}", "─".repeat(100));

    for result in results {
        let title = truncate_title(&result.title, 28);
        let severity = result
            .severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let verified = if result.is_verified {
            style_green("yes")
        } else {
            style_dim("no")
        };
        println!(
            "{:<14}  {:<28}  {:<12}  {:<8}  {:<9}  {}",
            style_dim(&truncate_id(&result.id)),
            title,
            testing_status(result.status),
            severity,
            verified,
            style_dim(&result.target_url)
        );
    }

    println!();
    println!("Total: {}", results.len());
}

fn print_details(result: &TestingResult) {
    print_header(&result.title);
    println!("Id:           {}", result.id);
    println!("Target:       {}", style_cyan(&result.target_url));
    println!("Type:         {}", result.vulnerability_type);
    println!("Status:       {}", testing_status(result.status));
    if let Some(severity) = result.severity {
        println!("Severity:     {}", severity);
    }
    if let Some(cvss) = result.cvss_score {
        println!("CVSS:         {:.1}", cvss);
    }
    println!(
        "Verified:     {}",
        if result.is_verified {
            style_green("yes")
        } else {
            style_dim("no")
        }
    );
    if !result.test_types.is_empty() {
        println!("Test types:   {}", result.test_types.join(", "));
    }
    if let Some(description) = &result.description {
        println!();
        println!("{}", description);
    }
}

fn prompt_submission() -> Result<TestingSubmission> {
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

    let target_url: String = Input::with_theme(&theme)
        .with_prompt("  Target URL")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("Target must be an http(s) URL")
            }
        })
        .interact_text()?;

    let vulnerability_type: String = Input::with_theme(&theme)
        .with_prompt("  Vulnerability type (e.g. XSS, SQLI)")
        .interact_text()?;

    let selected = Select::with_theme(&theme)
        .with_prompt("  Severity")
        .items(&["LOW", "MEDIUM", "HIGH", "CRITICAL"])
        .default(1)
        .interact()?;

    let test_types: String = Input::with_theme(&theme)
        .with_prompt("  Test types (comma separated)")
        .allow_empty(true)
        .interact_text()?;
    let test_types: Vec<String> = test_types
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let cvss: String = Input::with_theme(&theme)
        .with_prompt("  CVSS score (optional)")
        .allow_empty(true)
        .interact_text()?;
    let cvss_score = if cvss.is_empty() {
        None
    } else {
        Some(cvss.parse::<f64>().map_err(|_| anyhow!("Invalid CVSS score"))?)
    };

    Ok(TestingSubmission {
        title,
        target_url,
        vulnerability_type,
        severity: Severity::ALL[selected],
        test_types,
        cvss_score,
        description: None,
        attachments: vec![],
    })
}
