//! Reward commands

use anyhow::{anyhow, Result};
use clap::Subcommand;

use bounty_board::models::{NewReward, Reward, RewardPatch, RewardStatus};
use bounty_board::{ApiClient, RewardsApi};

use crate::style::*;

#[derive(Subcommand)]
pub enum RewardAction {
    /// List rewards with optional filters
    #[command(visible_alias = "ls")]
    List {
        /// Filter by status (PENDING, APPROVED, REJECTED, PAID)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by program id
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Rewards granted to you
    Mine,

    /// Show one reward
    Show {
        id: String,
    },

    /// Create a reward for an accepted report
    Create {
        /// Accepted report id
        report_id: String,
        /// Program the report was filed against
        program_id: String,
        /// Amount in USD
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a pending reward
    Update {
        id: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Approve a pending reward
    Approve {
        id: String,
        /// Approval note (required)
        #[arg(short, long)]
        note: String,
    },

    /// Reject a pending reward
    Reject {
        id: String,
        /// Rejection reason (required)
        #[arg(short, long)]
        reason: String,
    },

    /// Mark an approved reward as paid
    Pay {
        id: String,
    },

    /// Delete a reward
    #[command(visible_alias = "rm")]
    Delete {
        id: String,
    },
}

pub async fn run(api: &ApiClient, action: RewardAction) -> Result<()> {
    let rewards = RewardsApi::new(api);

    match action {
        RewardAction::List { status, program } => {
            let status = status
                .map(|s| s.parse::<RewardStatus>().map_err(|e| anyhow!(e)))
                .transpose()?;
            let pb = spinner("Fetching rewards...");
            let list = rewards.list(status, program.as_deref()).await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        RewardAction::Mine => {
            let pb = spinner("Fetching your rewards...");
            let list = rewards.mine().await;
            pb.finish_and_clear();
            print_table(&list?);
        }
        RewardAction::Show { id } => {
            let pb = spinner("Fetching reward...");
            let reward = rewards.get(&id).await;
            pb.finish_and_clear();
            print_details(&reward?);
        }
        RewardAction::Create {
            report_id,
            program_id,
            amount,
            description,
        } => {
            let new_reward = NewReward {
                report_id,
                program_id,
                amount,
                description,
            };
            let pb = spinner("Creating reward...");
            let created = rewards.create(&new_reward).await;
            pb.finish_and_clear();
            let created = created?;
            print_success(&format!(
                "Reward {} created ({} USD, PENDING)",
                created.id, created.amount
            ));
        }
        RewardAction::Update {
            id,
            amount,
            description,
        } => {
            let patch = RewardPatch {
                amount,
                description,
            };
            let pb = spinner("Updating reward...");
            let updated = rewards.update(&id, &patch).await;
            pb.finish_and_clear();
            print_success(&format!("Updated reward {}", updated?.id));
        }
        RewardAction::Approve { id, note } => {
            let pb = spinner("Approving reward...");
            let updated = rewards.approve(&id, &note).await;
            pb.finish_and_clear();
            let updated = updated?;
            print_success(&format!(
                "Reward {} {} ({} USD)",
                updated.id,
                reward_status(updated.status),
                updated.amount
            ));
        }
        RewardAction::Reject { id, reason } => {
            let pb = spinner("Rejecting reward...");
            let updated = rewards.reject(&id, &reason).await;
            pb.finish_and_clear();
            let updated = updated?;
            print_warning(&format!(
                "Reward {} {}",
                updated.id,
                reward_status(updated.status)
            ));
        }
        RewardAction::Pay { id } => {
            let pb = spinner("Marking reward as paid...");
            let updated = rewards.mark_as_paid(&id).await;
            pb.finish_and_clear();
            let updated = updated?;
            print_success(&format!(
                "Reward {} {} ({} USD)",
                updated.id,
                reward_status(updated.status),
                updated.amount
            ));
        }
        RewardAction::Delete { id } => {
            let pb = spinner("Deleting reward...");
            let result = rewards.delete(&id).await;
            pb.finish_and_clear();
            result?;
            print_success(&format!("Deleted reward {}", id));
        }
    }

    Ok(())
}

fn print_table(rewards: &[Reward]) {
    if rewards.is_empty() {
        print_info("No rewards found.");
        return;
    }

    println!();
    println!(
        "{:<14}  {:>10}  {:<9}  {:<14}  Program",
        "Id", "Amount", "Status", "Report"
    );
    println!("{}", "─".repeat(70));

    for reward in rewards {
        println!(
            "{:<14}  {:>10.2}  {:<9}  {:<14}  {}",
            style_dim(&truncate_id(&reward.id)),
            reward.amount,
            reward_status(reward.status),
            style_dim(&truncate_id(&reward.report_id)),
            style_dim(&truncate_id(&reward.program_id))
        );
    }

    println!();
    let total: f64 = rewards.iter().map(|r| r.amount).sum();
    println!("Total: {} rewards, {:.2} USD", rewards.len(), total);
}

fn print_details(reward: &Reward) {
    print_header(&format!("Reward {}", reward.id));
    println!("Amount:       {:.2} USD", reward.amount);
    println!("Status:       {}", reward_status(reward.status));
    println!("Report:       {}", reward.report_id);
    println!("Program:      {}", reward.program_id);
    if let Some(description) = &reward.description {
        println!("Description:  {}", description);
    }
    if let Some(note) = &reward.approval_note {
        println!("Approval:     {}", note);
    }
    if let Some(reason) = &reward.rejection_reason {
        println!("Rejection:    {}", reason);
    }
    if let Some(paid_at) = reward.paid_at {
        println!("Paid at:      {}", paid_at.format("%Y-%m-%d %H:%M"));
    }
}
