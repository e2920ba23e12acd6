//! Terminal styling utilities

use bounty_board::models::{ProgramStatus, ReportStatus, RewardStatus, TestingStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn style_cyan(s: &str) -> String {
    format!("\x1b[36m{}\x1b[0m", s)
}

pub fn style_green(s: &str) -> String {
    format!("\x1b[32m{}\x1b[0m", s)
}

pub fn style_red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}

pub fn style_yellow(s: &str) -> String {
    format!("\x1b[33m{}\x1b[0m", s)
}

pub fn style_dim(s: &str) -> String {
    format!("\x1b[2m{}\x1b[0m", s)
}

pub fn style_bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn print_success(msg: &str) {
    println!("{} {}", style_green("✓"), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", style_red("✗"), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", style_yellow("⚠"), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", style_cyan("ℹ"), msg);
}

pub fn print_header(title: &str) {
    println!();
    println!("{}", style_bold(title));
    println!("{}", "─".repeat(title.len()));
}

/// Spinner shown while a request is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Safely truncate a resource id for display, showing first 8 and last 4
/// characters. Returns the full string if it's shorter than 12 characters.
pub fn truncate_id(id: &str) -> String {
    if id.len() >= 12 {
        format!("{}...{}", &id[..8], &id[id.len() - 4..])
    } else {
        id.to_string()
    }
}

/// Truncate free user text to `width` columns for table display.
/// Counts characters, not bytes, so multibyte titles never split mid-char.
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        title.to_string()
    } else {
        let kept: String = title.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

pub fn program_status(status: ProgramStatus) -> String {
    match status {
        ProgramStatus::Draft => style_dim("DRAFT"),
        ProgramStatus::Active => style_green("ACTIVE"),
        ProgramStatus::Paused => style_yellow("PAUSED"),
        ProgramStatus::Completed => style_cyan("COMPLETED"),
        ProgramStatus::Archived => style_dim("ARCHIVED"),
    }
}

pub fn report_status(status: ReportStatus) -> String {
    match status {
        ReportStatus::Pending => style_yellow("PENDING"),
        ReportStatus::Accepted => style_green("ACCEPTED"),
        ReportStatus::Rejected => style_red("REJECTED"),
        ReportStatus::Duplicate => style_dim("DUPLICATE"),
        ReportStatus::Informative => style_cyan("INFORMATIVE"),
        ReportStatus::Fixed => style_green("FIXED"),
    }
}

pub fn reward_status(status: RewardStatus) -> String {
    match status {
        RewardStatus::Pending => style_yellow("PENDING"),
        RewardStatus::Approved => style_cyan("APPROVED"),
        RewardStatus::Rejected => style_red("REJECTED"),
        RewardStatus::Paid => style_green("PAID"),
    }
}

pub fn testing_status(status: TestingStatus) -> String {
    match status {
        TestingStatus::Pending => style_yellow("PENDING"),
        TestingStatus::InProgress => style_cyan("IN_PROGRESS"),
        TestingStatus::Completed => style_green("COMPLETED"),
        TestingStatus::Failed => style_red("FAILED"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_title_never_splits_a_multibyte_char() {
        // 31st byte of this title falls inside a multibyte character
        let title = "Découverte d'une faille XSS côté recherche été";
        let out = truncate_title(title, 32);
        assert_eq!(out.chars().count(), 32);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn truncate_title_passes_short_titles_through() {
        assert_eq!(truncate_title("Stored XSS in search", 32), "Stored XSS in search");
        let exactly_width: String = "é".repeat(32);
        assert_eq!(truncate_title(&exactly_width, 32), exactly_width);
    }

    #[test]
    fn truncate_id_shows_both_ends() {
        assert_eq!(truncate_id("abcdefgh1234wxyz"), "abcdefgh...wxyz");
        assert_eq!(truncate_id("short-id"), "short-id");
    }
}
