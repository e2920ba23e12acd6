//! Authentication commands - interactive signin, signout, password flows

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use bounty_board::validate::{is_valid_email, is_strong_password, WEAK_PASSWORD};
use bounty_board::{ApiClient, AuthApi};

use crate::style::*;

/// Interactive signin. Validation runs inside the prompts, so a malformed
/// form never produces a network call.
pub async fn signin(api: &ApiClient) -> Result<()> {
    println!("{}", style("  Sign in to Bounty Board").cyan().bold());
    println!("  {}", style(api.base_url()).dim());
    println!();

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("  Email")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.is_empty() {
                return Err("Email is required");
            }
            if !is_valid_email(input) {
                return Err("Please enter a valid email address");
            }
            Ok(())
        })
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("  Password")
        .interact()?;

    let pb = spinner("Signing in...");
    let result = AuthApi::new(api).signin(&email, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(user) => {
            print_success(&format!(
                "Signed in as {} ({})",
                style_cyan(&user.email),
                user.role
            ));
            println!();
            println!("  Try:");
            println!("    {}", style("bounty programs active").yellow());
            println!("    {}", style("bounty reports mine").yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Signin failed: {}", e)),
    }
}

pub fn signout(api: &ApiClient) -> Result<()> {
    AuthApi::new(api).signout()?;
    print_success("Signed out, session token removed.");
    Ok(())
}

pub async fn forgot_password(api: &ApiClient, email: &str) -> Result<()> {
    let pb = spinner("Requesting password reset...");
    let result = AuthApi::new(api).forgot_password(email).await;
    pb.finish_and_clear();

    result?;
    print_success(&format!("Password reset email sent to {}", email));
    Ok(())
}

pub async fn reset_password(api: &ApiClient, token: &str) -> Result<()> {
    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("  New password")
        .with_confirmation("  Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &str> {
            if !is_strong_password(input) {
                return Err(WEAK_PASSWORD);
            }
            Ok(())
        })
        .interact()?;

    let pb = spinner("Resetting password...");
    let result = AuthApi::new(api).reset_password(token, &password).await;
    pb.finish_and_clear();

    result?;
    print_success("Password updated. Sign in with your new password:");
    println!("    {}", style("bounty signin").yellow());
    Ok(())
}

pub async fn verify_email(api: &ApiClient, token: &str) -> Result<()> {
    let pb = spinner("Verifying email...");
    let result = AuthApi::new(api).verify_email(token).await;
    pb.finish_and_clear();

    result?;
    print_success("Email address verified.");
    Ok(())
}
