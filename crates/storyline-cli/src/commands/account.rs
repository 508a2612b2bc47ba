use anyhow::Result;
use colored::Colorize;

use storyline_application::AppContext;
use storyline_core::session::Session;

use super::{drive, report};

pub async fn register(context: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let message = drive(
        "Creating account",
        context.users.register_stream(name, email, password),
    )
    .await?;
    println!("{}", message.green());
    Ok(())
}

pub async fn login(context: &AppContext, email: &str, password: &str) -> Result<()> {
    let response = drive("Logging in", context.users.login_stream(email, password)).await?;

    let session = Session::from_login(email, &response.login_result);
    context.users.save_session(session).await.map_err(report)?;

    println!(
        "{}",
        format!("Logged in as {}", response.login_result.name).green()
    );
    Ok(())
}

pub async fn logout(context: &AppContext) -> Result<()> {
    context.users.logout().await.map_err(report)?;
    println!("{}", "Logged out".green());
    Ok(())
}

pub async fn whoami(context: &AppContext) {
    let session = context.users.current_session().await;
    if session.is_authenticated() {
        println!("{} <{}>", session.name.bold(), session.email);
        println!("{}", format!("user id: {}", session.user_id).dimmed());
    } else {
        println!("{}", "Not logged in".yellow());
    }
}
