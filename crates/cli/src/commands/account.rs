use anyhow::Result;
use legalguard_cloud::SignUpOutcome;
use serde::Serialize;

use super::print_json;
use crate::app::App;

#[derive(Serialize)]
struct WhoAmI<'a> {
    signed_in: bool,
    id: Option<&'a str>,
    email: Option<&'a str>,
    cloud_configured: bool,
    data_dir: String,
}

pub(crate) async fn run_login(app: &App, email: &str, password: &str) -> Result<()> {
    let user = app.auth()?.sign_in(email, password).await?;
    println!("Signed in as {}", user.email.as_deref().unwrap_or(&user.id));
    Ok(())
}

pub(crate) async fn run_signup(app: &App, email: &str, password: &str) -> Result<()> {
    match app.auth()?.sign_up(email, password).await? {
        SignUpOutcome::SignedIn(user) => {
            println!("Account created. Signed in as {}", user.email.as_deref().unwrap_or(&user.id));
        },
        SignUpOutcome::ConfirmationPending => {
            println!("Account created. Check {email} for a confirmation link, then log in.");
        },
    }
    Ok(())
}

pub(crate) async fn run_logout(app: &App) -> Result<()> {
    app.auth()?.sign_out().await?;
    println!("Signed out.");
    Ok(())
}

pub(crate) async fn run_whoami(app: &App, json: bool) -> Result<()> {
    let user = match app.session.current_user().await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("Warning: could not check sign-in state: {e}");
            None
        },
    };

    if json {
        return print_json(&WhoAmI {
            signed_in: user.is_some(),
            id: user.as_ref().map(|u| u.id.as_str()),
            email: user.as_ref().and_then(|u| u.email.as_deref()),
            cloud_configured: app.settings.cloud_enabled(),
            data_dir: app.settings.data_dir.display().to_string(),
        });
    }

    match user {
        Some(user) => {
            println!("Signed in as {} ({})", user.email.as_deref().unwrap_or("no e-mail"), user.id);
        },
        None if app.settings.cloud_enabled() => println!("Not signed in."),
        None => println!("Not signed in. Cloud sync is not configured."),
    }
    Ok(())
}
