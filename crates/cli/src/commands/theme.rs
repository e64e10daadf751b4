use anyhow::Result;
use clap::Subcommand;
use legalguard_core::Theme;

use crate::app::App;

#[derive(Subcommand)]
pub(crate) enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

pub(crate) fn run_theme(app: &App, action: Option<ThemeAction>) -> Result<()> {
    let themes = app.theme_service();
    let theme = match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => themes.current(),
        ThemeAction::Toggle => themes.toggle()?,
        ThemeAction::Light => themes.set(Theme::Light)?,
        ThemeAction::Dark => themes.set(Theme::Dark)?,
    };
    println!("{theme}");
    Ok(())
}
