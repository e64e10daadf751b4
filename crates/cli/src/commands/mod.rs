pub(crate) mod account;
pub(crate) mod cases;
pub(crate) mod chat;
pub(crate) mod theme;

use anyhow::Result;
use serde::Serialize;

pub(crate) use chat::ChatAction;
pub(crate) use theme::ThemeAction;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
