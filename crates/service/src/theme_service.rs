use legalguard_core::Theme;
use legalguard_storage::LocalHistory;

use crate::error::ServiceError;

/// Persisted light/dark preference.
pub struct ThemeService {
    local: LocalHistory,
}

impl ThemeService {
    #[must_use]
    pub const fn new(local: LocalHistory) -> Self {
        Self { local }
    }

    /// Stored theme, dark when unset or unreadable.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.local.theme()
    }

    pub fn set(&self, theme: Theme) -> Result<Theme, ServiceError> {
        self.local.save_theme(theme)?;
        tracing::debug!(theme = %theme, "Theme saved");
        Ok(theme)
    }

    pub fn toggle(&self) -> Result<Theme, ServiceError> {
        self.set(self.current().toggled())
    }
}
