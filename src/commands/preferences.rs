//! Display preference commands

use tracing::info;

use crate::config::DisplayPreferences;
use crate::db::AppState;
use crate::error::AppResult;
use crate::store;

/// Saved preferences, falling back to the configured defaults
pub async fn get_preferences(state: &AppState) -> AppResult<DisplayPreferences> {
    Ok(store::preferences::load_preferences(&state.db)
        .await?
        .unwrap_or(state.default_preferences))
}

pub async fn update_preferences(state: &AppState, preferences: DisplayPreferences) -> AppResult<DisplayPreferences> {
    store::preferences::save_preferences(&state.db, &preferences).await?;
    info!(theme = %preferences.theme, language = %preferences.language, "Updated display preferences");
    Ok(preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, Theme};
    use crate::test_utils::setup_test_state;

    #[tokio::test]
    async fn test_defaults_until_saved() {
        let mut state = setup_test_state().await;
        state.default_preferences.language = Language::Chinese;

        assert_eq!(get_preferences(&state).await.unwrap().language, Language::Chinese);

        let saved = DisplayPreferences {
            theme: Theme::Light,
            language: Language::English,
        };
        update_preferences(&state, saved).await.unwrap();
        assert_eq!(get_preferences(&state).await.unwrap(), saved);
    }
}
