//! Display preference persistence

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::config::{DisplayPreferences, Language, Theme};
use crate::error::{AppError, AppResult};

/// Saved preferences, or None when the user never changed the defaults
pub async fn load_preferences(pool: &SqlitePool) -> AppResult<Option<DisplayPreferences>> {
    let row = sqlx::query("SELECT theme, language FROM app_preferences WHERE id = 1")
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let theme: String = row.get("theme");
    let language: String = row.get("language");
    Ok(Some(DisplayPreferences {
        theme: theme.parse::<Theme>().map_err(AppError::Invalid)?,
        language: language.parse::<Language>().map_err(AppError::Invalid)?,
    }))
}

pub async fn save_preferences(pool: &SqlitePool, preferences: &DisplayPreferences) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO app_preferences (id, theme, language, updated_at)
        VALUES (1, ?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(id) DO UPDATE SET
            theme = excluded.theme,
            language = excluded.language,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(preferences.theme.to_string())
    .bind(preferences.language.to_string())
    .execute(pool)
    .await?;

    debug!(theme = %preferences.theme, language = %preferences.language, "Saved display preferences");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{setup_test_db, teardown_test_db};

    #[tokio::test]
    async fn test_preferences_roundtrip() {
        let pool = setup_test_db().await;
        assert_eq!(load_preferences(&pool).await.unwrap(), None);

        let prefs = DisplayPreferences {
            theme: Theme::Dark,
            language: Language::Chinese,
        };
        save_preferences(&pool, &prefs).await.expect("save");
        assert_eq!(load_preferences(&pool).await.unwrap(), Some(prefs));

        let light = DisplayPreferences {
            theme: Theme::Light,
            ..prefs
        };
        save_preferences(&pool, &light).await.expect("overwrite");
        assert_eq!(load_preferences(&pool).await.unwrap(), Some(light));

        teardown_test_db(pool).await;
    }
}
