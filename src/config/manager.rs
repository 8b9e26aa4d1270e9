//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    RouteSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: RouteSettings,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: RouteSettings::default() }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイル → 環境変数の順に適用し、最後にバリデーションを行う。
    ///
    /// # Arguments
    /// * `project_root` - プロジェクトのルートパス
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSONC パースエラー
    /// - 環境変数の値が不正
    /// - バリデーションエラー
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        self.load_settings_with_env(project_root, |name| std::env::var(name).ok())
    }

    /// 環境変数の参照先を差し替えて設定を読み込む
    ///
    /// # Errors
    /// [`Self::load_settings`] と同じ
    pub fn load_settings_with_env<F>(
        &mut self,
        project_root: Option<PathBuf>,
        lookup: F,
    ) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        // プロジェクトの設定を読み込み
        let mut settings = if let Some(root) = &project_root {
            loader::read_config_file(root)?.map_or_else(RouteSettings::default, |loaded| {
                tracing::debug!("Loaded project settings: {:?}", loaded);
                loaded
            })
        } else {
            RouteSettings::default()
        };

        // 環境変数による上書き
        settings.apply_env_overrides(lookup).map_err(ConfigError::ValidationErrors)?;

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &RouteSettings {
        &self.current_settings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{
        CACHE_TTL_ENV,
        CONFIG_FILE_NAME,
    };

    const fn no_env(_: &str) -> Option<String> {
        None
    }

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().fallback_locale, "en");
    }

    /// `load_settings`: `project_root` が None の場合
    #[rstest]
    fn test_load_settings_without_project() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings_with_env(None, no_env);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().supported_locales.len(), 2);
    }

    /// `load_settings`: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content =
            r#"{"supportedLocales": {"de": {"name": "German", "native": "Deutsch"}}}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings_with_env(Some(temp_dir.path().to_path_buf()), no_env);

        assert!(result.is_ok());
        let codes: Vec<&String> = manager.get_settings().supported_locales.keys().collect();
        assert_eq!(codes, vec!["de"]);
    }

    /// `load_settings`: 環境変数で TTL を上書き
    #[rstest]
    fn test_load_settings_env_override() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings_with_env(Some(temp_dir.path().to_path_buf()), |name| {
            (name == CACHE_TTL_ENV).then(|| "30".to_string())
        });

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().cache_ttl, 30);
    }

    /// `load_settings`: バリデーションエラーの場合は設定を保持しない
    #[rstest]
    fn test_load_settings_invalid_config_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"supportedLocales": {}}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings_with_env(Some(temp_dir.path().to_path_buf()), no_env);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().supported_locales.len(), 2);
    }
}
