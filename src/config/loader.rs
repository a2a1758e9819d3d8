//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TaskSettings,
};

/// デフォルトの設定ファイル名
pub const DEFAULT_CONFIG_FILE: &str = "locale-html.json";

/// 設定ファイルを読み込む
///
/// # Arguments
/// * `config_path` - 設定ファイルのパス
///
/// # Returns
/// - `Ok(settings)`: 読み込みとパースに成功
/// - `Err(ConfigError)`: ファイルが存在しない、読み込みまたはパースエラー
///
/// # Errors
/// - ファイルが存在しない
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<TaskSettings, ConfigError> {
    if !config_path.exists() {
        return Err(ConfigError::MissingFile { option: "--config", path: config_path.to_path_buf() });
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: TaskSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_file`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_file_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config_path, r#"{"i18n": "i18n.json", "minify": true}"#).unwrap();

        let result = load_from_file(&config_path);

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.minify);
        assert_eq!(settings.i18n.unwrap().to_str(), Some("i18n.json"));
    }

    /// `load_from_file`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_file_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&temp_dir.path().join(DEFAULT_CONFIG_FILE));

        assert!(matches!(result, Err(ConfigError::MissingFile { option: "--config", .. })));
    }

    /// `load_from_file`: JSON パースエラー
    #[rstest]
    fn test_load_from_file_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config_path, "invalid json").unwrap();

        let result = load_from_file(&config_path);

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
