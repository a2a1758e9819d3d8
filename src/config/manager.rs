//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    TaskSettings,
    loader,
};
use crate::input::LocaleSource;
use crate::render::CrawlerInjection;
use crate::types::LocaleSet;

/// 検証済みの設定と、相対パスの基準ディレクトリ
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// 現在の設定
    settings: TaskSettings,

    /// 設定ファイルのあるディレクトリ
    base_dir: PathBuf,
}

impl TaskConfig {
    /// 設定を検証して作成する
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn new(settings: TaskSettings, base_dir: PathBuf) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(Self { settings, base_dir })
    }

    /// 設定ファイルを読み込む
    ///
    /// 相対パスは設定ファイルのディレクトリを基準に解決される。
    ///
    /// # Errors
    /// - ファイルが存在しない、読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        let base_dir = config_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        tracing::debug!("Settings loaded: {:?}", settings);
        Self::new(settings, base_dir)
    }

    /// 設定を更新する（CLI フラグの上書き用）
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: TaskSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.settings = new_settings;
        tracing::debug!("Settings updated successfully");
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn settings(&self) -> &TaskSettings {
        &self.settings
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 設定中のパスを基準ディレクトリから解決する
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.base_dir.join(path) }
    }

    /// 解決済みのロケールソース
    ///
    /// # Errors
    /// - ソースファイルが存在しない
    pub fn locale_source(&self) -> Result<LocaleSource, ConfigError> {
        let source = match self.settings.locale_source() {
            Some(LocaleSource::Json(path)) => LocaleSource::Json(self.resolve(&path)),
            Some(LocaleSource::Tmx(path)) => LocaleSource::Tmx(self.resolve(&path)),
            None => {
                return Err(ConfigError::ValidationErrors(vec![super::ValidationError::new(
                    "i18n",
                    "A locale source is required",
                )]));
            }
        };

        if !source.path().is_file() {
            return Err(ConfigError::MissingFile {
                option: source.option_name(),
                path: source.path().to_path_buf(),
            });
        }
        Ok(source)
    }

    /// 設定されたロケール
    ///
    /// # Errors
    /// - プライマリロケールが無い、または重複している
    pub fn locale_set(&self) -> Result<LocaleSet, ConfigError> {
        Ok(LocaleSet::new(self.settings.locales.clone())?)
    }

    /// リファレンスファイルの出力先
    #[must_use]
    pub fn variables_file(&self) -> PathBuf {
        self.resolve(&self.settings.variables_file)
    }

    /// クローラー用フラグメントの挿入設定
    ///
    /// `fbCrawlerPHP` が未設定なら `None`。ロケールの既定値はプライマリロケール。
    ///
    /// # Errors
    /// - フラグメントファイルが存在しない、または読み込めない
    pub fn crawler(&self, locales: &LocaleSet) -> Result<Option<CrawlerInjection>, ConfigError> {
        let Some(fragment_path) = &self.settings.fb_crawler_php else {
            return Ok(None);
        };

        let path = self.resolve(fragment_path);
        if !path.is_file() {
            return Err(ConfigError::MissingFile { option: "fbCrawlerPHP", path });
        }
        let fragment = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::ReadFile { option: "fbCrawlerPHP", path, source })?;

        let locale = self
            .settings
            .crawler_locale
            .clone()
            .unwrap_or_else(|| locales.primary().id.clone());
        if locales.get(&locale).is_none() {
            tracing::warn!(
                "The crawler locale \"{}\" is not rendered; no crawler page will be written.",
                locale
            );
        }

        Ok(Some(CrawlerInjection {
            fragment,
            template: PathBuf::from(&self.settings.crawler_template),
            locale,
            extension: self.settings.crawler_extension.clone(),
        }))
    }
}
