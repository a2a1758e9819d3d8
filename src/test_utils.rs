//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::input::TranslationUnit;
use crate::types::{
    Locale,
    LocaleSet,
};

/// `en`（プライマリ）と `es` のロケールセット
#[allow(clippy::expect_used)]
pub(crate) fn en_es_locales() -> LocaleSet {
    LocaleSet::new(vec![
        Locale::primary("en").with_cue("English", "en"),
        Locale::new("es").with_cue("En Español", "es"),
    ])
    .expect("en/es locale set is valid")
}

/// テスト用の TranslationUnit を作成する
///
/// # Arguments
/// * `id` - フレーズ（キー）
/// * `variants` - ロケール ID と翻訳のペア
pub(crate) fn unit(id: &str, variants: &[(&str, &str)]) -> TranslationUnit {
    variants
        .iter()
        .fold(TranslationUnit::new(id), |unit, (locale, text)| unit.with_variant(*locale, *text))
}
