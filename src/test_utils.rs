//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::locale::{
    LocaleDescriptor,
    LocaleRegistry,
};
use crate::source::MemoryRouteSource;

/// `en` と `tr` の 2 ロケールを持つレジストリを作成する
pub(crate) fn sample_registry() -> LocaleRegistry {
    LocaleRegistry::new([
        LocaleDescriptor::new("en", "English", "English"),
        LocaleDescriptor::new("tr", "Turkish", "Türkçe"),
    ])
}

/// テスト用のルートデータを作成する
///
/// `tr` はワイルドカードを含み、`en` は完全一致のみ。
pub(crate) fn sample_source() -> MemoryRouteSource {
    MemoryRouteSource::new()
        .with_locale("en", [("about", "about-us"), ("contact", "contact")])
        .with_locale(
            "tr",
            [
                ("about", "hakkimizda"),
                ("contact", "iletisim"),
                ("blog/*", "makale/*"),
                ("products/*/reviews/*", "urunler/*/yorumlar/*"),
            ],
        )
}
