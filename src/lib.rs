//! translated-routes
//!
//! ロケールごとのルート URI 翻訳エンジン。
//! ルートキーをワイルドカード対応のパターンで翻訳し、結果を 2 層キャッシュで保持する。

pub mod adapter;
pub mod cache;
pub mod commands;
pub mod config;
pub mod locale;
pub mod pattern;
pub mod routes;
pub mod source;
pub mod translator;
pub mod url;

mod test_utils;

// 主要な型を再エクスポート
pub use locale::{
    LocaleInfo,
    LocaleInfoSnapshot,
    LocaleRegistry,
};
pub use routes::RouteMap;
pub use translator::{
    Translator,
    TranslatorBuilder,
};
