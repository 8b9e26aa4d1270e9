//! `.translated-routes.json` の読み込み
//!
//! ルートファイルと同じく JSONC として解釈するため、コメントと末尾カンマを許容する。

use std::path::Path;

use jsonc_parser::ParseOptions;

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    RouteSettings,
};

/// `root` 直下の設定ファイルを読む
///
/// ファイルが無い、または中身が空 (コメントのみを含む) の場合は `None`。
///
/// # Errors
/// - 読み込みに失敗した
/// - JSONC として不正
/// - 設定の型に合わない値がある
pub(super) fn read_config_file(root: &Path) -> Result<Option<RouteSettings>, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        tracing::debug!("No {} in {:?}", CONFIG_FILE_NAME, root);
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let document = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError { path: path.clone(), message: e.to_string() })?;

    let Some(document) = document else {
        tracing::debug!("Empty configuration file: {:?}", path);
        return Ok(None);
    };

    tracing::debug!("Loaded configuration from {:?}", path);
    Ok(Some(serde_json::from_value(document)?))
}
