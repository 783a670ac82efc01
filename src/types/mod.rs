//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - 設定型: 環境変数ベースのアプリケーション設定
//! - エラー型: コンテンツソース連携・設定のエラー表現

pub mod config;
pub mod error;

// 便利な再エクスポート
pub use config::{AppConfig, ConfigError, ConfigResult};
pub use error::{SourceError, SourceResult};
