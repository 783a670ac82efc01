//! postdoggo - ヘッドレスコンテンツサイト向けのフィードクライアント
//!
//! GraphQLコンテンツAPIからカテゴリー・記事タイプ・投稿を取得し、
//! カーソルページネーションとマージポリシー（追記/置き換え）に基づいて
//! 単一の「現在の結果セット」を管理します。

pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
