use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数、設定値の検証など設定に関するエラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// デフォルトのHTTPタイムアウト（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 1ページあたりのデフォルト投稿件数
const DEFAULT_POSTS_PER_PAGE: i64 = 10;

/// アプリケーション設定
/// コンテンツAPIのエンドポイントと取得パラメータを環境変数から読み込む
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GraphQLエンドポイントのURL
    pub endpoint_url: String,
    /// HTTPリクエストのタイムアウト（秒）
    pub timeout_secs: u64,
    /// 1ページあたりの投稿件数
    pub page_size: i64,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    ///
    /// - `CONTENT_API_URL`: GraphQLエンドポイント（必須）
    /// - `CONTENT_API_TIMEOUT_SECS`: タイムアウト秒数（省略時は30秒）
    /// - `POSTS_PER_PAGE`: 1ページあたりの投稿件数（省略時は10件）
    pub fn from_env() -> ConfigResult<Self> {
        let endpoint_url = std::env::var("CONTENT_API_URL")
            .map_err(|_| ConfigError::missing_env_var("CONTENT_API_URL"))?;

        let timeout_secs = match std::env::var("CONTENT_API_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                ConfigError::invalid_value(format!(
                    "CONTENT_API_TIMEOUT_SECSが数値ではありません: {}",
                    value
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let page_size = match std::env::var("POSTS_PER_PAGE") {
            Ok(value) => {
                let parsed = value.parse::<i64>().map_err(|_| {
                    ConfigError::invalid_value(format!(
                        "POSTS_PER_PAGEが数値ではありません: {}",
                        value
                    ))
                })?;
                if parsed <= 0 {
                    return Err(ConfigError::invalid_value(
                        "POSTS_PER_PAGEは1以上である必要があります",
                    ));
                }
                parsed
            }
            Err(_) => DEFAULT_POSTS_PER_PAGE,
        };

        Ok(Self {
            endpoint_url,
            timeout_secs,
            page_size,
        })
    }

    /// エンドポイントを直接指定して設定を作成（テスト用）
    pub fn with_endpoint<U: Into<String>>(endpoint_url: U) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_POSTS_PER_PAGE,
        }
    }
}
