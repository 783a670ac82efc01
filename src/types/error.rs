use thiserror::Error;

/// コンテンツソース連携のエラー型
/// GraphQL APIとの通信・レスポンス処理に関するエラーを定義
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP通信エラー
    #[error("HTTP通信エラー: {endpoint} - {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// GraphQLレスポンスがエラーを返した
    #[error("GraphQLエラー: {message}")]
    GraphQl { message: String },

    /// JSONシリアライゼーション/デシリアライゼーションエラー
    #[error("JSON処理エラー: {context} - {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// レスポンスに期待するデータが存在しない
    #[error("データ欠損エラー: {field}")]
    MissingData { field: String },
}

impl SourceError {
    /// HTTP通信エラーを作成
    pub fn http<E: Into<String>>(endpoint: E, source: reqwest::Error) -> Self {
        Self::Http {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// GraphQLエラーを作成
    pub fn graphql<M: Into<String>>(message: M) -> Self {
        Self::GraphQl {
            message: message.into(),
        }
    }

    /// JSON処理エラーを作成
    pub fn json<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// データ欠損エラーを作成
    pub fn missing_data<F: Into<String>>(field: F) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }
}

/// ソースエラーのResult型エイリアス
pub type SourceResult<T> = std::result::Result<T, SourceError>;
