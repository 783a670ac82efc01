pub mod graphql;

// 便利のため、よく使用される型を再エクスポート
pub use graphql::{GraphqlClient, MockGraphqlClient, ReqwestGraphqlClient};
