use crate::infra::api::graphql::GraphqlClient;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// カテゴリー一覧クエリ
pub const CATEGORIES_QUERY: &str = r#"
query Categories($first: Int) {
  categories(first: $first) {
    nodes {
      id
      name
      slug
    }
  }
}
"#;

/// コンテンツのグルーピング単位
/// slugがルーティングのキーになる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}

// レスポンス解析用の中間構造体（欠損許容）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategoriesData {
    categories: Option<RawCategoryConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategoryConnection {
    nodes: Vec<RawCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategory {
    id: Option<String>,
    name: Option<String>,
    slug: Option<String>,
}

/// `data`からカテゴリー一覧を抽出する
///
/// idまたはslugを持たないノードはルーティングに使えないため除外する
fn categories_from_data(data: &Value) -> Vec<Category> {
    let raw: RawCategoriesData = match serde_json::from_value(data.clone()) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };

    let connection = match raw.categories {
        Some(connection) => connection,
        None => return Vec::new(),
    };

    connection
        .nodes
        .into_iter()
        .filter_map(|node| {
            let id = node.id?;
            let slug = node.slug?;
            Some(Category {
                id,
                name: node.name.unwrap_or_default(),
                slug,
            })
        })
        .collect()
}

/// カテゴリー一覧を取得する
pub async fn list_categories(client: &dyn GraphqlClient, first: i64) -> Result<Vec<Category>> {
    let variables = serde_json::json!({ "first": first });
    let data = client
        .execute(CATEGORIES_QUERY, variables)
        .await
        .context("カテゴリー一覧の取得に失敗")?;

    Ok(categories_from_data(&data))
}
