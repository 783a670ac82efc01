use crate::domain::query::{PostsWhere, ALL_SLUG};
use crate::infra::api::graphql::GraphqlClient;
use serde::Deserialize;
use serde_json::Value;

/// 記事タイプ一覧クエリ
///
/// サーバー側で空のタームを除外（hideEmpty）した上で、各タームについて
/// カテゴリー内の投稿を1件だけ探りにいき、startCursorの有無で
/// 「このカテゴリーに投稿があるか」を判定する。
pub const ARTICLE_TYPES_QUERY: &str = r#"
query CategoryArticleTypes($where: ArticleTypeToPostConnectionWhereArgs) {
  articleTypes(where: { hideEmpty: true }) {
    edges {
      node {
        name
        slug
        posts(first: 1, where: $where) {
          pageInfo {
            startCursor
          }
        }
      }
    }
  }
}
"#;

/// カテゴリー内の下位分類（記事タイプ）
///
/// `start_cursor`は存在確認のプローブ結果。カテゴリー内に該当投稿が
/// 1件以上あるタームだけが一覧に残る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleType {
    pub name: String,
    pub slug: String,
    pub start_cursor: String,
}

impl ArticleType {
    /// 合成エントリ「All」を作成（常に一覧の先頭に置かれる）
    pub fn all() -> Self {
        Self {
            name: "All".to_string(),
            slug: ALL_SLUG.to_string(),
            start_cursor: String::new(),
        }
    }

    /// このエントリが「All」か
    pub fn is_all(&self) -> bool {
        self.slug == ALL_SLUG
    }
}

// レスポンス解析用の中間構造体（欠損許容）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawArticleTypesData {
    article_types: Option<RawArticleTypeConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticleTypeConnection {
    edges: Vec<RawArticleTypeEdge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticleTypeEdge {
    node: Option<RawArticleTypeNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticleTypeNode {
    name: Option<String>,
    slug: Option<String>,
    posts: Option<RawProbeConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProbeConnection {
    page_info: RawProbePageInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProbePageInfo {
    start_cursor: Option<String>,
}

/// `data`から記事タイプの一覧を抽出する
///
/// プローブのstartCursorがnull/欠損のターム（該当カテゴリーに投稿なし）は
/// 除外する。ただし空文字列のカーソルは「値あり」とみなして除外しない
/// （空カーソルと欠損カーソルの区別は上流の挙動に合わせて温存している）。
fn article_types_from_data(data: &Value) -> Vec<ArticleType> {
    let raw: RawArticleTypesData = match serde_json::from_value(data.clone()) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };

    let connection = match raw.article_types {
        Some(connection) => connection,
        None => return Vec::new(),
    };

    connection
        .edges
        .into_iter()
        .filter_map(|edge| {
            let node = edge.node?;
            let name = node.name?;
            let slug = node.slug?;
            let start_cursor = node.posts?.page_info.start_cursor?;
            Some(ArticleType {
                name,
                slug,
                start_cursor,
            })
        })
        .collect()
}

/// カテゴリーに紐づく記事タイプのフィルターメニューを構築する
///
/// 先頭に合成エントリ「All」を無条件で置き、その後ろに
/// カテゴリー内に投稿を持つタームを続ける。フェッチに失敗しても
/// この関数自体は失敗せず、「All」だけの一覧を返す。
pub async fn list_article_types(
    category_slug: &str,
    client: &dyn GraphqlClient,
) -> Vec<ArticleType> {
    let mut all_types = vec![ArticleType::all()];

    let where_args = PostsWhere::for_category(category_slug);
    let variables = serde_json::json!({ "where": where_args });

    match client.execute(ARTICLE_TYPES_QUERY, variables).await {
        Ok(data) => {
            all_types.extend(article_types_from_data(&data));
        }
        Err(e) => {
            eprintln!("記事タイプ一覧の取得に失敗: {}", e);
        }
    }

    all_types
}
