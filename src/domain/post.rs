use crate::domain::query::PostsQueryInput;
use crate::infra::api::graphql::GraphqlClient;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// カテゴリー絞り込み付きの投稿一覧クエリ
/// プレビューに必要なフィールドだけを射影する
pub const POSTS_QUERY: &str = r#"
query CategoryPosts($after: String, $before: String, $first: Int, $last: Int, $where: RootQueryToPostConnectionWhereArgs) {
  posts(after: $after, before: $before, first: $first, last: $last, where: $where) {
    nodes {
      id
      title
      categories {
        nodes {
          name
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
      startCursor
    }
  }
}
"#;

/// 投稿に付与されたカテゴリーの参照（名前のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// 一覧表示用の投稿プレビュー
/// リモートの投稿エンティティから必要なフィールドだけを平坦化したもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub categories: Vec<CategoryRef>,
}

/// ページネーション情報
/// 「もっと見る」の可否と次フェッチのカーソルを駆動する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
    pub start_cursor: Option<String>,
}

/// フェッチ1回分の結果ページ
///
/// コントローラが保持・マージする単位。`is_merge`はフェッチ時の
/// 呼び出し意図（追記/置き換え）をそのまま引き継ぐ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub page_info: PageInfo,
    pub is_merge: bool,
}

impl PostPage {
    /// 空のページを作成（レスポンス欠損時のフォールバック）
    pub fn empty(is_merge: bool) -> Self {
        Self {
            posts: Vec::new(),
            page_info: PageInfo::default(),
            is_merge,
        }
    }

    /// 次のページが存在するか
    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page
    }

    /// 次フェッチに使うカーソル
    pub fn end_cursor(&self) -> Option<&str> {
        self.page_info.end_cursor.as_deref()
    }
}

// レスポンス解析用の中間構造体
// フィールド欠損を許容するため全てOption/デフォルト付きで受ける
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPostsData {
    posts: Option<RawPostConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPostConnection {
    nodes: Vec<RawPost>,
    page_info: PageInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPost {
    id: Option<String>,
    title: Option<String>,
    categories: Option<RawCategoryConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategoryConnection {
    nodes: Vec<RawCategoryRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategoryRef {
    name: Option<String>,
}

/// GraphQLレスポンスの`data`から結果ページを構築する
///
/// 欠損したフィールドは「コンテンツなし」として扱い、エラーにはしない。
/// `id`のない投稿ノードは識別できないため一覧から除外する。
pub fn post_page_from_data(data: &Value, is_merge: bool) -> PostPage {
    let raw: RawPostsData = match serde_json::from_value(data.clone()) {
        Ok(raw) => raw,
        Err(_) => return PostPage::empty(is_merge),
    };

    let connection = match raw.posts {
        Some(connection) => connection,
        None => return PostPage::empty(is_merge),
    };

    let posts = connection
        .nodes
        .into_iter()
        .filter_map(|node| {
            let id = node.id?;
            let categories = node
                .categories
                .map(|c| {
                    c.nodes
                        .into_iter()
                        .filter_map(|cat| cat.name.map(|name| CategoryRef { name }))
                        .collect()
                })
                .unwrap_or_default();

            Some(Post {
                id,
                title: node.title.unwrap_or_default(),
                categories,
            })
        })
        .collect();

    PostPage {
        posts,
        page_info: connection.page_info,
        is_merge,
    }
}

/// クエリ意図に従って投稿ページを1回フェッチする
pub async fn fetch_post_page(
    client: &dyn GraphqlClient,
    input: &PostsQueryInput,
) -> Result<PostPage> {
    let variables = input.to_variables()?;
    let data = client.execute(POSTS_QUERY, variables).await?;
    Ok(post_page_from_data(&data, input.is_merge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// テスト用の投稿ノードJSONを作成
    fn post_node(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "categories": {"nodes": [{"name": "News"}]}
        })
    }

    #[test]
    fn test_post_page_from_full_data() {
        let data = json!({
            "posts": {
                "nodes": [post_node("1", "記事1"), post_node("2", "記事2")],
                "pageInfo": {"hasNextPage": true, "endCursor": "c2", "startCursor": "c1"}
            }
        });

        let page = post_page_from_data(&data, true);
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].id, "1");
        assert_eq!(page.posts[0].title, "記事1");
        assert_eq!(page.posts[0].categories[0].name, "News");
        assert!(page.has_next_page());
        assert_eq!(page.end_cursor(), Some("c2"));
        assert!(page.is_merge);
    }

    #[test]
    fn test_post_page_from_null_data() {
        // データ欠損時は空ページに縮退する（エラーにしない）
        let page = post_page_from_data(&Value::Null, true);
        assert!(page.posts.is_empty());
        assert!(!page.has_next_page());
        assert_eq!(page.end_cursor(), None);
    }

    #[test]
    fn test_post_page_tolerates_partial_nodes() {
        let data = json!({
            "posts": {
                "nodes": [
                    {"id": "1"},                      // titleもcategoriesも欠損
                    {"title": "idのない投稿"},         // idがないので除外される
                    {"id": "3", "categories": null},  // categoriesがnull
                ],
                "pageInfo": {"hasNextPage": false}
            }
        });

        let page = post_page_from_data(&data, true);
        assert_eq!(page.posts.len(), 2, "idを持つノードだけが残るべき");
        assert_eq!(page.posts[0].id, "1");
        assert_eq!(page.posts[0].title, "");
        assert!(page.posts[0].categories.is_empty());
        assert_eq!(page.posts[1].id, "3");
    }

    #[test]
    fn test_post_page_missing_page_info() {
        // pageInfoが欠損してもデフォルト値で縮退する
        let data = json!({"posts": {"nodes": [post_node("1", "記事1")]}});

        let page = post_page_from_data(&data, false);
        assert_eq!(page.posts.len(), 1);
        assert!(!page.has_next_page());
        assert!(!page.is_merge);
    }

    #[tokio::test]
    async fn test_fetch_post_page_with_mock() {
        use crate::domain::query::PostsQueryInput;
        use crate::infra::api::graphql::MockGraphqlClient;

        let mock_client = MockGraphqlClient::new_success(json!({
            "posts": {
                "nodes": [post_node("1", "記事1")],
                "pageInfo": {"hasNextPage": true, "endCursor": "c1"}
            }
        }));

        let input = PostsQueryInput::initial("news", 10);
        let page = fetch_post_page(&mock_client, &input).await.unwrap();

        assert_eq!(page.posts.len(), 1);
        assert!(page.is_merge, "初回フェッチの意図が引き継がれるべき");
        assert_eq!(page.end_cursor(), Some("c1"));
    }
}
