use crate::domain::post::{fetch_post_page, Post, PostPage};
use crate::domain::query::PostsQueryInput;
use crate::infra::api::graphql::GraphqlClient;
use anyhow::Result;
use std::collections::HashSet;

/// 投稿リストをidで重複排除する（先着順を維持）
fn dedupe_posts_by_id(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| seen.insert(post.id.clone()))
        .collect()
}

/// マージポリシー
///
/// 追記（load more）と置き換え（フィルター切り替え）の両方を
/// この1つの関数で処理する：
/// 1. `incoming.is_merge`がfalseなら既存結果を破棄してincomingで置き換える
/// 2. 既存結果があれば、既存→新着の順で連結しidで重複排除する
/// 3. 既存結果がなければ（初回ロード）incomingをそのまま返す
pub fn merge_post_pages(existing: Option<PostPage>, incoming: PostPage) -> PostPage {
    if !incoming.is_merge {
        return incoming;
    }

    match existing {
        Some(existing) => {
            let PostPage {
                posts: incoming_posts,
                page_info,
                is_merge,
            } = incoming;

            let mut combined = existing.posts;
            combined.extend(incoming_posts);

            PostPage {
                posts: dedupe_posts_by_id(combined),
                page_info,
                is_merge,
            }
        }
        None => incoming,
    }
}

/// ページネーション付き投稿フェッチのコントローラ
///
/// 1つの論理的な「現在の結果セット」とローディング状態を保持し、
/// 初回フェッチ・追加ロード・フィルター切り替えの各フェッチ結果を
/// マージポリシーに従って反映する。結果セットの書き手はこの
/// コントローラのみで、各フェッチは完了まで待機してから反映される。
#[derive(Debug)]
pub struct PostFeedController {
    category_slug: String,
    page_size: i64,
    current: Option<PostPage>,
    is_loading: bool,
}

impl PostFeedController {
    /// カテゴリーを指定してコントローラを作成
    pub fn new(category_slug: &str, page_size: i64) -> Self {
        Self {
            category_slug: category_slug.to_string(),
            page_size,
            current: None,
            is_loading: false,
        }
    }

    /// 最初のページを取得する
    pub async fn fetch_initial(&mut self, client: &dyn GraphqlClient) -> Result<()> {
        let input = PostsQueryInput::initial(&self.category_slug, self.page_size);
        self.run_fetch(client, input).await
    }

    /// 現在のカーソルから次のページを追加取得する
    ///
    /// 次ページが存在しない場合（初回未取得を含む）は何もしない
    pub async fn fetch_more(&mut self, client: &dyn GraphqlClient) -> Result<()> {
        let after = match &self.current {
            Some(page) if page.has_next_page() => match page.end_cursor() {
                Some(cursor) => cursor.to_string(),
                None => return Ok(()),
            },
            _ => return Ok(()),
        };

        let input = PostsQueryInput::next_page(&self.category_slug, self.page_size, &after);
        self.run_fetch(client, input).await
    }

    /// 記事タイプフィルターを切り替えて最初から取得し直す
    ///
    /// 既存の結果セットは全て破棄される（置き換え）。スラッグが
    /// 「all」の場合はタクソノミー条件なしの先頭ページに戻る。
    pub async fn switch_filter(
        &mut self,
        client: &dyn GraphqlClient,
        type_slug: &str,
    ) -> Result<()> {
        let input = PostsQueryInput::filter_switch(&self.category_slug, self.page_size, type_slug);
        self.run_fetch(client, input).await
    }

    /// フェッチを実行して結果をマージポリシーで反映する
    ///
    /// フェッチ失敗時は既存の結果セットに手を付けずエラーを返す。
    /// リトライや進行中フェッチのキャンセルは行わない。
    async fn run_fetch(&mut self, client: &dyn GraphqlClient, input: PostsQueryInput) -> Result<()> {
        self.is_loading = true;
        let result = fetch_post_page(client, &input).await;
        self.is_loading = false;

        let incoming = result?;
        self.current = Some(merge_post_pages(self.current.take(), incoming));
        Ok(())
    }

    /// 現在の結果セット
    pub fn page(&self) -> Option<&PostPage> {
        self.current.as_ref()
    }

    /// 現在表示中の投稿一覧（未取得なら空）
    pub fn posts(&self) -> &[Post] {
        self.current.as_ref().map(|p| p.posts.as_slice()).unwrap_or(&[])
    }

    /// 次のページが存在するか
    pub fn has_next_page(&self) -> bool {
        self.current
            .as_ref()
            .map(|p| p.has_next_page())
            .unwrap_or(false)
    }

    /// フェッチが進行中か（表示側のローディング表示に使う）
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}
