use crate::{
    domain::{
        pagination::PostFeedController,
        post::Post,
        taxonomy::{list_article_types, ArticleType},
    },
    infra::api::graphql::GraphqlClient,
};
use anyhow::Result;

/// カテゴリーフィードワークフローのメイン実行関数（依存性を注入）
///
/// 1. カテゴリーに紐づく記事タイプのフィルターメニューを構築
/// 2. 投稿の最初のページを取得
/// 3. 次ページが尽きるまで「もっと見る」で追加取得
/// 4. 各記事タイプへのフィルター切り替えをデモ実行
pub async fn execute_feed_workflow<G: GraphqlClient>(
    client: &G,
    category_slug: &str,
    page_size: i64,
) -> Result<()> {
    println!(
        "=== カテゴリーフィード開始（カテゴリー: {}）===",
        category_slug
    );

    // 段階1: 記事タイプメニューの構築
    let article_types = build_filter_menu(client, category_slug).await;

    // 段階2〜3: 最初のページ取得と追加ロード
    let mut controller = PostFeedController::new(category_slug, page_size);
    process_load_all_pages(client, &mut controller).await?;

    // 段階4: フィルター切り替えデモ（「All」以外の各タイプ）
    process_filter_switches(client, &mut controller, &article_types).await;

    println!(
        "=== カテゴリーフィード完了（カテゴリー: {}）===",
        category_slug
    );
    Ok(())
}

/// 記事タイプのフィルターメニューを取得して表示する
async fn build_filter_menu<G: GraphqlClient>(
    client: &G,
    category_slug: &str,
) -> Vec<ArticleType> {
    println!("--- 記事タイプメニュー構築 ---");

    let article_types = list_article_types(category_slug, client).await;
    println!("記事タイプ: {}件", article_types.len());
    for article_type in &article_types {
        println!("  [{}] {}", article_type.slug, article_type.name);
    }

    article_types
}

/// 最初のページを取得し、次ページが尽きるまで追加ロードする
async fn process_load_all_pages<G: GraphqlClient>(
    client: &G,
    controller: &mut PostFeedController,
) -> Result<()> {
    println!("--- 投稿取得開始 ---");

    controller.fetch_initial(client).await?;
    let mut page_count = 1;
    print_posts(controller.posts());

    while controller.has_next_page() {
        controller.fetch_more(client).await?;
        page_count += 1;
        println!("  --- {}ページ目を追加ロード ---", page_count);
        print_posts(controller.posts());
    }

    println!(
        "--- 投稿取得完了: 全{}ページ、{}件 ---",
        page_count,
        controller.posts().len()
    );
    Ok(())
}

/// 「All」以外の各記事タイプへのフィルター切り替えを実行する
///
/// 個々の切り替え失敗は表示して続行する（既存の結果セットは
/// コントローラ側で保持される）
async fn process_filter_switches<G: GraphqlClient>(
    client: &G,
    controller: &mut PostFeedController,
    article_types: &[ArticleType],
) {
    println!("--- フィルター切り替えデモ ---");

    for article_type in article_types.iter().filter(|t| !t.is_all()) {
        println!("フィルター切り替え: {}", article_type.name);

        match controller.switch_filter(client, &article_type.slug).await {
            Ok(()) => {
                print_posts(controller.posts());
            }
            Err(e) => {
                eprintln!("  フィルター切り替えエラー: {}", e);
            }
        }
    }

    println!("--- フィルター切り替えデモ完了 ---");
}

/// 投稿一覧を表示する
fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("  （投稿なし）");
        return;
    }
    for post in posts {
        let category_names: Vec<&str> = post.categories.iter().map(|c| c.name.as_str()).collect();
        println!("  {} ({})", post.title, category_names.join(", "));
    }
}
