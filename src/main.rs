use postdoggo::app::workflow::execute_feed_workflow;
use postdoggo::domain::category::list_categories;
use postdoggo::infra::api::graphql::ReqwestGraphqlClient;
use postdoggo::types::AppConfig;

/// 一覧表示で取得するカテゴリーの最大件数
const CATEGORIES_FIRST: i64 = 50;

#[tokio::main]
async fn main() {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定の読み込みに失敗しました: {}", e);
            std::process::exit(1);
        }
    };

    let client = ReqwestGraphqlClient::from_config(&config);

    // カテゴリースラッグは引数から取得。指定がなければ一覧の先頭を使用
    let category_slug = match std::env::args().nth(1) {
        Some(slug) => slug,
        None => {
            println!("=== カテゴリー一覧を取得 ===");
            match list_categories(&client, CATEGORIES_FIRST).await {
                Ok(categories) if !categories.is_empty() => {
                    for category in &categories {
                        println!("  {}", category);
                    }
                    categories[0].slug.clone()
                }
                Ok(_) => {
                    eprintln!("カテゴリーが1件も見つかりませんでした");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("カテゴリー一覧の取得中にエラーが発生しました: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Err(e) = execute_feed_workflow(&client, &category_slug, config.page_size).await {
        eprintln!("フィードワークフローの実行中にエラーが発生しました: {}", e);
        std::process::exit(1);
    }
}
