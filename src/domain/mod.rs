pub mod category;
pub mod pagination;
pub mod post;
pub mod query;
pub mod taxonomy;

// 公開APIの再エクスポート

// category.rsから
pub use category::{list_categories, Category};

// pagination.rsから
pub use pagination::{merge_post_pages, PostFeedController};

// post.rsから
pub use post::{fetch_post_page, CategoryRef, PageInfo, Post, PostPage};

// query.rsから
pub use query::{PostsQueryInput, PostsWhere, TaxQuery, ALL_SLUG};

// taxonomy.rsから
pub use taxonomy::{list_article_types, ArticleType};
