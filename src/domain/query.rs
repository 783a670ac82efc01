use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// フィルターメニューの「All」を表すスラッグ
/// このスラッグが選択されている間はtaxQueryを付与しない
pub const ALL_SLUG: &str = "all";

/// タクソノミーの種別（ワイヤー上は大文字の列挙値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Taxonomy {
    #[serde(rename = "ARTICLETYPE")]
    ArticleType,
}

/// タクソノミー条件の比較演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxQueryOperator {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
}

/// タクソノミー条件のマッチ対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxQueryField {
    #[serde(rename = "SLUG")]
    Slug,
    #[serde(rename = "NAME")]
    Name,
}

/// 複数条件の論理結合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// 単一のタクソノミー条件
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxArrayItem {
    pub taxonomy: Taxonomy,
    pub operator: TaxQueryOperator,
    pub terms: Vec<String>,
    pub field: TaxQueryField,
}

/// タクソノミー条件のグループ（条件のリスト + 結合方法）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxArrayGroup {
    pub tax_array: Vec<TaxArrayItem>,
    pub relation: Relation,
}

/// 投稿フィルターのタクソノミークエリ全体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxQuery {
    pub tax_array: Vec<TaxArrayGroup>,
}

impl TaxQuery {
    /// 指定した記事タイプのスラッグに一致する投稿だけを
    /// 通すタクソノミークエリを構築する
    pub fn for_article_type_slug(slug: &str) -> Self {
        Self {
            tax_array: vec![TaxArrayGroup {
                tax_array: vec![TaxArrayItem {
                    taxonomy: Taxonomy::ArticleType,
                    operator: TaxQueryOperator::In,
                    terms: vec![slug.to_string()],
                    field: TaxQueryField::Slug,
                }],
                relation: Relation::And,
            }],
        }
    }
}

/// 投稿クエリのwhere条件
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsWhere {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_query: Option<TaxQuery>,
}

impl PostsWhere {
    /// カテゴリーのみで絞り込むwhere条件を作成
    pub fn for_category(category_slug: &str) -> Self {
        Self {
            category_name: Some(category_slug.to_string()),
            tax_query: None,
        }
    }

    /// カテゴリー + 記事タイプで絞り込むwhere条件を作成
    ///
    /// 記事タイプが「All」の場合はタクソノミー条件を付与しない
    pub fn for_category_and_type(category_slug: &str, type_slug: &str) -> Self {
        let tax_query = if type_slug == ALL_SLUG {
            None
        } else {
            Some(TaxQuery::for_article_type_slug(type_slug))
        };

        Self {
            category_name: Some(category_slug.to_string()),
            tax_query,
        }
    }
}

/// 投稿フェッチ1回分のクエリ意図
///
/// `is_merge`は呼び出し側の意図（既存結果への追記か、全置き換えか）で、
/// ワイヤー上の変数としては送信されない。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQueryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_args: Option<PostsWhere>,
    #[serde(skip_serializing)]
    pub is_merge: bool,
}

impl PostsQueryInput {
    /// 最初のページを取得するクエリ意図を作成
    pub fn initial(category_slug: &str, page_size: i64) -> Self {
        Self {
            after: None,
            before: None,
            first: Some(page_size),
            last: None,
            where_args: Some(PostsWhere::for_category(category_slug)),
            is_merge: true,
        }
    }

    /// 「もっと見る」の追加ページを取得するクエリ意図を作成
    pub fn next_page(category_slug: &str, page_size: i64, after: &str) -> Self {
        Self {
            after: Some(after.to_string()),
            before: None,
            first: Some(page_size),
            last: None,
            where_args: Some(PostsWhere::for_category(category_slug)),
            is_merge: true,
        }
    }

    /// フィルター切り替え時のクエリ意図を作成
    ///
    /// カーソルはリセットし、既存結果は全置き換え（`is_merge=false`）
    pub fn filter_switch(category_slug: &str, page_size: i64, type_slug: &str) -> Self {
        Self {
            after: None,
            before: None,
            first: Some(page_size),
            last: None,
            where_args: Some(PostsWhere::for_category_and_type(category_slug, type_slug)),
            is_merge: false,
        }
    }

    /// GraphQLクエリ変数へシリアライズする（Noneのフィールドは省略）
    pub fn to_variables(&self) -> Result<Value> {
        serde_json::to_value(self).context("クエリ変数のシリアライズに失敗")
    }
}
