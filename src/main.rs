use leptos::*;
use std::rc::Rc;

mod catalog;
mod components;
mod config;
mod error;
mod models;
mod repositories;
mod seed;
mod utils;
mod views;

use catalog::{build_listing, summarize_cart, CartSummary, FilterSpec, ListingItem};
use config::StorefrontConfig;
use error::StoreError;
use repositories::{CartRepository, ProductRepository};
use utils::log_trace::{log_error, log_info_with_data, log_warn};
use utils::query::QueryParams;
use utils::storage::AppStorage;
use views::StorefrontView;

// ============================================
// 共有コンテキスト
// ============================================

/// リポジトリ・フィルタ条件・再描画トリガー
#[derive(Clone)]
pub struct StoreContext {
    pub config: Rc<StorefrontConfig>,
    pub products: ProductRepository<AppStorage>,
    pub cart: CartRepository<AppStorage>,
    /// ページ読み込み時に一度だけ決まる
    pub filter: Rc<FilterSpec>,
    pub revision: ReadSignal<u32>,
    pub set_revision: WriteSignal<u32>,
}

impl StoreContext {
    /// 変更後は全体を描き直す
    pub fn rerender(&self) {
        self.set_revision.update(|r| *r = r.wrapping_add(1));
    }

    pub fn listing(&self) -> Result<Vec<ListingItem>, StoreError> {
        let products = self.products.get_all()?;
        build_listing(&self.filter, products, |id| {
            self.cart
                .get_by_product_id(id)
                .map(|entry| entry.map(|e| e.amount).unwrap_or(0))
        })
    }

    pub fn cart_summary(&self) -> Result<CartSummary, StoreError> {
        let entries = self.cart.get_all()?;
        let summary = summarize_cart(&entries, |id| self.products.get_by_id(id))?;
        if !summary.orphaned.is_empty() {
            log_warn(
                "cart",
                &format!("商品が見つからないエントリを除外: {}", summary.orphaned.join(", ")),
            );
        }
        Ok(summary)
    }

    pub fn add_to_cart(&self, product_id: &str) {
        if let Err(e) = self.cart.add(product_id) {
            log_error("cart", &format!("カート追加失敗: {}", e));
        }
        self.rerender();
    }

    pub fn remove_from_cart(&self, product_id: &str) {
        if let Err(e) = self.cart.remove(product_id) {
            log_error("cart", &format!("カート削除失敗: {}", e));
        }
        self.rerender();
    }
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    let config = StorefrontConfig::default();
    let storage = AppStorage::detect();
    if !storage.is_persistent() {
        log_warn("storage", "localStorageが利用できないため、データはこのセッション限りです");
    }

    let products = ProductRepository::new(storage.clone(), &config);
    let cart = CartRepository::new(storage, &config);

    if config.seed_demo_catalog {
        match seed::seed_demo_catalog(&products) {
            Ok(0) => {}
            Ok(added) => log_info_with_data(
                "catalog",
                "デモ用カタログを投入しました",
                serde_json::json!({ "added": added }),
            ),
            Err(e) => log_error("catalog", &format!("カタログ投入失敗: {}", e)),
        }
    }

    let all_products = products.get_all().unwrap_or_else(|e| {
        log_error("catalog", &format!("商品の読み込み失敗: {}", e));
        Vec::new()
    });
    let filter = FilterSpec::from_query(&QueryParams::from_location(), &all_products);

    let (revision, set_revision) = create_signal(0u32);
    provide_context(StoreContext {
        config: Rc::new(config),
        products,
        cart,
        filter: Rc::new(filter),
        revision,
        set_revision,
    });

    view! { <StorefrontView /> }
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
