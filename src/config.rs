//! 設定

pub const PRODUCTS_KEY: &str = "products";
pub const CART_KEY: &str = "cart";
pub const LOG_TRACE_KEY: &str = "storefront_log_trace";
pub const MAX_LOG_ENTRIES: usize = 1000;

/// ストレージキーと起動時の挙動
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub products_key: String,
    pub cart_key: String,
    pub log_key: String,
    pub max_log_entries: usize,
    /// 起動時にデモ用カタログを投入するか
    pub seed_demo_catalog: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            products_key: PRODUCTS_KEY.to_string(),
            cart_key: CART_KEY.to_string(),
            log_key: LOG_TRACE_KEY.to_string(),
            max_log_entries: MAX_LOG_ENTRIES,
            seed_demo_catalog: true,
        }
    }
}
