//! 商品リポジトリ

use std::collections::HashSet;

use crate::config::StorefrontConfig;
use crate::error::StoreError;
use crate::models::Product;
use crate::utils::log_trace::log_info;
use crate::utils::storage::{load_collection, save_collection, KeyValueStore};

#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProductRepository<S> {
    pub fn new(store: S, config: &StorefrontConfig) -> Self {
        ProductRepository {
            store,
            key: config.products_key.clone(),
        }
    }

    /// 全商品（未保存なら空）
    pub fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let products: Vec<Product> = load_collection(&self.store, &self.key)?;
        self.validate_all(&products)?;
        Ok(products)
    }

    fn validate_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        for product in products {
            product
                .validate()
                .map_err(|reason| StoreError::invalid(&self.key, reason))?;
            if !ids.insert(product.id.as_str()) {
                return Err(StoreError::invalid(
                    &self.key,
                    format!("商品IDが重複しています: {}", product.id),
                ));
            }
        }
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.get_all()?.into_iter().find(|p| p.id == id))
    }

    /// 同じIDが既にあれば何もしない。追加した場合は true
    pub fn add(&self, product: Product) -> Result<bool, StoreError> {
        product
            .validate()
            .map_err(|reason| StoreError::invalid(&self.key, reason))?;

        let mut products = self.get_all()?;
        if products.iter().any(|p| p.id == product.id) {
            return Ok(false);
        }

        let id = product.id.clone();
        products.push(product);
        save_collection(&self.store, &self.key, &products)?;
        log_info("catalog", &format!("商品を追加: {}", id));
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove_item(&self.key)
    }
}
