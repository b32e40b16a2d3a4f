//! カートリポジトリ

use std::collections::HashSet;

use crate::config::StorefrontConfig;
use crate::error::StoreError;
use crate::models::CartEntry;
use crate::utils::log_trace::log_info;
use crate::utils::storage::{load_collection, save_collection, KeyValueStore};

#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    pub fn new(store: S, config: &StorefrontConfig) -> Self {
        CartRepository {
            store,
            key: config.cart_key.clone(),
        }
    }

    /// 全エントリ（未保存なら空）
    ///
    /// 1商品1エントリ、数量1以上でなければデコードエラー
    pub fn get_all(&self) -> Result<Vec<CartEntry>, StoreError> {
        let entries: Vec<CartEntry> = load_collection(&self.store, &self.key)?;
        self.validate_all(&entries)?;
        Ok(entries)
    }

    fn validate_all(&self, entries: &[CartEntry]) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        for entry in entries {
            if entry.amount == 0 {
                return Err(StoreError::invalid(
                    &self.key,
                    format!("数量0のエントリ: {}", entry.product_id),
                ));
            }
            if !ids.insert(entry.product_id.as_str()) {
                return Err(StoreError::invalid(
                    &self.key,
                    format!("エントリが重複しています: {}", entry.product_id),
                ));
            }
        }
        Ok(())
    }

    pub fn get_by_product_id(&self, product_id: &str) -> Result<Option<CartEntry>, StoreError> {
        Ok(self
            .get_all()?
            .into_iter()
            .find(|e| e.product_id == product_id))
    }

    /// 数量を1増やす（無ければ数量1で追加）。追加後の数量を返す
    pub fn add(&self, product_id: &str) -> Result<u32, StoreError> {
        let mut entries = self.get_all()?;
        let amount = match entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => {
                entry.amount = entry.amount.saturating_add(1);
                entry.amount
            }
            None => {
                entries.push(CartEntry::new(product_id));
                1
            }
        };
        save_collection(&self.store, &self.key, &entries)?;
        log_info("cart", &format!("カートに追加: {} (数量 {})", product_id, amount));
        Ok(amount)
    }

    /// 数量を1減らす。1以下なら削除。残りの数量を返す
    pub fn remove(&self, product_id: &str) -> Result<u32, StoreError> {
        let mut entries = self.get_all()?;
        let Some(index) = entries.iter().position(|e| e.product_id == product_id) else {
            return Ok(0);
        };

        let remaining = if entries[index].amount <= 1 {
            entries.remove(index);
            0
        } else {
            entries[index].amount -= 1;
            entries[index].amount
        };
        save_collection(&self.store, &self.key, &entries)?;
        log_info("cart", &format!("カートから削除: {} (残り {})", product_id, remaining));
        Ok(remaining)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove_item(&self.key)
    }
}
