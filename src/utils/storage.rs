//! キー・バリューストレージ
//!
//! localStorage とインメモリの2実装、およびコレクションの保存形式
//! （`{"version": 1, "items": [...]}`）を扱う。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StoreError;

/// 現行の保存形式バージョン（素の配列はバージョン0として読む）
pub const SCHEMA_VERSION: u32 = 1;

const PROBE_KEY: &str = "__storefront_probe";

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

// ============================================
// localStorage
// ============================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        window.local_storage().ok().flatten().ok_or(StoreError::Unavailable)
    }

    /// 書き込みまで可能か確認（プライベートモードでは setItem が失敗する）
    pub fn is_available() -> bool {
        let storage = BrowserStorage;
        storage.set_item(PROBE_KEY, "1").is_ok() && storage.remove_item(PROBE_KEY).is_ok()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?.get_item(key).map_err(|_| StoreError::Unavailable)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Write {
                    key: key.to_string(),
                    message: format!("{:?}", e),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Write {
                    key: key.to_string(),
                    message: format!("{:?}", e),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }
}

// ============================================
// インメモリ（テスト・フォールバック用）
// ============================================

/// クローン同士で内容を共有する
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// ============================================
// 実行時に選ぶストレージ
// ============================================

#[derive(Debug, Clone)]
pub enum AppStorage {
    Browser(BrowserStorage),
    /// localStorageが使えない場合（セッション限り）
    Memory(MemoryStorage),
}

impl AppStorage {
    pub fn detect() -> Self {
        if BrowserStorage::is_available() {
            AppStorage::Browser(BrowserStorage)
        } else {
            AppStorage::Memory(MemoryStorage::new())
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, AppStorage::Browser(_))
    }
}

impl KeyValueStore for AppStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            AppStorage::Browser(s) => s.get_item(key),
            AppStorage::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            AppStorage::Browser(s) => s.set_item(key, value),
            AppStorage::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match self {
            AppStorage::Browser(s) => s.remove_item(key),
            AppStorage::Memory(s) => s.remove_item(key),
        }
    }
}

// ============================================
// コレクションの保存形式
// ============================================

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    version: u32,
    items: Vec<T>,
}

/// 保存済みコレクションを読み込む（キーが無ければ空）
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(json) = store.get_item(key)? else {
        return Ok(Vec::new());
    };
    decode_collection(key, &json)
}

pub fn decode_collection<T: DeserializeOwned>(key: &str, json: &str) -> Result<Vec<T>, StoreError> {
    let decode_err = |source| StoreError::Decode {
        key: key.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(json).map_err(decode_err)?;

    // 旧形式: 素の配列
    if value.is_array() {
        return serde_json::from_value(value).map_err(decode_err);
    }

    if let Some(found) = value.get("version").and_then(Value::as_u64) {
        if found != SCHEMA_VERSION as u64 {
            return Err(StoreError::UnsupportedVersion {
                key: key.to_string(),
                found: u32::try_from(found).unwrap_or(u32::MAX),
            });
        }
    }

    let envelope: Envelope<T> = serde_json::from_value(value).map_err(decode_err)?;
    Ok(envelope.items)
}

/// コレクション全体を書き直す
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        items,
    };
    let json = serde_json::to_string(&envelope).map_err(|e| StoreError::Write {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set_item(key, &json)
}
