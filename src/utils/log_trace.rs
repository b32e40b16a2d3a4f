//! 時系列トレースログシステム
//! カート操作やストレージエラーを記録し、後から確認できるようにする

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::StorefrontConfig;
use crate::utils::storage::{AppStorage, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String, // "info", "warn", "error"
    pub category: String, // "storage", "catalog", "cart", etc.
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    storage: AppStorage,
    storage_key: String,
    max_entries: usize,
}

impl LogTrace {
    pub fn new(storage: AppStorage, config: &StorefrontConfig) -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(config.max_log_entries),
            storage,
            storage_key: config.log_key.clone(),
            max_entries: config.max_log_entries.max(1),
        };
        trace.load_from_storage();
        trace
    }

    pub fn log(&mut self, level: &str, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: now_iso(),
            level: level.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        // コンソールにも出力
        #[cfg(target_arch = "wasm32")]
        {
            let line = format!("[{}] {}", category, message);
            match level {
                "error" => web_sys::console::error_1(&line.into()),
                "warn" => web_sys::console::warn_1(&line.into()),
                _ => web_sys::console::log_1(&line.into()),
            }
        }

        while self.logs.len() >= self.max_entries {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);

        self.save_to_storage();
    }

    pub fn info(&mut self, category: &str, message: &str) {
        self.log("info", category, message, None);
    }

    pub fn info_with_data(&mut self, category: &str, message: &str, data: serde_json::Value) {
        self.log("info", category, message, Some(data));
    }

    pub fn warn(&mut self, category: &str, message: &str) {
        self.log("warn", category, message, None);
    }

    pub fn error(&mut self, category: &str, message: &str) {
        self.log("error", category, message, None);
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        serde_json::to_string_pretty(&self.get_logs()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        let _ = self.storage.remove_item(&self.storage_key);
    }

    fn load_from_storage(&mut self) {
        if let Ok(Some(json_str)) = self.storage.get_item(&self.storage_key) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json_str) {
                let skip = logs.len().saturating_sub(self.max_entries);
                self.logs = logs.into_iter().skip(skip).collect();
            }
        }
    }

    fn save_to_storage(&self) {
        // ログ保存の失敗は握りつぶす（ログ自体を記録できないため）
        let json_str = serde_json::to_string(&self.logs).unwrap_or_else(|_| "[]".to_string());
        let _ = self.storage.set_item(&self.storage_key, &json_str);
    }

    #[cfg(target_arch = "wasm32")]
    pub fn download_logs(&self) {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let json_str = self.get_logs_json();
        let timestamp = now_iso();
        let filename = format!("storefront_log_{}.json", timestamp.replace(":", "-").replace(".", "-"));

        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                let blob_parts = js_sys::Array::new();
                blob_parts.push(&JsValue::from_str(&json_str));

                let options = web_sys::BlobPropertyBag::new();
                options.set_type("application/json");

                if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
                    if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                        if let Ok(a) = document.create_element("a") {
                            let _ = a.set_attribute("href", &url);
                            let _ = a.set_attribute("download", &filename);
                            if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                                element.click();
                            }
                            let _ = web_sys::Url::revoke_object_url(&url);
                        }
                    }
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn download_logs(&self) {}
}

fn now_iso() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> =
        std::cell::RefCell::new(LogTrace::new(AppStorage::detect(), &StorefrontConfig::default()));
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().info(category, message);
    });
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().info_with_data(category, message, data);
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().warn(category, message);
    });
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().error(category, message);
    });
}

pub fn download_logs() {
    LOG_TRACE.with(|trace| {
        trace.borrow().download_logs();
    });
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().clear();
    });
}

pub fn log_count() -> usize {
    LOG_TRACE.with(|trace| trace.borrow().logs.len())
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| {
        trace.borrow().get_logs_json()
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn copy_logs_to_clipboard_async() -> Result<(), String> {
    let json_str = get_logs_json();

    if let Some(window) = web_sys::window() {
        let clipboard = window.navigator().clipboard();

        let promise = clipboard.write_text(&json_str);
        let result = wasm_bindgen_futures::JsFuture::from(promise).await;

        match result {
            Ok(_) => {
                log_info("log-trace", "ログをクリップボードにコピーしました");
                Ok(())
            }
            Err(e) => {
                let error_msg = format!("クリップボードへのコピー失敗: {:?}", e);
                log_error("log-trace", &error_msg);
                Err(error_msg)
            }
        }
    } else {
        Err("windowが利用できません".to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn copy_logs_to_clipboard_async() -> Result<(), String> {
    Err("windowが利用できません".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn config(max: usize) -> StorefrontConfig {
        StorefrontConfig {
            log_key: "test_log".to_string(),
            max_log_entries: max,
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let storage = AppStorage::Memory(MemoryStorage::new());
        let mut trace = LogTrace::new(storage, &config(2));
        trace.info("cart", "one");
        trace.warn("cart", "two");
        trace.error("storage", "three");

        let logs = trace.get_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "two");
        assert_eq!(logs[1].level, "error");
    }

    #[test]
    fn test_persists_and_reloads() {
        let memory = MemoryStorage::new();
        {
            let mut trace = LogTrace::new(AppStorage::Memory(memory.clone()), &config(10));
            trace.info_with_data("catalog", "loaded", serde_json::json!({ "count": 4 }));
        }
        let trace = LogTrace::new(AppStorage::Memory(memory.clone()), &config(10));
        let logs = trace.get_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].category, "catalog");
        assert_eq!(logs[0].data, Some(serde_json::json!({ "count": 4 })));
    }

    #[test]
    fn test_copy_without_window_fails() {
        use std::future::Future;
        use std::pin::pin;
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn noop_raw() -> RawWaker {
            fn clone(_: *const ()) -> RawWaker {
                noop_raw()
            }
            fn noop(_: *const ()) {}
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw()) };
        let mut cx = Context::from_waker(&waker);
        let mut fut = pin!(copy_logs_to_clipboard_async());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(result) => assert!(result.is_err()),
            Poll::Pending => panic!("ホスト上では即座に完了するはず"),
        }
    }

    #[test]
    fn test_clear_removes_stored_key() {
        let memory = MemoryStorage::new();
        let mut trace = LogTrace::new(AppStorage::Memory(memory.clone()), &config(10));
        trace.info("cart", "added");
        assert!(memory.get_item("test_log").unwrap().is_some());
        trace.clear();
        assert!(trace.get_logs().is_empty());
        assert!(memory.get_item("test_log").unwrap().is_none());
    }
}
