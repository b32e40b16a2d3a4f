//! デバッグ用フッター（ログの確認・デモデータのリセット）

use leptos::*;

use crate::seed::seed_demo_catalog;
use crate::utils::log_trace::{
    clear_logs, copy_logs_to_clipboard_async, download_logs, log_count, log_error, log_info,
};
use crate::StoreContext;

#[component]
pub fn DebugPanel() -> impl IntoView {
    let ctx = use_context::<StoreContext>().expect("StoreContext not found");
    let revision = ctx.revision;
    let (copy_success, set_copy_success) = create_signal(false);
    let (log_version, set_log_version) = create_signal(0u32);

    let entry_count = move || {
        revision.get();
        log_version.get();
        log_count()
    };

    let on_download = move |_| download_logs();

    let on_copy = move |_| {
        spawn_local(async move {
            if copy_logs_to_clipboard_async().await.is_ok() {
                set_copy_success.set(true);
                set_log_version.update(|v| *v += 1);
                // 2秒後にリセット
                gloo::timers::future::TimeoutFuture::new(2000).await;
                set_copy_success.set(false);
            }
        });
    };

    let on_clear_logs = move |_| {
        clear_logs();
        set_log_version.update(|v| *v += 1);
    };

    // カートとカタログを消してデモ用カタログを入れ直す
    let on_reset = move |_| {
        let result = ctx
            .cart
            .clear()
            .and_then(|_| ctx.products.clear())
            .and_then(|_| {
                if ctx.config.seed_demo_catalog {
                    seed_demo_catalog(&ctx.products).map(|_| ())
                } else {
                    Ok(())
                }
            });
        match result {
            Ok(()) => log_info("storage", "デモデータをリセットしました"),
            Err(e) => log_error("storage", &format!("リセット失敗: {}", e)),
        }
        ctx.rerender();
    };

    view! {
        <footer class="debug-panel">
            <span class="log-count">"Журнал: " {entry_count}</span>
            <button type="button" on:click=on_download>"Скачать журнал"</button>
            <button type="button" on:click=on_copy>
                {move || if copy_success.get() { "Скопировано!" } else { "Копировать журнал" }}
            </button>
            <button type="button" on:click=on_clear_logs>"Очистить журнал"</button>
            <button type="button" class="reset-demo" on:click=on_reset>"Сбросить демо-данные"</button>
        </footer>
    }
}
