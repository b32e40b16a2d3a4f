//! ストアフロント画面

use leptos::*;

use crate::components::{CartDialog, DebugPanel, FilterPanel, ProductCard};
use crate::utils::log_trace::log_error;
use crate::StoreContext;

#[component]
pub fn StorefrontView() -> impl IntoView {
    let ctx = use_context::<StoreContext>().expect("StoreContext not found");
    let dialog_ref = create_node_ref::<html::Dialog>();

    let open_cart = move |_| {
        if let Some(dialog) = dialog_ref.get() {
            let _ = dialog.show_modal();
        }
    };

    let count_ctx = ctx.clone();
    let cart_count = move || {
        count_ctx.revision.get();
        count_ctx
            .cart_summary()
            .map(|summary| summary.item_count())
            .unwrap_or(0)
    };

    // 商品一覧: カート操作のたびに全体を描き直す
    let product_list = move || {
        ctx.revision.get();
        match ctx.listing() {
            Ok(items) if items.is_empty() => view! {
                <p class="no-products">"Ничего не найдено"</p>
            }.into_view(),
            Ok(items) => items.into_iter().map(|item| {
                let in_cart = item.in_cart > 0;
                view! {
                    <ProductCard
                        product=item.product
                        displayed_price=item.displayed_price
                        count=item.in_cart
                        in_cart=in_cart
                    />
                }
            }).collect_view(),
            Err(e) => {
                log_error("catalog", &format!("商品一覧の描画失敗: {}", e));
                view! {
                    <p class="status error">{format!("Не удалось загрузить каталог: {}", e)}</p>
                }.into_view()
            }
        }
    };

    view! {
        <div class="storefront">
            <header class="app-header">
                <h1>"Смартфоны"</h1>
                <button type="button" id="cart" on:click=open_cart>
                    "Корзина (" {cart_count} ")"
                </button>
                <CartDialog dialog_ref=dialog_ref />
            </header>

            <main class="container">
                <aside class="sidebar">
                    <FilterPanel />
                </aside>
                <ul id="products">{product_list}</ul>
            </main>

            <DebugPanel />
        </div>
    }
}
