//! カートダイアログ

use leptos::*;

use super::ProductCard;
use crate::StoreContext;

/// カートの中身と合計。`revision` が変わるたびに描き直す
#[component]
pub fn CartDialog(dialog_ref: NodeRef<html::Dialog>) -> impl IntoView {
    let ctx = use_context::<StoreContext>().expect("StoreContext not found");

    let on_close = move |_| {
        if let Some(dialog) = dialog_ref.get() {
            dialog.close();
        }
    };

    let content = move || {
        ctx.revision.get();
        match ctx.cart_summary() {
            Ok(summary) => {
                let empty = summary.is_empty();
                let buy_label = format!("Купить за {} р.", summary.total);
                view! {
                    <ul id="cart-items" data-empty={if empty { "true" } else { "false" }}>
                        {summary.lines.into_iter().map(|line| view! {
                            <ProductCard
                                product=line.product
                                displayed_price=line.displayed_price
                                count=line.amount
                                in_cart=true
                            />
                        }).collect_view()}
                    </ul>
                    {empty.then(|| view! { <p class="cart-empty">"Корзина пуста"</p> })}
                    <button type="button" id="buy-button">{buy_label}</button>
                }.into_view()
            }
            Err(e) => view! {
                <p class="status error">{format!("Не удалось загрузить корзину: {}", e)}</p>
            }.into_view(),
        }
    };

    view! {
        <dialog class="cart-dialog" node_ref=dialog_ref>
            <div class="cart-header">
                <h2>"Корзина"</h2>
                <button type="button" id="cart-close" on:click=on_close>"×"</button>
            </div>
            <div id="products-wrapper">{content}</div>
        </dialog>
    }
}
