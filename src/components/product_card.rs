//! 商品カードコンポーネント
//! 商品一覧とカートの両方で使う

use leptos::*;

use crate::models::{format_price, Product};
use crate::StoreContext;

#[component]
pub fn ProductCard(
    product: Product,
    displayed_price: f64,
    /// カート内の数量
    count: u32,
    in_cart: bool,
) -> impl IntoView {
    let ctx = use_context::<StoreContext>().expect("StoreContext not found");

    let old_price = if product.has_discount() {
        format_price(product.price)
    } else {
        String::new()
    };

    // クリック用の変数クローン
    let ctx_main = ctx.clone();
    let id_main = product.id.clone();
    let on_add_main = move |_| ctx_main.add_to_cart(&id_main);

    let ctx_add = ctx.clone();
    let id_add = product.id.clone();
    let on_add = move |_| ctx_add.add_to_cart(&id_add);

    let id_remove = product.id.clone();
    let on_remove = move |_| ctx.remove_from_cart(&id_remove);

    view! {
        <li class="product" data-id=product.id.clone() data-in-cart={if in_cart { "true" } else { "false" }}>
            <img src=product.thumbnail_url.clone() alt=product.name.clone() />
            <div class="product-info">
                <h2 class="title">{product.name.clone()}</h2>
                <div class="price-info">
                    <h3 class="price">{format_price(displayed_price)}</h3>
                    <h4 class="old-price">{old_price}</h4>
                </div>
                <div class="product-actions">
                    <button class="add-product add-product-main" on:click=on_add_main>
                        "ДОБАВИТЬ В КОРЗИНУ"
                    </button>

                    <div class="add-product-counter">
                        <button class="add-product" on:click=on_add>"+"</button>
                        <span class="counter">{count}</span>
                        <button class="remove-product" on:click=on_remove>"-"</button>
                    </div>
                </div>
            </div>
        </li>
    }
}
