//! フィルタフォーム
//!
//! GETフォームなので送信するとページが再読み込みされ、
//! 新しいクエリからフィルタ条件が作り直される。

use leptos::*;

use crate::catalog::distinct_manufacturers;
use crate::models::PriceSort;
use crate::utils::log_trace::log_error;
use crate::StoreContext;

#[component]
pub fn FilterPanel() -> impl IntoView {
    let ctx = use_context::<StoreContext>().expect("StoreContext not found");
    let spec = ctx.filter.clone();

    let all_manufacturers = match ctx.products.get_all() {
        Ok(products) => distinct_manufacturers(&products),
        Err(e) => {
            log_error("catalog", &format!("メーカー一覧の取得失敗: {}", e));
            Vec::new()
        }
    };

    // クエリを外したURLへ移動
    let on_clear = move |_| {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(path) = location.pathname() {
                let _ = location.set_href(&path);
            }
        }
    };

    let manufacturer_items = all_manufacturers
        .into_iter()
        .map(|m| {
            let checked = spec.allows_manufacturer(&m);
            view! {
                <li>
                    <label>
                        {m.clone()}
                        <input type="checkbox" name="manufacturer" value=m checked=checked />
                    </label>
                </li>
            }
        })
        .collect_view();

    view! {
        <form class="filters" method="get">
            <input type="search" name="search" placeholder="Поиск" value=spec.search.clone() />

            <select name="price-sort">
                <option value="descending" selected={spec.price_sort == PriceSort::Descending}>
                    "Сначала дорогие"
                </option>
                <option value="ascending" selected={spec.price_sort == PriceSort::Ascending}>
                    "Сначала дешёвые"
                </option>
            </select>

            <fieldset>
                <legend>"Цена, р."</legend>
                <input type="number" name="min-price" value=spec.price.min.to_string() />
                <input type="number" name="max-price" value=spec.price.max.to_string() />
            </fieldset>

            <fieldset>
                <legend>"Оперативная память, ГБ"</legend>
                <input type="number" name="min-ram" value=spec.ram.min.to_string() />
                <input type="number" name="max-ram" value=spec.ram.max.to_string() />
            </fieldset>

            <fieldset>
                <legend>"Встроенная память, ГБ"</legend>
                <input type="number" name="min-storage" value=spec.storage.min.to_string() />
                <input type="number" name="max-storage" value=spec.storage.max.to_string() />
            </fieldset>

            <fieldset>
                <legend>"Производитель"</legend>
                <ul id="manufacturers">{manufacturer_items}</ul>
            </fieldset>

            <label>
                "Только со скидкой"
                <input type="checkbox" name="discounts" checked=spec.only_discounted />
            </label>

            <div class="filter-actions">
                <button type="submit">"Применить"</button>
                <button type="button" id="clear-filters" on:click=on_clear>"Сбросить фильтры"</button>
            </div>
        </form>
    }
}
