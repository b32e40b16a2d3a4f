//! カタログの絞り込み・並び替え・カート集計
//!
//! 描画のたびに呼ばれる純粋な処理。ストレージには触らない。

use std::cmp::Ordering;

use crate::models::{CartEntry, PriceSort, Product};
use crate::utils::query::{parse_leading_number, QueryParams};

/// 両端を含む範囲
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// 観測値の最小〜最大。空なら幅0の `[zero, zero]`
    fn observed(values: impl Iterator<Item = T>, zero: T) -> Self {
        values
            .fold(None, |acc: Option<Range<T>>, v| match acc {
                None => Some(Range { min: v, max: v }),
                Some(r) => Some(Range {
                    min: if v < r.min { v } else { r.min },
                    max: if v > r.max { v } else { r.max },
                }),
            })
            .unwrap_or(Range { min: zero, max: zero })
    }
}

// ============================================
// フィルタ条件
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub search: String,
    pub price_sort: PriceSort,
    pub price: Range<f64>,
    pub ram: Range<f64>,
    pub storage: Range<f64>,
    pub manufacturers: Vec<String>,
    pub only_discounted: bool,
}

impl FilterSpec {
    /// クエリから条件を組み立てる。未指定・解析不能な境界は商品の最小/最大
    pub fn from_query(query: &QueryParams, products: &[Product]) -> Self {
        let number_param = |key: &str| query.get(key).and_then(parse_leading_number);

        let price = Range::observed(products.iter().map(|p| p.price), 0.0);
        let ram = Range::observed(products.iter().map(|p| p.ram as f64), 0.0);
        let storage = Range::observed(products.iter().map(|p| p.storage as f64), 0.0);

        let requested: Vec<String> = query
            .get_all("manufacturer")
            .into_iter()
            .map(str::to_string)
            .collect();
        let manufacturers = if requested.is_empty() {
            distinct_manufacturers(products)
        } else {
            requested
        };

        FilterSpec {
            search: query.get("search").unwrap_or_default().to_string(),
            price_sort: query
                .get("price-sort")
                .map(PriceSort::parse)
                .unwrap_or_default(),
            price: Range {
                min: number_param("min-price").unwrap_or(price.min),
                max: number_param("max-price").unwrap_or(price.max),
            },
            ram: Range {
                min: number_param("min-ram").unwrap_or(ram.min),
                max: number_param("max-ram").unwrap_or(ram.max),
            },
            storage: Range {
                min: number_param("min-storage").unwrap_or(storage.min),
                max: number_param("max-storage").unwrap_or(storage.max),
            },
            manufacturers,
            only_discounted: query.has("discounts"),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        product
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
            && self.price.contains(product.price)
            && self.ram.contains(product.ram as f64)
            && self.storage.contains(product.storage as f64)
            && self.manufacturers.iter().any(|m| *m == product.manufacturer)
            && (!self.only_discounted || product.has_discount())
    }

    pub fn allows_manufacturer(&self, manufacturer: &str) -> bool {
        self.manufacturers.iter().any(|m| m == manufacturer)
    }

    /// 絞り込み後、表示価格で安定ソート
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut filtered: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| {
            let ord = a
                .displayed_price()
                .partial_cmp(&b.displayed_price())
                .unwrap_or(Ordering::Equal);
            match self.price_sort {
                PriceSort::Ascending => ord,
                PriceSort::Descending => ord.reverse(),
            }
        });
        filtered
    }
}

/// 出現順で重複を除いたメーカー一覧
pub fn distinct_manufacturers(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in products {
        if !out.contains(&p.manufacturer) {
            out.push(p.manufacturer.clone());
        }
    }
    out
}

// ============================================
// 商品一覧
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    pub product: Product,
    pub displayed_price: f64,
    /// カート内の数量（無ければ0）
    pub in_cart: u32,
}

/// `in_cart` は商品IDごとにカート内の数量を返す
pub fn build_listing<E>(
    spec: &FilterSpec,
    products: Vec<Product>,
    mut in_cart: impl FnMut(&str) -> Result<u32, E>,
) -> Result<Vec<ListingItem>, E> {
    spec.apply(products)
        .into_iter()
        .map(|product| {
            let in_cart = in_cart(&product.id)?;
            Ok(ListingItem {
                displayed_price: product.displayed_price(),
                in_cart,
                product,
            })
        })
        .collect()
}

// ============================================
// カート集計
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub amount: u32,
    pub displayed_price: f64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.displayed_price * self.amount as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: f64,
    /// 商品が見つからなかったエントリのID
    pub orphaned: Vec<String>,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 商品が見つからないエントリは数えない
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.amount).sum()
    }
}

/// カートのエントリを商品と突き合わせる。商品が無いエントリは飛ばして記録する
pub fn summarize_cart<E>(
    entries: &[CartEntry],
    mut find_product: impl FnMut(&str) -> Result<Option<Product>, E>,
) -> Result<CartSummary, E> {
    let mut summary = CartSummary::default();
    for entry in entries {
        match find_product(&entry.product_id)? {
            Some(product) => {
                let line = CartLine {
                    amount: entry.amount,
                    displayed_price: product.displayed_price(),
                    product,
                };
                summary.total += line.line_total();
                summary.lines.push(line);
            }
            None => summary.orphaned.push(entry.product_id.clone()),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::repositories::{CartRepository, ProductRepository};
    use crate::seed::{demo_catalog, seed_demo_catalog};
    use crate::utils::storage::MemoryStorage;
    use std::convert::Infallible;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn find_in(products: &[Product]) -> impl Fn(&str) -> Result<Option<Product>, Infallible> + '_ {
        move |id| Ok(products.iter().find(|p| p.id == id).cloned())
    }

    fn filtered(query: &[(&str, &str)]) -> Vec<Product> {
        let products = demo_catalog();
        let spec = FilterSpec::from_query(&QueryParams::from_pairs(query.iter().copied()), &products);
        spec.apply(products)
    }

    #[test]
    fn test_default_sort_descending_by_displayed_price() {
        let result = filtered(&[]);
        assert_eq!(ids(&result), vec!["2", "3", "4", "1"]);
        let prices: Vec<f64> = result.iter().map(|p| p.displayed_price()).collect();
        assert_eq!(prices, vec![39359.0, 32999.0, 32899.0, 3200.0]);
    }

    #[test]
    fn test_ascending_sort() {
        let result = filtered(&[("price-sort", "ascending")]);
        assert_eq!(ids(&result), vec!["1", "4", "3", "2"]);
    }

    #[test]
    fn test_discounts_flag() {
        let result = filtered(&[("discounts", "on")]);
        assert_eq!(ids(&result), vec!["2", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(ids(&filtered(&[("search", "poco f3")])), vec!["3", "4"]);
        assert_eq!(ids(&filtered(&[("search", "СМАРТФОН")])), vec!["3", "4", "1"]);
        assert!(filtered(&[("search", "iphone")]).is_empty());
    }

    #[test]
    fn test_ranges_are_inclusive_on_base_price() {
        // 商品4は割引後32899だが、範囲は割引前の価格で判定
        let result = filtered(&[("min-price", "32999"), ("max-price", "34999")]);
        assert_eq!(ids(&result), vec!["3", "4"]);

        assert_eq!(ids(&filtered(&[("min-storage", "200")])), vec!["2"]);
        assert_eq!(ids(&filtered(&[("max-ram", "1")])), vec!["1"]);
    }

    #[test]
    fn test_unparsable_bounds_fall_back_to_observed() {
        let products = demo_catalog();
        let query = QueryParams::from_pairs([("min-price", "cheap"), ("max-ram", "")]);
        let spec = FilterSpec::from_query(&query, &products);
        assert_eq!(spec.price, Range { min: 3200.0, max: 40999.0 });
        assert_eq!(spec.ram, Range { min: 1.0, max: 6.0 });
        assert_eq!(spec.storage, Range { min: 8.0, max: 256.0 });
        assert_eq!(spec.apply(products).len(), 4);
    }

    #[test]
    fn test_huge_bound_is_kept() {
        let products = demo_catalog();
        let query = QueryParams::from_pairs([("min-price", "99999999999999999999")]);
        let spec = FilterSpec::from_query(&query, &products);
        assert_eq!(spec.price.min, 1e20);
        assert!(spec.apply(products).is_empty());
    }

    #[test]
    fn test_manufacturer_filter() {
        let products = demo_catalog();
        let spec = FilterSpec::from_query(&QueryParams::default(), &products);
        assert_eq!(spec.manufacturers, vec!["DEXP", "Samsung", "POCO"]);

        let result = filtered(&[("manufacturer", "POCO"), ("manufacturer", "DEXP")]);
        assert_eq!(ids(&result), vec!["3", "4", "1"]);
    }

    #[test]
    fn test_empty_catalog_defaults_to_zero_width_range() {
        let spec = FilterSpec::from_query(&QueryParams::default(), &[]);
        assert_eq!(spec.price, Range { min: 0.0, max: 0.0 });
        assert_eq!(spec.ram, Range { min: 0.0, max: 0.0 });
        assert!(spec.manufacturers.is_empty());
        assert!(spec.apply(Vec::new()).is_empty());
    }

    #[test]
    fn test_listing_shows_cart_amount() {
        let products = demo_catalog();
        let spec = FilterSpec::from_query(&QueryParams::default(), &products);
        let cart = CartRepository::new(MemoryStorage::new(), &StorefrontConfig::default());
        cart.add("3").unwrap();
        cart.add("3").unwrap();
        let listing = build_listing(&spec, products, |id| {
            cart.get_by_product_id(id).map(|entry| entry.map(|e| e.amount).unwrap_or(0))
        })
        .unwrap();

        let item = listing.iter().find(|i| i.product.id == "3").unwrap();
        assert_eq!(item.in_cart, 2);
        assert_eq!(item.displayed_price, 32999.0);
        assert!(listing.iter().filter(|i| i.product.id != "3").all(|i| i.in_cart == 0));
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = summarize_cart(&[], find_in(&demo_catalog())).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn test_add_twice_remove_once() {
        let store = MemoryStorage::new();
        let config = StorefrontConfig::default();
        let products = ProductRepository::new(store.clone(), &config);
        let cart = CartRepository::new(store, &config);
        seed_demo_catalog(&products).unwrap();

        cart.add("1").unwrap();
        cart.add("1").unwrap();
        cart.remove("1").unwrap();

        let summary = summarize_cart(&cart.get_all().unwrap(), |id| products.get_by_id(id)).unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].amount, 1);
        assert_eq!(summary.total, 3200.0);
    }

    #[test]
    fn test_cart_total_uses_displayed_price() {
        let entries = vec![
            CartEntry { product_id: "2".to_string(), amount: 2 },
            CartEntry { product_id: "4".to_string(), amount: 1 },
        ];
        let summary = summarize_cart(&entries, find_in(&demo_catalog())).unwrap();
        assert_eq!(summary.total, 39359.0 * 2.0 + 32899.0);
        assert_eq!(summary.lines[0].line_total(), 78718.0);
    }

    #[test]
    fn test_orphaned_entries_are_skipped() {
        let entries = vec![
            CartEntry { product_id: "gone".to_string(), amount: 3 },
            CartEntry { product_id: "1".to_string(), amount: 1 },
        ];
        let summary = summarize_cart(&entries, find_in(&demo_catalog())).unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total, 3200.0);
        assert_eq!(summary.orphaned, vec!["gone"]);
        assert_eq!(summary.item_count(), 1);
    }

    #[test]
    fn test_item_count_sums_amounts() {
        let entries = vec![
            CartEntry { product_id: "2".to_string(), amount: 2 },
            CartEntry { product_id: "4".to_string(), amount: 3 },
        ];
        let summary = summarize_cart(&entries, find_in(&demo_catalog())).unwrap();
        assert_eq!(summary.item_count(), 5);
        assert_eq!(summarize_cart(&[], find_in(&[])).unwrap().item_count(), 0);
    }
}
