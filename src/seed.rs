//! デモ用カタログ

use crate::error::StoreError;
use crate::models::Product;
use crate::repositories::ProductRepository;
use crate::utils::storage::KeyValueStore;

fn phone(
    id: &str,
    name: &str,
    price: f64,
    discount: Option<u32>,
    ram: u32,
    storage: u32,
    manufacturer: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail_url: format!("./static/images/{}.jpg", id),
        price,
        discount,
        ram,
        storage,
        manufacturer: manufacturer.to_string(),
    }
}

pub fn demo_catalog() -> Vec<Product> {
    vec![
        phone("1", "Смартфон DEXP A440 8 ГБ розовый", 3200.0, None, 1, 8, "DEXP"),
        phone("2", "Samsung Galaxy M52", 40999.0, Some(4), 6, 256, "Samsung"),
        phone("3", "Смартфон POCO F3 Черный", 32999.0, None, 6, 128, "POCO"),
        phone("4", "Смартфон POCO F3 Белый", 34999.0, Some(6), 6, 128, "POCO"),
    ]
}

/// 既存の商品はそのまま。新たに追加した件数を返す
pub fn seed_demo_catalog<S: KeyValueStore>(repo: &ProductRepository<S>) -> Result<usize, StoreError> {
    let mut added = 0;
    for product in demo_catalog() {
        if repo.add(product)? {
            added += 1;
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn test_seed_is_idempotent() {
        let repo = ProductRepository::new(MemoryStorage::new(), &StorefrontConfig::default());
        assert_eq!(seed_demo_catalog(&repo).unwrap(), 4);
        assert_eq!(seed_demo_catalog(&repo).unwrap(), 0);
        assert_eq!(repo.get_all().unwrap(), demo_catalog());
    }
}
