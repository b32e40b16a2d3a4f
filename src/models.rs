//! データ構造体モジュール

use serde::{Deserialize, Serialize};

// ============================================
// 商品・カート
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: String,
    /// 割引前の価格
    pub price: f64,
    /// 割引率（%）
    #[serde(default)]
    pub discount: Option<u32>,
    pub ram: u32,
    pub storage: u32,
    pub manufacturer: String,
}

impl Product {
    /// 割引が設定されているか（0%は割引なし扱い）
    pub fn has_discount(&self) -> bool {
        matches!(self.discount, Some(d) if d > 0)
    }

    /// 表示価格: 割引後の価格を四捨五入
    pub fn displayed_price(&self) -> f64 {
        match self.discount {
            Some(d) if d > 0 => (self.price * (1.0 - d as f64 / 100.0)).round(),
            _ => self.price,
        }
    }

    /// 保存データとして妥当か検証
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("商品IDが空です".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("商品{}の価格が不正です: {}", self.id, self.price));
        }
        if let Some(d) = self.discount {
            if d > 100 {
                return Err(format!("商品{}の割引率が不正です: {}", self.id, d));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: String,
    pub amount: u32,
}

impl CartEntry {
    pub fn new(product_id: &str) -> Self {
        CartEntry {
            product_id: product_id.to_string(),
            amount: 1,
        }
    }
}

// ============================================
// 並び順
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    Ascending,
    #[default]
    Descending,
}

impl PriceSort {
    /// `ascending` 以外はすべて降順
    pub fn parse(value: &str) -> Self {
        if value == "ascending" {
            PriceSort::Ascending
        } else {
            PriceSort::Descending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSort::Ascending => "ascending",
            PriceSort::Descending => "descending",
        }
    }
}

/// 価格表示（例: "39359 р."）
pub fn format_price(price: f64) -> String {
    format!("{} р.", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(price: f64, discount: Option<u32>) -> Product {
        Product {
            id: "x".to_string(),
            name: "Phone".to_string(),
            thumbnail_url: String::new(),
            price,
            discount,
            ram: 4,
            storage: 64,
            manufacturer: "Acme".to_string(),
        }
    }

    #[test]
    fn test_displayed_price() {
        assert_eq!(phone(40999.0, Some(4)).displayed_price(), 39359.0);
        assert_eq!(phone(34999.0, Some(6)).displayed_price(), 32899.0);
        assert_eq!(phone(3200.0, None).displayed_price(), 3200.0);
        assert_eq!(phone(99.5, Some(0)).displayed_price(), 99.5);
    }

    #[test]
    fn test_validate() {
        assert!(phone(100.0, Some(100)).validate().is_ok());
        assert!(phone(100.0, Some(101)).validate().is_err());
        assert!(phone(-1.0, None).validate().is_err());
        assert!(phone(f64::NAN, None).validate().is_err());
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{"id":"2","name":"Samsung Galaxy M52","thumbnailUrl":"./static/images/2.jpg",
            "price":40999,"discount":4,"ram":6,"storage":256,"manufacturer":"Samsung"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.thumbnail_url, "./static/images/2.jpg");
        assert_eq!(p.discount, Some(4));

        let entry: CartEntry = serde_json::from_str(r#"{"productId":"1","amount":2}"#).unwrap();
        assert_eq!(entry.product_id, "1");
        let out = serde_json::to_string(&entry).unwrap();
        assert!(out.contains("\"productId\""));
    }

    #[test]
    fn test_price_sort_parse() {
        assert_eq!(PriceSort::parse("ascending"), PriceSort::Ascending);
        assert_eq!(PriceSort::parse("descending"), PriceSort::Descending);
        assert_eq!(PriceSort::parse("random"), PriceSort::Descending);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(39359.0), "39359 р.");
    }
}
