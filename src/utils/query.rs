//! URLクエリパラメータ

/// フィルタで読むキー
pub const QUERY_KEYS: [&str; 10] = [
    "search",
    "price-sort",
    "min-price",
    "max-price",
    "min-ram",
    "max-ram",
    "min-storage",
    "max-storage",
    "manufacturer",
    "discounts",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        QueryParams {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// `location.search` から読み込む
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) else {
            return Self::default();
        };
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Self::default();
        };

        let mut pairs = Vec::new();
        for key in QUERY_KEYS {
            for value in params.get_all(key).iter() {
                if let Some(value) = value.as_string() {
                    pairs.push((key.to_string(), value));
                }
            }
        }
        QueryParams { pairs }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_location() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }
}

/// 先頭の整数部分だけを読む（"12abc" → 12、"abc" → None）
///
/// 桁数が多くても失敗せず、大きな値としてそのまま扱う
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: f64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys() {
        let q = QueryParams::from_pairs([
            ("manufacturer", "POCO"),
            ("search", "galaxy"),
            ("manufacturer", "Samsung"),
        ]);
        assert_eq!(q.get("manufacturer"), Some("POCO"));
        assert_eq!(q.get_all("manufacturer"), vec!["POCO", "Samsung"]);
        assert!(q.has("search"));
        assert!(!q.has("discounts"));
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("3200"), Some(3200.0));
        assert_eq!(parse_leading_number("  12abc"), Some(12.0));
        assert_eq!(parse_leading_number("-5"), Some(-5.0));
        assert_eq!(parse_leading_number("8.5"), Some(8.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn test_parse_leading_number_beyond_i64() {
        assert_eq!(parse_leading_number("99999999999999999999"), Some(1e20));
        assert_eq!(parse_leading_number("-99999999999999999999x"), Some(-1e20));
    }
}
