//! Page window parameters and the paginated response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::store::Row;

/// Normalized `page`/`per_page` pair.
///
/// Callers default to `page=1`, `per_page=100`; both are clamped to ≥ 1.
/// `per_page` is intentionally uncapped (see DESIGN.md).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: u64,
    pub per_page: u64,
}

impl PageParams {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(100).max(1),
        }
    }
}

/// Standard envelope for every paginated dataset response
#[derive(Debug, Clone, Serialize)]
pub struct PageEnvelope {
    pub data: Vec<Value>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

impl PageEnvelope {
    /// Build the envelope from a page of rows and the exact filtered count.
    ///
    /// `pages = ceil(total / per_page)` when `total > 0`, else `0`.
    pub fn new(rows: Vec<Row>, total: Option<u64>, params: PageParams) -> Self {
        let total = total.unwrap_or(0);
        let pages = if total > 0 {
            total.div_ceil(params.per_page)
        } else {
            0
        };

        Self {
            data: rows.into_iter().map(Value::Object).collect(),
            total,
            page: params.page,
            per_page: params.per_page,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                let Value::Object(map) = json!({"id": i}) else {
                    unreachable!()
                };
                map
            })
            .collect()
    }

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::new(None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 100);
    }

    #[test]
    fn test_page_params_clamped() {
        let params = PageParams::new(Some(0), Some(0));
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 1);
    }

    #[test]
    fn test_pages_is_ceiling() {
        let envelope = PageEnvelope::new(rows(100), Some(250), PageParams::new(Some(1), Some(100)));
        assert_eq!(envelope.pages, 3);
        assert_eq!(envelope.total, 250);
    }

    #[test]
    fn test_exact_multiple() {
        let envelope = PageEnvelope::new(rows(100), Some(200), PageParams::new(Some(2), Some(100)));
        assert_eq!(envelope.pages, 2);
        assert_eq!(envelope.page, 2);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let envelope = PageEnvelope::new(rows(0), Some(0), PageParams::new(None, None));
        assert_eq!(envelope.pages, 0);
        assert_eq!(envelope.total, 0);
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_missing_count_is_zero_total() {
        let envelope = PageEnvelope::new(rows(3), None, PageParams::new(None, None));
        assert_eq!(envelope.total, 0);
        assert_eq!(envelope.pages, 0);
        assert_eq!(envelope.data.len(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let envelope = PageEnvelope::new(rows(1), Some(1), PageParams::new(None, None));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["page"], 1);
        assert_eq!(json["per_page"], 100);
        assert_eq!(json["pages"], 1);
        assert!(json["data"].is_array());
    }
}
