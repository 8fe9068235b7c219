//! Products and their barcodes

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pagetable::{PageRequest, SortDirection};
use serde::{Deserialize, Serialize};

/// A product row as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub stock_code: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub stock_quantity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub id: i64,
    pub barcode: String,
    pub stock_code: String,
}

/// One row of the product/barcode join. A product with several barcodes
/// appears once per barcode; one without any appears once with `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductJoinRow {
    pub products: Product,
    pub barcodes: Option<Barcode>,
}

/// A product with all of its barcodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithBarcodes {
    #[serde(flatten)]
    pub product: Product,
    pub barcodes: Vec<Barcode>,
}

/// Body of `GET /admin/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPayload {
    #[serde(default)]
    pub message: String,
    pub products: Vec<ProductJoinRow>,
    pub row_count: usize,
}

/// One page of grouped products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductWithBarcodes>,
    pub row_count: usize,
}

impl From<ProductsPayload> for ProductPage {
    fn from(payload: ProductsPayload) -> Self {
        Self {
            products: group_product_rows(payload.products),
            row_count: payload.row_count,
        }
    }
}

/// Collapse join rows into one entry per stock code, in first-seen order.
pub fn group_product_rows(rows: Vec<ProductJoinRow>) -> Vec<ProductWithBarcodes> {
    let mut grouped: Vec<ProductWithBarcodes> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        match index.get(&row.products.stock_code) {
            Some(&i) => {
                if let Some(barcode) = row.barcodes {
                    grouped[i].barcodes.push(barcode);
                }
            }
            None => {
                index.insert(row.products.stock_code.clone(), grouped.len());
                grouped.push(ProductWithBarcodes {
                    product: row.products,
                    barcodes: row.barcodes.into_iter().collect(),
                });
            }
        }
    }
    grouped
}

/// Sort keys the products endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Name,
    Price,
    StockCode,
    Status,
    StockQuantity,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::StockCode => "stockCode",
            Self::Status => "status",
            Self::StockQuantity => "stockQuantity",
        }
    }

    /// Map a table column id to a sort key.
    pub fn from_column_id(id: &str) -> Option<Self> {
        match id {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "stockCode" => Some(Self::StockCode),
            "status" => Some(Self::Status),
            "stockQuantity" => Some(Self::StockQuantity),
            _ => None,
        }
    }
}

/// Query parameters of `GET /admin/products`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pub server_code: String,
    /// 1-based.
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortDirection,
}

impl ProductQuery {
    /// First page, default order.
    pub fn new(server_code: impl Into<String>) -> Self {
        Self {
            server_code: server_code.into(),
            page: 1,
            limit: 20,
            search: None,
            sort_by: SortBy::Name,
            sort_order: SortDirection::Ascending,
        }
    }

    /// Build from a table page request. Unknown sort columns fall back to
    /// the default order.
    pub fn from_request(server_code: impl Into<String>, request: &PageRequest) -> Self {
        let sort_by = request
            .sort
            .column_id()
            .and_then(SortBy::from_column_id);
        Self {
            server_code: server_code.into(),
            page: request.page.max(1),
            limit: request.page_size.max(1),
            search: request.search.clone(),
            sort_by: sort_by.unwrap_or_default(),
            sort_order: match sort_by {
                Some(_) => request.sort_order(),
                None => SortDirection::Ascending,
            },
        }
    }

    /// Query string pairs, in wire order. `search` is omitted when unset.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("serverCode", self.server_code.clone()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("sortBy", self.sort_by.as_str().to_string()));
        params.push(("sortOrder", self.sort_order.as_str().to_string()));
        params
    }

    /// Cache key covering every parameter.
    pub fn cache_key(&self) -> String {
        format!(
            "{}{}:{}:{}:{}:{}:{}",
            CACHE_KEY_PRODUCTS,
            self.server_code,
            self.page,
            self.limit,
            self.search.as_deref().unwrap_or(""),
            self.sort_by.as_str(),
            self.sort_order.as_str(),
        )
    }
}

/// Prefix of every cached product page.
pub const CACHE_KEY_PRODUCTS: &str = "products:";

#[cfg(test)]
mod tests {
    use pagetable::{PaginationState, SortState};

    use super::*;

    fn product(code: &str) -> Product {
        Product {
            stock_code: code.to_string(),
            name: format!("Ürün {code}"),
            price: 10.0,
            currency: "TRY".to_string(),
            unit: "ADET".to_string(),
            stock_quantity: 1.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn barcode(id: i64, code: &str) -> Barcode {
        Barcode {
            id,
            barcode: format!("869{id:010}"),
            stock_code: code.to_string(),
        }
    }

    #[test]
    fn test_group_product_rows() {
        let rows = vec![
            ProductJoinRow {
                products: product("B"),
                barcodes: Some(barcode(1, "B")),
            },
            ProductJoinRow {
                products: product("A"),
                barcodes: None,
            },
            ProductJoinRow {
                products: product("B"),
                barcodes: Some(barcode(2, "B")),
            },
        ];
        let grouped = group_product_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].product.stock_code, "B");
        assert_eq!(grouped[0].barcodes.len(), 2);
        assert_eq!(grouped[1].product.stock_code, "A");
        assert!(grouped[1].barcodes.is_empty());
    }

    #[test]
    fn test_query_from_request() {
        let pagination = PaginationState::new(20).with_page_index(1);
        let sort = SortState::descending("price");
        let request = PageRequest::new(&pagination, &sort, Some("widget".into()));
        let query = ProductQuery::from_request("S1", &request);
        assert_eq!(query.page, 2);
        assert_eq!(query.sort_by, SortBy::Price);
        assert_eq!(query.sort_order, SortDirection::Descending);
        assert_eq!(
            query.params(),
            vec![
                ("serverCode", "S1".to_string()),
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
                ("search", "widget".to_string()),
                ("sortBy", "price".to_string()),
                ("sortOrder", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_sort_column_uses_default() {
        let sort = SortState::descending("currency");
        let request = PageRequest::new(&PaginationState::new(20), &sort, None);
        let query = ProductQuery::from_request("S1", &request);
        assert_eq!(query.sort_by, SortBy::Name);
        assert_eq!(query.sort_order, SortDirection::Ascending);
        assert!(!query.params().iter().any(|(k, _)| *k == "search"));
    }

    #[test]
    fn test_cache_key_differs_per_parameter() {
        let base = ProductQuery::new("S1");
        let other = ProductQuery {
            sort_order: SortDirection::Descending,
            ..base.clone()
        };
        assert_ne!(base.cache_key(), other.cache_key());
        assert!(base.cache_key().starts_with(CACHE_KEY_PRODUCTS));
    }
}
