//! Product pages for a server-mode table.

use async_trait::async_trait;
use log::debug;
use pagetable::{PageData, PageRequest, PageSource};

use crate::client::AdminClient;
use crate::error::Error;
use crate::model::{ProductQuery, ProductWithBarcodes};

/// Fetches product pages for one server code.
#[derive(Debug, Clone)]
pub struct ProductSource {
    client: AdminClient,
    server_code: String,
}

impl ProductSource {
    pub fn new(client: AdminClient, server_code: impl Into<String>) -> Self {
        Self {
            client,
            server_code: server_code.into(),
        }
    }

    pub fn server_code(&self) -> &str {
        &self.server_code
    }
}

#[async_trait]
impl PageSource<ProductWithBarcodes> for ProductSource {
    type Error = Error;

    async fn fetch(&self, request: &PageRequest) -> Result<PageData<ProductWithBarcodes>, Error> {
        let query = ProductQuery::from_request(&self.server_code, request);
        let response = self.client.products(&query).await?;
        debug!(
            "products page {} ({} cached: {})",
            query.page,
            self.server_code,
            response.is_cached()
        );
        let page = response.into_inner();
        Ok(PageData::new(page.products, page.row_count))
    }
}
