//! Main AdminClient

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::cache::{CacheConfig, CacheEntry, CacheProvider, InMemoryCache};
use crate::error::{ApiError, Error};
use crate::model::{
    CACHE_KEY_PRODUCTS, FirmSummary, FirmUpdate, FirmUpdatedPayload, FirmsPayload, Job,
    JobPayload, JobSchedule, LoginRequest, MessagePayload, ProductPage, ProductQuery,
    ProductsPayload, Session, SessionPayload, SyncCounts, SyncPayload, UserSummary, UsersPayload,
};
use crate::response::Response;

const CACHE_KEY_FIRMS: &str = "firms";
const CACHE_KEY_USERS: &str = "users";

/// Client for the admin API.
///
/// Authentication is cookie based: [`login`](Self::login) stores the
/// session cookie in the client and every later call sends it. Cheap to
/// clone; clones share the cookie jar and the cache.
///
/// # Example
///
/// ```ignore
/// use admin_lib::AdminClient;
///
/// let client = AdminClient::builder()
///     .url("http://localhost:3000")
///     .build()?;
///
/// client.login("admin@example.com", "secret").await?;
/// let session = client.current_session().await?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in. The session cookie is kept by the client.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        let url = self.endpoint("/auth/sessions")?;
        let request = self
            .inner
            .http_client
            .post(url)
            .json(&LoginRequest { email, password });
        let payload: MessagePayload = self.send(request).await?;
        debug!("signed in as {}", email);
        Ok(payload.message)
    }

    /// The signed-in user. Fails with [`Error::Unauthorized`] without a
    /// valid session.
    pub async fn current_session(&self) -> Result<Session, Error> {
        let url = self.endpoint("/auth/sessions/current")?;
        let payload: SessionPayload = self.send(self.inner.http_client.get(url)).await?;
        Ok(payload.session)
    }

    /// Sign out and drop everything cached for this session.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.endpoint("/auth/sessions/current")?;
        self.send_empty(self.inner.http_client.request(Method::DELETE, url))
            .await?;
        if let Some(cache) = &self.inner.cache {
            cache.clear().await;
        }
        Ok(())
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// One page of products, barcodes grouped per stock code.
    pub async fn products(&self, query: &ProductQuery) -> Result<Response<ProductPage>, Error> {
        let key = query.cache_key();
        let ttl = self.inner.cache_config.query_ttl;
        self.cached(&key, ttl, || async {
            let mut url = self.endpoint("/admin/products")?;
            url.query_pairs_mut().extend_pairs(query.params());
            let payload: ProductsPayload = self.send(self.inner.http_client.get(url)).await?;
            Ok(ProductPage::from(payload))
        })
        .await
    }

    pub async fn firms(&self) -> Result<Response<Vec<FirmSummary>>, Error> {
        let ttl = self.inner.cache_config.listing_ttl;
        self.cached(CACHE_KEY_FIRMS, ttl, || async {
            let url = self.endpoint("/superadmin/firms")?;
            let payload: FirmsPayload = self.send(self.inner.http_client.get(url)).await?;
            Ok(payload.firms)
        })
        .await
    }

    pub async fn users(&self) -> Result<Response<Vec<UserSummary>>, Error> {
        let ttl = self.inner.cache_config.listing_ttl;
        self.cached(CACHE_KEY_USERS, ttl, || async {
            let url = self.endpoint("/superadmin/users")?;
            let payload: UsersPayload = self.send(self.inner.http_client.get(url)).await?;
            Ok(payload.users)
        })
        .await
    }

    /// Delete a firm. Returns the server's message.
    pub async fn delete_firm(&self, id: i64) -> Result<String, Error> {
        let url = self.endpoint(&format!("/superadmin/firms/{}", id))?;
        let payload: MessagePayload = self
            .send(self.inner.http_client.request(Method::DELETE, url))
            .await?;
        if let Some(cache) = &self.inner.cache {
            cache.invalidate(CACHE_KEY_FIRMS).await;
            cache.invalidate(CACHE_KEY_USERS).await;
            cache.invalidate_prefix(CACHE_KEY_PRODUCTS).await;
        }
        Ok(payload.message)
    }

    /// Apply `update` to a firm and return the stored firm.
    ///
    /// Invalid codes are rejected before anything is sent.
    pub async fn update_firm(&self, id: i64, update: &FirmUpdate) -> Result<FirmSummary, Error> {
        update.validate().map_err(Error::Invalid)?;
        let url = self.endpoint(&format!("/superadmin/firms/{}", id))?;
        let request = self.inner.http_client.patch(url).json(update);
        let payload: FirmUpdatedPayload = self.send(request).await?;
        if let Some(cache) = &self.inner.cache {
            cache.invalidate(CACHE_KEY_FIRMS).await;
        }
        debug!("updated firm {}", id);
        Ok(payload.updated_firm)
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    /// Pull products from the firm's DIA server into the catalog.
    pub async fn sync_products(&self, server_code: &str) -> Result<SyncCounts, Error> {
        let url = self.server_endpoint("/admin/products/sync", server_code)?;
        let payload: SyncPayload = self.send(self.inner.http_client.post(url)).await?;
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_prefix(CACHE_KEY_PRODUCTS).await;
        }
        Ok(payload.new_row_counts)
    }

    /// The scheduled synchronization job, if one was ever saved.
    pub async fn job(&self, server_code: &str) -> Result<Option<Job>, Error> {
        let url = self.server_endpoint("/admin/jobs", server_code)?;
        let payload: JobPayload = self.send(self.inner.http_client.get(url)).await?;
        Ok(payload.job)
    }

    pub async fn save_job(
        &self,
        server_code: &str,
        schedule: &JobSchedule,
    ) -> Result<Option<Job>, Error> {
        let url = self.server_endpoint("/admin/jobs", server_code)?;
        let request = self.inner.http_client.post(url).json(schedule);
        let payload: JobPayload = self.send(request).await?;
        Ok(payload.job)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.inner.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| ApiError::BadUrl(format!("{}: {}", raw, e)))
    }

    fn server_endpoint(&self, path: &str, server_code: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("serverCode", server_code);
        Ok(url)
    }

    async fn execute(&self, mut request: RequestBuilder) -> Result<String, Error> {
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.network_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.network_error(e))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body).into());
        }
        Ok(body)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(e, body).into())
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), Error> {
        self.execute(request).await.map(|_| ())
    }

    fn network_error(&self, error: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::TimedOut(timeout).into(),
            _ => ApiError::Transport(error).into(),
        }
    }

    /// Serve `key` from the cache, or run `fetch` and store the result.
    ///
    /// A zero TTL or a client without a cache always fetches.
    async fn cached<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<Response<T>, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let cache = match &self.inner.cache {
            Some(cache) if !ttl.is_zero() => cache,
            _ => return Ok(Response::bypassed(fetch().await?)),
        };

        if let Some(entry) = cache.get(key).await {
            match entry.decode::<T>() {
                Ok(data) => {
                    debug!("cache hit: {}", key);
                    return Ok(Response::served(data, &entry));
                }
                Err(e) => {
                    warn!("dropping unreadable cache entry {}: {}", key, e);
                    cache.invalidate(key).await;
                }
            }
        }

        let data = fetch().await?;
        match CacheEntry::encode(&data, ttl) {
            Ok(entry) => {
                let response = Response::stored(data, &entry);
                cache.put(key, entry).await;
                Ok(response)
            }
            Err(e) => {
                warn!("not caching {}: {}", key, e);
                Ok(Response::bypassed(data))
            }
        }
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("cached", &self.inner.cache.is_some())
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// `url` is required and enforced at compile time. A fresh in-memory
/// cache is used unless one is supplied.
pub struct AdminClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
}

impl AdminClientBuilder<Missing> {
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: Some(Arc::new(InMemoryCache::new())),
            cache_config: CacheConfig::default(),
        }
    }

    /// Sets the API base URL, e.g. `http://localhost:3000`.
    pub fn url(self, url: impl Into<String>) -> AdminClientBuilder<Set<String>> {
        AdminClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl Default for AdminClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> AdminClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a custom HTTP client. It must keep cookies for sessions to work.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn cache<C: CacheProvider + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Disable response caching.
    pub fn no_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl AdminClientBuilder<Set<String>> {
    /// Builds the [`AdminClient`].
    pub fn build(self) -> Result<AdminClient, Error> {
        Url::parse(&self.url.0)
            .map_err(|e| Error::Config(format!("invalid API url {:?}: {}", self.url.0, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().cookie_store(true);
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?
            }
        };

        Ok(AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url: self.url.0,
                http_client,
                timeout: self.timeout,
                cache: self.cache,
                cache_config: self.cache_config,
            }),
        })
    }
}
