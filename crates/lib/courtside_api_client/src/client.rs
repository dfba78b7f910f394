//! Typed client for the protected Courtside endpoints.

use std::sync::Arc;

use reqwest::Method;
use url::Url;
use uuid::Uuid;

use crate::error::{ClientError, check, decode};
use crate::manager::TokenManager;
use crate::models::{AuthUser, InventoryInput, InventoryItem, StaffInput, StaffMember};
use crate::storage::TokenStorage;
use crate::transport::{HttpTransport, with_trailing_slash};

#[derive(Clone)]
pub struct CourtsideClient {
    http: reqwest::Client,
    base_url: Url,
    manager: Arc<TokenManager>,
}

impl CourtsideClient {
    pub fn new(http: reqwest::Client, base_url: Url, manager: Arc<TokenManager>) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            manager,
        }
    }

    /// Client plus an HTTP-backed token manager over `storage`.
    pub fn connect(base_url: Url, storage: Arc<dyn TokenStorage>) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(base_url.clone())?;
        let manager = Arc::new(TokenManager::new(storage, Arc::new(transport)));
        Ok(Self::new(reqwest::Client::new(), base_url, manager))
    }

    pub fn manager(&self) -> &Arc<TokenManager> {
        &self.manager
    }

    pub async fn me(&self) -> Result<AuthUser, ClientError> {
        let resp = self.authorized(Method::GET, "/auth/me").await?.send().await?;
        decode(resp).await
    }

    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, ClientError> {
        let resp = self.authorized(Method::GET, "/api/staff").await?.send().await?;
        decode(resp).await
    }

    pub async fn create_staff(&self, input: &StaffInput) -> Result<StaffMember, ClientError> {
        let resp = self
            .authorized(Method::POST, "/api/staff")
            .await?
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_staff(
        &self,
        id: Uuid,
        input: &StaffInput,
    ) -> Result<StaffMember, ClientError> {
        let resp = self
            .authorized(Method::PUT, &format!("/api/staff/{id}"))
            .await?
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_staff(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .authorized(Method::DELETE, &format!("/api/staff/{id}"))
            .await?
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ClientError> {
        let resp = self
            .authorized(Method::GET, "/api/inventory")
            .await?
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create_inventory_item(
        &self,
        input: &InventoryInput,
    ) -> Result<InventoryItem, ClientError> {
        let resp = self
            .authorized(Method::POST, "/api/inventory")
            .await?
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_inventory_item(
        &self,
        id: Uuid,
        input: &InventoryInput,
    ) -> Result<InventoryItem, ClientError> {
        let resp = self
            .authorized(Method::PUT, &format!("/api/inventory/{id}"))
            .await?
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_inventory_item(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .authorized(Method::DELETE, &format!("/api/inventory/{id}"))
            .await?
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Request builder carrying the current bearer header.
    async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let header = self
            .manager
            .auth_header()
            .await?
            .ok_or(ClientError::NoSession)?;
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, header))
    }
}
