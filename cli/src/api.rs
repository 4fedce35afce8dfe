//! One async method per REST operation: build the request with the core
//! client, execute it over the transport, parse the response.

use item_core::{ApiError, DataItem, HttpRequest, HttpResponse, ItemClient, ItemPatch, NewDataItem};

use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone)]
pub struct Api {
    client: ItemClient,
    transport: Transport,
}

impl Api {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client: ItemClient::new(base_url),
            transport: Transport::new()?,
        })
    }

    pub async fn create(&self, input: &NewDataItem) -> Result<DataItem, ApiError> {
        let req = self.client.build_create(input)?;
        let resp = self.execute(req).await?;
        self.client.parse_create(resp)
    }

    pub async fn list(&self) -> Result<Vec<DataItem>, ApiError> {
        let resp = self.execute(self.client.build_list()).await?;
        self.client.parse_list(resp)
    }

    pub async fn get(&self, id: i64) -> Result<DataItem, ApiError> {
        let resp = self.execute(self.client.build_get(id)).await?;
        self.client.parse_get(resp)
    }

    pub async fn update(&self, id: i64, patch: &ItemPatch) -> Result<DataItem, ApiError> {
        let req = self.client.build_update(id, patch)?;
        let resp = self.execute(req).await?;
        self.client.parse_update(resp)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let resp = self.execute(self.client.build_delete(id)).await?;
        self.client.parse_delete(resp)
    }

    /// Transport failures (no response at all) surface like a rejected
    /// request with no status, so the forms' banner logic applies uniformly.
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(req)
            .await
            .map_err(|e| ApiError::Request {
                status: 0,
                message: e.to_string(),
            })
    }
}
