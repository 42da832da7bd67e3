use tracing::instrument;

use crate::client::RestClient;
use crate::error::{ResourceError, Result};
use crate::models::delivery::*;
use crate::response::ApiResponse;

/// Delivery time estimates
#[derive(Debug, Clone)]
pub struct Delivery {
    client: RestClient,
}

impl Delivery {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, content), fields(items = content.items.len()))]
    pub async fn get_delivery_time(
        &self,
        content: &DeliveryTimeContent,
    ) -> Result<ApiResponse<GetDeliveryTime>> {
        if content.items.is_empty() {
            return Err(ResourceError::invalid("items", "at least one item is required"));
        }
        self.client.post_json(&["delivery", "time"], content).await
    }
}
