use foodmap_core::{StoreDetail, StoreId, StoreRecord};
use foodmap_engine::StoreSource;

use crate::client::FoodmapClient;
use crate::error::ClientError;

impl StoreSource for FoodmapClient {
    type Error = ClientError;

    async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, Self::Error> {
        FoodmapClient::fetch_stores(self).await
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, Self::Error> {
        FoodmapClient::fetch_tags(self).await
    }

    async fn fetch_store_details(&self, id: &StoreId) -> Result<StoreDetail, Self::Error> {
        FoodmapClient::fetch_store_details(self, id).await
    }
}
