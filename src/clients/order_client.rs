use tracing::{info, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderItem, OrderItemListQuery, PagedResult};
use crate::error::ApiError;

/// Client for orders and their nested order items.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    items: ResourceClient<OrderItem>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, items: ResourceClient<OrderItem>) -> Self {
        Self { inner, items }
    }

    /// Items of one order, listed independently of the order itself.
    #[instrument(skip(self, query))]
    pub async fn list_order_items(
        &self,
        order_id: &str,
        query: &OrderItemListQuery,
    ) -> Result<PagedResult<OrderItem>, ApiError> {
        self.items.list_at(&OrderItem::list_path_for(order_id), query).await
    }

    /// Fetches an order and a page of its items together. The listed items
    /// replace whatever the order record embedded.
    #[instrument(skip(self, items_query))]
    pub async fn get_order_with_items(
        &self,
        id: &str,
        items_query: &OrderItemListQuery,
    ) -> Result<(Order, u64), ApiError> {
        let (mut order, items) = tokio::try_join!(
            self.inner.get(id),
            self.list_order_items(id, items_query)
        )?;
        info!(items = items.items.len(), total = items.total, "Order loaded");
        order.order_items = items.items;
        Ok((order, items.total))
    }
}

impl_client_methods!(OrderClient, inner, Order, order);
impl_list_method!(OrderClient, inner, Order, orders);
impl_client_methods!(OrderClient, items, OrderItem, order_item);
