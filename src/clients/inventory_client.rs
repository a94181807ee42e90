use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{InventoryItem, InventoryListQuery, InventorySortColumn, PagedResult};
use crate::error::ApiError;
use crate::query::SortDirection;
use crate::search::{MergedSearch, SearchField};

/// Fields a free-text inventory search is fanned out to.
pub fn inventory_search_fields() -> Vec<SearchField<InventoryListQuery>> {
    vec![
        SearchField::new("ProductName", by_product_name),
        SearchField::new("Sku", by_sku),
    ]
}

// A branch that takes the term is ordered by its own column, ascending.

fn by_product_name(query: &mut InventoryListQuery, term: Option<&str>) {
    query.product_name = term.map(str::to_string);
    if term.is_some() {
        query.order_column = Some(InventorySortColumn::ProductName);
        query.order_direction = Some(SortDirection::Asc);
    }
}

fn by_sku(query: &mut InventoryListQuery, term: Option<&str>) {
    query.sku = term.map(str::to_string);
    if term.is_some() {
        query.order_column = Some(InventorySortColumn::Sku);
        query.order_direction = Some(SortDirection::Asc);
    }
}

/// Client for the inventory endpoints.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

impl_basic_client!(InventoryClient, InventoryItem, inventory_item, inventory_items);

impl InventoryClient {
    /// Searches product name and SKU at once. See [`crate::search`] for how
    /// totals and paging behave on a merged result. An unsorted base query is
    /// ordered by product name, ascending.
    #[instrument(skip(self, base))]
    pub async fn search_inventory(
        &self,
        term: &str,
        base: &InventoryListQuery,
    ) -> Result<PagedResult<InventoryItem>, ApiError> {
        debug!("Sending request");
        let mut base = base.clone();
        if base.order_column.is_none() {
            base.order_column = Some(InventorySortColumn::ProductName);
            base.order_direction = Some(base.order_direction.unwrap_or_default());
        }
        self.searcher().search(term, &base).await
    }

    pub fn searcher(&self) -> MergedSearch<InventoryItem> {
        MergedSearch::new(self.inner.clone(), inventory_search_fields())
    }
}
