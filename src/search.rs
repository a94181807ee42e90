//! Free-text search over a backend that only offers exact per-field filters.
//!
//! A non-empty term is sent once per searchable field, all requests in flight
//! together, and the pages are merged client-side by identity. Each branch
//! starts from the base query with every searchable field cleared, so a stale
//! value in one field never narrows another field's branch. A field may also
//! set its own sort when it takes the term.
//!
//! The merged `total` is the **maximum** of the per-field totals. The true
//! union size is at least that and at most their sum, and cannot be known
//! without a server-side OR filter. Likewise `page`/`page_size` echo the
//! request even though merging happens after per-field pagination, so a merged
//! page may hold more than `page_size` items. Both are accepted limitations.
//!
//! If two fields return different records under the same id (a server
//! contract violation) the record from the later field wins; no field-level
//! reconciliation is attempted.

use std::collections::HashMap;
use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::actor_framework::{Entity, ResourceClient};
use crate::domain::PagedResult;
use crate::error::ApiError;
use crate::query::ListQuery;

/// One searchable field: how to put the term into a query as an exact filter.
/// `apply(query, None)` must clear the field.
pub struct SearchField<Q> {
    pub name: &'static str,
    pub apply: fn(&mut Q, Option<&str>),
}

impl<Q> SearchField<Q> {
    pub const fn new(name: &'static str, apply: fn(&mut Q, Option<&str>)) -> Self {
        Self { name, apply }
    }
}

impl<Q> Clone for SearchField<Q> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q> Copy for SearchField<Q> {}

pub struct MergedSearch<T: Entity> {
    client: ResourceClient<T>,
    fields: Vec<SearchField<T::Query>>,
}

impl<T: Entity> MergedSearch<T> {
    pub fn new(client: ResourceClient<T>, fields: Vec<SearchField<T::Query>>) -> Self {
        Self { client, fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Blank terms go straight to a single `list(base)`. Otherwise one list per
    /// field; the first failure fails the whole search.
    #[instrument(skip(self, base), fields(entity = T::BASE_PATH))]
    pub async fn search(&self, term: &str, base: &T::Query) -> Result<PagedResult<T>, ApiError> {
        let term = term.trim();
        if term.is_empty() || self.fields.is_empty() {
            debug!("No search term, listing");
            return self.client.list(base).await;
        }

        let queries: Vec<T::Query> = self
            .fields
            .iter()
            .map(|field| {
                let mut query = base.clone();
                for other in &self.fields {
                    (other.apply)(&mut query, None);
                }
                (field.apply)(&mut query, Some(term));
                query
            })
            .collect();

        debug!(fields = queries.len(), "Fanning out search");
        let pages = try_join_all(queries.iter().map(|query| self.client.list(query))).await?;

        Ok(merge_pages(pages, base.page_or_default(), base.page_size_or_default()))
    }
}

/// Concatenates pages in field order and de-duplicates by id. A repeated id
/// keeps its first position and takes the later record.
pub fn merge_pages<T: Entity>(pages: Vec<PagedResult<T>>, page: u32, page_size: u32) -> PagedResult<T> {
    let total = pages.iter().map(|p| p.total).max().unwrap_or(0);

    let mut items: Vec<T> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for item in pages.into_iter().flat_map(|p| p.items) {
        match positions.get(item.id()) {
            Some(&index) => items[index] = item,
            None => {
                positions.insert(item.id().to_string(), items.len());
                items.push(item);
            }
        }
    }

    PagedResult {
        items,
        total,
        page,
        page_size,
        success: true,
        message: None,
    }
}
