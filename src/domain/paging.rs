use crate::envelope::Envelope;
use crate::query::ListQuery;

/// One page of a list call.
///
/// `total` counts matches of the single underlying query. For merged searches
/// it is an upper-bound estimate instead (see [`crate::search`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub success: bool,
    pub message: Option<String>,
}

impl<T> PagedResult<T> {
    /// Paging fields missing from the envelope fall back to the item count and
    /// the requested page.
    pub fn from_envelope<D, Q: ListQuery>(
        envelope: Envelope<Vec<D>>,
        query: &Q,
        normalize: impl Fn(D) -> T,
    ) -> Self {
        let items: Vec<T> = envelope.data.into_iter().map(normalize).collect();
        let total = envelope.total.unwrap_or(items.len() as u64);
        Self {
            items,
            total,
            page: envelope.page.unwrap_or_else(|| query.page_or_default()),
            page_size: envelope.page_size.unwrap_or_else(|| query.page_size_or_default()),
            success: envelope.success,
            message: envelope.message,
        }
    }

    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
            success: true,
            message: None,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size counts as one page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
