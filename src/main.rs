use tracing::{error, info, warn, Instrument};

use warehouse_client::app_system::{setup_tracing, SystemError, WarehouseSystem};
use warehouse_client::config::Config;
use warehouse_client::domain::{InventoryListQuery, InventorySortColumn};
use warehouse_client::list_state::{ListState, LoadOutcome};
use warehouse_client::query::SortDirection;
use warehouse_client::session::{Permission, Role};

const SEARCH_TERM_KEY: &str = "WAREHOUSE_SEARCH";
const DEMO_USER_KEY: &str = "WAREHOUSE_USER";
const DEMO_ROLE_KEY: &str = "WAREHOUSE_ROLE";

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    let config = Config::from_env()?;
    info!(base_url = %config.api_base_url, "Starting warehouse client");

    let mut system = WarehouseSystem::start(config)?;

    let user = std::env::var(DEMO_USER_KEY).unwrap_or_else(|_| "demo".to_string());
    let role = std::env::var(DEMO_ROLE_KEY)
        .ok()
        .and_then(|r| r.parse::<Role>().map_err(|e| warn!(error = %e, "Falling back to staff")).ok())
        .unwrap_or(Role::Staff);
    let session = system.sign_in(user, role);

    if !session.has(Permission::InventoryView) {
        error!(role = ?session.role, "Role cannot view inventory");
        return system.shutdown().await;
    }

    // The search box: settle the typed term before querying.
    let term = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(SEARCH_TERM_KEY).ok())
        .unwrap_or_default();
    let search_box = system.debounced_search(String::new());
    let mut settled = search_box.subscribe();
    search_box.set(term.clone()).await;
    if !term.is_empty() && settled.changed().await.is_err() {
        warn!("Search input closed before settling");
    }
    let term = search_box.value();
    search_box.shutdown().await;

    let query = InventoryListQuery::paged(1, 10)
        .sorted_by(InventorySortColumn::ProductName, SortDirection::Asc);
    let mut state = ListState::new(10);
    let ticket = state.begin();

    let span = tracing::info_span!("inventory_search", term = %term);
    let result = async {
        info!("Searching inventory");
        system.inventory_client.search_inventory(&term, &query).await
    }
    .instrument(span)
    .await;

    match state.finish(ticket, result) {
        LoadOutcome::Applied => {
            info!(
                shown = state.items.len(),
                total = state.total,
                pages = state.total_pages(),
                "Inventory loaded"
            );
            for item in &state.items {
                info!(
                    id = %item.id,
                    sku = %item.sku,
                    name = %item.product_name,
                    quantity = item.quantity,
                    status = item.status_label(),
                    "Item"
                );
            }
        }
        LoadOutcome::Failed => {
            error!(error = state.error.as_deref().unwrap_or_default(), "Inventory search failed")
        }
        LoadOutcome::Stale => warn!("Search result arrived after a newer load"),
    }

    system.shutdown().await?;

    info!("Warehouse client finished");
    Ok(())
}
