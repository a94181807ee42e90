//! Per-resource clients over the shared transport.

#[macro_use]
mod macros;
pub mod inventory_client;
pub mod order_client;

pub use inventory_client::InventoryClient;
pub use order_client::OrderClient;
