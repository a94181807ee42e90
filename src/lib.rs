//! Client-side query layer for the warehouse management API.
//!
//! Resource clients decode the server's response envelope, build list
//! queries, fan free-text searches out across fields, and debounce rapidly
//! changing inputs. [`app_system::WarehouseSystem`] wires it all together.

pub mod config;
pub mod error;
pub mod envelope;
pub mod query;
pub mod actor_framework;
pub mod domain;
pub mod clients;
pub mod search;
pub mod debounce;
pub mod list_state;
pub mod form;
pub mod session;
pub mod app_system;

#[cfg(test)]
mod mock_framework;
