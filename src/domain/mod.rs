pub mod loose;
pub mod paging;
pub mod inventory;
pub mod order;

pub use loose::*;
pub use paging::*;
pub use inventory::*;
pub use order::*;
