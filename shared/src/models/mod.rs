//! Data models
//!
//! Plain data-transfer records mirroring backend resources.
//! All IDs are `i64`; money is `Decimal`.

pub mod credit_limit;
pub mod order;
pub mod product;
pub mod role;
pub mod route;
pub mod shop;
pub mod staff;
pub mod wallet;
pub mod warehouse;
pub mod zone;

// Re-exports
pub use credit_limit::*;
pub use order::*;
pub use product::*;
pub use role::*;
pub use route::*;
pub use shop::*;
pub use staff::*;
pub use wallet::*;
pub use warehouse::*;
pub use zone::*;
