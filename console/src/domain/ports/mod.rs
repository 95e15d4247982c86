//! Domain ports for the hexagonal boundary.
//!
//! Each port is an async trait the shell and domain services program
//! against; the REST adapters in `outbound` implement them against the
//! backend, and tests substitute deterministic in-memory doubles.

mod accounts;
mod auth;
mod catalogs;
mod customers;
mod notifier;
mod order_lines;
mod orders;
mod products;
mod session_store;

pub use self::accounts::AccountsGateway;
pub use self::auth::{AuthGateway, LoginGrant};
pub use self::catalogs::CatalogsGateway;
pub use self::customers::CustomersGateway;
pub use self::notifier::{Notice, NoticeLevel, Notifier};
pub use self::order_lines::OrderLinesGateway;
pub use self::orders::OrdersGateway;
pub use self::products::ProductsGateway;
pub use self::session_store::SessionStore;
