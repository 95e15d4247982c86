//! REST gateway adapters, one per backend resource.
//!
//! Every adapter decodes into transport DTOs carrying the backend's wire
//! field names first, then maps into domain types in one pass. None of them
//! retry, cache, or deduplicate; callers see the mapped error unchanged.

mod accounts;
mod auth;
mod catalogs;
mod client;
mod customers;
mod order_lines;
mod orders;
mod products;

pub use self::accounts::RestAccountsGateway;
pub use self::auth::RestAuthGateway;
pub use self::catalogs::RestCatalogsGateway;
pub use self::client::RestClient;
pub use self::customers::RestCustomersGateway;
pub use self::order_lines::RestOrderLinesGateway;
pub use self::orders::RestOrdersGateway;
pub use self::products::RestProductsGateway;
