//! Domain primitives, workflows, and ports.
//!
//! Purpose: hold everything the console knows independently of transport —
//! entities and their validation, the session lifecycle, the order-entry
//! draft and submission saga, report aggregation, and the ports the
//! adapters implement. Types document their invariants and wire aliases in
//! Rustdoc; adapters stay out of this tree.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod customer;
pub mod draft;
pub mod error;
pub mod guards;
pub mod order;
pub mod order_saga;
pub mod ports;
pub mod product;
pub mod reports;
pub mod role;
pub mod session;
pub mod session_service;
pub mod token;
pub mod validation;

pub use self::account::{AccountDraft, UserAccount};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog::Catalog;
pub use self::customer::Customer;
pub use self::draft::{AddOutcome, DraftNotReady, OrderDraft, SelectionLine};
pub use self::error::{DomainError, ErrorCode};
pub use self::guards::ReferentialGuards;
pub use self::order::{Order, OrderLine};
pub use self::order_saga::{
    CompletedStep, NewOrder, OrderSubmitError, OrderSubmitService, OrderUpdate,
};
pub use self::product::Product;
pub use self::reports::{DateRange, SalesSummary, sales_summary};
pub use self::role::Role;
pub use self::session::{AuthState, Session};
pub use self::session_service::SessionService;
