//! Terminal back-office console for a small-business store backend.
//!
//! The crate is a REST *client*: products, customers, catalogs, orders,
//! order lines, and operator accounts live behind an external backend.
//! `domain` holds the entities, validation, session lifecycle, and the
//! order-entry workflow; `outbound` the reqwest gateways and the file
//! session store; `app` the command shell.

pub mod app;
pub mod domain;
pub mod outbound;
