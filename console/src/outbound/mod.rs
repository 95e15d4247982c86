//! Outbound adapters: REST gateways and the file-backed session store.

pub mod rest;
pub mod session_file;

pub use self::rest::RestClient;
pub use self::session_file::FileSessionStore;
