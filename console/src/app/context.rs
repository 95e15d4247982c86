//! Application context: every collaborator the screens need, wired once.
//!
//! The session service travels here as an explicit instance rather than a
//! module-level singleton, so tests can substitute every collaborator.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use url::Url;

use super::notify::TerminalNotifier;
use super::settings::ConsoleSettings;
use crate::domain::ports::{
    AccountsGateway, CatalogsGateway, CustomersGateway, Notifier, OrderLinesGateway,
    OrdersGateway, ProductsGateway, SessionStore,
};
use crate::domain::{DomainError, OrderSubmitService, ReferentialGuards, SessionService};
use crate::outbound::rest::{
    RestAccountsGateway, RestAuthGateway, RestCatalogsGateway, RestClient, RestCustomersGateway,
    RestOrderLinesGateway, RestOrdersGateway, RestProductsGateway,
};
use crate::outbound::session_file::FileSessionStore;

/// Wired collaborators handed to every screen.
pub struct AppContext {
    /// Product gateway.
    pub products: Arc<dyn ProductsGateway>,
    /// Customer gateway.
    pub customers: Arc<dyn CustomersGateway>,
    /// Catalog gateway.
    pub catalogs: Arc<dyn CatalogsGateway>,
    /// Order gateway.
    pub orders: Arc<dyn OrdersGateway>,
    /// Order-line gateway.
    pub order_lines: Arc<dyn OrderLinesGateway>,
    /// Account-administration gateway.
    pub accounts: Arc<dyn AccountsGateway>,
    /// Session lifecycle service.
    pub sessions: Arc<SessionService>,
    /// Order submission saga.
    pub submissions: Arc<OrderSubmitService>,
    /// Advisory pre-delete guards.
    pub guards: Arc<ReferentialGuards>,
    /// Transient notice sink.
    pub notifier: Arc<dyn Notifier>,
    /// Wall clock shared with the services.
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Wire the full object graph from settings.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an unparseable base URL; `InternalError` when the
    /// session directory or HTTP client cannot be set up.
    pub fn from_settings(settings: &ConsoleSettings) -> Result<Self, DomainError> {
        let store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::open(&settings.session_dir())?);
        let base = Url::parse(settings.base_url()).map_err(|err| {
            DomainError::invalid_request(format!(
                "base URL `{}` is not valid: {err}",
                settings.base_url()
            ))
        })?;
        let client = RestClient::new(base, settings.timeout(), Arc::clone(&store))
            .map_err(|err| DomainError::internal(format!("HTTP client setup failed: {err}")))?;

        let products: Arc<dyn ProductsGateway> =
            Arc::new(RestProductsGateway::new(client.clone()));
        let customers: Arc<dyn CustomersGateway> =
            Arc::new(RestCustomersGateway::new(client.clone()));
        let catalogs: Arc<dyn CatalogsGateway> =
            Arc::new(RestCatalogsGateway::new(client.clone()));
        let orders: Arc<dyn OrdersGateway> = Arc::new(RestOrdersGateway::new(client.clone()));
        let order_lines: Arc<dyn OrderLinesGateway> =
            Arc::new(RestOrderLinesGateway::new(client.clone()));
        let accounts: Arc<dyn AccountsGateway> =
            Arc::new(RestAccountsGateway::new(client.clone()));
        let auth = Arc::new(RestAuthGateway::new(client));

        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let sessions = Arc::new(SessionService::new(
            auth,
            store,
            Arc::clone(&clock),
        ));
        let submissions = Arc::new(OrderSubmitService::new(
            Arc::clone(&orders),
            Arc::clone(&order_lines),
            Arc::clone(&clock),
        ));
        let guards = Arc::new(ReferentialGuards::new(
            Arc::clone(&orders),
            Arc::clone(&order_lines),
            Arc::clone(&products),
        ));

        Ok(Self {
            products,
            customers,
            catalogs,
            orders,
            order_lines,
            accounts,
            sessions,
            submissions,
            guards,
            notifier: Arc::new(TerminalNotifier),
            clock,
        })
    }
}
