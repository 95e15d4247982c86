//! Shared scenario-test doubles: an in-memory backend implementing every
//! gateway port, a recording notifier, and an in-memory session store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

use console::app::context::AppContext;
use console::domain::order_saga::{NewOrder, OrderUpdate};
use console::domain::ports::{
    AccountsGateway, AuthGateway, CatalogsGateway, CustomersGateway, LoginGrant, Notice, Notifier,
    OrderLinesGateway, OrdersGateway, ProductsGateway, SessionStore,
};
use console::domain::{
    AccountDraft, Catalog, Customer, DomainError, Order, OrderLine, OrderSubmitService, Product,
    ReferentialGuards, Session, SessionService, UserAccount,
};
use mockable::DefaultClock;

/// Mint a signed-shape token with the given role claim and expiry.
pub fn mint_token(role_claim: &str, exp: i64) -> String {
    let payload = json!({ "sub": "a@b.com", "rol": role_claim, "exp": exp });
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(b"scenario-key"),
    )
    .expect("test token encodes")
}

/// In-memory stand-in for the whole REST backend.
#[derive(Default)]
pub struct InMemoryBackend {
    pub products: Mutex<Vec<Product>>,
    pub customers: Mutex<Vec<Customer>>,
    pub catalogs: Mutex<Vec<Catalog>>,
    pub orders: Mutex<Vec<Order>>,
    pub lines: Mutex<Vec<OrderLine>>,
    pub accounts: Mutex<Vec<UserAccount>>,
    pub calls: Mutex<Vec<String>>,
    pub next_id: Mutex<u64>,
}

impl InMemoryBackend {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("call log").push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }

    fn allocate_id(&self) -> u64 {
        let mut next = self.next_id.lock().expect("id counter");
        *next += 1;
        *next + 1000
    }
}

#[async_trait]
impl ProductsGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.record("products.list");
        Ok(self.products.lock().expect("products").clone())
    }

    async fn get(&self, id: u64) -> Result<Product, DomainError> {
        self.record(format!("products.get {id}"));
        self.products
            .lock()
            .expect("products")
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {id} does not exist")))
    }

    async fn create(&self, product: &Product) -> Result<Product, DomainError> {
        self.record("products.create");
        let mut stored = product.clone();
        stored.id = self.allocate_id();
        self.products.lock().expect("products").push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, product: &Product) -> Result<Product, DomainError> {
        self.record(format!("products.update {id}"));
        let mut products = self.products.lock().expect("products");
        let slot = products
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} does not exist")))?;
        *slot = product.clone();
        slot.id = id;
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("products.delete {id}"));
        self.products
            .lock()
            .expect("products")
            .retain(|product| product.id != id);
        Ok(())
    }
}

#[async_trait]
impl CustomersGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        self.record("customers.list");
        Ok(self.customers.lock().expect("customers").clone())
    }

    async fn get(&self, id: u64) -> Result<Customer, DomainError> {
        self.record(format!("customers.get {id}"));
        self.customers
            .lock()
            .expect("customers")
            .iter()
            .find(|customer| customer.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("customer {id} does not exist")))
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError> {
        self.record("customers.create");
        let mut stored = customer.clone();
        stored.id = self.allocate_id();
        self.customers
            .lock()
            .expect("customers")
            .push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, customer: &Customer) -> Result<Customer, DomainError> {
        self.record(format!("customers.update {id}"));
        let mut customers = self.customers.lock().expect("customers");
        let slot = customers
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id} does not exist")))?;
        *slot = customer.clone();
        slot.id = id;
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("customers.delete {id}"));
        self.customers
            .lock()
            .expect("customers")
            .retain(|customer| customer.id != id);
        Ok(())
    }
}

#[async_trait]
impl CatalogsGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Catalog>, DomainError> {
        self.record("catalogs.list");
        Ok(self.catalogs.lock().expect("catalogs").clone())
    }

    async fn get(&self, id: u64) -> Result<Catalog, DomainError> {
        self.record(format!("catalogs.get {id}"));
        self.catalogs
            .lock()
            .expect("catalogs")
            .iter()
            .find(|catalog| catalog.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("catalog {id} does not exist")))
    }

    async fn create(&self, catalog: &Catalog) -> Result<Catalog, DomainError> {
        self.record("catalogs.create");
        let mut stored = catalog.clone();
        stored.id = self.allocate_id();
        self.catalogs.lock().expect("catalogs").push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, catalog: &Catalog) -> Result<Catalog, DomainError> {
        self.record(format!("catalogs.update {id}"));
        let mut catalogs = self.catalogs.lock().expect("catalogs");
        let slot = catalogs
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("catalog {id} does not exist")))?;
        *slot = catalog.clone();
        slot.id = id;
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("catalogs.delete {id}"));
        self.catalogs
            .lock()
            .expect("catalogs")
            .retain(|catalog| catalog.id != id);
        Ok(())
    }
}

#[async_trait]
impl OrdersGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        self.record("orders.list");
        Ok(self.orders.lock().expect("orders").clone())
    }

    async fn get(&self, id: u64) -> Result<Order, DomainError> {
        self.record(format!("orders.get {id}"));
        self.orders
            .lock()
            .expect("orders")
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("order {id} does not exist")))
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        self.record("orders.create");
        let stored = Order {
            id: self.allocate_id(),
            customer_id: order.customer_id,
            placed_at: None,
            completed: false,
            subtotal: 0.0,
            notes: order.notes.clone(),
        };
        self.orders.lock().expect("orders").push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, order: &OrderUpdate) -> Result<Order, DomainError> {
        self.record(format!("orders.update {id}"));
        let mut orders = self.orders.lock().expect("orders");
        let slot = orders
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("order {id} does not exist")))?;
        slot.customer_id = order.customer_id;
        slot.completed = order.completed;
        slot.subtotal = order.subtotal;
        slot.placed_at = order.placed_at;
        slot.notes = order.notes.clone();
        Ok(slot.clone())
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Order, DomainError> {
        self.record(format!("orders.set_completed {id} {completed}"));
        let mut orders = self.orders.lock().expect("orders");
        let slot = orders
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("order {id} does not exist")))?;
        slot.completed = completed;
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("orders.delete {id}"));
        self.orders
            .lock()
            .expect("orders")
            .retain(|order| order.id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderLinesGateway for InMemoryBackend {
    async fn create(&self, line: &OrderLine) -> Result<OrderLine, DomainError> {
        self.record(format!("lines.create order={} product={}", line.order_id, line.product_id));
        let mut stored = line.clone();
        stored.id = Some(self.allocate_id());
        self.lines.lock().expect("lines").push(stored.clone());
        Ok(stored)
    }

    async fn for_order(&self, order_id: u64) -> Result<Vec<OrderLine>, DomainError> {
        self.record(format!("lines.for_order {order_id}"));
        Ok(self
            .lines
            .lock()
            .expect("lines")
            .iter()
            .filter(|line| line.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, line_id: u64) -> Result<(), DomainError> {
        self.record(format!("lines.delete {line_id}"));
        self.lines
            .lock()
            .expect("lines")
            .retain(|line| line.id != Some(line_id));
        Ok(())
    }

    async fn product_referenced(&self, product_id: u64) -> Result<bool, DomainError> {
        self.record(format!("lines.product_referenced {product_id}"));
        Ok(self
            .lines
            .lock()
            .expect("lines")
            .iter()
            .any(|line| line.product_id == product_id))
    }
}

#[async_trait]
impl AccountsGateway for InMemoryBackend {
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        self.record("accounts.list");
        Ok(self.accounts.lock().expect("accounts").clone())
    }

    async fn create(&self, draft: &AccountDraft) -> Result<UserAccount, DomainError> {
        self.record("accounts.create");
        let stored = UserAccount {
            id: self.allocate_id(),
            username: draft.username.clone(),
            email: draft.email.clone(),
            active: draft.active,
            role: draft.role,
        };
        self.accounts.lock().expect("accounts").push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, draft: &AccountDraft) -> Result<UserAccount, DomainError> {
        self.record(format!("accounts.update {id}"));
        let mut accounts = self.accounts.lock().expect("accounts");
        let slot = accounts
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("account {id} does not exist")))?;
        slot.username.clone_from(&draft.username);
        slot.email.clone_from(&draft.email);
        slot.active = draft.active;
        slot.role = draft.role;
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("accounts.delete {id}"));
        self.accounts
            .lock()
            .expect("accounts")
            .retain(|account| account.id != id);
        Ok(())
    }

    async fn enable(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("accounts.enable {id}"));
        self.set_active(id, true)
    }

    async fn disable(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("accounts.disable {id}"));
        self.set_active(id, false)
    }
}

impl InMemoryBackend {
    fn set_active(&self, id: u64, active: bool) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("accounts");
        let slot = accounts
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| DomainError::not_found(format!("account {id} does not exist")))?;
        slot.active = active;
        Ok(())
    }
}

/// Auth double: one known operator, mints an admin token.
pub struct StubAuthBackend {
    pub email: String,
    pub clave: String,
    pub username: String,
    pub role_claim: String,
}

#[async_trait]
impl AuthGateway for StubAuthBackend {
    async fn sign_in(
        &self,
        credentials: &console::domain::LoginCredentials,
    ) -> Result<LoginGrant, DomainError> {
        if credentials.email() == self.email && credentials.secret() == self.clave {
            Ok(LoginGrant {
                token: mint_token(&self.role_claim, 9_999_999_999),
                username: self.username.clone(),
            })
        } else {
            Err(DomainError::unauthorized("Credenciales inválidas"))
        }
    }
}

/// In-memory session store.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, DomainError> {
        Ok(self.session.lock().expect("session").clone())
    }

    fn save(&self, session: &Session) -> Result<(), DomainError> {
        *self.session.lock().expect("session") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        *self.session.lock().expect("session") = None;
        Ok(())
    }
}

/// Notice sink that records instead of printing.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices").push(notice);
    }
}

/// Wire an [`AppContext`] entirely from in-memory doubles.
pub fn context(
    backend: &Arc<InMemoryBackend>,
    auth: StubAuthBackend,
    notifier: &Arc<RecordingNotifier>,
) -> AppContext {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
    let clock: Arc<dyn mockable::Clock> = Arc::new(DefaultClock);
    let sessions = Arc::new(SessionService::new(
        Arc::new(auth),
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let orders: Arc<dyn OrdersGateway> = Arc::clone(backend) as Arc<dyn OrdersGateway>;
    let lines: Arc<dyn OrderLinesGateway> = Arc::clone(backend) as Arc<dyn OrderLinesGateway>;
    let products: Arc<dyn ProductsGateway> = Arc::clone(backend) as Arc<dyn ProductsGateway>;
    let submissions = Arc::new(OrderSubmitService::new(
        Arc::clone(&orders),
        Arc::clone(&lines),
        Arc::clone(&clock),
    ));
    let guards = Arc::new(ReferentialGuards::new(
        Arc::clone(&orders),
        Arc::clone(&lines),
        Arc::clone(&products),
    ));
    AppContext {
        products,
        customers: Arc::clone(backend) as Arc<dyn CustomersGateway>,
        catalogs: Arc::clone(backend) as Arc<dyn CatalogsGateway>,
        orders,
        order_lines: lines,
        accounts: Arc::clone(backend) as Arc<dyn AccountsGateway>,
        sessions,
        submissions,
        guards,
        notifier: Arc::clone(notifier) as Arc<dyn Notifier>,
        clock,
    }
}

/// Seed a product.
pub fn product(id: u64, name: &str, price: f64, availability: u32) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: format!("{name} description"),
        price,
        availability,
        catalog_id: 1,
        image_url: None,
    }
}

/// Seed a customer.
pub fn customer(id: u64, name: &str) -> Customer {
    Customer {
        id,
        name: name.to_owned(),
        email: format!("{name}@example.com").to_lowercase(),
        phone: "987654321".to_owned(),
        address: "Av. Central 120".to_owned(),
        image_url: None,
    }
}
