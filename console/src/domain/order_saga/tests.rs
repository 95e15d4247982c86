//! Regression coverage for this module.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockable::MockClock;
use rstest::rstest;

use super::{NewOrder, OrderSubmitError, OrderSubmitService, OrderUpdate};
use crate::domain::DomainError;
use crate::domain::draft::OrderDraft;
use crate::domain::order::{Order, OrderLine};
use crate::domain::ports::{OrderLinesGateway, OrdersGateway};
use crate::domain::product::Product;

/// Recording fake standing in for the order and order-line gateways.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<String>>,
    persisted_lines: Mutex<Vec<OrderLine>>,
    updates: Mutex<Vec<(u64, OrderUpdate)>>,
    fail_on: Option<String>,
}

impl RecordingBackend {
    fn with_lines(lines: Vec<OrderLine>) -> Self {
        Self {
            persisted_lines: Mutex::new(lines),
            ..Self::default()
        }
    }

    fn failing_on(call: &str) -> Self {
        Self {
            fail_on: Some(call.to_owned()),
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) -> Result<(), DomainError> {
        let call = call.into();
        self.calls.lock().expect("call log").push(call.clone());
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(DomainError::upstream(format!("backend rejected `{call}`")));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }
}

#[async_trait]
impl OrdersGateway for RecordingBackend {
    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        self.record("list orders")?;
        Ok(Vec::new())
    }

    async fn get(&self, id: u64) -> Result<Order, DomainError> {
        self.record(format!("get order {id}"))?;
        Err(DomainError::not_found("no such order"))
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        self.record("create order")?;
        Ok(Order {
            id: 42,
            customer_id: order.customer_id,
            placed_at: None,
            completed: false,
            subtotal: 0.0,
            notes: order.notes.clone(),
        })
    }

    async fn update(&self, id: u64, order: &OrderUpdate) -> Result<Order, DomainError> {
        self.record(format!("update order {id}"))?;
        self.updates
            .lock()
            .expect("update log")
            .push((id, order.clone()));
        Ok(Order {
            id,
            customer_id: order.customer_id,
            placed_at: order.placed_at,
            completed: order.completed,
            subtotal: order.subtotal,
            notes: order.notes.clone(),
        })
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Order, DomainError> {
        self.record(format!("set order {id} completed={completed}"))?;
        Err(DomainError::not_found("no such order"))
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.record(format!("delete order {id}"))
    }
}

#[async_trait]
impl OrderLinesGateway for RecordingBackend {
    async fn create(&self, line: &OrderLine) -> Result<OrderLine, DomainError> {
        self.record(format!("create line product={}", line.product_id))?;
        let mut stored = line.clone();
        stored.id = Some(900 + line.product_id);
        Ok(stored)
    }

    async fn for_order(&self, order_id: u64) -> Result<Vec<OrderLine>, DomainError> {
        self.record(format!("list lines order={order_id}"))?;
        Ok(self.persisted_lines.lock().expect("line log").clone())
    }

    async fn delete(&self, line_id: u64) -> Result<(), DomainError> {
        self.record(format!("delete line {line_id}"))
    }

    async fn product_referenced(&self, product_id: u64) -> Result<bool, DomainError> {
        self.record(format!("line exists product={product_id}"))?;
        Ok(false)
    }
}

fn fixed_clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    let now = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid test timestamp");
    clock.expect_utc().returning(move || now);
    Arc::new(clock)
}

fn service(backend: &Arc<RecordingBackend>) -> OrderSubmitService {
    OrderSubmitService::new(
        Arc::clone(backend) as Arc<dyn OrdersGateway>,
        Arc::clone(backend) as Arc<dyn OrderLinesGateway>,
        fixed_clock(),
    )
}

fn product(id: u64, price: f64, availability: u32) -> Product {
    Product {
        id,
        name: format!("product-{id}"),
        description: "test".to_owned(),
        price,
        availability,
        catalog_id: 1,
        image_url: None,
    }
}

fn draft_for_customer_7() -> OrderDraft {
    let products = [product(3, 15.0, 10)];
    let mut draft = OrderDraft::new();
    draft.load_catalog(&products);
    draft.choose_customer(7);
    draft.add_product(&products[0]);
    draft.add_product(&products[0]);
    draft
}

#[rstest]
#[tokio::test]
async fn create_path_issues_exactly_create_then_lines_then_update() {
    let backend = Arc::new(RecordingBackend::default());
    let submitted = service(&backend)
        .submit_new(&draft_for_customer_7())
        .await
        .expect("submission succeeds");

    assert_eq!(
        backend.calls(),
        vec![
            "create order".to_owned(),
            "create line product=3".to_owned(),
            "update order 42".to_owned(),
        ]
    );
    let updates = backend.updates.lock().expect("update log");
    let (id, update) = updates.first().expect("one closing update");
    assert_eq!(*id, 42);
    assert!((update.subtotal - 30.0).abs() < f64::EPSILON);
    assert_eq!(
        update.placed_at.map(|at| at.timestamp()),
        Some(1_700_000_000)
    );
    assert!((submitted.subtotal - 30.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn line_failure_leaves_partial_state_and_no_rollback() {
    let backend = Arc::new(RecordingBackend::failing_on("create line product=3"));
    let err = service(&backend)
        .submit_new(&draft_for_customer_7())
        .await
        .expect_err("line creation fails");

    let OrderSubmitError::Partial {
        order_id,
        step,
        completed,
        ..
    } = err
    else {
        panic!("expected a partial failure, got {err:?}");
    };
    assert_eq!(order_id, 42);
    assert_eq!(step, "create line product=3");
    assert_eq!(completed.len(), 1);
    assert!(completed[0].compensation.contains("delete order 42"));
    // No compensating calls were issued after the failure.
    assert_eq!(
        backend.calls(),
        vec!["create order".to_owned(), "create line product=3".to_owned()]
    );
}

#[rstest]
#[tokio::test]
async fn edit_path_replaces_every_line_even_when_identical() {
    let persisted = vec![
        OrderLine {
            id: Some(900),
            order_id: 42,
            product_id: 3,
            quantity: 2,
            unit_price: 15.0,
        },
        OrderLine {
            id: Some(901),
            order_id: 42,
            product_id: 4,
            quantity: 1,
            unit_price: 5.0,
        },
    ];
    let backend = Arc::new(RecordingBackend::with_lines(persisted));
    let order = Order {
        id: 42,
        customer_id: 7,
        placed_at: Utc.timestamp_opt(1_600_000_000, 0).single(),
        completed: true,
        subtotal: 35.0,
        notes: None,
    };

    service(&backend)
        .submit_edit(&order, &draft_for_customer_7())
        .await
        .expect("edit succeeds");

    assert_eq!(
        backend.calls(),
        vec![
            "list lines order=42".to_owned(),
            "delete line 900".to_owned(),
            "delete line 901".to_owned(),
            "create line product=3".to_owned(),
            "update order 42".to_owned(),
        ]
    );
    let updates = backend.updates.lock().expect("update log");
    let (_, update) = updates.first().expect("one closing update");
    // Customer, completion flag, and original timestamp are preserved.
    assert_eq!(update.customer_id, 7);
    assert!(update.completed);
    assert_eq!(
        update.placed_at.map(|at| at.timestamp()),
        Some(1_600_000_000)
    );
    assert!((update.subtotal - 30.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn deletion_removes_lines_before_the_parent() {
    let persisted = vec![OrderLine {
        id: Some(900),
        order_id: 42,
        product_id: 3,
        quantity: 2,
        unit_price: 15.0,
    }];
    let backend = Arc::new(RecordingBackend::with_lines(persisted));

    service(&backend)
        .delete_order(42)
        .await
        .expect("deletion succeeds");

    assert_eq!(
        backend.calls(),
        vec![
            "list lines order=42".to_owned(),
            "delete line 900".to_owned(),
            "delete order 42".to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn unready_drafts_never_reach_the_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let err = service(&backend)
        .submit_new(&OrderDraft::new())
        .await
        .expect_err("empty draft is rejected");

    assert!(matches!(err, OrderSubmitError::NotReady(_)));
    assert!(backend.calls().is_empty());
}
