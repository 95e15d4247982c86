//! Order resource gateway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RestClient;
use crate::domain::order_saga::{NewOrder, OrderUpdate};
use crate::domain::ports::OrdersGateway;
use crate::domain::{DomainError, Order};

const ORDERS_PATH: &str = "api/v1/pedidos";

/// DTO mirroring the backend's order shape. The timestamp travels as an
/// RFC 3339 string and may be absent on parents whose closing update never
/// ran.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PedidoDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_pedido: Option<u64>,
    id_cliente: u64,
    estado_pedido: bool,
    subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fecha_pedido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notas_adicionales: Option<String>,
}

impl From<PedidoDto> for Order {
    fn from(dto: PedidoDto) -> Self {
        let placed_at = dto.fecha_pedido.as_deref().and_then(parse_timestamp);
        Self {
            id: dto.id_pedido.unwrap_or(0),
            customer_id: dto.id_cliente,
            placed_at,
            completed: dto.estado_pedido,
            subtotal: dto.subtotal,
            notes: dto.notas_adicionales,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            debug!(raw, error = %err, "order timestamp did not parse; treating as unset");
            None
        }
    }
}

/// Reqwest adapter for the order resource.
#[derive(Clone)]
pub struct RestOrdersGateway {
    client: RestClient,
}

impl RestOrdersGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersGateway for RestOrdersGateway {
    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        let url = self.client.endpoint(ORDERS_PATH)?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<PedidoDto> = self.client.json(response).await?;
        Ok(dtos.into_iter().map(Order::from).collect())
    }

    async fn get(&self, id: u64) -> Result<Order, DomainError> {
        let url = self.client.endpoint(&format!("{ORDERS_PATH}/{id}"))?;
        let response = self.client.send(self.client.get(url)).await?;
        let dto: PedidoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let url = self.client.endpoint(ORDERS_PATH)?;
        // The parent always starts with a zero subtotal and no timestamp;
        // the closing update writes the real figures.
        let body = PedidoDto {
            id_pedido: None,
            id_cliente: order.customer_id,
            estado_pedido: false,
            subtotal: 0.0,
            fecha_pedido: None,
            notas_adicionales: order.notes.clone(),
        };
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: PedidoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: u64, order: &OrderUpdate) -> Result<Order, DomainError> {
        let url = self.client.endpoint(&format!("{ORDERS_PATH}/{id}"))?;
        let body = PedidoDto {
            id_pedido: Some(id),
            id_cliente: order.customer_id,
            estado_pedido: order.completed,
            subtotal: order.subtotal,
            fecha_pedido: order.placed_at.map(|at| at.to_rfc3339()),
            notas_adicionales: order.notes.clone(),
        };
        let response = self.client.send(self.client.put(url).json(&body)).await?;
        let dto: PedidoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Order, DomainError> {
        let url = self.client.endpoint(&format!("{ORDERS_PATH}/{id}/estado"))?;
        let request = self.client.put(url).query(&[("estado", completed)]);
        let response = self.client.send(request).await?;
        let dto: PedidoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{ORDERS_PATH}/{id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }
}
