//! Order-line resource gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::OrderLinesGateway;
use crate::domain::{DomainError, OrderLine};

const LINES_PATH: &str = "api/v1/detalles-pedido";

/// Nested order reference as the backend expects it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PedidoRefDto {
    id_pedido: u64,
}

/// Nested product reference as the backend expects it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductoRefDto {
    id_producto: u64,
}

/// DTO mirroring the backend's order-line shape. The line subtotal is
/// redundant on the wire (quantity × unit price) but the backend stores it,
/// so it is always sent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetallePedidoDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_detalle_pedido: Option<u64>,
    #[serde(default)]
    pedido: Option<PedidoRefDto>,
    producto: ProductoRefDto,
    cantidad: u32,
    precio_unitario: f64,
    subtotal: f64,
}

impl DetallePedidoDto {
    fn into_domain(self, fallback_order_id: u64) -> OrderLine {
        OrderLine {
            id: self.id_detalle_pedido,
            order_id: self
                .pedido
                .map_or(fallback_order_id, |pedido| pedido.id_pedido),
            product_id: self.producto.id_producto,
            quantity: self.cantidad,
            unit_price: self.precio_unitario,
        }
    }
}

impl From<&OrderLine> for DetallePedidoDto {
    fn from(line: &OrderLine) -> Self {
        Self {
            id_detalle_pedido: line.id,
            pedido: Some(PedidoRefDto {
                id_pedido: line.order_id,
            }),
            producto: ProductoRefDto {
                id_producto: line.product_id,
            },
            cantidad: line.quantity,
            precio_unitario: line.unit_price,
            subtotal: line.subtotal(),
        }
    }
}

/// Reqwest adapter for the order-line resource.
#[derive(Clone)]
pub struct RestOrderLinesGateway {
    client: RestClient,
}

impl RestOrderLinesGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderLinesGateway for RestOrderLinesGateway {
    async fn create(&self, line: &OrderLine) -> Result<OrderLine, DomainError> {
        let url = self.client.endpoint(&format!("{LINES_PATH}/crear"))?;
        let body = DetallePedidoDto::from(line);
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: DetallePedidoDto = self.client.json(response).await?;
        Ok(dto.into_domain(line.order_id))
    }

    async fn for_order(&self, order_id: u64) -> Result<Vec<OrderLine>, DomainError> {
        let url = self
            .client
            .endpoint(&format!("{LINES_PATH}/pedido/{order_id}"))?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<DetallePedidoDto> = self.client.json(response).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_domain(order_id))
            .collect())
    }

    async fn delete(&self, line_id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{LINES_PATH}/{line_id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn product_referenced(&self, product_id: u64) -> Result<bool, DomainError> {
        let url = self
            .client
            .endpoint(&format!("{LINES_PATH}/producto/{product_id}/existe"))?;
        let response = self.client.send(self.client.get(url)).await?;
        self.client.json(response).await
    }
}
