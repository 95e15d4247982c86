//! Customer resource gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::CustomersGateway;
use crate::domain::{Customer, DomainError};

const CUSTOMERS_PATH: &str = "api/v1/clientes";

/// DTO mirroring the backend's customer shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClienteDto {
    #[serde(default)]
    id_cliente: u64,
    nombre: String,
    email: String,
    telefono: String,
    direccion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<ClienteDto> for Customer {
    fn from(dto: ClienteDto) -> Self {
        Self {
            id: dto.id_cliente,
            name: dto.nombre,
            email: dto.email,
            phone: dto.telefono,
            address: dto.direccion,
            image_url: dto.url,
        }
    }
}

impl From<&Customer> for ClienteDto {
    fn from(customer: &Customer) -> Self {
        Self {
            id_cliente: customer.id,
            nombre: customer.name.clone(),
            email: customer.email.clone(),
            telefono: customer.phone.clone(),
            direccion: customer.address.clone(),
            url: customer.image_url.clone(),
        }
    }
}

/// Reqwest adapter for the customer resource.
#[derive(Clone)]
pub struct RestCustomersGateway {
    client: RestClient,
}

impl RestCustomersGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomersGateway for RestCustomersGateway {
    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let url = self.client.endpoint(CUSTOMERS_PATH)?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<ClienteDto> = self.client.json(response).await?;
        Ok(dtos.into_iter().map(Customer::from).collect())
    }

    async fn get(&self, id: u64) -> Result<Customer, DomainError> {
        let url = self.client.endpoint(&format!("{CUSTOMERS_PATH}/{id}"))?;
        let response = self.client.send(self.client.get(url)).await?;
        let dto: ClienteDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let url = self.client.endpoint(CUSTOMERS_PATH)?;
        let body = ClienteDto::from(customer);
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: ClienteDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: u64, customer: &Customer) -> Result<Customer, DomainError> {
        let url = self.client.endpoint(&format!("{CUSTOMERS_PATH}/{id}"))?;
        let body = ClienteDto::from(customer);
        let response = self.client.send(self.client.put(url).json(&body)).await?;
        let dto: ClienteDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{CUSTOMERS_PATH}/{id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }
}
