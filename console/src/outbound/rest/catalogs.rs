//! Catalog resource gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::CatalogsGateway;
use crate::domain::{Catalog, DomainError};

const CATALOGS_PATH: &str = "api/v1/catalogos";

/// DTO mirroring the backend's catalog shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogoDto {
    #[serde(default)]
    id_catalogo: u64,
    nombre: String,
    descripcion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<CatalogoDto> for Catalog {
    fn from(dto: CatalogoDto) -> Self {
        Self {
            id: dto.id_catalogo,
            name: dto.nombre,
            description: dto.descripcion,
            image_url: dto.url,
        }
    }
}

impl From<&Catalog> for CatalogoDto {
    fn from(catalog: &Catalog) -> Self {
        Self {
            id_catalogo: catalog.id,
            nombre: catalog.name.clone(),
            descripcion: catalog.description.clone(),
            url: catalog.image_url.clone(),
        }
    }
}

/// Reqwest adapter for the catalog resource.
#[derive(Clone)]
pub struct RestCatalogsGateway {
    client: RestClient,
}

impl RestCatalogsGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogsGateway for RestCatalogsGateway {
    async fn list(&self) -> Result<Vec<Catalog>, DomainError> {
        let url = self.client.endpoint(CATALOGS_PATH)?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<CatalogoDto> = self.client.json(response).await?;
        Ok(dtos.into_iter().map(Catalog::from).collect())
    }

    async fn get(&self, id: u64) -> Result<Catalog, DomainError> {
        let url = self.client.endpoint(&format!("{CATALOGS_PATH}/{id}"))?;
        let response = self.client.send(self.client.get(url)).await?;
        let dto: CatalogoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn create(&self, catalog: &Catalog) -> Result<Catalog, DomainError> {
        let url = self.client.endpoint(CATALOGS_PATH)?;
        let body = CatalogoDto::from(catalog);
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: CatalogoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: u64, catalog: &Catalog) -> Result<Catalog, DomainError> {
        let url = self.client.endpoint(&format!("{CATALOGS_PATH}/{id}"))?;
        let body = CatalogoDto::from(catalog);
        let response = self.client.send(self.client.put(url).json(&body)).await?;
        let dto: CatalogoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{CATALOGS_PATH}/{id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }
}
