//! Product resource gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::ProductsGateway;
use crate::domain::{DomainError, Product};

const PRODUCTS_PATH: &str = "api/v1/productos";

/// DTO mirroring the backend's product shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductoDto {
    #[serde(default)]
    id_producto: u64,
    nombre: String,
    descripcion: String,
    precio: f64,
    disponibilidad: u32,
    #[serde(default)]
    id_catalogo: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<ProductoDto> for Product {
    fn from(dto: ProductoDto) -> Self {
        Self {
            id: dto.id_producto,
            name: dto.nombre,
            description: dto.descripcion,
            price: dto.precio,
            availability: dto.disponibilidad,
            catalog_id: dto.id_catalogo,
            image_url: dto.url,
        }
    }
}

impl From<&Product> for ProductoDto {
    fn from(product: &Product) -> Self {
        Self {
            id_producto: product.id,
            nombre: product.name.clone(),
            descripcion: product.description.clone(),
            precio: product.price,
            disponibilidad: product.availability,
            id_catalogo: product.catalog_id,
            url: Some(product.image_url_or_default().to_owned()),
        }
    }
}

/// Reqwest adapter for the product resource.
#[derive(Clone)]
pub struct RestProductsGateway {
    client: RestClient,
}

impl RestProductsGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductsGateway for RestProductsGateway {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let url = self.client.endpoint(PRODUCTS_PATH)?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<ProductoDto> = self.client.json(response).await?;
        Ok(dtos.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: u64) -> Result<Product, DomainError> {
        let url = self.client.endpoint(&format!("{PRODUCTS_PATH}/{id}"))?;
        let response = self.client.send(self.client.get(url)).await?;
        let dto: ProductoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn create(&self, product: &Product) -> Result<Product, DomainError> {
        let url = self.client.endpoint(PRODUCTS_PATH)?;
        let body = ProductoDto::from(product);
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: ProductoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: u64, product: &Product) -> Result<Product, DomainError> {
        let url = self.client.endpoint(&format!("{PRODUCTS_PATH}/{id}"))?;
        let body = ProductoDto::from(product);
        let response = self.client.send(self.client.put(url).json(&body)).await?;
        let dto: ProductoDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{PRODUCTS_PATH}/{id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Wire-shape coverage for the product DTO.

    use rstest::rstest;

    use super::*;
    use crate::domain::product::DEFAULT_IMAGE_URL;

    #[rstest]
    fn wire_names_decode_into_the_domain_shape() {
        let json = r#"{
            "idProducto": 3,
            "nombre": "Laptop",
            "descripcion": "14-inch ultrabook",
            "precio": 15.0,
            "disponibilidad": 4,
            "idCatalogo": 1,
            "url": "https://cdn.example/p/3.jpg"
        }"#;
        let product: Product = serde_json::from_str::<ProductoDto>(json)
            .expect("wire shape decodes")
            .into();
        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.availability, 4);
        assert_eq!(product.catalog_id, 1);
    }

    #[rstest]
    fn blank_images_serialize_as_the_default_placeholder() {
        let product = Product {
            id: 0,
            name: "Nuevo".to_owned(),
            description: "x".to_owned(),
            price: 1.0,
            availability: 1,
            catalog_id: 2,
            image_url: None,
        };
        let value = serde_json::to_value(ProductoDto::from(&product)).expect("serializes");
        assert_eq!(value["url"], DEFAULT_IMAGE_URL);
        assert_eq!(value["idCatalogo"], 2);
    }
}
