//! User-account administration gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::AccountsGateway;
use crate::domain::{AccountDraft, DomainError, Role, UserAccount};

const USERS_PATH: &str = "api/v1/user";

/// DTO mirroring the backend's user shape. `clave` is write-only: listings
/// omit it and the read mapping drops it on the floor.
#[derive(Debug, Serialize, Deserialize)]
struct UsuarioDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    usuario: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clave: Option<String>,
    #[serde(default)]
    activo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rol: Option<String>,
}

impl From<UsuarioDto> for UserAccount {
    fn from(dto: UsuarioDto) -> Self {
        Self {
            id: dto.id.unwrap_or(0),
            username: dto.usuario,
            email: dto.email,
            active: dto.activo,
            role: dto.rol.as_deref().map(Role::from_claim).unwrap_or_default(),
        }
    }
}

impl From<&AccountDraft> for UsuarioDto {
    fn from(draft: &AccountDraft) -> Self {
        Self {
            id: None,
            usuario: draft.username.clone(),
            email: draft.email.clone(),
            clave: Some(draft.secret.as_str().to_owned()),
            activo: draft.active,
            rol: Some(draft.role.as_claim().to_owned()),
        }
    }
}

/// Reqwest adapter for the user-administration resource.
#[derive(Clone)]
pub struct RestAccountsGateway {
    client: RestClient,
}

impl RestAccountsGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountsGateway for RestAccountsGateway {
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let url = self.client.endpoint(USERS_PATH)?;
        let response = self.client.send(self.client.get(url)).await?;
        let dtos: Vec<UsuarioDto> = self.client.json(response).await?;
        Ok(dtos.into_iter().map(UserAccount::from).collect())
    }

    async fn create(&self, draft: &AccountDraft) -> Result<UserAccount, DomainError> {
        let url = self.client.endpoint(&format!("{USERS_PATH}/createUser"))?;
        let body = UsuarioDto::from(draft);
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: UsuarioDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: u64, draft: &AccountDraft) -> Result<UserAccount, DomainError> {
        let url = self.client.endpoint(&format!("{USERS_PATH}/{id}"))?;
        let mut body = UsuarioDto::from(draft);
        body.id = Some(id);
        let response = self.client.send(self.client.put(url).json(&body)).await?;
        let dto: UsuarioDto = self.client.json(response).await?;
        Ok(dto.into())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{USERS_PATH}/{id}"))?;
        self.client.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn enable(&self, id: u64) -> Result<(), DomainError> {
        let url = self.client.endpoint(&format!("{USERS_PATH}/habilitar/{id}"))?;
        self.client.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn disable(&self, id: u64) -> Result<(), DomainError> {
        let url = self
            .client
            .endpoint(&format!("{USERS_PATH}/deshabilitar/{id}"))?;
        self.client.send(self.client.put(url)).await?;
        Ok(())
    }
}
