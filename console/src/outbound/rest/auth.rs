//! Sign-in gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RestClient;
use crate::domain::ports::{AuthGateway, LoginGrant};
use crate::domain::{DomainError, LoginCredentials};

const SIGNIN_PATH: &str = "api/v1/autenticacion/signin";

#[derive(Debug, Serialize)]
struct SignInRequestDto<'a> {
    email: &'a str,
    clave: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponseDto {
    jwt: String,
    #[serde(default)]
    username: Option<String>,
}

/// Reqwest adapter for the authentication endpoint.
#[derive(Clone)]
pub struct RestAuthGateway {
    client: RestClient,
}

impl RestAuthGateway {
    /// Wrap the shared transport.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<LoginGrant, DomainError> {
        let url = self.client.endpoint(SIGNIN_PATH)?;
        let body = SignInRequestDto {
            email: credentials.email(),
            clave: credentials.secret(),
        };
        let response = self.client.send(self.client.post(url).json(&body)).await?;
        let dto: SignInResponseDto = self.client.json(response).await?;
        Ok(LoginGrant {
            token: dto.jwt,
            // Old backend revisions omitted the display name; fall back to
            // the email the operator signed in with.
            username: dto
                .username
                .unwrap_or_else(|| credentials.email().to_owned()),
        })
    }
}
