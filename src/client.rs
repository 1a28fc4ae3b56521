//! gRPC client for the rocket service.

use thiserror::Error;
use tonic::transport::Channel;

use crate::models::Rocket;
use crate::proto::rocket_service_client::RocketServiceClient;
use crate::proto::{AddRocketRequest, DeleteRocketRequest, GetRocketRequest};

/// Default URL for a local server.
pub const DEFAULT_URL: &str = "http://127.0.0.1:50051";

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("request failed: {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    #[error("server response did not include a rocket")]
    MissingRocket,
}

/// Typed wrapper around the generated client.
#[derive(Debug, Clone)]
pub struct RocketClient {
    inner: RocketServiceClient<Channel>,
}

impl RocketClient {
    pub async fn connect(url: impl Into<String>) -> Result<Self, ClientError> {
        let inner = RocketServiceClient::connect(url.into()).await?;
        Ok(Self { inner })
    }

    pub async fn get_rocket(&self, id: &str) -> Result<Rocket, ClientError> {
        let response = self
            .inner
            .clone()
            .get_rocket(GetRocketRequest { id: id.to_string() })
            .await?;
        response
            .into_inner()
            .rocket
            .map(Into::into)
            .ok_or(ClientError::MissingRocket)
    }

    pub async fn add_rocket(&self, rocket: Rocket) -> Result<Rocket, ClientError> {
        let response = self
            .inner
            .clone()
            .add_rocket(AddRocketRequest {
                rocket: Some(rocket.into()),
            })
            .await?;
        response
            .into_inner()
            .rocket
            .map(Into::into)
            .ok_or(ClientError::MissingRocket)
    }

    /// Returns the server's status text.
    pub async fn delete_rocket(&self, id: &str) -> Result<String, ClientError> {
        let request = DeleteRocketRequest {
            rocket: Some(crate::proto::Rocket {
                id: id.to_string(),
                ..Default::default()
            }),
        };
        let response = self.inner.clone().delete_rocket(request).await?;
        Ok(response.into_inner().status)
    }
}
