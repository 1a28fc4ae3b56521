use tonic::{Code, Request, Response, Status};
use tonic_types::{ErrorDetails, StatusExt};
use uuid::Uuid;

use crate::proto::rocket_service_server::RocketService as RocketServiceRpc;
use crate::proto::{
    AddRocketRequest, AddRocketResponse, DeleteRocketRequest, DeleteRocketResponse,
    GetRocketRequest, GetRocketResponse,
};
use crate::rocket::RocketService;

const INVALID_UUID: &str = "UUID is not valid";

/// Status text returned by a successful DeleteRocket.
pub const DELETE_STATUS: &str = "successfully delete rocket";

// ============================================================
// Error Handling
// ============================================================

/// Log the underlying failure and return a generic status so storage
/// details never reach the caller.
fn internal_error(e: impl std::fmt::Display) -> Status {
    tracing::error!("Failed to retrieve rocket by id: {}", e);
    Status::internal("internal server error")
}

/// `INVALID_ARGUMENT` with a field violation on `id`.
fn invalid_id(id: &str, e: uuid::Error) -> Status {
    tracing::warn!("Given UUID {:?} is not valid: {}", id, e);
    Status::with_error_details(
        Code::InvalidArgument,
        INVALID_UUID,
        ErrorDetails::with_bad_request_violation("id", INVALID_UUID),
    )
}

// ============================================================
// Handler
// ============================================================

/// gRPC endpoint for the rocket service.
pub struct Handler<S> {
    service: S,
}

impl<S: RocketService> Handler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S: RocketService> RocketServiceRpc for Handler<S> {
    async fn get_rocket(
        &self,
        request: Request<GetRocketRequest>,
    ) -> Result<Response<GetRocketResponse>, Status> {
        tracing::info!("GetRocket endpoint hit");
        let req = request.into_inner();

        if let Err(e) = Uuid::parse_str(&req.id) {
            return Err(invalid_id(&req.id, e));
        }

        let rocket = self
            .service
            .get_rocket_by_id(&req.id)
            .await
            .map_err(internal_error)?;

        Ok(Response::new(GetRocketResponse {
            rocket: Some(rocket.into()),
        }))
    }

    async fn add_rocket(
        &self,
        request: Request<AddRocketRequest>,
    ) -> Result<Response<AddRocketResponse>, Status> {
        tracing::info!("AddRocket endpoint hit");
        let rocket = request.into_inner().rocket.unwrap_or_default();

        if let Err(e) = Uuid::parse_str(&rocket.id) {
            return Err(invalid_id(&rocket.id, e));
        }

        let rocket = self
            .service
            .insert_rocket(rocket.into())
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert rocket into database: {}", e);
                Status::from(e)
            })?;

        Ok(Response::new(AddRocketResponse {
            rocket: Some(rocket.into()),
        }))
    }

    async fn delete_rocket(
        &self,
        request: Request<DeleteRocketRequest>,
    ) -> Result<Response<DeleteRocketResponse>, Status> {
        tracing::info!("DeleteRocket endpoint hit");
        let id = request
            .into_inner()
            .rocket
            .map(|r| r.id)
            .unwrap_or_default();

        self.service.delete_rocket(&id).await.map_err(|e| {
            tracing::error!("Failed to delete rocket {:?}: {}", id, e);
            Status::from(e)
        })?;

        Ok(Response::new(DeleteRocketResponse {
            status: DELETE_STATUS.to_string(),
        }))
    }
}
