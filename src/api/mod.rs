mod convert;
mod handlers;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;

use crate::proto::rocket_service_server::RocketServiceServer;
use crate::rocket::RocketService;

pub use handlers::{Handler, DELETE_STATUS};

/// Bind the server socket. Failure here is fatal to startup.
pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not listen on {}", addr))
}

/// Serve the rocket service and the standard health service on an already
/// bound listener until `shutdown` resolves.
pub async fn serve<S, F>(
    listener: TcpListener,
    handler: Handler<S>,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: RocketService,
    F: Future<Output = ()>,
{
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<RocketServiceServer<Handler<S>>>()
        .await;

    let addr = listener.local_addr()?;
    tracing::info!("Rocket gRPC server listening on {}", addr);

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(health_service)
        .add_service(RocketServiceServer::new(handler))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("Rocket gRPC server stopped");
    Ok(())
}
