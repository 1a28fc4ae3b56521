use std::net::SocketAddr;

use rocket_grpc::api::{self, Handler};
use rocket_grpc::client::{ClientError, RocketClient};
use rocket_grpc::db::Database;
use rocket_grpc::models::Rocket;
use rocket_grpc::rocket::Service;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::Code;
use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::health_client::HealthClient;
use tonic_health::pb::HealthCheckRequest;
use tonic_types::StatusExt;

const SATURN_ID: &str = "11111111-1111-1111-1111-111111111111";

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
    _dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("rockets.db")).expect("Failed to open database");
        db.migrate().expect("Failed to migrate");

        let listener = api::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Listener has no address");

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(api::serve(
            listener,
            Handler::new(Service::new(db)),
            async move {
                let _ = signal.await;
            },
        ));

        Self {
            addr,
            shutdown,
            handle,
            _dir: dir,
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn client(&self) -> RocketClient {
        RocketClient::connect(self.url())
            .await
            .expect("Failed to connect")
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

fn saturn_v() -> Rocket {
    Rocket {
        id: SATURN_ID.to_string(),
        rocket_type: "heavy".to_string(),
        name: "Saturn V".to_string(),
    }
}

#[tokio::test]
async fn saturn_v_lifecycle_over_the_wire() {
    let server = TestServer::start().await;
    let client = server.client().await;

    let added = client.add_rocket(saturn_v()).await.expect("AddRocket failed");
    assert_eq!(added, saturn_v());

    let fetched = client.get_rocket(SATURN_ID).await.expect("GetRocket failed");
    assert_eq!(fetched, saturn_v());

    let status = client
        .delete_rocket(SATURN_ID)
        .await
        .expect("DeleteRocket failed");
    assert_eq!(status, "successfully delete rocket");

    match client.get_rocket(SATURN_ID).await {
        Err(ClientError::Status(status)) => assert_eq!(status.code(), Code::Internal),
        other => panic!("expected INTERNAL status, got {:?}", other),
    }

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn field_violation_survives_the_wire() {
    let server = TestServer::start().await;
    let client = server.client().await;

    match client.get_rocket("saturn").await {
        Err(ClientError::Status(status)) => {
            assert_eq!(status.code(), Code::InvalidArgument);
            let bad_request = status
                .get_details_bad_request()
                .expect("status should carry BadRequest details");
            assert_eq!(bad_request.field_violations[0].field, "id");
        }
        other => panic!("expected INVALID_ARGUMENT status, got {:?}", other),
    }

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn reports_rocket_service_as_serving() {
    let server = TestServer::start().await;

    let channel = tonic::transport::Endpoint::from_shared(server.url())
        .expect("Invalid server URL")
        .connect()
        .await
        .expect("Failed to connect health client");
    let mut health = HealthClient::new(channel);
    let response = health
        .check(HealthCheckRequest {
            service: "rocket.v1.RocketService".to_string(),
        })
        .await
        .expect("Health check failed")
        .into_inner();

    assert_eq!(response.status, ServingStatus::Serving as i32);

    drop(health);
    server.stop().await;
}

#[tokio::test]
async fn refuses_to_start_on_an_occupied_port() {
    let server = TestServer::start().await;

    let err = api::bind(server.addr)
        .await
        .expect_err("second bind on the same port should fail");

    assert!(err.to_string().contains(&format!("Could not listen on {}", server.addr)));
    assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());

    server.stop().await;
}
