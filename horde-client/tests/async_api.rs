//! Async client coverage against the live mock server.
//!
//! Same surface as the blocking lifecycle test, driven through reqwest on the
//! test's tokio runtime.

use horde_client::{ClientConfig, ClientError, HordeApiClient};
use horde_core::{ApiError, ImageGenerateAsyncRequest, WorkerType};

const APIKEY: &str = "0000000000";

/// Start mock-horde on a random port and return its base URL.
async fn start_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_horde::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn generation_lifecycle() {
    let base_url = start_mock_server().await;
    let client = HordeApiClient::new(ClientConfig::with_base_url(base_url)).unwrap();

    // queue
    let queued = client
        .generate_async(APIKEY, &ImageGenerateAsyncRequest::new("a cat in a hat"))
        .await
        .unwrap();
    assert_eq!(queued.kudos, 10.0);

    // check
    let check = client.generate_check(queued.id).await.unwrap();
    assert!(check.done);
    assert_eq!(check.finished, 1);

    // status
    let status = client.generate_status(queued.id).await.unwrap();
    assert_eq!(status.generations.len(), 1);
    assert!(status.check.done);

    // cancel
    let cancelled = client.cancel_generation(APIKEY, queued.id).await.unwrap();
    assert_eq!(cancelled.generations.len(), 1);

    // gone afterwards
    let err = client.generate_check(queued.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api(ApiError::NotFound)));
}

#[tokio::test]
async fn workers_roster_is_filterable() {
    let base_url = start_mock_server().await;
    let client = HordeApiClient::new(ClientConfig::with_base_url(base_url)).unwrap();

    let workers = client.workers_all(None).await.unwrap();
    assert_eq!(workers.len(), 2);

    let text_workers = client.workers_all(Some(WorkerType::Text)).await.unwrap();
    assert_eq!(text_workers.len(), 1);
    assert_eq!(text_workers[0].name, "mock-text-worker");
}

#[tokio::test]
async fn validation_failure_short_circuits() {
    let client = HordeApiClient::new(ClientConfig::with_base_url("http://192.0.2.1:1")).unwrap();

    let request = ImageGenerateAsyncRequest {
        censor_nsfw: true,
        ..ImageGenerateAsyncRequest::new("a cat")
    };
    let err = client.generate_async(APIKEY, &request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api(ApiError::Validation(_))));
}
