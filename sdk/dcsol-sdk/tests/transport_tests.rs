use dcsol_sdk::core::transport::Method;
use dcsol_sdk::error::NetworkError;
use dcsol_sdk::{ApiClient, HttpTransport, ReqwestTransport, RetryPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves `response` to every connection, counting them.
async fn serve(response: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let connections = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&connections);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (url, connections)
}

fn client(url: &str) -> ApiClient {
    let timeout = Duration::from_secs(5);
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap();
    ApiClient::new(
        Arc::new(ReqwestTransport::with_client(http)) as Arc<dyn HttpTransport>,
        url,
    )
    .with_retry(RetryPolicy::new(2, Duration::from_millis(10)))
    .with_timeout(timeout)
}

#[tokio::test]
async fn test_error_status_with_truncated_body_is_not_retried() {
    let (url, connections) = serve(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 200\r\nConnection: close\r\n\r\n{\"err",
    )
    .await;

    let err = client(&url).send("/scan", Method::GET, None).await.unwrap_err();

    assert_eq!(
        err,
        NetworkError::Rejected {
            status: 500,
            message: "HTTP 500: Internal Server Error".to_string(),
        }
    );
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_error_body_read_over_http() {
    let (url, connections) = serve(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 34\r\nConnection: close\r\n\r\n{\"error\":\"Invalid wallet address\"}",
    )
    .await;

    let err = client(&url).send("/scan", Method::GET, None).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid wallet address");
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}
