use simfin_prices::{logging, Config, PriceError, PriceFetcher, PriceQuoteResult, ReqwestTransport};
use log::LevelFilter;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response and hand back the raw request head.
async fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn local_fetcher(base_url: &str) -> PriceFetcher {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let transport = Arc::new(ReqwestTransport::with_client(client));
    PriceFetcher::new(Config::new("integration-key").with_base_url(base_url), transport).unwrap()
}

#[tokio::test]
async fn fetches_last_three_closes_over_http() {
    let body = r#"[{"name": "MICROSOFT CORP", "ticker": "MSFT", "data": [
        {"Date": "2024-01-02", "Last Closing Price": 370.87},
        {"Date": "2024-01-03", "Last Closing Price": 370.6},
        {"Date": "2024-01-04", "Last Closing Price": 367.94},
        {"Date": "2024-01-05", "Last Closing Price": 367.75}
    ]}]"#;
    let (base_url, server) = one_shot_server("HTTP/1.1 200 OK", body).await;

    let summary = local_fetcher(&base_url)
        .get_closing_prices("MSFT", "2024-01-07", "2024-01-12")
        .await
        .unwrap();
    assert_eq!(
        summary,
        "The closing prices for the given dates are: [370.6, 367.94, 367.75]"
    );

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with(
        "get /api/v3/companies/prices/verbose?ticker=msft&start=2024-01-02&end=2024-01-12 http/1.1"
    ));
    assert!(request.contains("authorization: integration-key"));
    assert!(request.contains("accept: application/json"));
}

#[tokio::test]
async fn empty_payload_over_http() {
    let (base_url, server) = one_shot_server("HTTP/1.1 200 OK", "[]").await;

    let result = local_fetcher(&base_url)
        .fetch_closing_prices("ZZZZ", "2021-05-10", "2021-05-14")
        .await
        .unwrap();
    assert!(matches!(result, PriceQuoteResult::Empty { .. }));
    assert_eq!(result.to_string(), "No data available between 2021-05-10 and 2021-05-14.");

    server.await.unwrap();
}

#[tokio::test]
async fn rate_limited_over_http_is_logged_to_file() {
    let (base_url, server) =
        one_shot_server("HTTP/1.1 429 Too Many Requests", r#"{"error": "rate limit"}"#).await;

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let fetcher = local_fetcher(&base_url)
        .with_logger(logging::file_logger(&log_path, LevelFilter::Debug).unwrap());

    let err = fetcher
        .fetch_closing_prices("AAPL", "2024-01-01", "2024-01-31")
        .await
        .unwrap_err();
    match err {
        PriceError::Upstream(upstream) => {
            assert_eq!(upstream.status, 429);
            assert!(upstream.is_rate_limited());
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    server.await.unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains(" - INFO - Checking the initial and final dates"));
    assert!(log.contains(" - INFO - Correct input dates"));
    assert!(log.contains(" - ERROR - Unable to retrieve data, error: 429"));
}
