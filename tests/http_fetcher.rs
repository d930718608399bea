use listing_scout::{ExtractionError, Extractor, ExtractorConfig, HttpFetcher, PageFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Answer a single request with `response` and hand back the raw request.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/annonce/42"), handle)
}

#[tokio::test]
async fn sends_browser_signature_without_cache() {
    let (url, server) = serve_once(http_response("200 OK", "<html>ok</html>")).await;
    let fetcher = HttpFetcher::new().unwrap();

    let body = fetcher.fetch(&url).await.unwrap();
    let request = server.await.unwrap().to_lowercase();

    assert_eq!(body, "<html>ok</html>");
    assert!(request.starts_with("get /annonce/42 "));
    assert!(request.contains("user-agent: mozilla/5.0 (windows nt 10.0; win64; x64)"));
    assert!(request.contains(
        "accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
    ));
    assert!(request.contains("accept-language: fr-fr,fr;q=0.9,en-us;q=0.8,en;q=0.7"));
    assert!(request.contains("cache-control: no-cache"));
    assert!(request.contains("pragma: no-cache"));
}

#[tokio::test]
async fn custom_user_agent_is_used() {
    let (url, server) = serve_once(http_response("200 OK", "")).await;
    let config = ExtractorConfig::default().with_user_agent("ListingScoutTest/1.0");
    let fetcher = HttpFetcher::with_config(&config).unwrap();

    fetcher.fetch(&url).await.unwrap();
    let request = server.await.unwrap().to_lowercase();

    assert!(request.contains("user-agent: listingscouttest/1.0"));
}

#[tokio::test]
async fn failure_status_is_an_http_error() {
    let (url, server) = serve_once(http_response("404 Not Found", "gone")).await;
    let fetcher = HttpFetcher::new().unwrap();

    let err = fetcher.fetch(&url).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ExtractionError::Http { status: 404 }));
    assert_eq!(err.to_string(), "HTTP error: 404");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher
        .fetch(&format!("http://{addr}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractionError::Network(_)));
}

#[test]
fn invalid_header_value_is_a_client_error() {
    let config = ExtractorConfig::default().with_accept_language("fr\nFR");

    assert!(matches!(
        HttpFetcher::with_config(&config),
        Err(ExtractionError::Client(_))
    ));
}

#[tokio::test]
async fn extracts_a_served_listing_end_to_end() {
    let page = r#"<html><head>
        <meta property="og:title" content="Longère en Bretagne">
        <meta property="og:description" content="4 chambres, jardin et barbecue">
        </head><body><span class="price">780 €</span></body></html>"#;
    let (url, server) = serve_once(http_response("200 OK", page)).await;
    let extractor = Extractor::new().unwrap();

    let response = extractor.respond(&url).await;
    server.await.unwrap();

    assert!(response.success);
    let listing = response.data.unwrap();
    assert_eq!(listing.title.as_deref(), Some("Longère en Bretagne"));
    assert_eq!(listing.price, Some(780.0));
    assert_eq!(listing.bedrooms, Some(4));
    assert_eq!(listing.has_bbq.as_bool(), Some(true));
    assert_eq!(listing.has_pool.as_bool(), Some(false));
}
