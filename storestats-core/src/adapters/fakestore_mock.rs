//! Mock store API server for testing
//!
//! Serves the three endpoints the client reads, with the same payload shapes
//! as the real API:
//! - GET /users returns [{ id, name: { firstname, lastname }, address: { geolocation } }]
//! - GET /carts/?startdate=..&enddate=.. returns [{ id, userId, products: [...] }]
//! - GET /products returns [{ id, title, price, category }]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Mock store server for testing
pub struct MockStoreServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour of the mock server
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Resource ("users", "carts", "products") answered with HTTP 500
    pub fail_resource: Option<&'static str>,
    /// Resource answered with a body that is not JSON
    pub garbage_resource: Option<&'static str>,
    /// Serve a product whose price is not numeric
    pub malformed_price: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl MockStoreServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request targets (path and query) received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockStoreServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<String>>) {
    // Accepted sockets may inherit non-blocking mode from the listener
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    }

    let (method, target) = (parts[0], parts[1]);
    if let Ok(mut requests) = log.lock() {
        requests.push(target.to_string());
    }

    if method != "GET" {
        send_response(&mut stream, 405, "Method Not Allowed", r#"{"error": "Method not allowed"}"#);
        return;
    }

    let path = target.split('?').next().unwrap_or(target).trim_end_matches('/');
    let resource = match path {
        "/users" => "users",
        "/carts" => "carts",
        "/products" => "products",
        _ => {
            send_response(&mut stream, 404, "Not Found", r#"{"error": "Endpoint not found"}"#);
            return;
        }
    };

    if config.fail_resource == Some(resource) {
        send_response(&mut stream, 500, "Internal Server Error", r#"{"error": "boom"}"#);
        return;
    }
    if config.garbage_resource == Some(resource) {
        send_response(&mut stream, 200, "OK", "<html>maintenance</html>");
        return;
    }

    let body = match resource {
        "users" => mock_users(),
        "carts" => mock_carts(),
        _ => mock_products(config.malformed_price),
    };
    send_response(&mut stream, 200, "OK", &body.to_string());
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn mock_users() -> JsonValue {
    json!([
        {
            "id": 1,
            "email": "john@gmail.com",
            "name": { "firstname": "john", "lastname": "doe" },
            "address": { "city": "kilcoole", "geolocation": { "lat": "-37.3159", "long": "81.1496" } }
        },
        {
            "id": 2,
            "email": "morrison@gmail.com",
            "name": { "firstname": "david", "lastname": "morrison" },
            "address": { "city": "kilcoole", "geolocation": { "lat": "-37.3159", "long": "81.1496" } }
        },
        {
            "id": 3,
            "email": "kevin@gmail.com",
            "name": { "firstname": "kevin", "lastname": "ryan" },
            "address": { "city": "Cullman", "geolocation": { "lat": "40.3467", "long": "-30.1310" } }
        }
    ])
}

fn mock_carts() -> JsonValue {
    json!([
        {
            "id": 1,
            "userId": 1,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [{ "productId": 1, "quantity": 2 }],
            "__v": 0
        },
        {
            "id": 2,
            "userId": 3,
            "date": "2020-01-02T00:00:00.000Z",
            "products": [{ "productId": 3, "quantity": 1 }, { "productId": 2, "quantity": 1 }],
            "__v": 0
        }
    ])
}

fn mock_products(malformed_price: bool) -> JsonValue {
    let third_price = if malformed_price { json!("n/a") } else { json!(7.5) };
    json!([
        { "id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing" },
        { "id": 2, "title": "T-Shirt", "price": 22.3, "category": "men's clothing" },
        { "id": 3, "title": "Bracelet", "price": third_price, "category": "jewelery" }
    ])
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::adapters::fakestore::FakeStoreClient;
    use crate::config::Config;
    use crate::domain::result::{Error, FetchError};
    use crate::ports::DataSupplier;
    use crate::services::build_report;

    fn client_for(server: &MockStoreServer) -> FakeStoreClient {
        let config = Config::default().with_base_url(&server.base_url());
        FakeStoreClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let server = MockStoreServer::start(MockConfig::default()).unwrap();
        let dataset = client_for(&server).fetch_all().await.unwrap();

        assert_eq!(dataset.users.len(), 3);
        assert_eq!(dataset.carts.len(), 2);
        assert_eq!(dataset.products.len(), 3);
        assert_eq!(dataset.users[2].name.display_name(), "kevin ryan");
        assert_eq!(dataset.products[0].price, Decimal::new(10995, 2));
    }

    #[tokio::test]
    async fn test_carts_request_carries_date_window() {
        let server = MockStoreServer::start(MockConfig::default()).unwrap();
        client_for(&server).get_carts().await.unwrap();

        let requests = server.requests();
        assert!(
            requests
                .iter()
                .any(|r| r == "/carts/?startdate=2000-01-01&enddate=2023-04-07"),
            "unexpected requests: {:?}",
            requests
        );
    }

    #[tokio::test]
    async fn test_report_from_mock() {
        let server = MockStoreServer::start(MockConfig::default()).unwrap();
        let dataset = client_for(&server).fetch_all().await.unwrap();
        let report = build_report(&dataset).unwrap();

        assert_eq!(report.category_totals["men's clothing"], Decimal::new(13225, 2));
        assert_eq!(report.category_totals["jewelery"], Decimal::new(75, 1));

        let winner = report.highest_value_cart.unwrap();
        assert_eq!(winner.owner_name, "john doe");
        assert_eq!(winner.value, Decimal::new(21990, 2));

        let pair = report.most_distant_users.unwrap();
        assert_eq!((pair.first.id, pair.second.id), (1, 3));
    }

    #[tokio::test]
    async fn test_server_error_fails_fetch() {
        let server = MockStoreServer::start(MockConfig {
            fail_resource: Some("carts"),
            ..Default::default()
        })
        .unwrap();

        let err = client_for(&server).fetch_all().await.unwrap_err();
        match err {
            Error::Fetch(FetchError::Status { resource, status }) => {
                assert_eq!(resource, "carts");
                assert_eq!(status, 500);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockStoreServer::start(MockConfig {
            garbage_resource: Some("users"),
            ..Default::default()
        })
        .unwrap();

        let err = client_for(&server).fetch_all().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_malformed_price_fails_fetch() {
        let server = MockStoreServer::start(MockConfig {
            malformed_price: true,
            ..Default::default()
        })
        .unwrap();

        let err = client_for(&server).fetch_all().await.unwrap_err();
        match err {
            Error::Fetch(e @ FetchError::Malformed { .. }) => assert_eq!(e.resource(), "products"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockStoreServer::start(MockConfig {
            delay_ms: 2_500,
            ..Default::default()
        })
        .unwrap();

        let mut config = Config::default().with_base_url(&server.base_url());
        config.timeout_secs = 1;
        let client = FakeStoreClient::new(&config).unwrap();

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let base_url = {
            let server = MockStoreServer::start(MockConfig::default()).unwrap();
            server.base_url()
        };
        let config = Config::default().with_base_url(&base_url);
        let client = FakeStoreClient::new(&config).unwrap();

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
