//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use llm_devhost::config::HostConfig;
use llm_devhost::http::HttpServer;
use llm_devhost::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a mock backend answers.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.into(),
        }
    }
}

pub type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a programmable mock backend on an ephemeral port.
/// Every request it receives is recorded before the handler runs.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Recorder)
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder: Recorder = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let rec = recorder.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let rec = rec.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        rec.lock().unwrap().push(request.clone());

                        let response = f(request).await;
                        let mut head = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Length: {}\r\nConnection: close\r\n",
                            response.status,
                            response.body.len()
                        );
                        if let Some(ct) = response.content_type {
                            head.push_str(&format!("Content-Type: {}\r\n", ct));
                        }
                        head.push_str("\r\n");

                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(response.body.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorder)
}

/// Start a mock backend that always returns the same JSON body.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: &'static str) -> (SocketAddr, Recorder) {
    start_programmable_backend(move |_| async move { MockResponse::json(status, body) }).await
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            let (k, v) = line.split_once(':')?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// A fresh scratch directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("llm-devhost-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Config pointing every file at `dir` and the registry at `backends`.
#[allow(dead_code)]
pub fn test_config(dir: &std::path::Path, backends: &[(&str, SocketAddr)]) -> HostConfig {
    let mut config = HostConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backends.0 = backends
        .iter()
        .map(|(name, addr)| (name.to_string(), format!("http://{}", addr)))
        .collect();
    config.storage.document_root = dir.join("public").display().to_string();
    config.storage.templates_path = dir.join("src").join("user_templates.json").display().to_string();
    config.storage.env_file = dir.join(".env").display().to_string();
    config.tls.generate_certificate = false;
    config
}

/// A running host; dropping it does not stop the server, call `stop`.
pub struct TestHost {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestHost {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Bind an ephemeral port and serve `config` on it.
pub async fn spawn_host(config: HostConfig) -> TestHost {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestHost { addr, shutdown }
}

/// Client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
