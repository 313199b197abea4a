//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use qradar_appkit::config::{ClientConfig, TlsConfig};
use qradar_appkit::rest::{BoxError, OutboundRequest, Transport};

/// Address returned by the test host resolver.
pub const LOCAL_IP: &str = "172.17.0.4";

pub fn local_ip() -> Option<IpAddr> {
    Some(LOCAL_IP.parse().unwrap())
}

/// Transport that records requests instead of sending them.
#[derive(Default)]
pub struct RecordingTransport {
    calls: AtomicUsize,
    last: Mutex<Option<OutboundRequest>>,
}

impl RecordingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> OutboundRequest {
        self.last.lock().unwrap().clone().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    type Response = u16;

    async fn send(&self, request: OutboundRequest) -> Result<u16, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        Ok(200)
    }
}

/// Config whose TLS inputs live under `dir`. `mounts` is written as the mount
/// table; `console_cert` creates the console certificate file.
pub fn config_in(dir: &Path, mounts: &str, console_cert: bool) -> ClientConfig {
    let tls = TlsConfig {
        console_cert_path: dir.join("consolecert.pem"),
        ca_bundle_path: dir.join("ca-bundle.crt"),
        mounts_path: dir.join("mounts"),
        pki_mount_marker: "/etc/qradar_pki".into(),
    };
    std::fs::write(&tls.mounts_path, mounts).unwrap();
    if console_cert {
        std::fs::write(&tls.console_cert_path, "pem").unwrap();
    }

    let mut config = ClientConfig::default();
    config.tls = tls;
    config.console.ip = Some("10.0.0.1".into());
    config
}

/// Log output of a scoped test subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Plain-text fmt subscriber at TRACE writing into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines containing `level` and `message`.
    pub fn lines_with(&self, level: &str, message: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(message))
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Start a mock console that answers every request with the raw request
/// it received (head and body) as the response body.
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            request.len(),
                            request
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
