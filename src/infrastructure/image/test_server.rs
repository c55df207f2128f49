//! Minimal HTTP/1.1 responder for exercising the network paths in tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned response for one path.
#[derive(Debug, Clone)]
pub struct Route {
    path: &'static str,
    status: u16,
    body: Vec<u8>,
}

impl Route {
    pub fn ok(path: &'static str, body: Vec<u8>) -> Self {
        Self {
            path,
            status: 200,
            body,
        }
    }

    pub fn status(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            body: Vec::new(),
        }
    }
}

/// Serves `routes` on an ephemeral port until the test runtime shuts down.
/// Unknown paths answer 404.
pub async fn serve(routes: Vec<Route>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let _ = respond(stream, &routes).await;
            });
        }
    });

    addr
}

async fn respond(mut stream: TcpStream, routes: &[Route]) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    let mut parts = head.lines().next().unwrap_or_default().split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let (status, body) = routes
        .iter()
        .find(|route| route.path == path)
        .map_or((404, Vec::new()), |route| (route.status, route.body.clone()));

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let header = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    if method != "HEAD" {
        stream.write_all(&body).await?;
    }
    stream.shutdown().await
}
