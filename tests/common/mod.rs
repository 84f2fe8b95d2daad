//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use calamine::{open_workbook, Reader, Xlsx};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use waitwatch::HttpSource;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this status line and JSON body.
    Json { status: u16, body: String },
    /// Accept the connection and never answer.
    Hang,
    /// Send a 200 header and part of the body, then go quiet.
    Stall,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Json {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Reply::Json {
            status,
            body: body.to_string(),
        }
    }
}

/// Local endpoint serving one reply per request, in order.
///
/// Once the script is exhausted the last reply is repeated.
pub struct Endpoint {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl Endpoint {
    pub async fn serve(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/sample.json", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let reply = replies
                    .get(n)
                    .or_else(|| replies.last())
                    .cloned()
                    .unwrap_or(Reply::Hang);

                read_request(&mut stream).await;
                match reply {
                    Reply::Json { status, body } => {
                        let response = format!("{}{}", head(status, body.len()), body);
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                    Reply::Stall => {
                        let partial = format!("{}{{\"General Hospital\": ", head(200, 4096));
                        let _ = stream.write_all(partial.as_bytes()).await;
                        let _ = stream.flush().await;
                        held.push(stream);
                    }
                    Reply::Hang => held.push(stream),
                }
            }
        });

        Self { url, hits }
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// A source pointed at this endpoint.
    pub fn source(&self, timeout: Duration) -> HttpSource {
        HttpSource::builder()
            .endpoint(&self.url)
            .timeout(timeout)
            .system_proxy(false)
            .build()
            .unwrap()
    }
}

async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn head(status: u16, content_length: usize) -> String {
    format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n",
        status,
        reason(status),
        content_length
    )
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Cells of the first sheet of the workbook at `path`, header row first.
pub fn read_sheet(path: &Path) -> (String, Vec<Vec<String>>) {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let name = workbook.sheet_names().remove(0);
    let range = workbook.worksheet_range(&name).unwrap();
    let cells = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    (name, cells)
}

/// JSON object with `size` hospitals.
pub fn payload_of(size: usize) -> String {
    let entries: Vec<String> = (0..size)
        .map(|i| format!("\"Hospital {}\": \"{} min\"", i, 10 + i))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
