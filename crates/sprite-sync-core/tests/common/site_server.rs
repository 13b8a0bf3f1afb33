//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of `path -> (status, body)` routes; any other path is
//! a 404. Every request is counted so tests can assert what was fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: HashMap<String, (u16, Vec<u8>)>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(path.to_string(), (200, body.into()));
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(path.to_string(), (status, Vec::new()));
        self
    }
}

/// A running server. Requests are recorded as request-target paths.
pub struct SiteServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl SiteServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Routes) -> SiteServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    SiteServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &Routes, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(path.clone());

    let (status, body) = routes
        .routes
        .get(&path)
        .map(|(s, b)| (*s, b.as_slice()))
        .unwrap_or((404, &[][..]));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
