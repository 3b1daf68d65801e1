use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const DEFAULT_FILE: &str = "index.html";
const MAX_REQUEST_HEAD: usize = 16 * 1024;

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 正規化請求路徑，`..` 不會離開根目錄；`/` 對應到 index.html
pub fn to_safe_path(request_path: &str) -> PathBuf {
    let mut parts: Vec<&str> = Vec::new();
    for segment in request_path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(DEFAULT_FILE);
    }
    parts.iter().collect()
}

pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Response::new(status, "text/plain; charset=utf-8", body)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }

    pub fn to_bytes(&self, head_only: bool) -> Vec<u8> {
        let mut out = format!("HTTP/1.1 {} {}\r\n", self.status, self.reason());
        for (k, v) in &self.headers {
            out.push_str(&format!("{}: {}\r\n", k, v));
        }
        out.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", self.body.len()));
        let mut bytes = out.into_bytes();
        if !head_only {
            bytes.extend_from_slice(&self.body);
        }
        bytes
    }
}

/// 依方法與請求目標決定回應
pub async fn resolve(root: &Path, method: &str, target: &str) -> Response {
    if method != "GET" && method != "HEAD" {
        let mut res = Response::new(405, "text/plain; charset=utf-8", Vec::<u8>::new());
        res.headers.push(("Allow".to_string(), "GET, HEAD".to_string()));
        return res;
    }

    let path = target.split(['?', '#']).next().unwrap_or("/");
    let mut file_path = root.join(to_safe_path(&percent_decode(path)));

    match tokio::fs::metadata(&file_path).await {
        Ok(meta) if meta.is_dir() => file_path.push(DEFAULT_FILE),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            error!("讀取檔案資訊失敗：{}：{}", file_path.display(), e);
            return Response::text(500, "Internal server error");
        }
    }

    match tokio::fs::read(&file_path).await {
        Ok(data) => Response::new(200, content_type_for(&file_path), data),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Response::text(404, "Not found"),
        Err(e) => {
            error!("無法提供檔案：{}：{}", file_path.display(), e);
            Response::text(500, "Internal server error")
        }
    }
}

async fn read_request_head(stream: &mut TcpStream) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() > MAX_REQUEST_HEAD {
            break;
        }
    }
    if buf.is_empty() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).to_string()))
}

pub async fn handle_connection(mut stream: TcpStream, root: &Path) -> io::Result<()> {
    let Some(head) = read_request_head(&mut stream).await? else {
        return Ok(());
    };
    let mut parts = head.lines().next().unwrap_or("").split_whitespace();
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(m), Some(t)) if t.starts_with('/') => (m.to_string(), t.to_string()),
        _ => {
            let res = Response::text(400, "Bad request");
            stream.write_all(&res.to_bytes(false)).await?;
            return stream.shutdown().await;
        }
    };

    let res = resolve(root, &method, &target).await;
    info!("{} {} -> {}", method, target, res.status);
    stream.write_all(&res.to_bytes(method == "HEAD")).await?;
    stream.shutdown().await
}

pub async fn serve(listener: TcpListener, root: PathBuf) -> io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let root = root.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, &root).await {
                warn!("處理 {} 的連線失敗：{}", peer, e);
            }
        });
    }
}
