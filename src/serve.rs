//! Local preview server for a content directory.
//!
//! Serves the files under `[serve.root]` with `tiny_http` so the resolver can
//! be pointed at a working copy before anything is deployed:
//!
//! - Static files with a guessed content type
//! - Directories as an HTML page of anchors, the format the `listing`
//!   strategy reads
//! - Graceful shutdown on Ctrl+C
//!
//! ```text
//! lode serve ──► http://127.0.0.1:5277/content/projects/
//!                        │
//!                        ▼
//!               <a href="/content/projects/project-1.json">
//!               <a href="/content/projects/project-2.md">
//! ```

use crate::{config::LodeConfig, log};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Directory listing HTML template (embedded at compile time)
const DIRECTORY_TEMPLATE: &str = include_str!("embed/serve/directory.html");

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve `[serve.root]` until Ctrl+C is received.
pub fn serve_content(config: &LodeConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve.interface] `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{} -> {}", addr, config.serve.root.display());
    log!(
        "serve";
        "content at http://{}/{}/",
        addr,
        config.source.content.trim_matches('/')
    );

    serve_requests(&server, &config.serve.root);
    Ok(())
}

/// Handle requests until the server is unblocked.
pub fn serve_requests(server: &Server, root: &Path) {
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, root) {
            log!("serve"; "request error: {e}");
        }
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// 1. Exact file match → serve file
/// 2. Directory → generate listing
/// 3. Nothing found, or a path escaping the root → 404
fn handle_request(request: Request, root: &Path) -> Result<()> {
    let url_path = decode_request_path(request.url());
    let request_path = url_path.trim_matches('/');

    if request_path.split('/').any(|segment| segment == "..") {
        return serve_not_found(request);
    }

    let local_path = root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir()
        && let Ok(listing) = generate_directory_listing(&local_path, request_path)
    {
        return serve_html(request, listing);
    }

    serve_not_found(request)
}

/// Drop query and fragment from a raw request target, then percent-decode it.
///
/// The split happens before decoding so that `%23` and `%3F` stay part of
/// the file name.
fn decode_request_path(url: &str) -> String {
    let raw = url.split(['?', '#']).next().unwrap_or(url);
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default()
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type_header(value: &str) -> Header {
    Header::from_bytes("Content-Type", value).unwrap()
}

fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(content_type_header(guess_content_type(path)));
    request.respond(response)?;
    Ok(())
}

fn serve_html(request: Request, content: String) -> Result<()> {
    let response =
        Response::from_string(content).with_header(content_type_header("text/html; charset=utf-8"));
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type_header("text/plain; charset=utf-8")],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => "application/json; charset=utf-8",
        Some("md" | "markdown") => "text/markdown; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Directory Listing
// ============================================================================

/// Generate an HTML directory listing with one anchor per visible entry.
///
/// Hidden entries (starting with '.') are omitted. Entries are sorted by
/// name, directories first.
fn generate_directory_listing(dir_path: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries: Vec<(bool, String)> = fs::read_dir(dir_path)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            (!name.starts_with('.')).then_some((is_dir, name))
        })
        .collect();
    entries.sort_by(|(a_dir, a), (b_dir, b)| b_dir.cmp(a_dir).then_with(|| a.cmp(b)));

    let entries: Vec<String> = entries
        .into_iter()
        .map(|(is_dir, name)| {
            let icon = if is_dir { "📁" } else { "📄" };
            let encoded = urlencoding::encode(&name);
            let href = if request_path.is_empty() {
                format!("/{encoded}")
            } else {
                format!("/{request_path}/{encoded}")
            };
            let suffix = if is_dir { "/" } else { "" };
            format!(
                r#"<li><span class="icon">{icon}</span><a href="{href}{suffix}">{}{suffix}</a></li>"#,
                escape_html(&name)
            )
        })
        .collect();

    let parent_link = if request_path.is_empty() {
        String::new()
    } else {
        let parent_path = Path::new(request_path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent_href = if parent_path.is_empty() {
            "/".to_string()
        } else {
            format!("/{parent_path}/")
        };
        format!(r#"<li class="parent"><span class="icon">📂</span><a href="{parent_href}">..</a></li>"#)
    };

    #[allow(clippy::literal_string_with_formatting_args)]
    // These are template placeholders, not format args
    Ok(DIRECTORY_TEMPLATE
        .replace("{path}", &escape_html(request_path))
        .replace("{parent_link}", &parent_link)
        .replace("{entries}", &entries.join("\n            "))
        .replace("{version}", env!("CARGO_PKG_VERSION")))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Tests
// ============================================================================
