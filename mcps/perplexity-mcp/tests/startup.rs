//! Startup tests for the perplexity-mcp binary
//!
//! Each test runs the built binary with a cleared environment and a
//! temporary working directory and `HOME`, so neither the developer's shell
//! nor their `~/.binks/perplexity.toml` or `.env` leak in.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tempfile::TempDir;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

fn perplexity_mcp(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_perplexity-mcp"));
    cmd.env_clear()
        .env("HOME", dir)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    cmd
}

/// Kills the server when the test ends, pass or fail
struct ServerProcess(Child);

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn initialize_request() -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "startup-test", "version": "0.0.0" }
        }
    })
}

/// Wait until something accepts connections on `port`
fn wait_for_listener(server: &mut ServerProcess, port: u16) {
    let deadline = Instant::now() + STARTUP_TIMEOUT;
    while Instant::now() < deadline {
        if let Some(status) = server.0.try_wait().unwrap() {
            panic!("server exited early with {}", status);
        }
        if std::net::TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("server did not listen on port {} in time", port);
}

// ============================================================================
// Missing API key
// ============================================================================

#[test]
fn exits_1_when_api_key_unset() {
    let dir = TempDir::new().unwrap();

    let output = perplexity_mcp(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1), "output: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("PERPLEXITY_API_KEY environment variable is required"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn exits_1_when_api_key_empty() {
    let dir = TempDir::new().unwrap();

    let output = perplexity_mcp(dir.path())
        .env("PERPLEXITY_API_KEY", "")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "output: {:?}", output);
}

#[test]
fn exits_1_when_port_invalid() {
    let dir = TempDir::new().unwrap();

    let output = perplexity_mcp(dir.path())
        .env("PERPLEXITY_API_KEY", "pplx-test")
        .env("PORT", "not-a-port")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "output: {:?}", output);
}

// ============================================================================
// Transport selection
// ============================================================================

#[tokio::test]
async fn sse_transport_answers_initialize() {
    let dir = TempDir::new().unwrap();
    let port = free_port();

    let mut server = ServerProcess(
        perplexity_mcp(dir.path())
            .env("PERPLEXITY_API_KEY", "pplx-test")
            .env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .spawn()
            .unwrap(),
    );
    wait_for_listener(&mut server, port);

    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/mcp", port))
        .header("accept", "application/json, text/event-stream")
        .json(&initialize_request())
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success(), "status: {}", response.status());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"), "content-type: {}", content_type);

    let body = response.text().await.unwrap();
    assert!(body.contains("perplexity-mcp"), "body: {}", body);
}

#[test]
fn stdio_transport_answers_initialize() {
    let dir = TempDir::new().unwrap();

    let mut server = ServerProcess(
        perplexity_mcp(dir.path())
            .env("PERPLEXITY_API_KEY", "pplx-test")
            .env("TRANSPORT", "stdio")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .unwrap(),
    );

    let mut stdin = server.0.stdin.take().unwrap();
    writeln!(stdin, "{}", initialize_request()).unwrap();
    stdin.flush().unwrap();

    // Read on a thread so a silent server fails the test instead of hanging it
    let stdout = server.0.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = BufReader::new(stdout).read_line(&mut line);
        let _ = tx.send(line);
    });
    let line = rx.recv_timeout(STARTUP_TIMEOUT).unwrap();

    let response: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "perplexity-mcp");
}

// ============================================================================
// .env file
// ============================================================================

#[test]
fn dotenv_file_supplies_api_key() {
    let dir = TempDir::new().unwrap();
    let port = free_port();
    std::fs::write(
        dir.path().join(".env"),
        format!(
            "PERPLEXITY_API_KEY=pplx-from-dotenv\nHOST=127.0.0.1\nPORT={}\n",
            port
        ),
    )
    .unwrap();

    let mut server = ServerProcess(perplexity_mcp(dir.path()).spawn().unwrap());

    wait_for_listener(&mut server, port);
}

#[test]
fn environment_wins_over_dotenv() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "PERPLEXITY_API_KEY=pplx-from-dotenv\n").unwrap();

    let output = perplexity_mcp(dir.path())
        .env("PERPLEXITY_API_KEY", "")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "output: {:?}", output);
}
