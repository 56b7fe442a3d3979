use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bulk-sync"))
}

fn write_upload_file(dir: &TempDir, name: &str, payload: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, payload)?;
    Ok(path.to_string_lossy().to_string())
}

/// Accepts exactly one HTTP request on the listener, replies with the
/// given body, and hands the raw request back for assertions.
fn serve_once(listener: TcpListener, status: &'static str, body: &'static str) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept connection");
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let read = socket.read(&mut chunk).expect("read request");
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                break position + 4;
            }
        };

        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
        let content_length: usize = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|value| value.trim().parse().expect("content length"))
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let read = socket.read(&mut chunk).expect("read body");
            buffer.extend_from_slice(&chunk[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).expect("write response");
        socket.flush().expect("flush response");

        String::from_utf8_lossy(&buffer).to_string()
    })
}

#[test]
fn test_sample_mode_emits_rows_in_the_upload_schema() -> Result<()> {
    let output = binary().args(["sample", "investment"]).output()?;

    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout)?;
    let rows = rows.as_array().ok_or_else(|| anyhow!("sample is not an array"))?;

    assert!(!rows.is_empty());
    for row in rows {
        assert!(row["client_code"].is_string());
        assert!(row["date"].is_string());
        assert!(row["amount"].is_string());
    }

    Ok(())
}

#[test]
fn test_validation_errors_block_submission_and_fail_the_run() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_upload_file(
        &dir,
        "upload.json",
        r#"[
            {"client_code": "CLIENT001", "date": "15-03-2024", "amount": "100.00"},
            {"client_code": "CLIENT002", "date": "16-03-2024"}
        ]"#,
    )?;

    // The endpoint is unreachable on purpose; fail-closed validation
    // must reject the batch before any connection is attempted.
    let output = binary()
        .args([&path, "investment"])
        .env("SYNC_API_URL", "http://127.0.0.1:1")
        .env("SYNC_API_TOKEN", "test-token")
        .output()?;

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Upload rejected: 1 validation error(s)"), "{stdout}");
    assert!(stdout.contains("Row 3 [amount]: Amount is required"), "{stdout}");

    Ok(())
}

#[test]
fn test_clean_batch_syncs_end_to_end() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    let server = serve_once(listener, "200 OK", r#"{"results":{"success":3,"errors":[]}}"#);

    let dir = TempDir::new()?;
    let path = write_upload_file(
        &dir,
        "payouts.json",
        r#"[
            {"client_code": "CLIENT001", "date": "15-03-2024", "amount": "100.00"},
            {"client_code": "CLIENT002", "date": 45000, "amount": 250.75, "remark": "monthly"},
            {"client_code": "CLIENT003", "date": "16-03-2024", "amount": "999999999.99"}
        ]"#,
    )?;

    let output = binary()
        .args([&path, "payout"])
        .env("SYNC_API_URL", format!("http://{address}"))
        .env("SYNC_API_TOKEN", "test-token")
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Synced 3 transaction(s)"), "{stdout}");

    let request = server.join().map_err(|_| anyhow!("server thread panicked"))?;
    assert!(request.starts_with("POST /transactions/sync"), "{request}");
    assert!(request.contains("authorization: Bearer test-token") || request.contains("Authorization: Bearer test-token"), "{request}");
    assert!(request.contains(r#""indicatorName":"Payout""#), "{request}");
    assert!(request.contains(r#""transactionDate":"2023-03-15T00:00:00.000Z""#), "{request}");

    Ok(())
}

#[test]
fn test_server_reported_row_errors_pass_through() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    let server = serve_once(
        listener,
        "200 OK",
        r#"{"results":{"success":1,"errors":[{"row":3,"message":"Client not found"}]}}"#,
    );

    let dir = TempDir::new()?;
    let path = write_upload_file(
        &dir,
        "upload.json",
        r#"[
            {"client_code": "CLIENT001", "date": "15-03-2024", "amount": "100.00"},
            {"client_code": "UNKNOWN99", "date": "16-03-2024", "amount": "50.00"}
        ]"#,
    )?;

    let output = binary()
        .args([&path, "withdrawal"])
        .env("SYNC_API_URL", format!("http://{address}"))
        .env("SYNC_API_TOKEN", "test-token")
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Synced 1 transaction(s)"), "{stdout}");
    assert!(stdout.contains("Row 3: Client not found"), "{stdout}");

    server.join().map_err(|_| anyhow!("server thread panicked"))?;

    Ok(())
}

#[test]
fn test_unreachable_endpoint_reports_whole_batch_failure() -> Result<()> {
    // Bind then drop to get a port with nothing listening on it.
    let address = TcpListener::bind("127.0.0.1:0")?.local_addr()?;

    let dir = TempDir::new()?;
    let path = write_upload_file(
        &dir,
        "upload.json",
        r#"[{"client_code": "CLIENT001", "date": "15-03-2024", "amount": "100.00"}]"#,
    )?;

    let output = binary()
        .args([&path, "closure"])
        .env("SYNC_API_URL", format!("http://{address}"))
        .env("SYNC_API_TOKEN", "test-token")
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Synced 0 transaction(s)"), "{stdout}");
    assert!(stdout.contains("Batch failed:"), "{stdout}");

    Ok(())
}
