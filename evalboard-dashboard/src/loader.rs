//! Loading benchmark records from disk or over HTTP

use crate::error::LoadFailure;
use crate::Record;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where the results document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<Record>, LoadFailure> {
    Ok(serde_json::from_str(json)?)
}

/// Fetch and parse the records. This is the only suspend point of the pipeline.
pub async fn load_records(source: &DataSource) -> Result<Vec<Record>, LoadFailure> {
    info!(%source, "Loading benchmark records");

    let body = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadFailure::Read {
                path: path.clone(),
                source,
            })?,
        DataSource::Url(url) => fetch(url).await?,
    };

    let records = parse_records(&body)?;
    warn_out_of_range(&records);
    info!(count = records.len(), "Loaded benchmark records");

    Ok(records)
}

async fn fetch(url: &str) -> Result<String, LoadFailure> {
    let failure = |source| LoadFailure::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(failure)?;
    let response = response.error_for_status().map_err(failure)?;
    response.text().await.map_err(failure)
}

/// Out-of-range scores and negative latencies are accepted but reported.
fn warn_out_of_range(records: &[Record]) {
    for (index, record) in records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.is_within_expected_range())
    {
        warn!(
            index,
            model = %record.model,
            relevance = record.relevance_score,
            accuracy = record.accuracy_score,
            latency = record.latency,
            "Record outside the expected 0-10 score range or with negative latency"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SAMPLE: &str = r#"[
        {"model": "A", "question": "q1", "prediction": "p1", "relevance_score": 9, "accuracy_score": 7, "latency": 1.0},
        {"model": "A", "question": "q2", "prediction": "p2", "relevance_score": 7, "accuracy_score": 9, "latency": 3.0},
        {"model": "B", "question": "q1", "prediction": "p3", "relevance_score": 6, "accuracy_score": 6, "latency": 0.5}
    ]"#;

    #[test]
    fn test_source_parsing() {
        assert_eq!(
            DataSource::parse("https://example.com/results.json"),
            DataSource::Url("https://example.com/results.json".to_string())
        );
        assert_eq!(
            DataSource::parse("http://localhost:8000/results.json"),
            DataSource::Url("http://localhost:8000/results.json".to_string())
        );
        assert_eq!(
            DataSource::parse("benchmark_data/results.json"),
            DataSource::File(PathBuf::from("benchmark_data/results.json"))
        );
    }

    #[test]
    fn test_parse_records() {
        let records = parse_records(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].model, "B");
        assert_eq!(records[2].latency, 0.5);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"model": "A"}"#),
            Err(LoadFailure::Parse(_))
        ));
        assert!(matches!(parse_records("not json"), Err(LoadFailure::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let json = r#"[{"model": "A", "question": "q", "prediction": "p"}]"#;
        assert!(matches!(parse_records(json), Err(LoadFailure::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let records = load_records(&source).await.unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::File(dir.path().join("results.json"));

        let err = load_records(&source).await.unwrap_err();
        assert!(matches!(err, LoadFailure::Read { .. }));
        assert!(err.to_string().contains("results.json"));
    }

    #[tokio::test]
    async fn test_out_of_range_records_still_load() {
        let json = r#"[{"model": "A", "question": "q", "prediction": "p", "relevance_score": 12, "accuracy_score": -3, "latency": -1.0}]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let records = load_records(&DataSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(records[0].relevance_score, 12.0);
    }

    /// Serves `/results.json` with one record and answers 404 for every other path.
    async fn serve_results() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let request = String::from_utf8_lossy(&request);
                let (status, body) = if request.starts_with("GET /results.json ") {
                    (
                        "200 OK",
                        r#"[{"model": "A", "question": "q", "prediction": "p", "relevance_score": 9, "accuracy_score": 8, "latency": 0.75}]"#,
                    )
                } else {
                    ("404 Not Found", "not found")
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let addr = serve_results().await;
        let source = DataSource::parse(&format!("http://{}/results.json", addr));

        let records = load_records(&source).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model, "A");
        assert_eq!(records[0].latency, 0.75);
    }

    #[tokio::test]
    async fn test_http_error_status_is_a_fetch_failure() {
        let addr = serve_results().await;
        let url = format!("http://{}/missing.json", addr);

        let err = load_records(&DataSource::parse(&url)).await.unwrap_err();
        match err {
            LoadFailure::Fetch { url: failed, source } => {
                assert_eq!(failed, url);
                assert_eq!(source.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("unexpected failure {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_fetch_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = DataSource::Url(format!("http://{}/results.json", addr));
        let err = load_records(&source).await.unwrap_err();
        assert!(matches!(err, LoadFailure::Fetch { .. }));
    }
}
