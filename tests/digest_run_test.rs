use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use job_digest::domain::model::{Digest, PostingId};
use job_digest::domain::ports::{Mailer, WatermarkStore};
use job_digest::{
    AppConfig, DigestEngine, DigestError, DigestPipeline, FileWatermarkStore, Notifier,
    RunOutcome, WantedClient,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<(String, Digest)>>>,
    fail: bool,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, digest: &Digest) -> job_digest::Result<()> {
        if self.fail {
            return Err(DigestError::MailComposeError {
                message: "530 authentication required".to_string(),
            });
        }
        self.sent
            .lock()
            .await
            .push((recipient.to_string(), digest.clone()));
        Ok(())
    }
}

fn job(id: &str, annual_from: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id.parse::<u64>().unwrap(),
        "company": {"name": format!("Company {}", id)},
        "position": format!("Position {}", id),
        "address": {"full_location": "서울 중구"},
        "reward": {"formatted_total": "1,000,000원"},
        "annual_from": annual_from
    })
}

fn jobs(ids: &[&str]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = ids.iter().map(|id| job(id, 0)).collect();
    serde_json::json!({ "data": data })
}

fn config(server: &MockServer, watermark_path: std::path::PathBuf) -> AppConfig {
    let mut config = AppConfig::default();
    config.source.endpoint = server.url("/api/v4/jobs");
    config.source.page_delay_ms = 0;
    config.state.watermark_path = watermark_path;
    config
}

fn engine(
    config: &AppConfig,
    mailer: RecordingMailer,
) -> Result<DigestEngine<WantedClient, RecordingMailer, FileWatermarkStore>> {
    let pipeline = DigestPipeline::new(WantedClient::new(config)?, config)?;
    Ok(DigestEngine::new(
        pipeline,
        Notifier::new(mailer, "me@example.com"),
        FileWatermarkStore::new(config.state.watermark_path.clone()),
    ))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn read_watermark(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("last_id.txt")).unwrap()
}

/// Scenario A: watermark in the middle of the listing.
#[tokio::test]
async fn test_sends_postings_newer_than_watermark() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "100")?;

    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v4/jobs")
                .query_param("job_category_ids", "518")
                .query_param("offset", "0");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(jobs(&["103", "102", "101", "100", "099"]));
        })
        .await;

    let config = config(&server, dir.path().join("last_id.txt"));
    let mailer = RecordingMailer::default();
    let outcome = engine(&config, mailer.clone())?.run(today()).await?;

    api_mock.assert_async().await;
    assert_eq!(
        outcome,
        RunOutcome::Sent {
            count: 3,
            unseen: 3,
            checkpoint: PostingId::new("103"),
        }
    );

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let (recipient, digest) = &sent[0];
    assert_eq!(recipient, "me@example.com");
    assert_eq!(digest.posting_count, 3);
    assert!(digest.subject.contains("10월 19일"));
    for id in ["103", "102", "101"] {
        assert!(digest.html.contains(&format!("https://www.wanted.co.kr/wd/{}", id)));
    }
    assert!(!digest.html.contains("Company 100"));
    assert_eq!(read_watermark(&dir), "103");
    Ok(())
}

/// Scenario B: nothing new since the last run.
#[tokio::test]
async fn test_up_to_date_skips_mail() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "103\n")?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(200).json_body(jobs(&["103", "102", "101"]));
        })
        .await;

    let config = config(&server, dir.path().join("last_id.txt"));
    let mailer = RecordingMailer::default();
    let outcome = engine(&config, mailer.clone())?.run(today()).await?;

    assert_eq!(outcome, RunOutcome::UpToDate);
    assert!(mailer.sent.lock().await.is_empty());
    assert_eq!(read_watermark(&dir), "103\n");
    Ok(())
}

/// Scenario C: the watermark has scrolled out of the visible window.
#[tokio::test]
async fn test_lost_watermark_sends_newest_slice() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "050")?;

    let ids: Vec<String> = (0..10).map(|i| (200 - i).to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(200).json_body(jobs(&id_refs));
        })
        .await;

    let config = config(&server, dir.path().join("last_id.txt"));
    let mailer = RecordingMailer::default();
    let outcome = engine(&config, mailer.clone())?.run(today()).await?;

    assert_eq!(
        outcome,
        RunOutcome::Sent {
            count: 5,
            unseen: 10,
            checkpoint: PostingId::new("200"),
        }
    );
    let sent = mailer.sent.lock().await;
    let html = &sent[0].1.html;
    for id in &id_refs[..5] {
        assert!(html.contains(&format!("Company {}", id)));
    }
    for id in &id_refs[5..] {
        assert!(!html.contains(&format!("Company {}", id)));
    }
    assert_eq!(read_watermark(&dir), "200");
    Ok(())
}

/// Scenario D: delivery fails, so the watermark stays put.
#[tokio::test]
async fn test_failed_delivery_keeps_watermark() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "100")?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(200).json_body(jobs(&["103", "102", "101", "100"]));
        })
        .await;

    let config = config(&server, dir.path().join("last_id.txt"));
    let mailer = RecordingMailer {
        fail: true,
        ..Default::default()
    };
    let result = engine(&config, mailer)?.run(today()).await;

    assert!(matches!(result, Err(DigestError::MailComposeError { .. })));
    assert_eq!(read_watermark(&dir), "100");
    Ok(())
}

#[tokio::test]
async fn test_filters_by_exact_experience_across_pages() -> Result<()> {
    let dir = TempDir::new()?;

    // First page is full (100 postings), second page is short.
    let first_page: Vec<serde_json::Value> = (0..100)
        .map(|i| job(&(1000 - i).to_string(), if i % 2 == 0 { 0 } else { 1 }))
        .collect();
    let first_body = serde_json::json!({ "data": first_page });
    let second_body = serde_json::json!({ "data": [job("800", 0), job("799", 3)] });

    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs").query_param("offset", "0");
            then.status(200).json_body(first_body.clone());
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs").query_param("offset", "100");
            then.status(200).json_body(second_body.clone());
        })
        .await;

    let mut config = config(&server, dir.path().join("last_id.txt"));
    config.filter.experience_years = 1;
    config.delivery.max_batch = 3;
    let mailer = RecordingMailer::default();
    let outcome = engine(&config, mailer.clone())?.run(today()).await?;

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(
        outcome,
        RunOutcome::Sent {
            count: 3,
            unseen: 50,
            checkpoint: PostingId::new("999"),
        }
    );
    let html = &mailer.sent.lock().await[0].1.html;
    assert!(html.contains("Company 999"));
    assert!(html.contains("Company 997"));
    assert!(html.contains("Company 995"));
    assert!(!html.contains("Company 1000"));
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_reports_incomplete_listing() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "42")?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(502);
        })
        .await;

    let config = config(&server, dir.path().join("last_id.txt"));
    let mailer = RecordingMailer::default();
    let outcome = engine(&config, mailer.clone())?.run(today()).await?;

    assert_eq!(
        outcome,
        RunOutcome::NoEligible {
            interrupted: Some(502)
        }
    );
    assert!(mailer.sent.lock().await.is_empty());
    assert_eq!(read_watermark(&dir), "42");
    Ok(())
}

#[tokio::test]
async fn test_first_run_creates_watermark() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("state").join("last_id.txt");

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(200).json_body(jobs(&["12", "11"]));
        })
        .await;

    let config = config(&server, path.clone());
    let outcome = engine(&config, RecordingMailer::default())?
        .run(today())
        .await?;

    assert!(matches!(outcome, RunOutcome::Sent { count: 2, .. }));
    let store = FileWatermarkStore::new(path);
    assert_eq!(store.load().await?, Some(PostingId::new("12")));
    Ok(())
}

#[tokio::test]
async fn test_zero_batch_never_sends_or_moves_watermark() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("last_id.txt"), "1")?;

    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v4/jobs");
            then.status(200).json_body(jobs(&["2"]));
        })
        .await;

    let mut config = config(&server, dir.path().join("last_id.txt"));
    config.delivery.max_batch = 0;
    let mailer = RecordingMailer::default();

    let err = match engine(&config, mailer.clone()) {
        Ok(_) => panic!("a zero batch size must be rejected"),
        Err(e) => e,
    };
    assert!(matches!(
        err.downcast_ref::<DigestError>(),
        Some(DigestError::InvalidConfigValueError { .. })
    ));
    api_mock.assert_hits_async(0).await;
    assert!(mailer.sent.lock().await.is_empty());
    assert_eq!(read_watermark(&dir), "1");
    Ok(())
}
