//! Integration tests for the service gateway contracts: progress discipline,
//! error surfacing, and artifact hand-off, exercised through the mock
//! backend with paused time.

use std::path::PathBuf;
use std::time::Duration;

use deckdraft_core::service::mock::{MockFailure, MockSlideService, sample_deck};
use deckdraft_core::service::SlideService;
use deckdraft_core::{ARTIFACT_FILENAME, DetailLevel, ServiceError, SelectedTheme, ThemeKind};

fn temp_pdf(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.7\nfake body").unwrap();
    path
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<u8>) -> Vec<u8> {
    let mut values = Vec::new();
    while let Ok(v) = rx.try_recv() {
        values.push(v);
    }
    values
}

#[tokio::test(start_paused = true)]
async fn extract_success_populates_deck_and_settles_at_100() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = temp_pdf(&dir);
    let service = MockSlideService::sample().with_delay(Duration::from_secs(1));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let slides = service
        .extract(&pdf, DetailLevel::Normal, tx)
        .await
        .unwrap();

    assert_eq!(slides.len(), sample_deck().len());
    assert_eq!(service.extract_calls(), 1);

    let values = drain(&mut rx);
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    assert_eq!(*values.last().unwrap(), 100);

    // Nothing may arrive after settlement.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn extract_failure_surfaces_detail_and_resets_progress() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = temp_pdf(&dir);
    let service = MockSlideService::new(
        Err(MockFailure::Http {
            status: 500,
            detail: "server exploded".to_string(),
        }),
        Ok(Vec::new()),
    )
    .with_delay(Duration::from_millis(700));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let err = service
        .extract(&pdf, DetailLevel::Detailed, tx)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "server exploded");
    let values = drain(&mut rx);
    assert_eq!(*values.last().unwrap(), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn extract_rejects_non_pdf_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, b"not a pdf").unwrap();
    let service = MockSlideService::sample();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let err = service
        .extract(&path, DetailLevel::Normal, tx)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotPdf(_)));
    assert_eq!(service.extract_calls(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn generate_writes_artifact_under_fixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let service = MockSlideService::sample().with_delay(Duration::from_secs(1));
    let slides = sample_deck();
    let theme = SelectedTheme::new(ThemeKind::Color, "modern_teal");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let path = service
        .generate(&slides, &theme, dir.path(), tx)
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), ARTIFACT_FILENAME);
    // The call resolves only after the hand-off: the file must exist now.
    assert!(path.exists());

    let values = drain(&mut rx);
    assert_eq!(*values.last().unwrap(), 100);
}

#[tokio::test(start_paused = true)]
async fn generate_failure_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let service = MockSlideService::new(
        Ok(sample_deck()),
        Err(MockFailure::Http {
            status: 503,
            detail: "renderer offline".to_string(),
        }),
    );
    let slides = sample_deck();
    let theme = SelectedTheme::new(ThemeKind::Background, "blue_gradient");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let err = service
        .generate(&slides, &theme, dir.path(), tx)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "renderer offline");
    assert!(!dir.path().join(ARTIFACT_FILENAME).exists());
    let values = drain(&mut rx);
    assert_eq!(values.last().copied(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn extract_sequence_repeats_last_response() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = temp_pdf(&dir);
    let service = MockSlideService::sample().with_extract_sequence(vec![
        Err(MockFailure::Transport("connection refused".to_string())),
        Ok(sample_deck()),
    ]);

    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let first = service.extract(&pdf, DetailLevel::Normal, tx.clone()).await;
    assert!(matches!(first, Err(ServiceError::Transport(_))));

    let second = service.extract(&pdf, DetailLevel::Normal, tx.clone()).await;
    assert!(second.is_ok());

    // Sequence exhausted: the last response repeats.
    let third = service.extract(&pdf, DetailLevel::Normal, tx).await;
    assert!(third.is_ok());
    assert_eq!(service.extract_calls(), 3);
}
