//! Mock service backend for tests and the offline `--mock` editor mode.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::progress::ProgressTicker;
use crate::service::{ProgressSender, SlideService, validate_pdf};
use crate::slide::Slide;
use crate::theme::SelectedTheme;
use crate::{ARTIFACT_FILENAME, DetailLevel, ServiceError};

/// A simulated failure. [`ServiceError`] itself is not `Clone`, so mocks
/// configure one of these per response instead.
#[derive(Clone, Debug)]
pub enum MockFailure {
    /// Simulate a non-success HTTP status with a diagnostic body.
    Http { status: u16, detail: String },
    /// Simulate a network-level failure.
    Transport(String),
}

impl MockFailure {
    fn into_error(self) -> ServiceError {
        match self {
            MockFailure::Http { status, detail } => ServiceError::Http { status, detail },
            MockFailure::Transport(msg) => ServiceError::Transport(msg),
        }
    }
}

type MockExtract = Result<Vec<Slide>, MockFailure>;
type MockGenerate = Result<Vec<u8>, MockFailure>;

/// A hand-rolled [`SlideService`] for tests.
///
/// Supports:
/// - Fixed extract/generate responses (used for every call), **or**
/// - Sequences of responses (one per call, repeating the last if exhausted).
/// - Optional per-call latency, so synthetic progress has time to tick.
/// - Call counting via [`extract_calls()`](MockSlideService::extract_calls)
///   and [`generate_calls()`](MockSlideService::generate_calls).
///
/// The mock honors the real contracts: non-PDF input is rejected before
/// progress starts, and the generated artifact is written under `dest_dir`.
pub struct MockSlideService {
    extract_seq: Mutex<Vec<MockExtract>>,
    extract_fallback: MockExtract,
    generate_seq: Mutex<Vec<MockGenerate>>,
    generate_fallback: MockGenerate,
    delay: Option<Duration>,
    extract_calls: AtomicUsize,
    generate_calls: AtomicUsize,
}

impl MockSlideService {
    /// A mock that extracts [`sample_deck`] and generates a tiny artifact.
    /// This is what `--mock` mode runs against.
    pub fn sample() -> Self {
        Self::new(Ok(sample_deck()), Ok(b"PK\x03\x04 mock presentation".to_vec()))
    }

    /// A mock with one fixed response per operation.
    pub fn new(extract: MockExtract, generate: MockGenerate) -> Self {
        Self {
            extract_seq: Mutex::new(Vec::new()),
            extract_fallback: extract,
            generate_seq: Mutex::new(Vec::new()),
            generate_fallback: generate,
            delay: None,
            extract_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
        }
    }

    /// Queue extract responses returned in order, repeating the last.
    pub fn with_extract_sequence(mut self, mut responses: Vec<MockExtract>) -> Self {
        assert!(!responses.is_empty(), "sequence must have at least one response");
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        self.extract_fallback = responses.first().cloned().unwrap();
        self.extract_seq = Mutex::new(responses);
        self
    }

    /// Set simulated service latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    fn next_extract(&self) -> MockExtract {
        let mut seq = self.extract_seq.lock().unwrap();
        seq.pop().unwrap_or_else(|| self.extract_fallback.clone())
    }

    fn next_generate(&self) -> MockGenerate {
        let mut seq = self.generate_seq.lock().unwrap();
        seq.pop().unwrap_or_else(|| self.generate_fallback.clone())
    }
}

impl SlideService for MockSlideService {
    fn extract<'a>(
        &'a self,
        pdf_path: &'a Path,
        _detail: DetailLevel,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Slide>, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            validate_pdf(pdf_path)?;
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            let response = self.next_extract();

            let ticker = ProgressTicker::start(progress, 10, Duration::from_millis(200));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match response {
                Ok(slides) => {
                    ticker.finish().await;
                    Ok(slides)
                }
                Err(failure) => {
                    ticker.fail().await;
                    Err(failure.into_error())
                }
            }
        })
    }

    fn generate<'a>(
        &'a self,
        _slides: &'a [Slide],
        _theme: &'a SelectedTheme,
        dest_dir: &'a Path,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            let response = self.next_generate();

            let ticker = ProgressTicker::start(progress, 15, Duration::from_millis(300));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match response {
                Ok(artifact) => {
                    let dest = dest_dir.join(ARTIFACT_FILENAME);
                    match tokio::fs::write(&dest, &artifact).await {
                        Ok(()) => {
                            ticker.finish().await;
                            Ok(dest)
                        }
                        Err(err) => {
                            ticker.fail().await;
                            Err(ServiceError::Save(err))
                        }
                    }
                }
                Err(failure) => {
                    ticker.fail().await;
                    Err(failure.into_error())
                }
            }
        })
    }
}

/// The canned deck served by [`MockSlideService::sample`].
pub fn sample_deck() -> Vec<Slide> {
    vec![
        Slide::with_bullets(
            "Occam's Razor: Introduction",
            vec![
                "Problem-solving principle attributed to William of Ockham.".to_string(),
                "Choose the hypothesis with fewest assumptions.".to_string(),
                "The simplest explanation is usually the best.".to_string(),
            ],
        ),
        Slide::with_text(
            "The Principle Explained: Shaving Away Assumptions",
            "Occam's Razor is a heuristic, not an irrefutable law. It suggests 'shaving away' \
             unnecessary assumptions in theories. Simpler theories are preferable because they \
             are more testable and easier to falsify, leading to more efficient problem-solving.",
        ),
        Slide::with_bullets(
            "Application: The Case of the Missing Cookies",
            vec![
                "Hypothesis A: Roommate ate the cookies (simple).".to_string(),
                "Hypothesis B: International spies stole cookies (complex).".to_string(),
                "Occam's Razor favors Hypothesis A.".to_string(),
                "Fewer assumptions make it the more plausible start".to_string(),
            ],
        ),
        Slide::with_bullets(
            "Occam's Razor: A Valuable Tool",
            vec![
                "Encourages clarity and simplicity in thinking.".to_string(),
                "Favors evidence-based explanations.".to_string(),
                "Rational starting point for investigation.".to_string(),
            ],
        ),
        Slide::with_text(
            "Conclusion: Simplicity as a Starting Point",
            "While the simplest answer isn't always right, Occam's Razor encourages us to start \
             with the most rational and evidence-supported explanation. This approach helps to \
             streamline problem-solving and avoid unnecessary complexity in our reasoning \
             processes.",
        ),
    ]
}
