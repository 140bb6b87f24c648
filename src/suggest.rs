use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::geocode::Geocode;
use crate::models::Place;

/// How long the input must sit unchanged before a lookup fires.
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Debounced location autocomplete.
///
/// Raw text goes in on every keystroke; an ordered candidate list comes
/// out on the watch channel. A lookup fires only once the input has been
/// quiet for the full debounce window, and a lookup that is superseded
/// while in flight can never overwrite a newer result: every input
/// change bumps a sequence number, and a lookup re-checks it both after
/// the timer and after the provider call.
pub struct SuggestionPipeline {
    geocoder: Arc<dyn Geocode>,
    quiet: Duration,
    seq: Arc<AtomicU64>,
    input: String,
    picked: Option<Place>,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Vec<Place>>,
}

impl SuggestionPipeline {
    pub fn new(geocoder: Arc<dyn Geocode>) -> (Self, watch::Receiver<Vec<Place>>) {
        Self::with_quiet_period(geocoder, QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        geocoder: Arc<dyn Geocode>,
        quiet: Duration,
    ) -> (Self, watch::Receiver<Vec<Place>>) {
        let (tx, rx) = watch::channel(Vec::new());
        let pipeline = Self {
            geocoder,
            quiet,
            seq: Arc::new(AtomicU64::new(0)),
            input: String::new(),
            picked: None,
            pending: None,
            tx,
        };
        (pipeline, rx)
    }

    /// The latest raw text, recorded immediately for display echo.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The candidate chosen via [`pick`](Self::pick), so coordinates can
    /// be read off without a second lookup.
    pub fn picked(&self) -> Option<&Place> {
        self.picked.as_ref()
    }

    /// Record new input and schedule a lookup after the quiet period.
    /// Whitespace-only input clears the candidates synchronously with no
    /// provider call.
    pub fn on_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.picked = None;
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            self.tx.send_replace(Vec::new());
            return;
        }

        let geocoder = Arc::clone(&self.geocoder);
        let latest = Arc::clone(&self.seq);
        let tx = self.tx.clone();
        let quiet = self.quiet;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if latest.load(Ordering::SeqCst) != seq {
                return;
            }

            // provider failures are already soft: errors arrive here as
            // an empty list, which replaces any stale candidates
            let places = geocoder.search(&trimmed, 5).await;

            // a newer query may have settled while this one was in flight
            if latest.load(Ordering::SeqCst) != seq {
                return;
            }
            tx.send_replace(places);
        }));
    }

    /// Accept a candidate: its display name becomes the input text, the
    /// list clears, and any scheduled or in-flight lookup is dropped.
    pub fn pick(&mut self, candidate: Place) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.input = candidate.display_name.clone();
        self.tx.send_replace(Vec::new());
        self.picked = Some(candidate);
    }
}
