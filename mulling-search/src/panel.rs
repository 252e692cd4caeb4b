//! Results panel state with stale-response protection.
//!
//! The panel owns the results area: at any moment it shows exactly one of
//! nothing, a loading indicator, shaped results, or an error. Every
//! submission takes a [`RequestTicket`] from a monotonically increasing
//! [`RequestSequencer`]; a completion whose ticket is no longer the latest
//! is dropped, so a slow early response can never overwrite a newer one.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐  submit   ┌─────────┐  complete(latest, Ok)   ┌─────────┐
//! │ Idle ├──────────►│ Loading ├────────────────────────►│ Results │
//! └──▲───┘           └────┬────┘                         └─────────┘
//!    │                    │       complete(latest, Err)  ┌─────────┐
//!    │  clear             └─────────────────────────────►│ Failed  │
//!    └───────────────────── (from any state)             └─────────┘
//! ```
//!
//! `submit` from any state moves to `Loading` with a fresh ticket.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::api::MullingApi;
use crate::error::SearchError;
use crate::query::QueryRequest;
use crate::shaper::{self, ShapedResults};
use crate::types::RawResultRow;

/// Identifies one submission. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The raw sequence number.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues request tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer that has issued nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket; it becomes the only current one.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket without issuing a usable one.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

/// User-visible error panel contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelError {
    /// HTTP status, if the service answered at all.
    pub status: Option<u16>,
    /// Heading line.
    pub title: String,
    /// Explanation line.
    pub message: String,
}

impl PanelError {
    /// Map a request failure to what the user sees.
    pub fn from_search_error(err: &SearchError) -> Self {
        match err {
            SearchError::Transport { status: 500 } => Self {
                status: Some(500),
                title: "Server Error".to_owned(),
                message: "Query could not be parsed. Please try again. \
                          Avoid using stopwords and out-of-dictionary words."
                    .to_owned(),
            },
            SearchError::Transport { status } => Self {
                status: Some(*status),
                title: format!("Error {status}"),
                message: "Something went wrong. Please try again.".to_owned(),
            },
            other => Self {
                status: None,
                title: "Error".to_owned(),
                message: other.to_string(),
            },
        }
    }
}

/// What currently occupies the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    /// Nothing submitted yet, or cleared.
    Idle,
    /// Waiting for the response to this ticket.
    Loading(RequestTicket),
    /// Shaped results of the latest request.
    Results(ShapedResults),
    /// The latest request failed.
    Failed(PanelError),
}

/// Result of handing a completion to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The completion replaced the panel contents.
    Rendered,
    /// A newer request was issued in the meantime; the completion was dropped.
    Stale,
}

/// Owner of the results area.
#[derive(Debug)]
pub struct ResultsPanel {
    sequencer: RequestSequencer,
    state: PanelState,
    clustering_enabled: bool,
    skipped: Vec<SearchError>,
}

impl ResultsPanel {
    /// Create an idle panel.
    pub fn new(clustering_enabled: bool) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            state: PanelState::Idle,
            clustering_enabled,
            skipped: Vec::new(),
        }
    }

    /// Current contents.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Malformed rows skipped while shaping the displayed results.
    pub fn skipped_rows(&self) -> &[SearchError] {
        &self.skipped
    }

    /// Change which view future results make primary.
    pub fn set_clustering(&mut self, enabled: bool) {
        self.clustering_enabled = enabled;
        if let PanelState::Results(results) = &mut self.state {
            results.clustering_enabled = enabled;
        }
    }

    /// Start a request: issue a ticket and show the loading indicator.
    pub fn submit(&mut self) -> RequestTicket {
        let ticket = self.sequencer.begin();
        tracing::debug!(ticket = ticket.sequence(), "request submitted");
        self.state = PanelState::Loading(ticket);
        self.skipped.clear();
        ticket
    }

    /// Apply a response if `ticket` is still the latest request.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<RawResultRow>, SearchError>,
    ) -> Applied {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(ticket = ticket.sequence(), "dropping stale response");
            return Applied::Stale;
        }

        self.state = match outcome {
            Ok(rows) => {
                let shaped = shaper::shape_lenient(&rows, self.clustering_enabled);
                self.skipped = shaped.skipped;
                PanelState::Results(shaped.results)
            }
            Err(err) => {
                tracing::warn!(error = %err, "request failed");
                PanelState::Failed(PanelError::from_search_error(&err))
            }
        };
        Applied::Rendered
    }

    /// Empty the results area and orphan any outstanding request.
    pub fn clear(&mut self) {
        self.sequencer.invalidate();
        self.state = PanelState::Idle;
        self.skipped.clear();
    }
}

/// Submit `request` through `api` and render the outcome into `panel`.
///
/// The lock is held only around state transitions, never across the
/// network call, so overlapping searches on the same panel resolve with the
/// latest submission winning.
pub async fn run_search<A: MullingApi>(
    panel: &Mutex<ResultsPanel>,
    api: &A,
    request: &QueryRequest,
) -> Applied {
    let ticket = panel
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .submit();
    let outcome = api.query(request).await;
    panel
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .complete(ticket, outcome)
}
