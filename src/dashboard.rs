//! The search view: form state, client and results panel wired together.

use std::sync::{Mutex, PoisonError};

use mulling_search::panel::{run_search, Applied, PanelState, ResultsPanel};
use mulling_search::MullingApi;

use crate::form::SearchForm;
use crate::render::{self, RenderOptions};

/// One search view. The panel is shared so overlapping searches resolve
/// with the latest submission winning.
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    form: SearchForm,
    panel: Mutex<ResultsPanel>,
}

impl<A: MullingApi> Dashboard<A> {
    /// Create a view over `api` with the given form state.
    pub fn new(api: A, form: SearchForm) -> Self {
        let panel = Mutex::new(ResultsPanel::new(form.clustering()));
        Self { api, form, panel }
    }

    /// The form backing this view.
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    /// Submit `query` with the current form state.
    pub async fn search(&self, query: &str) -> Applied {
        let request = self.form.to_request(query);
        let applied = run_search(&self.panel, &self.api, &request).await;
        if let Applied::Stale = applied {
            tracing::debug!("search superseded by a newer submission");
        }
        applied
    }

    /// Snapshot of what the results area shows.
    pub fn state(&self) -> PanelState {
        self.lock().state().clone()
    }

    /// Number of malformed rows skipped in the displayed results.
    pub fn skipped_rows(&self) -> usize {
        self.lock().skipped_rows().len()
    }

    /// Empty the results area.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Render the results area as text.
    pub fn render(&self, options: RenderOptions) -> String {
        render::render_panel(self.lock().state(), options)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ResultsPanel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
