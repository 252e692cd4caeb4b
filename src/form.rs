//! Search form state.
//!
//! Holds what the user has selected and turns it into a [`QueryRequest`].
//! Mirrors the dashboard's coupling between the multilingual toggle and the
//! "Unspecified" input language: that language is only selectable in
//! multilingual mode, and switching back to monolingual restores the last
//! concrete language chosen.

use mulling_search::{Language, Model, QueryMode, QueryRequest};

use crate::config::SearchDefaults;
use crate::error::{DashboardError, Result};

/// Mutable form state owned by the search view.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    model: Model,
    lang: Language,
    last_selected: Language,
    k: u32,
    multilingual: bool,
    normalize: bool,
    output_languages: Vec<Language>,
    clustering: bool,
}

impl SearchForm {
    /// Initial form state from configuration.
    pub fn from_defaults(defaults: &SearchDefaults) -> Self {
        let last_selected = match defaults.lang {
            Language::Unspecified => Language::English,
            concrete => concrete,
        };
        let mut form = Self {
            model: defaults.model,
            lang: last_selected,
            last_selected,
            k: defaults.k,
            multilingual: defaults.multilingual,
            normalize: defaults.normalize,
            output_languages: defaults.output_languages.clone(),
            clustering: defaults.clustering,
        };
        form.select_language(defaults.lang);
        form
    }

    /// Choose the retrieval model.
    pub fn select_model(&mut self, model: Model) {
        self.model = model;
    }

    /// Choose the input language. `Unspecified` is ignored in monolingual mode.
    pub fn select_language(&mut self, lang: Language) {
        if lang == Language::Unspecified {
            if self.multilingual {
                self.lang = lang;
            }
            return;
        }
        self.lang = lang;
        self.last_selected = lang;
    }

    /// Like [`SearchForm::select_language`], but rejects `Unspecified` outside
    /// multilingual mode instead of ignoring it.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] for `Unspecified` in monolingual mode.
    pub fn choose_language(&mut self, lang: Language) -> Result<()> {
        if lang == Language::Unspecified && !self.multilingual {
            return Err(DashboardError::Config(
                "input language \"null\" is only available for multilingual search".into(),
            ));
        }
        self.select_language(lang);
        Ok(())
    }

    /// Like [`SearchForm::set_output_languages`], but rejects the list outside
    /// multilingual mode or when it names `Unspecified`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] when the list would be ignored or
    /// altered.
    pub fn choose_output_languages(&mut self, languages: Vec<Language>) -> Result<()> {
        if !self.multilingual {
            return Err(DashboardError::Config(
                "output languages only apply to multilingual search".into(),
            ));
        }
        if languages.contains(&Language::Unspecified) {
            return Err(DashboardError::Config(
                "\"null\" is not an output language".into(),
            ));
        }
        self.set_output_languages(languages);
        Ok(())
    }

    /// Whether retrieval spans every corpus.
    pub fn multilingual(&self) -> bool {
        self.multilingual
    }

    /// Set the number of results.
    pub fn set_k(&mut self, k: u32) {
        self.k = k;
    }

    /// Switch between monolingual and multilingual retrieval.
    pub fn set_multilingual(&mut self, multilingual: bool) {
        self.multilingual = multilingual;
        if !multilingual && self.lang == Language::Unspecified {
            self.lang = self.last_selected;
        }
    }

    /// Toggle cross-language normalisation.
    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }

    /// Replace the allowed output languages.
    pub fn set_output_languages(&mut self, languages: Vec<Language>) {
        self.output_languages = languages
            .into_iter()
            .filter(|l| *l != Language::Unspecified)
            .collect();
    }

    /// Show results grouped by cluster.
    pub fn set_clustering(&mut self, clustering: bool) {
        self.clustering = clustering;
    }

    /// Currently selected input language.
    pub fn language(&self) -> Language {
        self.lang
    }

    /// Whether the clustered view is primary.
    pub fn clustering(&self) -> bool {
        self.clustering
    }

    /// Build the request for `query` from the current state.
    pub fn to_request(&self, query: &str) -> QueryRequest {
        let mode = if self.multilingual {
            QueryMode::Multilingual {
                normalize: self.normalize,
                output_languages: self.output_languages.clone(),
            }
        } else {
            QueryMode::Monolingual
        };
        QueryRequest::new(query)
            .with_model(self.model)
            .with_language(self.lang)
            .with_k(self.k)
            .with_mode(mode)
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::from_defaults(&SearchDefaults::default())
    }
}
