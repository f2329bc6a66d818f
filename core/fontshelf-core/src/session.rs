//! Browsing session state (made by FontLab https://www.fontlab.com/)
//!
//! A [`Session`] is the single place a host keeps its browsing state: the
//! filter criteria plus a few presentational flags. The host feeds input
//! events in and redraws from [`Session::visible`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, FontRecord, WritingSystem};
use crate::criteria::{parse_reveal_limit, CategoryFilter, FilterCriteria};
use crate::error::CriteriaError;
use crate::projection::{project, Projection};
use crate::reveal::{grow_reveal, ScrollMetrics, INITIAL_REVEAL, PROXIMITY_THRESHOLD, REVEAL_STEP};

/// What happens to the reveal limit when the filter changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealReset {
    /// One shared limit across all filter states.
    #[default]
    Keep,
    /// Start over from the initial limit whenever the filter changes.
    OnFilterChange,
}

/// Tunables for a session; all fields fall back to the stock values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_reveal: usize,
    pub reveal_step: usize,
    pub proximity_threshold: f64,
    pub reveal_reset: RevealReset,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_reveal: INITIAL_REVEAL,
            reveal_step: REVEAL_STEP,
            proximity_threshold: PROXIMITY_THRESHOLD,
            reveal_reset: RevealReset::Keep,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Preview font size in pixels, kept within the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct PreviewSize(u16);

impl PreviewSize {
    pub const MIN: u16 = 16;
    pub const MAX: u16 = 96;

    pub fn new(px: u16) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn px(self) -> u16 {
        self.0
    }
}

impl From<u16> for PreviewSize {
    fn from(px: u16) -> Self {
        Self::new(px)
    }
}

impl From<PreviewSize> for u16 {
    fn from(size: PreviewSize) -> Self {
        size.0
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self(32)
    }
}

/// Everything a host needs to redraw, minus the catalog itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub criteria: FilterCriteria,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub preview_size: PreviewSize,
    pub filters_open: bool,
}

impl SessionState {
    fn initial(catalog_size: usize, config: &SessionConfig) -> Self {
        Self {
            criteria: FilterCriteria::new()
                .with_reveal_limit(config.initial_reveal.min(catalog_size)),
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            preview_size: PreviewSize::default(),
            filters_open: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    config: SessionConfig,
    state: SessionState,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self::assemble(catalog, SessionConfig::default())
    }

    /// Start a session with custom tunables. An `initial_reveal` of 0 is
    /// rejected; the reveal limit is always positive for non-empty catalogs.
    pub fn with_config(catalog: Catalog, config: SessionConfig) -> Result<Self, CriteriaError> {
        parse_reveal_limit(config.initial_reveal)?;
        Ok(Self::assemble(catalog, config))
    }

    fn assemble(catalog: Catalog, config: SessionConfig) -> Self {
        let state = SessionState::initial(catalog.len(), &config);
        Self {
            catalog,
            config,
            state,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.state.criteria
    }

    pub fn reveal_limit(&self) -> usize {
        self.state.criteria.reveal_limit()
    }

    /// The records the host should draw right now.
    pub fn visible(&self) -> Vec<&FontRecord> {
        project(&self.catalog, &self.state.criteria)
    }

    pub fn projection(&self) -> Projection<'_> {
        Projection::compute(&self.catalog, &self.state.criteria)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let mut next = self.state.criteria.clone();
        next.set_query(query.into());
        self.apply_filter(next);
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        let mut next = self.state.criteria.clone();
        next.set_category(category.into());
        self.apply_filter(next);
    }

    pub fn set_writing_system(&mut self, ws: WritingSystem) {
        let mut next = self.state.criteria.clone();
        next.set_writing_system(ws);
        self.apply_filter(next);
    }

    fn apply_filter(&mut self, mut next: FilterCriteria) {
        let changed = !next.same_filter(&self.state.criteria);
        if changed && self.config.reveal_reset == RevealReset::OnFilterChange {
            next.set_reveal_limit(self.initial_limit());
        }
        if changed {
            debug!(
                "filter changed: query={:?} category={} language={} reveal={}",
                next.query(),
                next.category(),
                next.writing_system(),
                next.reveal_limit()
            );
        }
        self.state.criteria = next;
    }

    /// Feed one scroll observation; returns whether more results were revealed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_end(self.config.proximity_threshold) {
            return false;
        }
        self.reveal_more()
    }

    /// Apply one step of the growth policy unconditionally.
    pub fn reveal_more(&mut self) -> bool {
        let current = self.reveal_limit();
        let next = grow_reveal(current, self.catalog.len(), self.config.reveal_step);
        if next == current {
            return false;
        }
        debug!("reveal limit {current} -> {next}");
        self.state.criteria.set_reveal_limit(next);
        true
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.state.theme
    }

    pub fn toggle_filters(&mut self) -> bool {
        self.state.filters_open = !self.state.filters_open;
        self.state.filters_open
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    pub fn set_preview_size(&mut self, px: u16) -> PreviewSize {
        self.state.preview_size = PreviewSize::new(px);
        self.state.preview_size
    }

    /// Start a fresh session over the same catalog.
    pub fn reset(&mut self) {
        self.state = SessionState::initial(self.catalog.len(), &self.config);
    }

    fn initial_limit(&self) -> usize {
        self.config.initial_reveal.min(self.catalog.len())
    }
}
