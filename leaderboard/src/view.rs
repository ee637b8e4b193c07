//! The view layer: state of the controls, projection of the rows onto the
//! visible columns and the capability trait implemented by display surfaces.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::{apply_query, assign_ranks, config::*, model_options};

pub const STATUS_NO_RESULTS: &str = "No results";
pub const STATUS_LOAD_FAILED: &str = "Failed to load leaderboard.";

/// What the core needs from a display surface.
///
/// Every render replaces the whole content: there is no incremental update.
pub trait TableView {
    /// Fills the model dropdown. Called once, after loading.
    fn set_model_options(&mut self, models: &[String]);

    /// The state of each column checkbox, in display order.
    fn set_columns(&mut self, columns: &[(Column, bool)]);

    fn set_sort_indicator(&mut self, _key: Column, _dir: SortDir) {}

    /// Replaces the body of the table. The rows only contain the visible cells.
    fn set_rows(&mut self, rows: &[ProjectedRow]);

    fn set_status(&mut self, status: &str);
}

/// A change coming from one of the controls.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ControlEvent {
    /// New content of the search box.
    Search(String),
    ModelSelected(ModelFilter),
    DateSelected(DateWindow),
    ColumnToggled { column: Column, visible: bool },
    /// A click on a sortable header.
    HeaderClicked(Column),
}

/// The state of all the controls.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ViewState {
    pub query: Query,
    pub hidden_cols: BTreeSet<Column>,
}

impl ViewState {
    /// Returns the state after the event. Clicking on the active column flips the
    /// direction, clicking on another column selects it with its default direction.
    pub fn apply_event(&self, event: &ControlEvent) -> ViewState {
        let mut res = self.clone();
        match event {
            ControlEvent::Search(text) => res.query.text = text.clone(),
            ControlEvent::ModelSelected(m) => res.query.model = m.clone(),
            ControlEvent::DateSelected(d) => res.query.date = *d,
            ControlEvent::ColumnToggled { column, visible } => {
                if *visible {
                    res.hidden_cols.remove(column);
                } else {
                    res.hidden_cols.insert(*column);
                }
            }
            ControlEvent::HeaderClicked(key) if *key == self.query.sort_key => {
                res.query.sort_dir = self.query.sort_dir.flipped();
            }
            ControlEvent::HeaderClicked(key) => {
                res.query.sort_key = *key;
                res.query.sort_dir = key.default_dir();
            }
        }
        res
    }

    pub fn is_visible(&self, column: Column) -> bool {
        !self.hidden_cols.contains(&column)
    }
}

/// Projects the ranked rows onto the visible columns.
///
/// Hidden columns are only left out of the projection: the rows themselves are
/// not touched.
pub fn project_rows(rows: &[RankedRow], hidden_cols: &BTreeSet<Column>) -> Vec<ProjectedRow> {
    rows.iter()
        .map(|r| ProjectedRow {
            cells: Column::ALL
                .iter()
                .filter(|c| !hidden_cols.contains(c))
                .map(|c| {
                    let value = match c {
                        Column::Rank => r.rank.to_string(),
                        _ => r.row.field(*c).to_string(),
                    };
                    (*c, value)
                })
                .collect(),
        })
        .collect()
}

pub fn status_message(num_rows: usize) -> String {
    if num_rows == 0 {
        STATUS_NO_RESULTS.to_string()
    } else {
        format!("{} result(s)", num_rows)
    }
}

/// Pushes the current view to a display surface.
pub fn render(view: &mut dyn TableView, rows: &[RankedRow], state: &ViewState) {
    let columns: Vec<(Column, bool)> = Column::ALL
        .iter()
        .map(|c| (*c, state.is_visible(*c)))
        .collect();
    view.set_columns(&columns);
    view.set_sort_indicator(state.query.sort_key, state.query.sort_dir);
    view.set_rows(&project_rows(rows, &state.hidden_cols));
    view.set_status(&status_message(rows.len()));
}

/// A leaderboard being viewed.
///
/// It owns the row set, which does not change after loading, and the current
/// state of the controls. Each event recomputes the whole view from these two.
pub struct Session {
    rows: Vec<LeaderboardRow>,
    models: Vec<String>,
    state: ViewState,
    filtered: Vec<RankedRow>,
    clock: fn() -> DateTime<Utc>,
}

impl Session {
    pub fn new(rows: Vec<LeaderboardRow>) -> Session {
        Session::with_clock(rows, Utc::now)
    }

    /// Uses a custom source for the current time, against which the date windows
    /// are evaluated.
    pub fn with_clock(rows: Vec<LeaderboardRow>, clock: fn() -> DateTime<Utc>) -> Session {
        let models = model_options(&rows);
        info!(
            "Session with {:?} rows and {:?} models",
            rows.len(),
            models.len()
        );
        let mut res = Session {
            rows,
            models,
            state: ViewState::default(),
            filtered: Vec::new(),
            clock,
        };
        res.recompute();
        res
    }

    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    pub fn model_options(&self) -> &[String] {
        &self.models
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The current filtered, sorted and ranked rows.
    pub fn filtered(&self) -> &[RankedRow] {
        &self.filtered
    }

    /// Replaces the state of all the controls at once, for example from saved settings.
    pub fn set_state(&mut self, state: ViewState) {
        debug!("Session: state {:?}", state);
        self.state = state;
        self.recompute();
    }

    /// Handles one event from the controls, without rendering.
    pub fn apply(&mut self, event: &ControlEvent) {
        debug!("Session: event {:?}", event);
        self.state = self.state.apply_event(event);
        self.recompute();
    }

    /// Handles one event from the controls and renders the result.
    pub fn handle(&mut self, event: &ControlEvent, view: &mut dyn TableView) {
        self.apply(event);
        self.render(view);
    }

    /// Fills the controls that depend on the data, then renders.
    pub fn mount(&self, view: &mut dyn TableView) {
        view.set_model_options(&self.models);
        self.render(view);
    }

    pub fn render(&self, view: &mut dyn TableView) {
        render(view, &self.filtered, &self.state);
    }

    fn recompute(&mut self) {
        let now = (self.clock)();
        self.filtered = assign_ranks(apply_query(&self.rows, &self.state.query, now));
        debug!(
            "Session: {:?} of {:?} rows visible",
            self.filtered.len(),
            self.rows.len()
        );
    }
}
