use std::collections::VecDeque;

use crate::normalize::{MetricCalibration, calibration_from_records};
use crate::ordering::{SortDirection, SortSpec, sort_records};
use crate::panels::{ComparisonPanel, panels};
use crate::record::MergedRecord;
use crate::schema::{PLAYER_ID_FIELD, PLAYER_NAME_FIELD, Position};
use crate::selection::{SelectionSet, ToggleOutcome};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Empty watch-list, or nothing on it joined.
    Empty,
    Failed(String),
}

/// Messages from the background loader.
#[derive(Debug)]
pub enum Delta {
    Loaded {
        cycle: u64,
        position: Position,
        result: Result<Vec<MergedRecord>, String>,
    },
    Log(String),
}

#[derive(Debug)]
pub enum LoaderCommand {
    Load { cycle: u64, position: Position },
}

/// Everything one comparison view owns: records, selection, sort, load status.
#[derive(Debug)]
pub struct ComparisonView {
    pub position: Position,
    /// Last position whose load was applied without error, for the "go back" action.
    pub previous_position: Option<Position>,
    pub records: Vec<MergedRecord>,
    pub selection: SelectionSet,
    pub sort: Option<SortSpec>,
    pub load: LoadState,
    pub cycle: u64,
    pub cursor: usize,
    pub panel: usize,
    pub logs: VecDeque<String>,
    pub last_toggle: Option<ToggleOutcome>,
    /// Scale charts to the selected players' own range instead of the fixed tables.
    pub relative_scale: bool,
}

impl ComparisonView {
    pub fn new(position: Position, selection_cap: usize) -> Self {
        Self {
            position,
            previous_position: None,
            records: Vec::new(),
            selection: SelectionSet::new(selection_cap),
            sort: None,
            load: LoadState::Idle,
            cycle: 0,
            cursor: 0,
            panel: 0,
            logs: VecDeque::new(),
            last_toggle: None,
            relative_scale: false,
        }
    }

    /// Start a fetch-join cycle. Results tagged with an older id are ignored.
    pub fn begin_load(&mut self) -> u64 {
        self.cycle += 1;
        self.load = LoadState::Loading;
        self.records.clear();
        self.selection.clear();
        self.cursor = 0;
        self.last_toggle = None;
        self.cycle
    }

    pub fn switch_position(&mut self, position: Position) -> u64 {
        self.position = position;
        self.panel = 0;
        self.sort = None;
        self.begin_load()
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Records in display order (sorted when a sort is set, else watch-list order).
    pub fn visible_records(&self) -> Vec<MergedRecord> {
        match self.sort.as_ref() {
            Some(spec) => sort_records(&self.records, &spec.field, spec.direction),
            None => self.records.clone(),
        }
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        self.sort = Some(SortSpec {
            field: field.to_string(),
            direction,
        });
    }

    /// Step through the position's numeric fields (the player id is skipped),
    /// descending by default.
    pub fn cycle_sort_field(&mut self) {
        let fields: Vec<&'static str> = self
            .position
            .schema()
            .declared_numeric_fields()
            .into_iter()
            .filter(|f| *f != PLAYER_ID_FIELD)
            .collect();
        if fields.is_empty() {
            return;
        }
        let next = match self.sort.as_ref() {
            Some(spec) => {
                let idx = fields.iter().position(|f| *f == spec.field).unwrap_or(0);
                fields[(idx + 1) % fields.len()]
            }
            None => fields[0],
        };
        let direction = self
            .sort
            .as_ref()
            .map(|s| s.direction)
            .unwrap_or(SortDirection::Desc);
        self.set_sort(next, direction);
    }

    pub fn flip_sort_direction(&mut self) {
        if let Some(spec) = self.sort.as_mut() {
            spec.direction = spec.direction.flip();
        }
    }

    pub fn select_next(&mut self) {
        let total = self.records.len();
        self.cursor = if total == 0 { 0 } else { (self.cursor + 1) % total };
    }

    pub fn select_prev(&mut self) {
        let total = self.records.len();
        self.cursor = if total == 0 {
            0
        } else {
            (self.cursor + total - 1) % total
        };
    }

    pub fn cursor_key(&self) -> Option<String> {
        self.visible_records()
            .get(self.cursor)
            .map(|r| r.join_key.clone())
    }

    /// Toggle the record under the cursor in or out of the comparison set.
    pub fn toggle_at_cursor(&mut self) -> Option<ToggleOutcome> {
        let key = self.cursor_key()?;
        Some(self.toggle_key(&key))
    }

    pub fn toggle_key(&mut self, key: &str) -> ToggleOutcome {
        let outcome = self.selection.toggle(key);
        self.sync_selected_flags();
        self.last_toggle = Some(outcome);
        outcome
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.sync_selected_flags();
        self.last_toggle = None;
    }

    fn sync_selected_flags(&mut self) {
        for record in &mut self.records {
            record.selected = self.selection.is_selected(&record.join_key);
        }
    }

    /// Selected records in the order they were picked.
    pub fn selected_records(&self) -> Vec<&MergedRecord> {
        self.selection
            .keys()
            .iter()
            .filter_map(|key| self.records.iter().find(|r| &r.join_key == key))
            .collect()
    }

    pub fn panels(&self) -> &'static [ComparisonPanel] {
        panels(self.position)
    }

    pub fn current_panel(&self) -> Option<&'static ComparisonPanel> {
        let all = self.panels();
        all.get(self.panel % all.len().max(1))
    }

    pub fn cycle_panel(&mut self) {
        let total = self.panels().len();
        if total > 0 {
            self.panel = (self.panel + 1) % total;
        }
    }

    pub fn toggle_relative_scale(&mut self) {
        self.relative_scale = !self.relative_scale;
    }

    /// Calibration charts should use for `calib`, honouring relative scaling.
    /// Falls back to the fixed table when the selection has no spread.
    pub fn effective_calibration(&self, calib: &MetricCalibration) -> MetricCalibration {
        if !self.relative_scale {
            return *calib;
        }
        calibration_from_records(calib.field, &self.selected_records(), calib.invert)
            .unwrap_or(*calib)
    }

    pub fn sort_label(&self) -> String {
        match self.sort.as_ref() {
            Some(spec) => format!("{} {}", spec.field, spec.direction.arrow()),
            None => "watch-list order".to_string(),
        }
    }

    pub fn cursor_name(&self) -> Option<String> {
        self.visible_records()
            .get(self.cursor)
            .map(|r| r.text(PLAYER_NAME_FIELD).unwrap_or_else(|| r.join_key.clone()))
    }
}

pub fn apply_delta(view: &mut ComparisonView, delta: Delta) {
    match delta {
        Delta::Loaded {
            cycle,
            position,
            result,
        } => {
            if cycle != view.cycle || position != view.position {
                tracing::debug!(cycle, current = view.cycle, "discarding stale load result");
                return;
            }
            match result {
                Ok(records) => {
                    let count = records.len();
                    view.records = records;
                    view.selection.clear();
                    view.cursor = 0;
                    view.previous_position = Some(position);
                    view.load = if count == 0 {
                        LoadState::Empty
                    } else {
                        LoadState::Ready
                    };
                    view.push_log(format!(
                        "[INFO] {}: {count} players loaded",
                        position.label()
                    ));
                }
                Err(err) => {
                    view.records.clear();
                    view.selection.clear();
                    view.load = LoadState::Failed(err.clone());
                    view.push_log(format!("[WARN] {} load failed: {err}", position.label()));
                }
            }
        }
        Delta::Log(line) => view.push_log(line),
    }
}
