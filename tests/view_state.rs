use serde_json::json;

use scout_compare::normalize::MetricCalibration;
use scout_compare::ordering::SortDirection;
use scout_compare::record::MergedRecord;
use scout_compare::schema::Position;
use scout_compare::selection::ToggleOutcome;
use scout_compare::state::{ComparisonView, Delta, LoadState, apply_delta};

fn record(key: &str, name: &str, gol: f64) -> MergedRecord {
    MergedRecord {
        join_key: key.to_string(),
        fields: json!({"oyuncu_isim": name, "takim_adi": "Test FC", "gol": gol, "player_id": 1})
            .as_object()
            .cloned()
            .expect("object"),
        selected: false,
    }
}

fn loaded_view(records: Vec<MergedRecord>) -> ComparisonView {
    let mut view = ComparisonView::new(Position::Striker, 6);
    let cycle = view.begin_load();
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle,
            position: Position::Striker,
            result: Ok(records),
        },
    );
    view
}

#[test]
fn stale_cycle_results_are_discarded() {
    let mut view = ComparisonView::new(Position::Striker, 6);
    let first = view.begin_load();
    let second = view.begin_load();
    assert!(second > first);

    // The newer cycle finishes first; the older one must not overwrite it.
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: second,
            position: Position::Striker,
            result: Ok(vec![record("new", "New", 1.0)]),
        },
    );
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: first,
            position: Position::Striker,
            result: Ok(vec![record("old", "Old", 1.0)]),
        },
    );
    assert_eq!(view.load, LoadState::Ready);
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].join_key, "new");
}

#[test]
fn switching_position_ignores_in_flight_results() {
    let mut view = ComparisonView::new(Position::Striker, 6);
    let cycle = view.begin_load();
    let next = view.switch_position(Position::Winger);
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle,
            position: Position::Striker,
            result: Ok(vec![record("s", "S", 1.0)]),
        },
    );
    assert_eq!(view.load, LoadState::Loading);
    assert!(view.records.is_empty());
    assert_eq!(view.cycle, next);
    // Striker never finished loading, so there is nowhere to go back to.
    assert_eq!(view.previous_position, None);
}

#[test]
fn failure_and_empty_states() {
    let mut view = ComparisonView::new(Position::Striker, 6);
    let cycle = view.begin_load();
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle,
            position: Position::Striker,
            result: Err("http 503".to_string()),
        },
    );
    assert_eq!(view.load, LoadState::Failed("http 503".to_string()));
    assert!(view.records.is_empty());

    let view = loaded_view(Vec::new());
    assert_eq!(view.load, LoadState::Empty);
}

#[test]
fn selection_is_capped_and_mirrored_into_records() {
    let records = (0..8)
        .map(|i| record(&format!("k{i}"), &format!("P{i}"), i as f64))
        .collect();
    let mut view = loaded_view(records);

    for _ in 0..6 {
        assert_eq!(view.toggle_at_cursor(), Some(ToggleOutcome::Added));
        view.select_next();
    }
    assert_eq!(view.toggle_at_cursor(), Some(ToggleOutcome::Rejected));
    assert!(view.selection.is_full());
    assert_eq!(view.records.iter().filter(|r| r.selected).count(), 6);

    assert_eq!(view.toggle_key("k2"), ToggleOutcome::Removed);
    assert!(!view.records[2].selected);
    let names: Vec<String> = view
        .selected_records()
        .iter()
        .map(|r| r.display_name())
        .collect();
    assert_eq!(names, ["P0", "P1", "P3", "P4", "P5"]);

    view.clear_selection();
    assert!(view.records.iter().all(|r| !r.selected));
}

#[test]
fn sorting_changes_visible_order_only() {
    let mut view = loaded_view(vec![
        record("a", "A", 2.0),
        record("b", "B", 5.0),
        record("c", "C", 2.0),
    ]);
    view.set_sort("gol", SortDirection::Desc);
    let keys: Vec<String> = view.visible_records().into_iter().map(|r| r.join_key).collect();
    assert_eq!(keys, ["b", "a", "c"]);

    view.flip_sort_direction();
    let keys: Vec<String> = view.visible_records().into_iter().map(|r| r.join_key).collect();
    assert_eq!(keys, ["a", "c", "b"]);

    // Underlying records keep watch-list order.
    assert_eq!(view.records[0].join_key, "a");
    assert_eq!(view.cursor_key().as_deref(), Some("a"));
}

#[test]
fn sort_field_cycles_through_declared_fields() {
    let mut view = loaded_view(vec![record("a", "A", 1.0)]);
    view.cycle_sort_field();
    let first = view.sort.clone().expect("sort set");
    assert_eq!(first.field, "yas");
    assert_eq!(first.direction, SortDirection::Desc);
    view.cycle_sort_field();
    assert_eq!(view.sort.as_ref().map(|s| s.field.as_str()), Some("mac_sayisi"));

    // Wrapping around never lands on the player id.
    let total = Position::Striker.schema().declared_numeric_fields().len();
    for _ in 0..total * 2 {
        view.cycle_sort_field();
        assert_ne!(view.sort.as_ref().map(|s| s.field.as_str()), Some("player_id"));
    }
}

#[test]
fn relative_scale_uses_selected_spread() {
    let mut view = loaded_view(vec![
        record("a", "A", 2.0),
        record("b", "B", 9.0),
        record("c", "C", 30.0),
    ]);
    let fixed = MetricCalibration::range("gol", 0.0, 35.0);
    assert_eq!(view.effective_calibration(&fixed), fixed);

    view.toggle_relative_scale();
    // One selected player has no spread, so the fixed table still applies.
    view.toggle_key("a");
    assert_eq!(view.effective_calibration(&fixed), fixed);

    view.toggle_key("b");
    let relative = view.effective_calibration(&fixed);
    assert_eq!((relative.min, relative.max), (2.0, 9.0));
    assert_eq!(relative.field, "gol");
}

#[test]
fn go_back_targets_the_last_position_that_loaded() {
    let mut view = loaded_view(vec![record("s", "S", 1.0)]);
    assert_eq!(view.previous_position, Some(Position::Striker));

    // Two quick switches: goalkeeper is still in flight when centre-back fails.
    let goalkeeper = view.switch_position(Position::Goalkeeper);
    let centre_back = view.switch_position(Position::CentreBack);
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: goalkeeper,
            position: Position::Goalkeeper,
            result: Ok(vec![record("g", "G", 0.0)]),
        },
    );
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: centre_back,
            position: Position::CentreBack,
            result: Err("boom".to_string()),
        },
    );
    assert_eq!(view.load, LoadState::Failed("boom".to_string()));
    assert_eq!(view.previous_position, Some(Position::Striker));

    // Going back to a position that also fails keeps the last good one.
    let back = view.switch_position(Position::Goalkeeper);
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: back,
            position: Position::Goalkeeper,
            result: Err("boom again".to_string()),
        },
    );
    assert_eq!(view.previous_position, Some(Position::Striker));

    let back = view.switch_position(Position::Striker);
    apply_delta(
        &mut view,
        Delta::Loaded {
            cycle: back,
            position: Position::Striker,
            result: Ok(vec![record("s", "S", 1.0)]),
        },
    );
    assert_eq!(view.load, LoadState::Ready);
    assert_eq!(view.previous_position, Some(Position::Striker));
}
