use super::*;
use crate::error::EditorError;
use crate::tour::{DistanceMatrix, SolverBudget};
use crate::types::TourGroup;
use tempfile::NamedTempFile;

/// Deterministic solver so tour tests never depend on the genetic search.
struct IdentitySolver;

impl TourSolver for IdentitySolver {
    fn solve(&self, distances: &DistanceMatrix, _budget: &SolverBudget) -> Vec<usize> {
        (0..distances.size()).collect()
    }
}

/// Returns the same index for every slot, which is never a valid tour.
struct RepeatingSolver;

impl TourSolver for RepeatingSolver {
    fn solve(&self, distances: &DistanceMatrix, _budget: &SolverBudget) -> Vec<usize> {
        vec![0; distances.size()]
    }
}

fn editor() -> EditorState {
    let mut state = EditorState::with_solver(Box::new(IdentitySolver));
    state.viewport.set_canvas_size((800.0, 600.0));
    state
}

fn add_at(state: &mut EditorState, position: (f64, f64), tag: ColorTag) -> PointId {
    state.points.add(Point::new(position, tag))
}

fn screen_of(state: &EditorState, id: PointId) -> (f64, f64) {
    let position = state.points.get(id).expect("point exists").position;
    state.viewport.to_screen(state.config.grid_to_plane(position))
}

fn press(state: &mut EditorState, pos: (f64, f64), modifier: bool) {
    state.handle_pointer(PointerEvent::Press { pos, modifier });
}

fn drag(state: &mut EditorState, pos: (f64, f64), modifier: bool) {
    state.handle_pointer(PointerEvent::Drag { pos, modifier });
}

#[test]
fn modifier_press_on_marker_selects_it() {
    let mut state = editor();
    let id = state.add_point();
    let origin = state.viewport.to_screen((0.0, 0.0));

    press(&mut state, origin, true);

    assert_eq!(state.interaction.selected, Some(id));
    assert!(state.selected_point().is_some_and(|p| p.selected));
    assert_eq!(state.interaction.color_control, Some(ColorTag::None));
}

#[test]
fn plain_press_clears_selection_without_hit_testing() {
    let mut state = editor();
    let id = state.add_point();
    let origin = state.viewport.to_screen((0.0, 0.0));
    press(&mut state, origin, true);

    press(&mut state, origin, false);

    assert_eq!(state.interaction.selected, None);
    assert_eq!(state.interaction.color_control, None);
    assert!(!state.points.get(id).expect("point").selected);
}

#[test]
fn press_on_empty_space_leaves_nothing_selected() {
    let mut state = editor();
    state.add_point();
    press(&mut state, (5.0, 5.0), true);
    assert_eq!(state.interaction.selected, None);
    assert!(state.points.iter().all(|p| !p.selected));
}

#[test]
fn overlapping_markers_select_the_last_added() {
    // Identical positions: the hit test keeps scanning, so the later point wins the tie.
    let mut state = editor();
    let _first = add_at(&mut state, (0.0, 0.0), ColorTag::GroupA);
    let second = add_at(&mut state, (0.0, 0.0), ColorTag::GroupB);
    let origin = state.viewport.to_screen((0.0, 0.0));

    assert_eq!(state.hit_test(origin), Some(second));
    press(&mut state, origin, true);
    assert_eq!(state.interaction.selected, Some(second));
    assert_eq!(state.interaction.color_control, Some(ColorTag::GroupB));
}

#[test]
fn modifier_drag_moves_selected_point_in_grid_units() {
    let mut state = editor();
    let id = state.add_point();
    let start = screen_of(&state, id);
    press(&mut state, start, true);
    let translation = state.viewport.translation();

    drag(&mut state, (start.0 + 30.0, start.1 + 50.0), true);

    let position = state.points.get(id).expect("point").position;
    assert!((position.0 - 30.0 / 1.1 / 50.0).abs() < 1e-12);
    assert!((position.1 - 50.0 / 1.1 / 50.0).abs() < 1e-12);
    assert_eq!(state.viewport.translation(), translation);
    assert!(state.document.edited);
}

#[test]
fn moving_a_point_discards_its_group_tour_only() {
    let mut state = editor();
    let moved = add_at(&mut state, (0.0, 0.0), ColorTag::GroupA);
    add_at(&mut state, (4.0, 0.0), ColorTag::GroupA);
    add_at(&mut state, (0.0, 4.0), ColorTag::GroupA);
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 8.0), ColorTag::GroupB);
    }
    state.compute_tour().expect("compute");
    assert!(state.tours.get(TourGroup::A).is_some());
    assert!(state.tours.get(TourGroup::B).is_some());

    let start = screen_of(&state, moved);
    press(&mut state, start, true);
    drag(&mut state, (start.0 + 30.0, start.1 + 50.0), true);

    assert!(state.tours.get(TourGroup::A).is_none());
    assert!(state.tours.get(TourGroup::B).is_some());
}

#[test]
fn plain_drag_pans_view_and_leaves_points() {
    let mut state = editor();
    let id = add_at(&mut state, (1.0, 2.0), ColorTag::Accent1);
    let before = state.viewport.translation();

    press(&mut state, (100.0, 100.0), false);
    drag(&mut state, (130.0, 150.0), false);

    let after = state.viewport.translation();
    assert!((after.0 - before.0 - 30.0 / 1.1).abs() < 1e-9);
    assert!((after.1 - before.1 - 50.0 / 1.1).abs() < 1e-9);
    assert_eq!(state.points.get(id).expect("point").position, (1.0, 2.0));
    assert!(!state.document.edited);
}

#[test]
fn modifier_drag_without_selection_does_nothing() {
    let mut state = editor();
    let id = add_at(&mut state, (1.0, 1.0), ColorTag::None);
    let before = state.viewport.translation();

    press(&mut state, (10.0, 10.0), true);
    drag(&mut state, (40.0, 60.0), true);

    assert_eq!(state.viewport.translation(), before);
    assert_eq!(state.points.get(id).expect("point").position, (1.0, 1.0));
    assert!(!state.document.edited);
}

#[test]
fn successive_drags_accumulate_from_last_reference() {
    let mut state = editor();
    press(&mut state, (0.0, 0.0), false);
    drag(&mut state, (11.0, 0.0), false);
    drag(&mut state, (22.0, 0.0), false);
    let (tx, ty) = state.viewport.translation();
    assert!((tx - 20.0).abs() < 1e-9);
    assert!(ty.abs() < 1e-9);
}

#[test]
fn wheel_zooms_by_one_step_per_notch() {
    let mut state = editor();
    state.handle_pointer(PointerEvent::Wheel { notches: 1, modifier: false });
    assert!((state.viewport.scale() - 1.0).abs() < 1e-12);
    state.handle_pointer(PointerEvent::Wheel { notches: -3, modifier: false });
    assert!((state.viewport.scale() - 1.3).abs() < 1e-12);
}

#[test]
fn wheel_floors_at_minimum_scale() {
    let mut state = editor();
    for _ in 0..25 {
        state.handle_pointer(PointerEvent::Wheel { notches: 1, modifier: false });
    }
    assert!((state.viewport.scale() - 0.1).abs() < 1e-12);
}

#[test]
fn wheel_with_modifier_is_ignored() {
    let mut state = editor();
    state.handle_pointer(PointerEvent::Wheel { notches: 4, modifier: true });
    assert!((state.viewport.scale() - 1.1).abs() < 1e-12);
}

#[test]
fn cursor_readout_tracks_moves() {
    let mut state = editor();
    let screen = state.viewport.to_screen((120.0, -40.0));
    state.handle_pointer(PointerEvent::Move { pos: screen });
    let (x, y) = state.interaction.cursor_grid;
    assert!((x - 120.0).abs() < 1e-9);
    assert!((y + 40.0).abs() < 1e-9);
}

#[test]
fn delete_and_recolor_without_selection_are_noops() {
    let mut state = editor();
    add_at(&mut state, (0.0, 0.0), ColorTag::GroupA);

    assert!(state.delete_selected().is_none());
    assert!(!state.recolor_selected(ColorTag::Accent2));

    assert_eq!(state.points.len(), 1);
    assert_eq!(state.points.iter().next().map(|p| p.tag), Some(ColorTag::GroupA));
    assert!(!state.document.edited);
}

#[test]
fn delete_removes_selected_point_and_its_tour() {
    let mut state = editor();
    let doomed = add_at(&mut state, (0.0, 0.0), ColorTag::GroupB);
    add_at(&mut state, (3.0, 0.0), ColorTag::GroupB);
    add_at(&mut state, (0.0, 3.0), ColorTag::GroupB);
    state.compute_tour().expect("compute");
    state.select(doomed);

    let removed = state.delete_selected().expect("deleted");

    assert_eq!(removed.id, doomed);
    assert_eq!(state.points.len(), 2);
    assert!(state.tours.get(TourGroup::B).is_none());
    assert_eq!(state.interaction.selected, None);
    assert_eq!(state.interaction.color_control, None);
    assert!(state.document.edited);
}

#[test]
fn recolor_invalidates_old_and_new_groups() {
    let mut state = editor();
    let target = add_at(&mut state, (0.0, 0.0), ColorTag::GroupA);
    for (x, y) in [(2.0, 0.0), (0.0, 2.0), (2.0, 2.0)] {
        add_at(&mut state, (x, y), ColorTag::GroupA);
    }
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 9.0), ColorTag::GroupB);
    }
    state.compute_tour().expect("compute");
    state.select(target);

    assert!(state.recolor_selected(ColorTag::GroupB));

    assert_eq!(state.points.get(target).expect("point").tag, ColorTag::GroupB);
    assert!(state.tours.is_empty());
    assert_eq!(state.interaction.color_control, Some(ColorTag::GroupB));
    assert!(state.document.edited);
}

#[test]
fn recolor_between_untoured_tags_keeps_tours() {
    let mut state = editor();
    let target = add_at(&mut state, (9.0, 9.0), ColorTag::Accent1);
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 0.0), ColorTag::GroupA);
    }
    state.compute_tour().expect("compute");
    state.select(target);

    state.recolor_selected(ColorTag::Accent2);

    assert!(state.tours.get(TourGroup::A).is_some());
}

#[test]
fn add_point_appends_at_origin() {
    let mut state = editor();
    let first = state.add_point();
    let second = state.add_point();
    let ids: Vec<PointId> = state.points.iter().map(|p| p.id).collect();
    assert_eq!(ids, [first, second]);
    assert!(state.points.iter().all(|p| p.position == (0.0, 0.0) && p.tag == ColorTag::None));
    assert!(state.document.edited);
}

#[test]
fn canvas_setters_clamp_and_scale_setters_ignore_out_of_range() {
    let mut state = editor();
    state.set_marker_diameter(500.0);
    state.set_unit_spacing(1.0);
    assert_eq!(state.config.marker_diameter, 100.0);
    assert_eq!(state.config.unit_spacing, 5.0);

    assert!(!state.set_scale(3.0));
    assert!((state.viewport.scale() - 1.1).abs() < 1e-12);
    assert!(state.add_scale(0.5));
    assert!((state.viewport.scale() - 1.6).abs() < 1e-12);

    state.reset_viewport();
    assert!((state.viewport.scale() - 1.1).abs() < 1e-12);
    assert_eq!(state.viewport.translation(), (0.0, 0.0));
}

#[test]
fn save_then_load_round_trips_document() {
    let mut state = editor();
    add_at(&mut state, (1.5, -2.0), ColorTag::GroupA);
    add_at(&mut state, (0.0, 3.25), ColorTag::Accent2);
    state.document.edited = true;
    let file = NamedTempFile::new().expect("temp file");
    let path = file.path().to_path_buf();

    state.save_document(&path).expect("save");
    assert_eq!(state.document.current_path.as_deref(), Some(path.as_path()));
    assert!(!state.document.edited);

    let mut reloaded = editor();
    reloaded.load_document(&path).expect("load");

    let records: Vec<((f64, f64), ColorTag)> =
        reloaded.points.iter().map(|p| (p.position, p.tag)).collect();
    assert_eq!(records, [((1.5, -2.0), ColorTag::GroupA), ((0.0, 3.25), ColorTag::Accent2)]);
    assert!(reloaded.window_title().ends_with(&path.display().to_string()));
}

#[test]
fn failed_load_leaves_document_untouched() {
    let mut state = editor();
    let id = add_at(&mut state, (1.0, 1.0), ColorTag::GroupA);
    state.document.edited = true;
    let file = NamedTempFile::new().expect("temp file");
    std::fs::write(file.path(), "1,2,0\nnot,a,record\n").expect("write fixture");

    let result = state.load_document(file.path());

    assert!(matches!(result, Err(EditorError::Format { line: 2, .. })));
    assert!(state.points.get(id).is_some());
    assert_eq!(state.points.len(), 1);
    assert!(state.document.edited);
    assert_eq!(state.document.current_path, None);
}

#[test]
fn failed_save_keeps_path_and_dirty_flag() {
    let mut state = editor();
    state.add_point();
    let dir = tempfile::tempdir().expect("temp dir");
    let missing_dir = dir.path().join("missing");

    let result = state.save_document(&missing_dir.join("points.csv"));

    assert!(matches!(result, Err(EditorError::Io { .. })));
    assert_eq!(state.document.current_path, None);
    assert!(state.document.edited);
    assert_eq!(state.window_title(), "CSV Editor");
}

#[test]
fn new_document_clears_points_tours_and_path() {
    let mut state = editor();
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 0.0), ColorTag::GroupA);
    }
    state.compute_tour().expect("compute");
    state.document.current_path = Some(PathBuf::from("/tmp/old.csv"));
    state.document.edited = true;
    state.set_scale(1.5);

    state.new_document();

    assert!(state.points.is_empty());
    assert!(state.tours.is_empty());
    assert_eq!(state.document, DocumentState::default());
    assert!((state.viewport.scale() - 1.5).abs() < 1e-12);
}

#[test]
fn swapped_solver_failure_is_reported_and_leaves_group_empty() {
    let mut state = editor();
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 0.0), ColorTag::GroupA);
    }
    state.compute_tour().expect("compute");
    assert!(state.tours.get(TourGroup::A).is_some());

    state.set_solver(Box::new(RepeatingSolver));
    let result = state.compute_tour();

    assert!(matches!(result, Err(EditorError::InvalidTour { group: TourGroup::A, .. })));
    assert!(state.tours.is_empty());
}

#[test]
fn export_without_file_is_skipped() {
    let mut state = editor();
    for x in 0..3 {
        add_at(&mut state, (f64::from(x), 0.0), ColorTag::GroupA);
    }
    assert_eq!(state.show_tour().expect("show tour"), None);
    assert!(state.tours.get(TourGroup::A).is_some());
}

#[test]
fn show_tour_writes_ordered_export_beside_document() {
    let mut state = editor();
    add_at(&mut state, (0.0, 0.0), ColorTag::GroupB);
    add_at(&mut state, (1.0, 0.0), ColorTag::GroupB);
    add_at(&mut state, (2.0, 0.0), ColorTag::GroupB);
    add_at(&mut state, (5.0, 5.0), ColorTag::GroupA);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("points.csv");
    state.save_document(&path).expect("save");

    let written = state.show_tour().expect("show tour").expect("export path");
    let contents = std::fs::read_to_string(&written).expect("read export");

    assert_eq!(written, crate::csv::ordered_path(&path));
    assert_eq!(contents, "0,0,2\n1,0,2\n2,0,2\n");
}

#[test]
fn render_marks_the_selected_point() {
    let mut state = editor();
    let id = state.add_point();
    state.select(id);
    let markers = state
        .render()
        .into_iter()
        .filter(|c| matches!(c, crate::render::DrawCommand::Marker { .. }))
        .count();
    assert_eq!(markers, 2);
}
