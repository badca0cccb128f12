use std::cell::RefCell;
use std::rc::Rc;

use gantt_rs::api::{
    GanttChart, GanttChartConfig, GestureOutcome, Resource, SettingsPatch, TaskDraft,
};
use gantt_rs::core::{PointerPosition, ResourceId, TaskId};
use gantt_rs::extensions::{GanttEvent, GanttPlugin, PluginContext};
use gantt_rs::interaction::{GestureKind, InteractionMode, ResizeSide};

const JAN_15_2022: i64 = 1_642_204_800;
/// Seconds covered by one pixel in the default "days" window (10 days over 1600px).
const SECONDS_PER_PX: i64 = 540;

fn at(hour: i64) -> i64 {
    JAN_15_2022 + hour * 3_600
}

fn pointer(x: f64, y: f64) -> PointerPosition {
    PointerPosition::new(x, y)
}

fn chart_with(resources: &[&str]) -> GanttChart {
    let mut chart = GanttChart::new(GanttChartConfig::new(JAN_15_2022)).expect("chart init");
    for id in resources {
        chart
            .add_resource(Resource::new(*id, format!("Crew {id}")))
            .expect("add resource");
    }
    chart
}

fn add(chart: &mut GanttChart, id: &str, start: i64, end: i64, resource: &str) -> TaskId {
    chart
        .create_task(TaskDraft::new(id, start, end).with_id(id).with_resource(resource))
        .expect("create task")
}

fn lane_height(chart: &GanttChart, id: &str) -> u32 {
    chart
        .resource(&ResourceId::from(id))
        .expect("resource")
        .lane_height_slots()
}

struct ResolveRecorder {
    resolved: Rc<RefCell<Vec<String>>>,
}

impl GanttPlugin for ResolveRecorder {
    fn id(&self) -> &str {
        "resolve-recorder"
    }

    fn on_event(&mut self, event: &GanttEvent, _context: &PluginContext) {
        if let GanttEvent::ResourceResolved { resource_id, .. } = event {
            self.resolved.borrow_mut().push(resource_id.to_string());
        }
    }
}

#[test]
fn move_preview_leaves_committed_span_alone() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");
    let before = chart.task_geometry(&task).expect("geometry");

    let gesture = chart.move_start(&task, pointer(900.0, 10.0)).expect("move start");
    assert!(gesture.update(&mut chart, pointer(980.0, 10.0)));

    let moved = chart.task(&task).expect("task");
    assert_eq!(moved.start(), at(10));
    assert_eq!(moved.end(), at(12));
    assert_eq!(moved.interaction().mode(), InteractionMode::Moving);
    let preview = moved.live_span();
    assert!((preview.start - (at(10) + 80 * SECONDS_PER_PX) as f64).abs() <= 1e-3);
    assert!((preview.end - preview.start - 7_200.0).abs() <= 1e-3);

    let during = chart.task_geometry(&task).expect("geometry");
    assert!((during.left_px - (before.left_px + 80.0)).abs() <= 1e-6);
    assert_eq!(chart.active_gesture_count(), 1);

    let outcome = gesture.end(&mut chart, pointer(980.0, 10.0)).expect("commit");
    assert_eq!(outcome.start, at(22));
    assert_eq!(outcome.end, at(24));
    assert_eq!(chart.task(&task).expect("task").start(), at(22));
    assert!(chart.task(&task).expect("task").interaction().is_idle());
    assert_eq!(chart.active_gesture_count(), 0);
}

#[test]
fn rescaling_mid_gesture_keeps_the_preview_in_place() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(0.0, 10.0)).expect("move start");
    assert!(gesture.update(&mut chart, pointer(80.0, 10.0)));
    let before = chart.task(&task).expect("task").live_span();

    chart
        .set_settings(SettingsPatch {
            time_unit_width_px: Some(80.0),
            ..SettingsPatch::default()
        })
        .expect("settings");
    assert!(chart.set_period("weeks"));
    assert!(gesture.update(&mut chart, pointer(80.0, 10.0)));

    let after = chart.task(&task).expect("task").live_span();
    assert!((after.start - before.start).abs() <= 1e-3);
    assert!((after.end - before.end).abs() <= 1e-3);

    let outcome = gesture.end(&mut chart, pointer(80.0, 10.0)).expect("commit");
    assert_eq!(outcome.start, at(22));
    assert_eq!(outcome.end, at(24));
}

#[test]
fn resize_ignores_grid_changes_after_start() {
    let mut chart = chart_with(&["r"]);
    chart
        .set_settings(SettingsPatch {
            snap_to_grid: Some(true),
            ..SettingsPatch::default()
        })
        .expect("settings");
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart
        .resize_start(&task, ResizeSide::Right, pointer(0.0, 0.0))
        .expect("resize start");
    chart
        .set_settings(SettingsPatch {
            time_unit_width_px: Some(400.0),
            ..SettingsPatch::default()
        })
        .expect("settings");

    // 45px still snaps to one 40px cell of the original grid: six hours.
    let outcome = gesture.end(&mut chart, pointer(45.0, 0.0)).expect("commit");
    assert_eq!(outcome.start, at(10));
    assert_eq!(outcome.end, at(18));
}

#[test]
fn continuous_move_rounds_to_whole_seconds_on_commit() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    let outcome = gesture
        .end(&mut chart, pointer(0.001, 0.0))
        .expect("commit");

    // 0.001px is 0.54s, which rounds up to one second.
    assert_eq!(outcome.start, at(10) + 1);
    assert_eq!(outcome.end, at(12) + 1);
}

#[test]
fn snapped_move_advances_in_whole_grid_cells() {
    let mut chart = chart_with(&["r"]);
    chart
        .set_settings(SettingsPatch {
            snap_to_grid: Some(true),
            ..SettingsPatch::default()
        })
        .expect("settings");
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(100.0, 20.0)).expect("move start");
    gesture.update(&mut chart, pointer(115.0, 30.0));
    assert_eq!(chart.task(&task).expect("task").live_span().start, at(10) as f64);

    let outcome = gesture.end(&mut chart, pointer(125.0, 35.0)).expect("commit");
    // 25px snaps to one 40px cell, which is six hours in this window.
    assert_eq!(outcome.start, at(16));
    assert_eq!(outcome.end, at(18));
    assert_eq!(outcome.resource, Some(ResourceId::from("r")));
}

#[test]
fn right_edge_dragged_before_start_flips_the_span() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(9), at(10), "r");

    let gesture = chart
        .resize_start(&task, ResizeSide::Right, pointer(500.0, 0.0))
        .expect("resize start");
    assert_eq!(gesture.kind(), GestureKind::Resize(ResizeSide::Right));
    assert!(gesture.update(&mut chart, pointer(460.0, 0.0)));

    let preview = chart.task(&task).expect("task").live_span();
    assert!(preview.start <= preview.end);

    let outcome = gesture.end(&mut chart, pointer(460.0, 0.0)).expect("commit");
    assert_eq!((outcome.start, outcome.end), (at(4), at(9)));
    let committed = chart.task(&task).expect("task");
    assert!(committed.start() <= committed.end());
}

#[test]
fn left_edge_dragged_past_end_flips_the_span() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(9), at(10), "r");

    let gesture = chart
        .resize_start(&task, ResizeSide::Left, pointer(500.0, 0.0))
        .expect("resize start");
    let outcome = gesture.end(&mut chart, pointer(540.0, 0.0)).expect("commit");
    assert_eq!((outcome.start, outcome.end), (at(10), at(15)));
}

#[test]
fn resize_commit_resolves_only_the_current_resource() {
    let mut chart = chart_with(&["r1", "r2"]);
    let a = add(&mut chart, "a", at(8), at(10), "r1");
    add(&mut chart, "b", at(11), at(13), "r1");
    add(&mut chart, "c", at(11), at(13), "r2");
    assert_eq!(lane_height(&chart, "r1"), 1);

    let resolved = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(ResolveRecorder {
            resolved: resolved.clone(),
        }))
        .expect("register plugin");

    let gesture = chart
        .resize_start(&a, ResizeSide::Right, pointer(0.0, 0.0))
        .expect("resize start");
    // Six hours later the task runs into `b`.
    let outcome = gesture.end(&mut chart, pointer(40.0, 0.0)).expect("commit");

    assert_eq!(outcome.end, at(16));
    assert_eq!(outcome.resolved_resources.as_slice(), &[ResourceId::from("r1")]);
    assert_eq!(*resolved.borrow(), vec!["r1".to_owned()]);
    assert_eq!(lane_height(&chart, "r1"), 2);
}

#[test]
fn move_across_resources_resolves_old_then_new_once_each() {
    let mut chart = chart_with(&["r1", "r2"]);
    let a = add(&mut chart, "a", at(10), at(12), "r1");
    let b = add(&mut chart, "b", at(11), at(13), "r1");
    let c = add(&mut chart, "c", at(10), at(12), "r2");
    assert_eq!(lane_height(&chart, "r1"), 2);
    assert_eq!(lane_height(&chart, "r2"), 1);
    assert_eq!(chart.task_geometry(&b).expect("geometry").top_px, Some(40.0));

    let resolved = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(ResolveRecorder {
            resolved: resolved.clone(),
        }))
        .expect("register plugin");

    let gesture = chart.move_start(&b, pointer(300.0, 50.0)).expect("move start");
    gesture.update(&mut chart, pointer(300.0, 70.0));
    gesture.update(&mut chart, pointer(300.0, 90.0));
    // Still owned by r1 until commit.
    assert_eq!(
        chart.task(&b).expect("task").resource_id(),
        Some(&ResourceId::from("r1"))
    );
    assert!(resolved.borrow().is_empty());

    let outcome = gesture.end(&mut chart, pointer(300.0, 90.0)).expect("commit");
    assert!(outcome.changed_resource());
    assert_eq!(outcome.previous_resource, Some(ResourceId::from("r1")));
    assert_eq!(outcome.resource, Some(ResourceId::from("r2")));
    assert_eq!(
        outcome.resolved_resources.as_slice(),
        &[ResourceId::from("r1"), ResourceId::from("r2")]
    );
    assert_eq!(*resolved.borrow(), vec!["r1".to_owned(), "r2".to_owned()]);

    assert_eq!(lane_height(&chart, "r1"), 1);
    assert_eq!(lane_height(&chart, "r2"), 2);
    assert_eq!(chart.task(&a).expect("task").vertical_slot(), 0);
    assert_eq!(chart.task(&b).expect("task").vertical_slot(), 0);
    assert_eq!(chart.task(&c).expect("task").vertical_slot(), 1);
    assert_eq!(chart.task(&b).expect("task").start(), at(11));
}

#[test]
fn unassigned_task_moves_in_time_only() {
    let mut chart = chart_with(&["r"]);
    let loose = chart
        .create_task(TaskDraft::new("loose", at(1), at(2)))
        .expect("task");

    let gesture = chart.move_start(&loose, pointer(0.0, 0.0)).expect("move start");
    let outcome = gesture.end(&mut chart, pointer(40.0, 200.0)).expect("commit");
    assert_eq!(outcome.resource, None);
    assert_eq!(outcome.start, at(7));
    assert!(outcome.resolved_resources.is_empty());
}

#[test]
fn second_gesture_on_a_busy_task_is_rejected() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    gesture.update(&mut chart, pointer(20.0, 0.0));
    let state = chart.task(&task).expect("task").interaction().clone();

    assert!(chart.move_start(&task, pointer(5.0, 5.0)).is_none());
    assert!(
        chart
            .resize_start(&task, ResizeSide::Left, pointer(5.0, 5.0))
            .is_none()
    );
    assert_eq!(chart.task(&task).expect("task").interaction(), &state);

    assert!(gesture.end(&mut chart, pointer(20.0, 0.0)).is_some());
    assert!(chart.move_start(&task, pointer(0.0, 0.0)).is_some());
}

#[test]
fn unknown_task_cannot_start_a_gesture() {
    let mut chart = chart_with(&["r"]);
    assert!(chart.move_start(&TaskId::from("ghost"), pointer(0.0, 0.0)).is_none());
    assert!(!chart.cancel_gesture(&TaskId::from("ghost")));
}

#[test]
fn cancel_discards_preview_and_is_idempotent() {
    let mut chart = chart_with(&["r1", "r2"]);
    let task = add(&mut chart, "a", at(10), at(12), "r1");

    let gesture = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    gesture.update(&mut chart, pointer(120.0, 60.0));

    assert!(gesture.cancel(&mut chart));
    assert!(!gesture.cancel(&mut chart));
    assert!(!gesture.is_active(&chart));

    let task_after = chart.task(&task).expect("task");
    assert!(task_after.interaction().is_idle());
    assert_eq!((task_after.start(), task_after.end()), (at(10), at(12)));
    assert_eq!(task_after.resource_id(), Some(&ResourceId::from("r1")));

    // A stale handle can neither update nor commit.
    assert!(!gesture.update(&mut chart, pointer(200.0, 0.0)));
    assert!(gesture.end(&mut chart, pointer(200.0, 0.0)).is_none());
    assert_eq!(chart.task(&task).expect("task").start(), at(10));
}

#[test]
fn external_cancel_invalidates_the_handle() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let stale = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    assert!(chart.cancel_gesture(&task));
    assert!(!chart.cancel_gesture(&task));

    let fresh = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    assert_ne!(stale.gesture_id(), fresh.gesture_id());
    assert!(!stale.update(&mut chart, pointer(40.0, 0.0)));
    assert!(fresh.update(&mut chart, pointer(40.0, 0.0)));
}

#[test]
fn cancel_all_clears_every_gesture() {
    let mut chart = chart_with(&["r"]);
    let a = add(&mut chart, "a", at(1), at(2), "r");
    let b = add(&mut chart, "b", at(3), at(4), "r");
    add(&mut chart, "c", at(5), at(6), "r");

    let _move_a = chart.move_start(&a, pointer(0.0, 0.0)).expect("move start");
    let _resize_b = chart
        .resize_start(&b, ResizeSide::Left, pointer(0.0, 0.0))
        .expect("resize start");

    assert_eq!(chart.cancel_all_gestures(), 2);
    assert_eq!(chart.active_gesture_count(), 0);
    assert_eq!(chart.cancel_all_gestures(), 0);
}

#[test]
fn removing_a_task_mid_gesture_leaves_the_handle_inert() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    assert!(chart.remove_task(&task).is_some());
    assert!(!gesture.update(&mut chart, pointer(40.0, 0.0)));
    assert!(gesture.end(&mut chart, pointer(40.0, 0.0)).is_none());
}

#[test]
fn non_finite_pointer_counts_as_no_movement() {
    let mut chart = chart_with(&["r"]);
    let task = add(&mut chart, "a", at(10), at(12), "r");

    let gesture = chart.move_start(&task, pointer(0.0, 0.0)).expect("move start");
    assert!(gesture.update(&mut chart, pointer(f64::NAN, f64::INFINITY)));
    let outcome = gesture
        .end(&mut chart, pointer(f64::NEG_INFINITY, f64::NAN))
        .expect("commit");
    assert_eq!((outcome.start, outcome.end), (at(10), at(12)));
    assert_eq!(outcome.resource, Some(ResourceId::from("r")));
}

#[test]
fn settled_callback_runs_once_after_resolution() {
    let mut chart = chart_with(&["r"]);
    let a = add(&mut chart, "a", at(10), at(12), "r");
    add(&mut chart, "b", at(21), at(23), "r");

    let settled: Rc<RefCell<Vec<GestureOutcome>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = settled.clone();
    let gesture = chart
        .move_start(&a, pointer(0.0, 0.0))
        .expect("move start")
        .on_settled(move |outcome| sink.borrow_mut().push(outcome.clone()));

    gesture.end(&mut chart, pointer(80.0, 0.0)).expect("commit");

    let settled = settled.borrow();
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].task_id, a);
    assert_eq!(settled[0].start, at(22));
    assert_eq!(settled[0].resolved_resources.as_slice(), &[ResourceId::from("r")]);
    assert_eq!(lane_height(&chart, "r"), 2);
}
