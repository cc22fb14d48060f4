use std::sync::Arc;
use std::time::Duration;

use toolwin_common::{
    Anchor, Event, ExtendedState, LayoutError, PaneId, Point, Rect, Size, ToolWindowId,
    ToolWindowType, ToolwinError,
};
use toolwin_config::ToolwinConfig;

use super::*;
use crate::commands::DockCommand;
use crate::decorator::Decorator;
use crate::model::{RegisterToolWindowTask, WindowInfo};
use crate::platform::headless::{
    HeadlessFrame, HeadlessFrameService, HeadlessWindowService, LoggingPopupService,
};

struct Fixture {
    mgr: ToolWindowManager,
    frames: Arc<HeadlessFrameService>,
    popups: Arc<LoggingPopupService>,
}

fn fixture_with(config: ToolwinConfig) -> Fixture {
    let frames = Arc::new(HeadlessFrameService::new(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    let popups = Arc::new(LoggingPopupService::default());
    let services = Services {
        frames: frames.clone(),
        windows: Arc::new(HeadlessWindowService::default()),
        popups: popups.clone(),
    };
    let mut mgr = ToolWindowManager::new(&config, services);
    mgr.set_pane_size(&PaneId::main(), Size::new(1000.0, 800.0))
        .unwrap();
    Fixture {
        mgr,
        frames,
        popups,
    }
}

fn fixture() -> Fixture {
    fixture_with(ToolwinConfig::default())
}

fn id(s: &str) -> ToolWindowId {
    ToolWindowId::new(s)
}

fn register(mgr: &mut ToolWindowManager, name: &str, anchor: Anchor) {
    mgr.register_tool_window(RegisterToolWindowTask::new(name).anchor(anchor))
        .unwrap();
}

fn info(mgr: &ToolWindowManager, name: &str) -> WindowInfo {
    mgr.get_info(&id(name)).cloned().unwrap()
}

fn stripe_ids(mgr: &ToolWindowManager, anchor: Anchor) -> Vec<String> {
    mgr.main_pane()
        .buttons()
        .get_stripe_for(anchor)
        .button_ids()
        .into_iter()
        .map(|i| i.to_string())
        .collect()
}

// -- Registration --

#[test]
fn register_appends_to_stripe_group() {
    let mut f = fixture();
    let mut rx = f.mgr.subscribe();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);

    assert_eq!(info(&f.mgr, "Project").order, 0);
    assert_eq!(info(&f.mgr, "Structure").order, 1);
    assert_eq!(stripe_ids(&f.mgr, Anchor::Left), vec!["Project", "Structure"]);
    assert!(f.mgr.main_pane().buttons().get_stripe_for(Anchor::Left).is_visible());
    assert_eq!(rx.try_recv().unwrap(), Event::ToolWindowRegistered(id("Project")));
    assert_eq!(rx.try_recv().unwrap(), Event::StripesChanged(Anchor::Left));
}

#[test]
fn register_twice_is_error() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    let err = f
        .mgr
        .register_tool_window(RegisterToolWindowTask::new("Project"))
        .unwrap_err();
    assert!(matches!(
        err,
        ToolwinError::Layout(LayoutError::AlreadyRegistered(_))
    ));
}

#[test]
fn unknown_window_is_error() {
    let mut f = fixture();
    let err = f.mgr.show_tool_window(&id("Nope")).unwrap_err();
    assert!(matches!(
        err,
        ToolwinError::Layout(LayoutError::UnknownToolWindow(_))
    ));
}

#[test]
fn side_tool_registration_starts_split() {
    let mut f = fixture();
    f.mgr
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();
    assert!(info(&f.mgr, "Commit").is_split);
    let button = f.mgr.main_pane().buttons().get_button_for(&id("Commit")).unwrap();
    assert!(button.is_split);
}

#[test]
fn unregister_keeps_info_and_reregister_restores_visibility() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr.show_tool_window(&id("Project")).unwrap();

    f.mgr.unregister_tool_window(&id("Project")).unwrap();
    assert!(!f.mgr.is_registered(&id("Project")));
    assert!(stripe_ids(&f.mgr, Anchor::Left).is_empty());
    assert!(info(&f.mgr, "Project").is_visible);

    register(&mut f.mgr, "Project", Anchor::Left);
    assert!(f.mgr.entry(&id("Project")).unwrap().decorator().is_some());
    assert!(info(&f.mgr, "Project").is_visible);
}

// -- Visibility and activation --

#[test]
fn show_replaces_slot_and_hide_restores_from_side_stack() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);

    assert!(f.mgr.show_tool_window(&id("Project")).unwrap());
    assert!(!f.mgr.show_tool_window(&id("Project")).unwrap());
    f.mgr.show_tool_window(&id("Structure")).unwrap();
    assert!(!info(&f.mgr, "Project").is_visible);
    assert!(info(&f.mgr, "Structure").is_visible);
    assert_eq!(f.mgr.side_stack.len(Anchor::Left), 1);

    f.mgr.hide_tool_window(&id("Structure"), false).unwrap();
    assert!(info(&f.mgr, "Project").is_visible);
    assert!(!info(&f.mgr, "Structure").is_visible);
    assert!(f.mgr.side_stack.is_empty());
}

#[test]
fn split_halves_are_visible_together() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();

    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.show_tool_window(&id("Commit")).unwrap();
    assert!(info(&f.mgr, "Project").is_visible);
    assert!(info(&f.mgr, "Commit").is_visible);

    // Both halves share the left region at the default proportion.
    let project = f.mgr.entry(&id("Project")).unwrap().decorator().unwrap().bounds().unwrap();
    let commit = f.mgr.entry(&id("Commit")).unwrap().decorator().unwrap().bounds().unwrap();
    assert_eq!(project.y, 0.0);
    assert_eq!(commit.y, project.bottom());
    assert_eq!(project.height, commit.height);
}

#[test]
fn side_weight_divides_shared_anchor() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();
    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.show_tool_window(&id("Commit")).unwrap();

    assert!(f.mgr.set_side_weight(&id("Commit"), 0.25).unwrap());
    assert!(!f.mgr.set_side_weight(&id("Commit"), 0.25).unwrap());
    assert_eq!(info(&f.mgr, "Commit").side_weight, Some(0.25));
    assert_eq!(info(&f.mgr, "Project").side_weight, Some(0.75));
    assert_eq!(f.mgr.main_pane().state().split_proportion(&id("Commit")), 0.25);

    let project = f.mgr.entry(&id("Project")).unwrap().decorator().unwrap().bounds().unwrap();
    let commit = f.mgr.entry(&id("Commit")).unwrap().decorator().unwrap().bounds().unwrap();
    assert_eq!(project.height, 600.0);
    assert_eq!(commit.height, 200.0);
    assert_eq!(commit.y, project.bottom());
}

#[test]
fn side_weight_survives_state_round_trip() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();
    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.show_tool_window(&id("Commit")).unwrap();
    f.mgr.set_side_weight(&id("Project"), 0.3).unwrap();
    let state = f.mgr.state();

    // Seeded before any window registers.
    let mut restored = fixture().mgr;
    restored.load_state(state.clone()).unwrap();
    assert_eq!(restored.main_pane().state().split_proportion(&id("Project")), 0.3);
    register(&mut restored, "Project", Anchor::Left);
    restored
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();
    assert_eq!(info(&restored, "Project").side_weight, Some(0.3));
    let project = restored.entry(&id("Project")).unwrap().decorator().unwrap().bounds().unwrap();
    assert_eq!(project.height, 800.0 * 0.3);

    // Re-seeded when a layout replaces the live one.
    let mut live = fixture().mgr;
    register(&mut live, "Project", Anchor::Left);
    assert_eq!(live.main_pane().state().split_proportion(&id("Project")), 0.5);
    live.load_state(state).unwrap();
    assert_eq!(live.main_pane().state().split_proportion(&id("Project")), 0.3);
}

#[test]
fn hide_side_hides_anchor_and_clears_side_stack() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);
    f.mgr
        .register_tool_window(RegisterToolWindowTask::new("Commit").anchor(Anchor::Left).side_tool(true))
        .unwrap();
    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.show_tool_window(&id("Structure")).unwrap();
    f.mgr.show_tool_window(&id("Commit")).unwrap();

    f.mgr.hide_tool_window(&id("Structure"), true).unwrap();
    for name in ["Project", "Structure", "Commit"] {
        assert!(!info(&f.mgr, name).is_visible, "{name} still visible");
    }
    assert!(f.mgr.side_stack.is_empty());
}

#[test]
fn hiding_active_window_activates_previous() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);

    f.mgr.activate_tool_window(&id("Project")).unwrap();
    f.mgr.activate_tool_window(&id("Terminal")).unwrap();
    assert_eq!(f.mgr.active_id(), Some(&id("Terminal")));
    assert!(!info(&f.mgr, "Project").is_active);
    assert!(info(&f.mgr, "Project").is_visible);

    f.mgr.hide_tool_window(&id("Terminal"), false).unwrap();
    assert_eq!(f.mgr.active_id(), Some(&id("Project")));
}

#[test]
fn hide_publishes_event() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr.show_tool_window(&id("Project")).unwrap();
    let mut rx = f.mgr.subscribe();

    assert!(f.mgr.hide_tool_window(&id("Project"), false).unwrap());
    assert!(!f.mgr.hide_tool_window(&id("Project"), false).unwrap());
    assert_eq!(rx.try_recv().unwrap(), Event::ToolWindowHidden(id("Project")));
}

// -- Anchors, types and layouts --

#[test]
fn drag_project_to_bottom_gap() {
    let mut f = fixture();
    let mut project = WindowInfo::new(id("Project"), Anchor::Left);
    project.order = 0;
    project.weight = Some(0.25);
    f.mgr
        .load_state(WorkspaceState {
            layout: vec![project],
            ..WorkspaceState::default()
        })
        .unwrap();

    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Run", Anchor::Bottom);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    register(&mut f.mgr, "Problems", Anchor::Bottom);
    assert_eq!(info(&f.mgr, "Project").weight, Some(0.25));

    assert!(f.mgr.start_drag(&id("Project")).unwrap());
    // All stripes are shown while dragging; the bottom stripe spans
    // y = 760..800 with buttons at x = 0, 44 and 88.
    let preview = f.mgr.drag_to(Point::new(100.0, 780.0)).unwrap().unwrap();
    assert_eq!(preview.anchor, Anchor::Bottom);
    assert_eq!(preview.index, 2);
    assert!(f.mgr.stop_drag().unwrap());

    let project = info(&f.mgr, "Project");
    assert_eq!(project.anchor, Anchor::Bottom);
    assert_eq!(project.order, 2);
    assert!(!project.is_split);
    assert_eq!(project.weight, Some(0.25));
    assert!(stripe_ids(&f.mgr, Anchor::Left).is_empty());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Run", "Terminal", "Project", "Problems"]
    );
    assert_eq!(info(&f.mgr, "Problems").order, 3);
    assert!(!f.mgr.main_pane().buttons().get_stripe_for(Anchor::Left).is_visible());
}

#[test]
fn drag_without_drop_restores_stripes() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);

    assert!(f.mgr.start_drag(&id("Project")).unwrap());
    assert!(!f.mgr.start_drag(&id("Project")).unwrap());
    assert!(f.mgr.main_pane().buttons().stripes().all(|s| s.is_visible()));
    assert!(f.mgr.main_pane().state().is_stripes_overlaid());

    assert_eq!(f.mgr.drag_to(Point::new(500.0, 400.0)).unwrap(), None);
    assert!(!f.mgr.stop_drag().unwrap());

    let buttons = f.mgr.main_pane().buttons();
    assert!(buttons.get_stripe_for(Anchor::Left).is_visible());
    assert!(!buttons.get_stripe_for(Anchor::Top).is_visible());
    assert!(!f.mgr.main_pane().state().is_stripes_overlaid());
    assert_eq!(info(&f.mgr, "Project").anchor, Anchor::Left);
}

#[test]
fn drag_to_end_of_own_stripe_reorders() {
    let mut f = fixture();
    register(&mut f.mgr, "Run", Anchor::Bottom);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    register(&mut f.mgr, "Problems", Anchor::Bottom);

    assert!(f.mgr.start_drag(&id("Run")).unwrap());
    let preview = f.mgr.drag_to(Point::new(300.0, 780.0)).unwrap().unwrap();
    assert_eq!(preview.anchor, Anchor::Bottom);
    assert_eq!(preview.index, 2);
    assert!(f.mgr.stop_drag().unwrap());

    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Terminal", "Problems", "Run"]
    );
    assert_eq!(info(&f.mgr, "Run").order, 2);
    assert_eq!(info(&f.mgr, "Terminal").order, 0);
}

#[test]
fn drop_on_own_position_reports_no_change() {
    let mut f = fixture();
    register(&mut f.mgr, "Run", Anchor::Bottom);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    register(&mut f.mgr, "Problems", Anchor::Bottom);

    // In front of Terminal is where Run already sits.
    assert!(f.mgr.start_drag(&id("Run")).unwrap());
    f.mgr.drag_to(Point::new(50.0, 780.0)).unwrap().unwrap();
    assert!(!f.mgr.stop_drag().unwrap());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Run", "Terminal", "Problems"]
    );
}

#[test]
fn cancel_drag_tolerates_stripes_already_ended() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    assert!(f.mgr.start_drag(&id("Project")).unwrap());

    let pane = &mut f.mgr.panes[0];
    pane.buttons.stop_drag(&mut pane.state).unwrap();
    f.mgr.cancel_drag();

    assert!(!f.mgr.is_dragging());
    assert!(f.mgr.stop_drag().is_err());
    assert!(!f.mgr.main_pane().buttons().get_stripe_for(Anchor::Top).is_visible());
    assert_eq!(info(&f.mgr, "Project").anchor, Anchor::Left);
}

#[test]
fn drag_calls_need_a_session() {
    let mut f = fixture();
    let err = f.mgr.drag_to(Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, ToolwinError::Layout(LayoutError::NoDragInProgress)));
    assert!(f.mgr.stop_drag().is_err());
}

#[test]
fn moving_visible_window_reshows_it() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr.activate_tool_window(&id("Project")).unwrap();

    f.mgr.set_tool_window_anchor(&id("Project"), Anchor::Right, -1).unwrap();
    let project = info(&f.mgr, "Project");
    assert_eq!(project.anchor, Anchor::Right);
    assert!(project.is_visible);
    assert!(project.is_active);

    // Only the right stripe is left: content is 960 wide.
    let bounds = f.mgr.entry(&id("Project")).unwrap().decorator().unwrap().bounds();
    assert_eq!(
        bounds,
        Some(Rect::new(960.0 - 960.0 * 0.33, 0.0, 960.0 * 0.33, 800.0))
    );
}

#[test]
fn set_side_tool_moves_between_halves() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);

    f.mgr.set_side_tool(&id("Project"), true).unwrap();
    assert!(info(&f.mgr, "Project").is_split);
    assert_eq!(info(&f.mgr, "Structure").order, 0);
    let stripe = f.mgr.main_pane().buttons().get_stripe_for(Anchor::Left);
    assert!(stripe.get_button_for(&id("Project")).unwrap().is_split);
}

#[test]
fn same_stripe_moves_reorder_buttons() {
    let mut f = fixture();
    for name in ["Run", "Terminal", "Problems", "Services"] {
        register(&mut f.mgr, name, Anchor::Bottom);
    }

    // To the end.
    assert!(f.mgr.set_tool_window_anchor(&id("Run"), Anchor::Bottom, -1).unwrap());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Terminal", "Problems", "Services", "Run"]
    );
    assert_eq!(info(&f.mgr, "Run").order, 3);
    assert!(!f.mgr.set_tool_window_anchor(&id("Run"), Anchor::Bottom, -1).unwrap());

    // To the front.
    assert!(f.mgr.set_tool_window_anchor(&id("Services"), Anchor::Bottom, 0).unwrap());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Services", "Terminal", "Problems", "Run"]
    );

    // Into the middle, in front of Problems.
    let problems = info(&f.mgr, "Problems").order;
    assert!(f.mgr.set_tool_window_anchor(&id("Run"), Anchor::Bottom, problems).unwrap());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Bottom),
        vec!["Services", "Terminal", "Run", "Problems"]
    );
    let orders: Vec<i32> = ["Services", "Terminal", "Run", "Problems"]
        .iter()
        .map(|n| info(&f.mgr, n).order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    // In front of the next button is the current slot.
    let problems = info(&f.mgr, "Problems").order;
    assert!(!f.mgr.set_tool_window_anchor(&id("Run"), Anchor::Bottom, problems).unwrap());
}

#[test]
fn execute_move_to_end_of_same_stripe() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);
    register(&mut f.mgr, "Commit", Anchor::Left);

    let cmd: DockCommand = "move:Project:left:end".parse().unwrap();
    assert!(f.mgr.execute(cmd.clone()).unwrap());
    assert_eq!(
        stripe_ids(&f.mgr, Anchor::Left),
        vec!["Structure", "Commit", "Project"]
    );
    assert!(!f.mgr.execute(cmd).unwrap());
}

#[test]
fn set_side_tool_and_anchor_rejects_unknown_pane() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    let err = f
        .mgr
        .set_side_tool_and_anchor(&id("Project"), PaneId::new("detached"), Anchor::Top, 0, false)
        .unwrap_err();
    assert!(matches!(err, ToolwinError::Layout(LayoutError::UnknownPane(_))));

    assert!(f.mgr.add_pane(PaneId::new("detached")));
    assert!(!f.mgr.add_pane(PaneId::new("detached")));
    f.mgr
        .set_side_tool_and_anchor(&id("Project"), PaneId::new("detached"), Anchor::Top, 0, false)
        .unwrap();
    assert!(stripe_ids(&f.mgr, Anchor::Left).is_empty());
    let detached = f.mgr.pane(&PaneId::new("detached")).unwrap();
    assert!(detached.buttons().get_button_for(&id("Project")).is_some());
}

#[test]
fn floating_type_tracks_host_window_bounds() {
    let mut f = fixture();
    register(&mut f.mgr, "Git", Anchor::Bottom);
    assert!(f.mgr.set_tool_window_type(&id("Git"), ToolWindowType::Floating).unwrap());
    assert!(!f.mgr.set_tool_window_type(&id("Git"), ToolWindowType::Floating).unwrap());
    f.mgr.show_tool_window(&id("Git")).unwrap();

    assert_eq!(
        f.frames.window_bounds(&id("Git")),
        Some(Rect::new(440.0, 250.0, 400.0, 300.0))
    );

    let moved = Rect::new(100.0, 100.0, 500.0, 400.0);
    assert!(f.frames.simulate_user_bounds(&id("Git"), moved));
    assert_eq!(f.mgr.dispatch_decorator_events(), 2);
    assert_eq!(info(&f.mgr, "Git").floating_bounds, Some(moved));

    f.mgr.set_tool_window_type(&id("Git"), ToolWindowType::Docked).unwrap();
    assert!(!f.frames.is_window_live(&id("Git")));
    let git = info(&f.mgr, "Git");
    assert!(git.is_visible);
    assert_eq!(git.floating_bounds, Some(moved));
    assert_eq!(f.mgr.dispatch_decorator_events(), 0);
}

#[test]
fn windowed_maximize_toggles_frame_state() {
    let mut f = fixture();
    register(&mut f.mgr, "Git", Anchor::Bottom);
    f.mgr.set_tool_window_type(&id("Git"), ToolWindowType::Windowed).unwrap();
    f.mgr.show_tool_window(&id("Git")).unwrap();

    assert!(f.mgr.execute(DockCommand::ToggleMaximized(id("Git"))).unwrap());
    assert_eq!(f.frames.window_state(&id("Git")), Some(ExtendedState::MAXIMIZED_BOTH));
    assert!(f.mgr.is_maximized(&id("Git")));

    f.mgr.hide_tool_window(&id("Git"), false).unwrap();
    let git = info(&f.mgr, "Git");
    assert!(git.is_maximized);
    assert_eq!(git.floating_bounds, Some(Rect::new(440.0, 250.0, 400.0, 300.0)));
}

#[test]
fn floating_maximize_covers_frame() {
    let mut f = fixture();
    register(&mut f.mgr, "Git", Anchor::Bottom);
    f.mgr.set_tool_window_type(&id("Git"), ToolWindowType::Floating).unwrap();
    f.mgr.show_tool_window(&id("Git")).unwrap();

    assert!(f.mgr.set_maximized(&id("Git"), true).unwrap());
    assert_eq!(
        f.frames.window_bounds(&id("Git")),
        Some(Rect::new(0.0, 0.0, 1280.0, 800.0))
    );
    assert!(f.mgr.set_maximized(&id("Git"), false).unwrap());
    assert_eq!(
        f.frames.window_bounds(&id("Git")),
        Some(Rect::new(440.0, 250.0, 400.0, 300.0))
    );
}

#[test]
fn docked_maximize_restores_previous_window() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.show_tool_window(&id("Terminal")).unwrap();

    assert!(f.mgr.set_maximized(&id("Project"), true).unwrap());
    assert!(!f.mgr.set_maximized(&id("Project"), true).unwrap());
    assert_eq!(info(&f.mgr, "Project").weight, Some(1.0));
    assert!(f.mgr.is_maximized(&id("Project")));

    f.mgr.set_maximized(&id("Terminal"), true).unwrap();
    assert_eq!(info(&f.mgr, "Project").weight, Some(0.33));
    assert!(!f.mgr.is_maximized(&id("Project")));
    assert_eq!(info(&f.mgr, "Terminal").weight, Some(1.0));

    f.mgr.set_maximized(&id("Terminal"), false).unwrap();
    assert_eq!(info(&f.mgr, "Terminal").weight, Some(0.33));
    assert!(!f.mgr.is_maximized(&id("Terminal")));
}

#[test]
fn maximized_window_is_saved_with_restore_weight() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr.show_tool_window(&id("Project")).unwrap();
    f.mgr.set_maximized(&id("Project"), true).unwrap();

    let state = f.mgr.state();
    let project = state.layout.iter().find(|i| i.id == id("Project")).unwrap();
    assert_eq!(project.weight, Some(0.33));
}

#[test]
fn stretch_converts_pixels_to_weight() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    f.mgr.show_tool_window(&id("Project")).unwrap();

    // Content is 960 wide next to the left stripe.
    assert!(f.mgr.stretch_width(&id("Project"), 96.0).unwrap());
    let weight = info(&f.mgr, "Project").weight.unwrap();
    assert!((weight - 0.43).abs() < 1e-9);
    assert!((f.mgr.layout().unified_weights().left - weight).abs() < 1e-9);

    assert!(!f.mgr.stretch_height(&id("Project"), 50.0).unwrap());

    f.mgr.stretch_width(&id("Project"), -10_000.0).unwrap();
    assert_eq!(info(&f.mgr, "Project").weight, Some(0.05));
    assert!(!f.mgr.stretch_width(&id("Project"), -10.0).unwrap());
}

#[test]
fn stretch_ignores_hidden_windows() {
    let mut f = fixture();
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    assert!(!f.mgr.stretch_height(&id("Terminal"), 40.0).unwrap());
    assert_eq!(info(&f.mgr, "Terminal").weight, None);
}

#[test]
fn set_layout_hides_moves_and_shows() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    f.mgr.show_tool_window(&id("Project")).unwrap();

    let mut target = f.mgr.layout().clone();
    target.info_mut(&id("Project")).unwrap().is_visible = false;
    target
        .place(&id("Terminal"), PaneId::main(), Anchor::Right, false, -1)
        .unwrap();
    target.info_mut(&id("Terminal")).unwrap().is_visible = true;

    f.mgr.set_layout(&target).unwrap();
    assert!(!info(&f.mgr, "Project").is_visible);
    assert!(f.mgr.entry(&id("Project")).unwrap().decorator().is_none());
    let terminal = info(&f.mgr, "Terminal");
    assert_eq!(terminal.anchor, Anchor::Right);
    assert!(terminal.is_visible);
    assert_eq!(stripe_ids(&f.mgr, Anchor::Right), vec!["Terminal"]);
    assert!(stripe_ids(&f.mgr, Anchor::Bottom).is_empty());
}

#[test]
fn restore_saved_layout_swaps_layouts() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    assert!(!f.mgr.restore_saved_layout().unwrap());

    let mut saved = f.mgr.layout().clone();
    saved.place(&id("Project"), PaneId::main(), Anchor::Top, false, -1).unwrap();
    f.mgr.set_layout_to_restore_later(Some(saved));

    assert!(f.mgr.restore_saved_layout().unwrap());
    assert_eq!(info(&f.mgr, "Project").anchor, Anchor::Top);
    let previous = f.mgr.layout_to_restore().unwrap();
    assert_eq!(previous.get_info(&id("Project")).unwrap().anchor, Anchor::Left);
}

#[test]
fn default_state_applies_only_to_fresh_windows() {
    let mut f = fixture();
    let persisted = WindowInfo::new(id("Project"), Anchor::Left);
    f.mgr
        .load_state(WorkspaceState {
            layout: vec![persisted],
            ..WorkspaceState::default()
        })
        .unwrap();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Git", Anchor::Bottom);

    assert!(!f
        .mgr
        .set_default_state(&id("Project"), Some(Anchor::Right), None, None)
        .unwrap());
    assert_eq!(info(&f.mgr, "Project").anchor, Anchor::Left);

    let bounds = Rect::new(10.0, 10.0, 300.0, 200.0);
    assert!(f
        .mgr
        .set_default_state(&id("Git"), Some(Anchor::Right), Some(ToolWindowType::Floating), Some(bounds))
        .unwrap());
    let git = info(&f.mgr, "Git");
    assert_eq!(git.anchor, Anchor::Right);
    assert_eq!(git.window_type, ToolWindowType::Floating);
    assert_eq!(git.floating_bounds, Some(bounds));
}

// -- Commands --

#[test]
fn execute_move_reports_change() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Structure", Anchor::Left);

    let cmd: DockCommand = "move:Structure:left:0".parse().unwrap();
    assert!(f.mgr.execute(cmd.clone()).unwrap());
    assert_eq!(stripe_ids(&f.mgr, Anchor::Left), vec!["Structure", "Project"]);
    assert!(!f.mgr.execute(cmd).unwrap());

    let cmd: DockCommand = "move:Project:left:end:split".parse().unwrap();
    assert!(f.mgr.execute(cmd).unwrap());
    assert!(info(&f.mgr, "Project").is_split);
}

#[test]
fn execute_show_hide_activate() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);

    assert!(f.mgr.execute(DockCommand::Show(id("Project"))).unwrap());
    assert!(f.mgr.execute(DockCommand::Activate(id("Project"))).unwrap());
    assert!(!f.mgr.execute(DockCommand::Activate(id("Project"))).unwrap());
    assert!(f
        .mgr
        .execute(DockCommand::Hide {
            id: id("Project"),
            hide_side: false
        })
        .unwrap());
    assert!(f.mgr.execute(DockCommand::Show(id("Nope"))).is_err());
}

// -- Notifications, icons, frame --

#[test]
fn balloon_attaches_to_stripe_button() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);

    assert!(f.mgr.can_show_notification(&id("Project")));
    assert!(f.mgr.notify_by_balloon(&id("Project"), "Indexing done").unwrap());
    let shown = f.popups.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].1, "Indexing done");
    assert_eq!(shown[0].0, Rect::new(0.0, 0.0, 40.0, 40.0));

    assert!(f.mgr.set_show_stripe_button(&id("Project"), false).unwrap());
    assert!(!f.mgr.can_show_notification(&id("Project")));
    assert!(!f.mgr.notify_by_balloon(&id("Project"), "again").unwrap());
    assert_eq!(f.popups.shown().len(), 1);
}

#[tokio::test]
async fn icon_loads_within_deadline() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);

    assert!(f.mgr.load_icon(&id("Project"), || Ok(vec![1, 2, 3])).await.unwrap());
    let button = f.mgr.main_pane().buttons().get_button_for(&id("Project")).unwrap();
    assert_eq!(button.icon, Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn slow_icon_is_skipped() {
    let mut config = ToolwinConfig::default();
    config.docking.resource_fetch_timeout_ms = 50;
    let mut f = fixture_with(config);
    register(&mut f.mgr, "Project", Anchor::Left);

    let loaded = f
        .mgr
        .load_icon(&id("Project"), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(vec![1])
        })
        .await
        .unwrap();
    assert!(!loaded);
    let button = f.mgr.main_pane().buttons().get_button_for(&id("Project")).unwrap();
    assert_eq!(button.icon, None);
}

#[test]
fn frame_bounds_flow_into_state() {
    let mut f = fixture();
    let live = HeadlessFrame::default();
    let bounds = Rect::new(20.0, 30.0, 1200.0, 760.0);

    f.mgr.on_frame_bounds_changed(Some(bounds));
    let frame = f.mgr.frame_info(&live).unwrap();
    assert_eq!(frame.bounds, Some(bounds));
    assert_eq!(f.mgr.state().frame.bounds, Some(bounds));
}

// -- Persistence --

#[test]
fn state_survives_save_and_load() {
    let mut f = fixture();
    register(&mut f.mgr, "Project", Anchor::Left);
    register(&mut f.mgr, "Terminal", Anchor::Bottom);
    f.mgr.set_tool_window_anchor(&id("Terminal"), Anchor::Right, -1).unwrap();
    f.mgr.show_tool_window(&id("Project")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.toml");
    f.mgr.save_state_to(&path).unwrap();

    let mut restored = fixture().mgr;
    assert!(restored.load_state_from(&path).unwrap());
    register(&mut restored, "Terminal", Anchor::Bottom);
    register(&mut restored, "Project", Anchor::Left);

    assert_eq!(info(&restored, "Terminal").anchor, Anchor::Right);
    assert!(info(&restored, "Terminal").is_from_persistent_settings);
    assert!(info(&restored, "Project").is_visible);
    assert!(restored.entry(&id("Project")).unwrap().decorator().is_some());
}

#[test]
fn missing_state_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = fixture();
    assert!(!f.mgr.load_state_from(&dir.path().join("absent.toml")).unwrap());
}
