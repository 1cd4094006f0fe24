use super::*;
use crate::{
    foundation::core::Rect,
    pipeline::compute::{ComputePositionConfig, ComputePositionResult, compute_position},
    platform::static_rects::{ElementId, StaticPlatform},
};

fn near_left_edge() -> StaticPlatform {
    StaticPlatform::new(Rect::new(0.0, 0.0, 100.0, 100.0))
        .with_element("ref", Rect::new(10.0, 40.0, 20.0, 20.0))
        .with_element("float", Rect::new(0.0, 0.0, 30.0, 30.0))
}

fn run(platform: &StaticPlatform, middleware: AutoPlacement<ElementId>) -> ComputePositionResult {
    let config = ComputePositionConfig::new().with_middleware(middleware);
    compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        platform,
    )
    .unwrap()
}

#[test]
fn picks_the_side_with_most_space() {
    let r = run(&near_left_edge(), auto_placement(AutoPlacementOptions::default()));
    assert_eq!(r.placement, Placement::Right);
    assert_eq!((r.x, r.y), (30.0, 35.0));
    let data = r.middleware_data.auto_placement().unwrap();
    assert_eq!(data.index, 4);
    assert_eq!(data.overflows.len(), 4);
}

#[test]
fn default_list_holds_the_centered_placements() {
    assert_eq!(
        AutoPlacementOptions::<ElementId>::default().placement_list(),
        vec![
            Placement::Top,
            Placement::Right,
            Placement::Bottom,
            Placement::Left,
        ]
    );
    let explicit = AutoPlacementOptions::<ElementId>::default()
        .with_allowed_placements(vec![Placement::TopStart, Placement::Left]);
    assert_eq!(
        explicit.placement_list(),
        vec![Placement::TopStart, Placement::Left]
    );
}

#[test]
fn ties_keep_list_order() {
    let options =
        AutoPlacementOptions::default().with_allowed_placements(vec![Placement::Top, Placement::Bottom]);
    let r = run(&near_left_edge(), auto_placement(options));
    assert_eq!(r.placement, Placement::Top);
    assert_eq!(r.y, 10.0);
}

#[test]
fn preferred_alignment_is_tried_first() {
    let options = AutoPlacementOptions::default().with_alignment(Alignment::Start);
    assert_eq!(
        options.placement_list()[..4],
        [
            Placement::TopStart,
            Placement::RightStart,
            Placement::BottomStart,
            Placement::LeftStart,
        ]
    );
    assert_eq!(options.placement_list().len(), 8);

    let r = run(&near_left_edge(), auto_placement(options));
    assert_eq!(r.placement, Placement::RightStart);
    assert_eq!((r.x, r.y), (30.0, 40.0));
}

#[test]
fn auto_alignment_off_keeps_only_the_preferred_alignment() {
    let options = AutoPlacementOptions::<ElementId>::default()
        .with_alignment(Alignment::End)
        .with_auto_alignment(false);
    assert_eq!(
        options.placement_list(),
        vec![
            Placement::TopEnd,
            Placement::RightEnd,
            Placement::BottomEnd,
            Placement::LeftEnd,
        ]
    );
}

#[test]
fn reset_allowance_covers_every_candidate() {
    assert_eq!(
        auto_placement::<ElementId>(AutoPlacementOptions::default()).max_resets(),
        5
    );
    let options = AutoPlacementOptions::<ElementId>::default()
        .with_allowed_placements(vec![Placement::Top, Placement::Bottom]);
    assert_eq!(auto_placement(options).max_resets(), 3);
}

#[test]
fn empty_candidate_list_is_a_no_op() {
    let options = AutoPlacementOptions::default().with_allowed_placements(Vec::new());
    let r = run(&near_left_edge(), auto_placement(options));
    assert_eq!(r.placement, Placement::Bottom);
    assert!(r.middleware_data.auto_placement().is_none());
}
