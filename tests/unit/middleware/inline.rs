use super::*;
use crate::{
    middleware::flip::{FlipOptions, flip},
    pipeline::compute::{ComputePositionConfig, ComputePositionResult, compute_position},
    pipeline::state::{Elements, MiddlewareData, ResetRects},
    platform::backend::Strategy,
    platform::static_rects::{ElementId, StaticPlatform},
};

fn wrapped(lines: Vec<Rect>) -> StaticPlatform {
    let bounding = Rect::bounding(&lines).unwrap();
    StaticPlatform::new(Rect::new(0.0, 0.0, 1000.0, 1000.0))
        .with_element("ref", bounding)
        .with_client_rects("ref", lines)
        .with_element("float", Rect::new(0.0, 0.0, 10.0, 10.0))
}

fn connected() -> StaticPlatform {
    wrapped(vec![
        Rect::new(100.0, 100.0, 200.0, 20.0),
        Rect::new(0.0, 120.0, 150.0, 20.0),
    ])
}

fn disjoint() -> StaticPlatform {
    wrapped(vec![
        Rect::new(200.0, 100.0, 100.0, 20.0),
        Rect::new(0.0, 120.0, 50.0, 20.0),
    ])
}

fn run(
    platform: &StaticPlatform,
    placement: Placement,
    options: InlineOptions,
) -> ComputePositionResult {
    let config = ComputePositionConfig::new()
        .with_placement(placement)
        .with_middleware(inline(options));
    compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        platform,
    )
    .unwrap()
}

#[test]
fn bottom_anchors_to_the_last_line() {
    let r = run(&connected(), Placement::Bottom, InlineOptions::default());
    assert_eq!((r.x, r.y), (70.0, 140.0));
}

#[test]
fn top_anchors_to_the_first_line() {
    let r = run(&connected(), Placement::Top, InlineOptions::default());
    assert_eq!((r.x, r.y), (195.0, 90.0));
}

#[test]
fn right_anchors_to_the_line_reaching_furthest() {
    let r = run(&connected(), Placement::Right, InlineOptions::default());
    assert_eq!((r.x, r.y), (300.0, 105.0));
}

#[test]
fn pointer_picks_between_disjoint_lines() {
    let r = run(&disjoint(), Placement::Bottom, InlineOptions::at(250.0, 110.0));
    assert_eq!((r.x, r.y), (245.0, 120.0));

    let r = run(&disjoint(), Placement::Bottom, InlineOptions::at(10.0, 130.0));
    assert_eq!((r.x, r.y), (20.0, 140.0));
}

#[test]
fn single_line_keeps_the_reference() {
    let p = wrapped(vec![Rect::new(10.0, 10.0, 40.0, 20.0)]);
    let r = run(&p, Placement::Bottom, InlineOptions::default());
    assert_eq!((r.x, r.y), (25.0, 30.0));
}

#[test]
fn rects_on_one_baseline_form_one_line() {
    let lines = rects_by_line(&[
        Rect::new(0.0, 0.0, 10.0, 20.0),
        Rect::new(10.0, 2.0, 10.0, 18.0),
        Rect::new(0.0, 20.0, 30.0, 20.0),
    ]);
    assert_eq!(
        lines,
        vec![
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(0.0, 20.0, 30.0, 20.0),
        ]
    );
}

fn run_once(
    platform: &StaticPlatform,
    placement: Placement,
    reference: Rect,
) -> MiddlewareReturn {
    let data = MiddlewareData::default();
    let (r, f) = (ElementId::new("ref"), ElementId::new("float"));
    let state = MiddlewareState {
        x: 0.0,
        y: 0.0,
        initial_placement: placement,
        placement,
        strategy: Strategy::Absolute,
        rects: ElementRects {
            reference,
            floating: Rect::new(0.0, 0.0, 10.0, 10.0),
        },
        elements: Elements {
            reference: &r,
            floating: &f,
        },
        middleware_data: &data,
        platform,
    };
    inline::<ElementId>(InlineOptions::default())
        .run(&state)
        .unwrap()
}

#[test]
fn replaced_reference_settles() {
    let p = connected();
    let measured = Rect::new(0.0, 100.0, 300.0, 40.0);
    let first_line = Rect::new(100.0, 100.0, 200.0, 40.0);

    let ret = run_once(&p, Placement::Top, measured);
    match ret.reset.and_then(|r| r.rects) {
        Some(ResetRects::Replace(rects)) => assert_eq!(rects.reference, first_line),
        other => panic!("expected replaced rects, got {other:?}"),
    }

    let ret = run_once(&p, Placement::Top, first_line);
    assert!(ret.reset.is_none());
}

#[test]
fn flipped_placement_gets_its_own_line_box() {
    let lines = vec![
        Rect::new(100.0, 100.0, 200.0, 20.0),
        Rect::new(0.0, 120.0, 150.0, 20.0),
    ];
    let p = StaticPlatform::new(Rect::new(0.0, 0.0, 1000.0, 150.0))
        .with_element("ref", Rect::bounding(&lines).unwrap())
        .with_client_rects("ref", lines)
        .with_element("float", Rect::new(0.0, 0.0, 10.0, 20.0));
    let config = ComputePositionConfig::new()
        .with_placement(Placement::Bottom)
        .with_middleware(inline(InlineOptions::default()))
        .with_middleware(flip(
            FlipOptions::default().with_fallback_placements(vec![Placement::Top]),
        ));
    let r = compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        &p,
    )
    .unwrap();
    assert_eq!(r.placement, Placement::Top);
    assert_eq!((r.x, r.y), (195.0, 80.0));
}

#[test]
fn allowance_covers_every_placement() {
    assert_eq!(inline::<ElementId>(InlineOptions::default()).max_resets(), 13);
}
