use super::*;
use crate::{
    foundation::core::Rect,
    geometry::placement::Side,
    pipeline::compute::{ComputePositionConfig, ComputePositionResult, compute_position},
    platform::static_rects::{ElementId, StaticPlatform},
};

fn platform(reference: Rect, floating: Rect) -> StaticPlatform {
    StaticPlatform::new(Rect::new(0.0, 0.0, 100.0, 100.0))
        .with_element("ref", reference)
        .with_element("float", floating)
}

fn run(platform: &StaticPlatform, middleware: Shift<ElementId>) -> ComputePositionResult {
    let config = ComputePositionConfig::new().with_middleware(middleware);
    compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        platform,
    )
    .unwrap()
}

fn near_right_edge() -> StaticPlatform {
    platform(
        Rect::new(90.0, 40.0, 20.0, 20.0),
        Rect::new(0.0, 0.0, 40.0, 10.0),
    )
}

fn past_right_edge() -> StaticPlatform {
    platform(
        Rect::new(150.0, 40.0, 20.0, 20.0),
        Rect::new(0.0, 0.0, 40.0, 10.0),
    )
}

#[test]
fn clamps_main_axis_by_the_overflow() {
    let r = run(&near_right_edge(), shift(ShiftOptions::default()));
    assert_eq!((r.x, r.y), (60.0, 60.0));
    let data = r.middleware_data.shift().unwrap();
    assert_eq!((data.x, data.y), (-20.0, 0.0));
    assert_eq!(data.enabled, ShiftEnabled { x: true, y: false });
    assert!(data.limit.is_none());
}

#[test]
fn padding_widens_the_shift() {
    let options = ShiftOptions::default()
        .with_detect_overflow(DetectOverflowOptions::default().with_padding(5.0));
    let r = run(&near_right_edge(), shift(options));
    assert_eq!(r.x, 55.0);
}

#[test]
fn cross_axis_is_opt_in() {
    let p = platform(
        Rect::new(40.0, 95.0, 20.0, 20.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
    );
    let off = run(&p, shift(ShiftOptions::default()));
    assert_eq!((off.x, off.y), (45.0, 115.0));

    let on = run(&p, shift(ShiftOptions::default().with_cross_axis(true)));
    assert_eq!((on.x, on.y), (45.0, 90.0));
    assert_eq!(
        on.middleware_data.shift().unwrap().enabled,
        ShiftEnabled { x: true, y: true }
    );
}

#[test]
fn limiter_keeps_the_element_attached() {
    let r = run(
        &past_right_edge(),
        shift(ShiftOptions::default().with_limiter(limit_shift())),
    );
    assert_eq!(r.x, 110.0);
    let data = r.middleware_data.shift().unwrap();
    assert_eq!(data.x, -30.0);
    assert_eq!(
        data.limit,
        Some(LimitShiftData {
            x: 50.0,
            y: 0.0,
            constrained: true,
        })
    );
}

#[test]
fn limiter_is_inactive_while_attached() {
    let r = run(
        &near_right_edge(),
        shift(ShiftOptions::default().with_limiter(limit_shift())),
    );
    assert_eq!(r.x, 60.0);
    assert!(!r.middleware_data.shift().unwrap().limit.unwrap().constrained);
}

#[test]
fn limiter_offset_can_follow_the_placement() {
    let limiter = limit_shift().with_offset_fn(|s: &MiddlewareState<'_, ElementId>| {
        if s.placement.side() == Side::Bottom {
            15.0
        } else {
            0.0
        }
    });
    let r = run(
        &past_right_edge(),
        shift(ShiftOptions::default().with_limiter(limiter)),
    );
    assert_eq!(r.x, 125.0);
}

#[test]
fn limiter_without_main_axis_leaves_raw_shift() {
    let r = run(
        &past_right_edge(),
        shift(ShiftOptions::default().with_limiter(limit_shift().with_main_axis(false))),
    );
    assert_eq!(r.x, 60.0);
}

#[test]
fn limit_shift_offset_deserializes() {
    let v: LimitShiftOffset = serde_json::from_str(r#"{"crossAxis": 4}"#).unwrap();
    assert_eq!(
        v,
        LimitShiftOffset::Axes(LimitShiftAxes {
            main_axis: 0.0,
            cross_axis: 4.0,
        })
    );
}
