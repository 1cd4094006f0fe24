use super::*;
use crate::{
    foundation::core::ElementRects,
    geometry::placement::Placement,
    pipeline::state::{Elements, MiddlewareData},
    platform::backend::{Platform, Strategy},
    platform::static_rects::{ElementId, StaticPlatform},
};

fn platform() -> StaticPlatform {
    StaticPlatform::new(Rect::new(0.0, 0.0, 100.0, 100.0))
        .with_element("ref", Rect::new(40.0, 40.0, 20.0, 20.0))
        .with_element("float", Rect::new(0.0, 0.0, 10.0, 10.0))
}

fn overflow_at(
    platform: &StaticPlatform,
    x: f64,
    y: f64,
    options: &DetectOverflowOptions<ElementId>,
) -> SideObject {
    let reference = ElementId::new("ref");
    let floating = ElementId::new("float");
    let data = MiddlewareData::default();
    let rects: ElementRects = platform
        .get_element_rects(&reference, &floating, Strategy::Absolute)
        .unwrap();
    let state = MiddlewareState {
        x,
        y,
        initial_placement: Placement::Bottom,
        placement: Placement::Bottom,
        strategy: Strategy::Absolute,
        rects,
        elements: Elements {
            reference: &reference,
            floating: &floating,
        },
        middleware_data: &data,
        platform,
    };
    detect_overflow(&state, options).unwrap()
}

#[test]
fn signed_overflow_on_each_side() {
    let o = overflow_at(&platform(), 95.0, 50.0, &DetectOverflowOptions::default());
    assert_eq!(
        o,
        SideObject {
            top: -50.0,
            right: 5.0,
            bottom: -40.0,
            left: -95.0,
        }
    );
}

#[test]
fn padding_shrinks_the_clipping_rect() {
    let opts = DetectOverflowOptions::default().with_padding(5.0);
    let o = overflow_at(&platform(), 95.0, 50.0, &opts);
    assert_eq!(o.right, 10.0);
    assert_eq!(o.left, -90.0);
}

#[test]
fn reference_context_measures_the_reference() {
    let opts = DetectOverflowOptions {
        element_context: ElementContext::Reference,
        ..DetectOverflowOptions::default()
    };
    let o = overflow_at(&platform(), 0.0, 0.0, &opts);
    assert_eq!(o.top, -40.0);
    assert_eq!(o.right, -40.0);
}

#[test]
fn explicit_boundary_rect_is_respected() {
    let opts = DetectOverflowOptions::default()
        .with_boundary(Boundary::Rect(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let o = overflow_at(&platform(), 45.0, 45.0, &opts);
    assert_eq!(o.right, 5.0);
    assert_eq!(o.bottom, 5.0);
}

#[test]
fn override_rect_replaces_floating_rect() {
    let opts = DetectOverflowOptions {
        rect: Some(Rect::new(-10.0, 0.0, 5.0, 5.0)),
        ..DetectOverflowOptions::default()
    };
    let o = overflow_at(&platform(), 50.0, 50.0, &opts);
    assert_eq!(o.left, 10.0);
}

#[test]
fn offset_parent_scale_normalizes_overflow() {
    let p = platform()
        .with_element("parent", Rect::new(0.0, 0.0, 100.0, 100.0))
        .with_scale("parent", Coords::new(2.0, 2.0))
        .with_offset_parent("float", "parent");
    let o = overflow_at(&p, 45.0, 0.0, &DetectOverflowOptions::default());
    assert_eq!(o.right, 5.0);
    assert_eq!(o.top, 0.0);
}
