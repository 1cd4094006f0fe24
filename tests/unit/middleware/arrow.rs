use super::*;
use crate::{
    foundation::core::Rect,
    geometry::placement::Placement,
    pipeline::compute::{ComputePositionConfig, compute_position},
    platform::static_rects::{ElementId, StaticPlatform},
};

fn platform() -> StaticPlatform {
    StaticPlatform::new(Rect::new(0.0, 0.0, 1000.0, 1000.0))
        .with_element("ref", Rect::new(40.0, 100.0, 20.0, 20.0))
        .with_element("float", Rect::new(0.0, 0.0, 100.0, 20.0))
        .with_element("arrow", Rect::new(0.0, 0.0, 10.0, 10.0))
}

fn arrow_data(placement: Placement, options: ArrowOptions<ElementId>) -> ArrowData {
    let config = ComputePositionConfig::new()
        .with_placement(placement)
        .with_middleware(arrow(options));
    let r = compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        &platform(),
    )
    .unwrap();
    *r.middleware_data.arrow().unwrap()
}

#[test]
fn centers_under_the_reference() {
    let data = arrow_data(Placement::Bottom, ArrowOptions::new(ElementId::new("arrow")));
    assert_eq!(
        data,
        ArrowData {
            x: Some(45.0),
            y: None,
            center_offset: 0.0,
            alignment_offset: None,
            clamped: false,
        }
    );
}

#[test]
fn side_placements_report_y() {
    let data = arrow_data(Placement::Right, ArrowOptions::new(ElementId::new("arrow")));
    assert_eq!(data.x, None);
    assert_eq!(data.y, Some(5.0));
    assert!(!data.clamped);
}

#[test]
fn padding_clamps_the_arrow() {
    let options = ArrowOptions::new(ElementId::new("arrow")).with_padding(8.0);
    let data = arrow_data(Placement::BottomStart, options);
    assert_eq!(data.x, Some(8.0));
    assert!(data.clamped);
}

#[test]
fn aligned_floating_moves_to_keep_the_arrow_on_a_small_reference() {
    let config = ComputePositionConfig::new()
        .with_placement(Placement::BottomStart)
        .with_middleware(arrow(
            ArrowOptions::new(ElementId::new("arrow")).with_padding(8.0),
        ));
    let r = compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        &platform(),
    )
    .unwrap();
    assert_eq!((r.x, r.y), (37.0, 120.0));
    let data = r.middleware_data.arrow().unwrap();
    assert_eq!(data.alignment_offset, Some(-3.0));
    assert_eq!(data.center_offset, 0.0);

    let json = serde_json::to_value(data).unwrap();
    assert_eq!(json["alignmentOffset"], -3.0);
}

#[test]
fn wide_reference_needs_no_alignment_offset() {
    let options = ArrowOptions::new(ElementId::new("arrow")).with_padding(4.0);
    let data = arrow_data(Placement::BottomStart, options);
    assert_eq!(data.x, Some(5.0));
    assert_eq!(data.alignment_offset, None);
    assert!(!data.clamped);
}

#[test]
fn arrow_element_must_be_known() {
    let config = ComputePositionConfig::new()
        .with_middleware(arrow(ArrowOptions::new(ElementId::new("missing"))));
    let err = compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        &config,
        &platform(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing"));
}
