use super::*;

#[test]
fn middleware_defaults_follow_the_builders() {
    let defs: Vec<MiddlewareDef> = serde_json::from_str(
        r#"[
            { "name": "offset" },
            { "name": "shift" },
            { "name": "flip", "fallbackPlacements": ["top", "left-start"] },
            { "name": "inline", "x": 3, "y": 4 }
        ]"#,
    )
    .unwrap();

    assert_eq!(
        defs[0],
        MiddlewareDef::Offset {
            value: OffsetValue::Distance(0.0)
        }
    );
    assert_eq!(
        defs[1],
        MiddlewareDef::Shift {
            main_axis: true,
            cross_axis: false,
            limiter: None,
            padding: Padding::Uniform(0.0),
        }
    );
    match &defs[2] {
        MiddlewareDef::Flip {
            fallback_placements,
            flip_alignment,
            cross_axis,
            ..
        } => {
            assert_eq!(
                fallback_placements.as_deref(),
                Some(&[Placement::Top, Placement::LeftStart][..])
            );
            assert!(*flip_alignment);
            assert_eq!(*cross_axis, FlipCrossAxis::On);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &defs[3] {
        MiddlewareDef::Inline(o) => {
            assert_eq!((o.x, o.y), (Some(3.0), Some(4.0)));
            assert_eq!(o.padding, Padding::Uniform(2.0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn offset_accepts_axes_and_padding_accepts_sides() {
    let def: MiddlewareDef = serde_json::from_str(
        r#"{ "name": "offset", "value": { "mainAxis": 4, "crossAxis": 2 } }"#,
    )
    .unwrap();
    assert_eq!(def.name(), "offset");

    let def: MiddlewareDef =
        serde_json::from_str(r#"{ "name": "hide", "padding": { "top": 3 } }"#).unwrap();
    match def {
        MiddlewareDef::Hide { strategy, padding } => {
            assert_eq!(strategy, HideStrategy::Both);
            assert_eq!(padding.to_sides().top, 3.0);
            assert_eq!(padding.to_sides().left, 0.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_middleware_is_rejected() {
    let err = serde_json::from_str::<MiddlewareDef>(r#"{ "name": "teleport" }"#).unwrap_err();
    assert!(err.to_string().contains("teleport"));
}

#[test]
fn scene_defaults() {
    let def: SceneDef = serde_json::from_str(
        r#"{
            "viewport": { "x": 0, "y": 0, "width": 10, "height": 10 },
            "reference": { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } },
            "floating": { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 }, "virtual": false }
        }"#,
    )
    .unwrap();
    assert_eq!(def.placement, Placement::Bottom);
    assert_eq!(def.strategy, Strategy::Absolute);
    assert!(def.middleware.is_empty());
    assert!(def.arrow.is_none());
    assert!(!def.rtl);
}
