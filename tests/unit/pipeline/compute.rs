use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::{
    foundation::core::{Coords, ElementRects, Rect},
    foundation::error::FloatposError,
    pipeline::state::MiddlewareDatum,
    platform::static_rects::{ElementId, StaticPlatform},
};

type Step = dyn Fn(&MiddlewareState<'_, ElementId>) -> FloatposResult<MiddlewareReturn>;

struct Scripted {
    name: &'static str,
    step: Box<Step>,
}

impl Scripted {
    fn new(
        name: &'static str,
        step: impl Fn(&MiddlewareState<'_, ElementId>) -> FloatposResult<MiddlewareReturn> + 'static,
    ) -> Self {
        Self {
            name,
            step: Box::new(step),
        }
    }
}

impl Middleware<ElementId> for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, state: &MiddlewareState<'_, ElementId>) -> FloatposResult<MiddlewareReturn> {
        (self.step)(state)
    }
}

fn platform() -> StaticPlatform {
    StaticPlatform::new(Rect::new(0.0, 0.0, 1000.0, 1000.0))
        .with_element("ref", Rect::new(0.0, 0.0, 50.0, 50.0))
        .with_element("float", Rect::new(0.0, 0.0, 0.0, 0.0))
}

fn run(config: &ComputePositionConfig<ElementId>) -> FloatposResult<ComputePositionResult> {
    compute_position(
        &ElementId::new("ref"),
        &ElementId::new("float"),
        config,
        &platform(),
    )
}

fn counter() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}

#[test]
fn no_middleware_centers_below() {
    let r = run(&ComputePositionConfig::new()).unwrap();
    assert_eq!((r.x, r.y), (25.0, 50.0));
    assert_eq!(r.placement, Placement::Bottom);
    assert_eq!(r.strategy, Strategy::Absolute);
}

#[test]
fn partial_returns_keep_the_other_coordinate() {
    let config = ComputePositionConfig::new().with_middleware(Scripted::new("y-only", |_| {
        Ok(MiddlewareReturn {
            y: Some(7.0),
            ..MiddlewareReturn::none()
        })
    }));
    let r = run(&config).unwrap();
    assert_eq!((r.x, r.y), (25.0, 7.0));
}

#[test]
fn endless_restart_requests_are_capped() {
    let runs = counter();
    let seen = Rc::clone(&runs);
    let config = ComputePositionConfig::new().with_middleware(Scripted::new("loop", move |_| {
        seen.set(seen.get() + 1);
        Ok(MiddlewareReturn::none().with_reset(Reset::restart()))
    }));
    run(&config).unwrap();
    assert_eq!(runs.get(), 2);
}

#[test]
fn endless_remeasure_requests_are_capped() {
    let runs = counter();
    let seen = Rc::clone(&runs);
    let config = ComputePositionConfig::new().with_middleware(Scripted::new("loop", move |_| {
        seen.set(seen.get() + 1);
        Ok(MiddlewareReturn::none().with_reset(Reset::recompute_rects()))
    }));
    run(&config).unwrap();
    assert_eq!(runs.get(), 2);
}

#[test]
fn placement_reset_recomputes_coordinates() {
    let config = ComputePositionConfig::new()
        .with_middleware(Scripted::new("nudge", |s| {
            Ok(MiddlewareReturn::at(Coords::new(s.x + 10.0, s.y)))
        }))
        .with_middleware(Scripted::new("to-top", |s| {
            if s.placement == Placement::Top {
                return Ok(MiddlewareReturn::none());
            }
            Ok(MiddlewareReturn::none().with_reset(Reset::to_placement(Placement::Top)))
        }));
    let r = run(&config).unwrap();
    assert_eq!(r.placement, Placement::Top);
    assert_eq!((r.x, r.y), (35.0, 0.0));
}

#[test]
fn placement_reset_keeps_data() {
    let config = ComputePositionConfig::new()
        .with_middleware(Scripted::new("marker", |s| {
            if s.placement == Placement::Bottom {
                Ok(MiddlewareReturn::none().with_data(MiddlewareDatum::Custom(
                    serde_json::json!({ "first": true }),
                )))
            } else {
                Ok(MiddlewareReturn::none())
            }
        }))
        .with_middleware(Scripted::new("to-top", |s| {
            if s.placement == Placement::Top {
                return Ok(MiddlewareReturn::none());
            }
            Ok(MiddlewareReturn::none().with_reset(Reset::to_placement(Placement::Top)))
        }));
    let r = run(&config).unwrap();
    assert!(r.middleware_data.get("marker").is_some());
}

#[test]
fn remeasure_reset_clears_data() {
    let runs = counter();
    let seen = Rc::clone(&runs);
    let config = ComputePositionConfig::new()
        .with_middleware(Scripted::new("marker", move |_| {
            seen.set(seen.get() + 1);
            if seen.get() == 1 {
                Ok(MiddlewareReturn::none()
                    .with_data(MiddlewareDatum::Custom(serde_json::json!({ "first": true }))))
            } else {
                Ok(MiddlewareReturn::none())
            }
        }))
        .with_middleware(Scripted::new("remeasure", |_| {
            Ok(MiddlewareReturn::none().with_reset(Reset::recompute_rects()))
        }));
    let r = run(&config).unwrap();
    assert_eq!(runs.get(), 2);
    assert!(r.middleware_data.get("marker").is_none());
}

#[test]
fn replaced_rects_are_used_for_the_next_pass() {
    let config = ComputePositionConfig::new().with_middleware(Scripted::new("swap", |s| {
        if s.rects.reference.x == 100.0 {
            return Ok(MiddlewareReturn::none());
        }
        Ok(
            MiddlewareReturn::none().with_reset(Reset::replace_rects(ElementRects {
                reference: Rect::new(100.0, 0.0, 50.0, 50.0),
                floating: s.rects.floating,
            })),
        )
    }));
    let r = run(&config).unwrap();
    assert_eq!((r.x, r.y), (125.0, 50.0));
}

#[test]
fn errors_abort_the_computation() {
    let runs = counter();
    let seen = Rc::clone(&runs);
    let config = ComputePositionConfig::new()
        .with_middleware(Scripted::new("fail", |_| {
            Err(FloatposError::middleware("nope"))
        }))
        .with_middleware(Scripted::new("after", move |_| {
            seen.set(seen.get() + 1);
            Ok(MiddlewareReturn::none())
        }));
    let err = run(&config).unwrap_err();
    assert!(matches!(err, FloatposError::Middleware(_)));
    assert_eq!(runs.get(), 0);
}

#[test]
fn unknown_elements_are_platform_errors() {
    let err = compute_position(
        &ElementId::new("ghost"),
        &ElementId::new("float"),
        &ComputePositionConfig::new(),
        &platform(),
    )
    .unwrap_err();
    assert!(matches!(err, FloatposError::Platform(_)));
}

#[test]
fn allowances_are_per_middleware() {
    let mut allowances = vec![ResetAllowance::default(); 2];
    let restart = Reset::restart();
    assert!(admit_reset(&mut allowances, 0, &restart, 1));
    assert!(!admit_reset(&mut allowances, 0, &restart, 1));
    assert!(admit_reset(&mut allowances, 1, &restart, 1));
    assert!(!admit_reset(&mut allowances, 1, &restart, 1));
}

#[test]
fn remeasure_refreshes_placement_allowances() {
    let mut allowances = vec![ResetAllowance::default(); 2];
    let restart = Reset::restart();
    let remeasure = Reset::recompute_rects();
    assert!(admit_reset(&mut allowances, 0, &restart, 1));
    assert!(admit_reset(&mut allowances, 1, &remeasure, 1));
    assert!(admit_reset(&mut allowances, 0, &restart, 1));
    assert!(!admit_reset(&mut allowances, 1, &remeasure, 1));
}
