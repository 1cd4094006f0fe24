use serde::Serialize;

use crate::{
    foundation::error::FloatposResult,
    geometry::coords::compute_coords_from_placement,
    geometry::placement::Placement,
    pipeline::state::{
        Elements, MiddlewareData, MiddlewareReturn, MiddlewareState, Reset, ResetRects,
    },
    platform::backend::{Platform, Strategy},
};

/// A named, composable positioning step.
pub trait Middleware<E> {
    /// Key under which the middleware publishes data.
    fn name(&self) -> &str;

    /// Run against the current state. Returned coordinates are absolute.
    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn>;

    /// Resets this middleware may request per measurement of the rects; further requests
    /// are ignored.
    fn max_resets(&self) -> usize {
        1
    }
}

/// Inputs of [`compute_position`] besides the element handles and the platform.
pub struct ComputePositionConfig<E> {
    /// Preferred placement.
    pub placement: Placement,
    /// Positioning strategy.
    pub strategy: Strategy,
    /// Middleware in execution order.
    pub middleware: Vec<Box<dyn Middleware<E>>>,
}

impl<E> ComputePositionConfig<E> {
    /// `bottom`, `absolute`, no middleware.
    pub fn new() -> Self {
        Self {
            placement: Placement::default(),
            strategy: Strategy::default(),
            middleware: Vec::new(),
        }
    }

    /// Set the preferred placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the positioning strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Append a middleware.
    pub fn with_middleware(mut self, middleware: impl Middleware<E> + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Append an already boxed middleware.
    pub fn push(&mut self, middleware: Box<dyn Middleware<E>>) {
        self.middleware.push(middleware);
    }
}

impl<E> Default for ComputePositionConfig<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Final position and the data published along the way.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputePositionResult {
    /// Final x coordinate.
    pub x: f64,
    /// Final y coordinate.
    pub y: f64,
    /// Final placement (may differ from the requested one).
    pub placement: Placement,
    /// Strategy the coordinates are expressed in.
    pub strategy: Strategy,
    /// Data published by middleware.
    pub middleware_data: MiddlewareData,
}

enum Phase {
    Scanning(usize),
    Restarting { reset: Reset, requested_by: usize },
}

#[derive(Clone, Copy, Default)]
struct ResetAllowance {
    since_measure: usize,
    measures: usize,
}

/// Compute the position of `floating` anchored to `reference`.
///
/// Middleware run in order; a reset restarts the scan at the first middleware with
/// coordinates recomputed for the new placement. Each middleware may request at most
/// [`Middleware::max_resets`] placement resets between two measurements of the rects and at
/// most that many re-measurements overall, so every call terminates.
#[tracing::instrument(
    skip_all,
    fields(
        placement = %config.placement,
        strategy = ?config.strategy,
        middleware = config.middleware.len()
    )
)]
pub fn compute_position<E>(
    reference: &E,
    floating: &E,
    config: &ComputePositionConfig<E>,
    platform: &dyn Platform<E>,
) -> FloatposResult<ComputePositionResult> {
    let strategy = config.strategy;
    let rtl = platform.is_rtl(floating)?;
    let elements = Elements {
        reference,
        floating,
    };

    let mut rects = platform.get_element_rects(reference, floating, strategy)?;
    let mut coords = compute_coords_from_placement(&rects, config.placement, rtl);
    let mut placement = config.placement;
    let mut middleware_data = MiddlewareData::default();
    let mut allowances = vec![ResetAllowance::default(); config.middleware.len()];
    let mut passes = 1usize;

    let mut phase = Phase::Scanning(0);
    loop {
        match phase {
            Phase::Scanning(index) => {
                let Some(middleware) = config.middleware.get(index) else {
                    break;
                };
                let state = MiddlewareState {
                    x: coords.x,
                    y: coords.y,
                    initial_placement: config.placement,
                    placement,
                    strategy,
                    rects,
                    elements,
                    middleware_data: &middleware_data,
                    platform,
                };
                let ret = middleware.run(&state)?;

                coords.x = ret.x.unwrap_or(coords.x);
                coords.y = ret.y.unwrap_or(coords.y);
                if let Some(data) = ret.data {
                    middleware_data.merge(middleware.name(), data);
                }

                phase = match ret.reset {
                    None => Phase::Scanning(index + 1),
                    Some(reset) => {
                        if admit_reset(&mut allowances, index, &reset, middleware.max_resets()) {
                            Phase::Restarting {
                                reset,
                                requested_by: index,
                            }
                        } else {
                            tracing::warn!(
                                middleware = middleware.name(),
                                "reset allowance exhausted; continuing pass"
                            );
                            Phase::Scanning(index + 1)
                        }
                    }
                };
            }
            Phase::Restarting {
                reset,
                requested_by,
            } => {
                if let Some(next) = reset.placement {
                    placement = next;
                }
                match reset.rects {
                    Some(ResetRects::Recompute) => {
                        rects = platform.get_element_rects(reference, floating, strategy)?;
                        middleware_data.clear();
                    }
                    Some(ResetRects::Replace(next)) => {
                        rects = next;
                        middleware_data.clear();
                    }
                    None => {}
                }
                coords = compute_coords_from_placement(&rects, placement, rtl);
                passes += 1;
                tracing::debug!(
                    middleware = config.middleware[requested_by].name(),
                    placement = %placement,
                    passes,
                    "pipeline reset"
                );
                phase = Phase::Scanning(0);
            }
        }
    }

    Ok(ComputePositionResult {
        x: coords.x,
        y: coords.y,
        placement,
        strategy,
        middleware_data,
    })
}

/// Charge a reset against the requesting middleware's allowance. An admitted re-measuring
/// reset reopens the placement budget of every middleware.
fn admit_reset(
    allowances: &mut [ResetAllowance],
    index: usize,
    reset: &Reset,
    max: usize,
) -> bool {
    let allowance = &mut allowances[index];
    if reset.rects.is_some() {
        if allowance.measures >= max {
            return false;
        }
        allowance.measures += 1;
        for a in allowances.iter_mut() {
            a.since_measure = 0;
        }
        return true;
    }
    if allowance.since_measure >= max {
        return false;
    }
    allowance.since_measure += 1;
    true
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/compute.rs"]
mod tests;
