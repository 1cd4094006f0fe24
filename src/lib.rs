//! floatpos positions floating elements (tooltips, popovers, menus) next to a reference
//! element.
//!
//! The engine never touches a rendering surface. It asks a [`Platform`] for measured
//! rectangles, runs an ordered chain of [`Middleware`] and returns coordinates plus the data
//! each middleware published:
//!
//! - Describe the measurement backend with a [`Platform`] (or use [`StaticPlatform`])
//! - Build a [`ComputePositionConfig`] from a placement and middleware such as [`offset`],
//!   [`flip`], [`shift`], [`arrow`], [`hide`] and [`size`]
//! - Call [`compute_position`]
//!
//! JSON scenes ([`Scene`]) drive the same pipeline from files; the `floatpos` binary is a thin
//! front end over them.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod geometry;
pub(crate) mod middleware;
pub(crate) mod overflow;
pub(crate) mod pipeline;
pub(crate) mod platform;
pub(crate) mod scene;

pub use crate::foundation::core::{
    ClientRect, Coords, Dimensions, ElementRects, Padding, Point, Rect, SideObject,
};
pub use crate::foundation::error::{FloatposError, FloatposResult};

pub use crate::geometry::coords::{alignment_sides, compute_coords_from_placement};
pub use crate::geometry::placement::{Alignment, Axis, Length, Placement, Side};

pub use crate::middleware::arrow::{Arrow, ArrowData, ArrowOptions, arrow, arrow_fn};
pub use crate::middleware::auto_placement::{
    AutoPlacement, AutoPlacementData, AutoPlacementOptions, auto_placement, auto_placement_fn,
};
pub use crate::middleware::flip::{
    FallbackAxisSideDirection, FallbackStrategy, Flip, FlipCrossAxis, FlipData, FlipOptions,
    PlacementOverflow, flip, flip_fn,
};
pub use crate::middleware::hide::{Hide, HideData, HideOptions, HideStrategy, hide, hide_fn};
pub use crate::middleware::inline::{Inline, InlineOptions, inline, inline_fn};
pub use crate::middleware::offset::{
    Offset, OffsetAxes, OffsetData, OffsetValue, offset, offset_fn,
};
pub use crate::middleware::shift::{
    LimitShift, LimitShiftAxes, LimitShiftData, LimitShiftOffset, Shift, ShiftData,
    ShiftEnabled, ShiftOptions, limit_shift, shift, shift_fn,
};
pub use crate::middleware::size::{
    Size, SizeApply, SizeApplyArgs, SizeData, SizeOptions, size, size_fn,
};

pub use crate::overflow::detect::{DetectOverflowOptions, ElementContext, detect_overflow};

pub use crate::pipeline::compute::{
    ComputePositionConfig, ComputePositionResult, Middleware, compute_position,
};
pub use crate::pipeline::options::Derivable;
pub use crate::pipeline::state::{
    Elements, MiddlewareData, MiddlewareDatum, MiddlewareReturn, MiddlewareState, Reset,
    ResetRects,
};

pub use crate::platform::backend::{
    Boundary, ClippingRectQuery, ConvertRectQuery, Platform, RootBoundary, Strategy,
};
pub use crate::platform::static_rects::{ElementId, StaticPlatform};

pub use crate::scene::description::Scene;
