use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Padding, Rect},
    geometry::placement::{Alignment, Placement},
    middleware::{
        flip::{FallbackAxisSideDirection, FallbackStrategy, FlipCrossAxis},
        hide::HideStrategy,
        inline::InlineOptions,
        offset::OffsetValue,
        shift::LimitShiftOffset,
    },
    platform::backend::Strategy,
};

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ElementDef {
    pub(crate) rect: Rect,
    #[serde(default)]
    pub(crate) client_rects: Vec<Rect>,
    #[serde(default, rename = "virtual")]
    pub(crate) is_virtual: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LimitShiftDef {
    #[serde(default)]
    pub(crate) offset: LimitShiftOffset,
    #[serde(default = "yes")]
    pub(crate) main_axis: bool,
    #[serde(default = "yes")]
    pub(crate) cross_axis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub(crate) enum MiddlewareDef {
    Offset {
        #[serde(default)]
        value: OffsetValue,
    },
    Shift {
        #[serde(default = "yes")]
        main_axis: bool,
        #[serde(default)]
        cross_axis: bool,
        #[serde(default)]
        limiter: Option<LimitShiftDef>,
        #[serde(default)]
        padding: Padding,
    },
    Flip {
        #[serde(default = "yes")]
        main_axis: bool,
        #[serde(default)]
        cross_axis: FlipCrossAxis,
        #[serde(default)]
        fallback_placements: Option<Vec<Placement>>,
        #[serde(default)]
        fallback_strategy: FallbackStrategy,
        #[serde(default)]
        fallback_axis_side_direction: FallbackAxisSideDirection,
        #[serde(default = "yes")]
        flip_alignment: bool,
        #[serde(default)]
        padding: Padding,
    },
    AutoPlacement {
        #[serde(default)]
        cross_axis: bool,
        #[serde(default)]
        alignment: Option<Alignment>,
        #[serde(default = "yes")]
        auto_alignment: bool,
        #[serde(default)]
        allowed_placements: Option<Vec<Placement>>,
        #[serde(default)]
        padding: Padding,
    },
    Arrow {
        #[serde(default)]
        padding: Padding,
    },
    Hide {
        #[serde(default)]
        strategy: HideStrategy,
        #[serde(default)]
        padding: Padding,
    },
    Size {
        #[serde(default)]
        padding: Padding,
    },
    Inline(InlineOptions),
}

impl MiddlewareDef {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            MiddlewareDef::Offset { .. } => "offset",
            MiddlewareDef::Shift { .. } => "shift",
            MiddlewareDef::Flip { .. } => "flip",
            MiddlewareDef::AutoPlacement { .. } => "autoPlacement",
            MiddlewareDef::Arrow { .. } => "arrow",
            MiddlewareDef::Hide { .. } => "hide",
            MiddlewareDef::Size { .. } => "size",
            MiddlewareDef::Inline(_) => "inline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SceneDef {
    pub(crate) viewport: Rect,
    pub(crate) reference: ElementDef,
    pub(crate) floating: ElementDef,
    #[serde(default)]
    pub(crate) arrow: Option<ElementDef>,
    #[serde(default)]
    pub(crate) clipping: Vec<Rect>,
    #[serde(default)]
    pub(crate) placement: Placement,
    #[serde(default)]
    pub(crate) strategy: Strategy,
    #[serde(default)]
    pub(crate) rtl: bool,
    #[serde(default)]
    pub(crate) middleware: Vec<MiddlewareDef>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
