use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::{Padding, Rect},
    foundation::error::{FloatposError, FloatposResult},
    middleware::{
        arrow::{ArrowOptions, arrow},
        auto_placement::{AutoPlacementOptions, auto_placement},
        flip::{FlipOptions, flip},
        hide::{HideOptions, hide},
        inline::inline,
        offset::offset,
        shift::{ShiftOptions, limit_shift, shift},
        size::{SizeOptions, size},
    },
    overflow::detect::DetectOverflowOptions,
    pipeline::compute::{
        ComputePositionConfig, ComputePositionResult, Middleware, compute_position,
    },
    platform::static_rects::{ElementId, StaticPlatform},
    scene::model::{ElementDef, MiddlewareDef, SceneDef},
};

const REFERENCE: &str = "reference";
const FLOATING: &str = "floating";
const ARROW: &str = "arrow";

/// A positioning problem described in JSON: measured rectangles plus a middleware chain.
///
/// Element handles are [`ElementId`]s named `reference`, `floating`, `arrow` and
/// `clip0..clipN` for the clipping ancestors.
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FloatposResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| FloatposError::validation(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(s: &str) -> FloatposResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FloatposResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FloatposError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check rectangles and middleware references.
    pub fn validate(&self) -> FloatposResult<()> {
        let def = &self.def;
        validate_rect("viewport", def.viewport)?;
        validate_element(REFERENCE, &def.reference)?;
        validate_element(FLOATING, &def.floating)?;
        if let Some(a) = &def.arrow {
            validate_element(ARROW, a)?;
        }
        for (i, r) in def.clipping.iter().enumerate() {
            validate_rect(&format!("clipping[{i}]"), *r)?;
        }
        for (i, m) in def.middleware.iter().enumerate() {
            match m {
                MiddlewareDef::Arrow { .. } if def.arrow.is_none() => {
                    return Err(FloatposError::validation(format!(
                        "middleware[{i}] 'arrow' needs an 'arrow' element"
                    )));
                }
                MiddlewareDef::Flip {
                    fallback_placements: Some(list),
                    ..
                } if list.is_empty() => {
                    return Err(FloatposError::validation(format!(
                        "middleware[{i}] 'flip' has an empty fallbackPlacements list"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Measurement backend holding the scene's rectangles.
    pub fn platform(&self) -> StaticPlatform {
        let def = &self.def;
        let mut p = StaticPlatform::new(def.viewport);
        p = register(p, REFERENCE, &def.reference);
        p = register(p, FLOATING, &def.floating);
        if let Some(a) = &def.arrow {
            p = register(p, ARROW, a);
        }
        for (i, r) in def.clipping.iter().enumerate() {
            let id = format!("clip{i}");
            p = p
                .with_element(&id, *r)
                .with_clipping_ancestor(REFERENCE, &id)
                .with_clipping_ancestor(FLOATING, &id);
        }
        if def.rtl {
            p = p.with_rtl(FLOATING);
        }
        p
    }

    /// Pipeline configuration for the scene's middleware chain.
    pub fn config(&self) -> ComputePositionConfig<ElementId> {
        let mut config = ComputePositionConfig::new()
            .with_placement(self.def.placement)
            .with_strategy(self.def.strategy);
        for m in &self.def.middleware {
            config.push(build_middleware(m));
        }
        config
    }

    /// Validate and run the computation.
    #[tracing::instrument(skip(self), fields(middleware = self.def.middleware.len()))]
    pub fn compute(&self) -> FloatposResult<ComputePositionResult> {
        self.validate()?;
        let platform = self.platform();
        let config = self.config();
        compute_position(
            &ElementId::new(REFERENCE),
            &ElementId::new(FLOATING),
            &config,
            &platform,
        )
    }

    /// Names of the configured middleware, in order.
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.def.middleware.iter().map(MiddlewareDef::name).collect()
    }
}

fn register(p: StaticPlatform, id: &str, e: &ElementDef) -> StaticPlatform {
    let p = if e.is_virtual {
        p.with_virtual_element(id, e.rect)
    } else {
        p.with_element(id, e.rect)
    };
    if e.client_rects.is_empty() {
        p
    } else {
        p.with_client_rects(id, e.client_rects.clone())
    }
}

fn validate_rect(what: &str, r: Rect) -> FloatposResult<()> {
    let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
    if !finite {
        return Err(FloatposError::validation(format!(
            "{what}: rect values must be finite"
        )));
    }
    if r.width < 0.0 || r.height < 0.0 {
        return Err(FloatposError::validation(format!(
            "{what}: width and height must be >= 0"
        )));
    }
    Ok(())
}

fn validate_element(what: &str, e: &ElementDef) -> FloatposResult<()> {
    validate_rect(what, e.rect)?;
    for (i, r) in e.client_rects.iter().enumerate() {
        validate_rect(&format!("{what}.clientRects[{i}]"), *r)?;
    }
    Ok(())
}

fn detect(padding: Padding) -> DetectOverflowOptions<ElementId> {
    DetectOverflowOptions::default().with_padding(padding)
}

fn build_middleware(def: &MiddlewareDef) -> Box<dyn Middleware<ElementId>> {
    match def.clone() {
        MiddlewareDef::Offset { value } => Box::new(offset(value)),
        MiddlewareDef::Shift {
            main_axis,
            cross_axis,
            limiter,
            padding,
        } => {
            let limiter = limiter.map(|l| {
                limit_shift()
                    .with_offset(l.offset)
                    .with_main_axis(l.main_axis)
                    .with_cross_axis(l.cross_axis)
            });
            Box::new(shift(ShiftOptions {
                main_axis,
                cross_axis,
                limiter,
                detect_overflow: detect(padding),
            }))
        }
        MiddlewareDef::Flip {
            main_axis,
            cross_axis,
            fallback_placements,
            fallback_strategy,
            fallback_axis_side_direction,
            flip_alignment,
            padding,
        } => Box::new(flip(FlipOptions {
            main_axis,
            cross_axis,
            fallback_placements,
            fallback_strategy,
            fallback_axis_side_direction,
            flip_alignment,
            detect_overflow: detect(padding),
        })),
        MiddlewareDef::AutoPlacement {
            cross_axis,
            alignment,
            auto_alignment,
            allowed_placements,
            padding,
        } => Box::new(auto_placement(AutoPlacementOptions {
            cross_axis,
            alignment,
            auto_alignment,
            allowed_placements,
            detect_overflow: detect(padding),
        })),
        MiddlewareDef::Arrow { padding } => {
            Box::new(arrow(ArrowOptions::new(ElementId::new(ARROW)).with_padding(padding)))
        }
        MiddlewareDef::Hide { strategy, padding } => Box::new(hide(HideOptions {
            strategy,
            detect_overflow: detect(padding),
        })),
        MiddlewareDef::Size { padding } => Box::new(size(SizeOptions {
            apply: None,
            detect_overflow: detect(padding),
        })),
        MiddlewareDef::Inline(options) => Box::new(inline(options)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/description.rs"]
mod tests;
