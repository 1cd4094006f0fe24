use std::cell::Cell;
use std::rc::Rc;

use floatpos::{
    ArrowOptions, ComputePositionConfig, DetectOverflowOptions, ElementId, FlipOptions,
    HideOptions, MiddlewareState, Placement, Rect, ShiftOptions, StaticPlatform, arrow,
    compute_position, flip, hide, limit_shift, offset_fn, shift,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    // A button near the bottom edge of an 800x600 viewport.
    let mut platform = StaticPlatform::new(Rect::new(0.0, 0.0, 800.0, 600.0))
        .with_element("button", Rect::new(700.0, 560.0, 80.0, 24.0))
        .with_element("tooltip", Rect::new(0.0, 0.0, 160.0, 48.0))
        .with_element("arrow", Rect::new(0.0, 0.0, 10.0, 10.0));

    let gap = Rc::new(Cell::new(8.0));
    let config = {
        let gap = Rc::clone(&gap);
        ComputePositionConfig::new()
            .with_placement(Placement::Bottom)
            .with_middleware(offset_fn(move |_: &MiddlewareState<'_, ElementId>| gap.get()))
            .with_middleware(flip(FlipOptions::default()))
            .with_middleware(shift(
                ShiftOptions::default()
                    .with_limiter(limit_shift())
                    .with_detect_overflow(DetectOverflowOptions::default().with_padding(8.0)),
            ))
            .with_middleware(arrow(
                ArrowOptions::new(ElementId::new("arrow")).with_padding(6.0),
            ))
            .with_middleware(hide(HideOptions::default()))
    };

    let button = ElementId::new("button");
    let tooltip = ElementId::new("tooltip");

    let first = compute_position(&button, &tooltip, &config, &platform)?;
    println!("{}", serde_json::to_string_pretty(&first)?);

    // Same pipeline, new measurements and a wider gap.
    gap.set(16.0);
    platform.set_rect("button", Rect::new(40.0, 200.0, 80.0, 24.0));
    let second = compute_position(&button, &tooltip, &config, &platform)?;
    println!("{}", serde_json::to_string_pretty(&second)?);
    Ok(())
}
