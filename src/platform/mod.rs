pub(crate) mod backend;
pub(crate) mod static_rects;
