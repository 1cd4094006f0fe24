pub(crate) mod arrow;
pub(crate) mod auto_placement;
pub(crate) mod flip;
pub(crate) mod hide;
pub(crate) mod inline;
pub(crate) mod offset;
pub(crate) mod shift;
pub(crate) mod size;
