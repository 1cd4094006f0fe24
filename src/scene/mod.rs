pub(crate) mod description;
pub(crate) mod model;
