pub(crate) mod compute;
pub(crate) mod options;
pub(crate) mod state;
