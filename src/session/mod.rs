pub(crate) mod edit_session;
pub(crate) mod gesture;
pub(crate) mod opts;
pub(crate) mod target;
