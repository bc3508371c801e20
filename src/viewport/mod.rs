pub(crate) mod controller;
pub(crate) mod window;
