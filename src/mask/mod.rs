pub(crate) mod bits;
pub(crate) mod store;
pub(crate) mod stroke;
