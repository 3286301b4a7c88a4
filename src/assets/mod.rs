pub(crate) mod correspondence;
pub(crate) mod decode;
