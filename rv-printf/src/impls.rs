pub mod floats;
pub(crate) mod integers;
