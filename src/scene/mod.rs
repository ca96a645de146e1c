pub(crate) mod preview;
pub(crate) mod scroll;
pub(crate) mod sprite;
