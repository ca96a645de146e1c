pub(crate) mod interp;
pub(crate) mod keyframe;
pub(crate) mod playback;
pub(crate) mod pose;
pub(crate) mod store;
