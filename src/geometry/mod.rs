pub(crate) mod curve;
pub(crate) mod heading;
pub(crate) mod waypoint;
