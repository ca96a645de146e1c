use crate::animation::pose::Pose;
use crate::geometry::curve::PathCurve;

/// Plane sprite placement constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteOpts {
    /// Vertical shift applied to the curve point so the plane hovers above the path.
    pub hover_offset_y: f64,
    /// Sprite edge length in viewport units.
    pub size: f64,
}

impl Default for SpriteOpts {
    fn default() -> Self {
        Self {
            hover_offset_y: -35.0,
            size: 70.0,
        }
    }
}

/// Everything a rendering surface needs to draw the plane for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteTransform {
    /// Curve point the sprite is attached to.
    pub anchor_x: f64,
    /// Curve point the sprite is attached to.
    pub anchor_y: f64,
    /// Sprite translation (anchor plus hover offset).
    pub x: f64,
    /// Sprite translation (anchor plus hover offset).
    pub y: f64,
    /// Roll in degrees.
    pub rotation_z: f64,
    /// Pitch in degrees.
    pub rotation_x: f64,
    /// Yaw in degrees.
    pub rotation_y: f64,
    /// Signed horizontal scale (`scaleX * scale`).
    pub scale_x: f64,
    /// Signed vertical scale (`scaleY * scale`).
    pub scale_y: f64,
}

impl SpriteTransform {
    /// Place the sprite for `pose` on `curve`. `None` for an empty curve.
    pub fn from_pose(curve: &PathCurve, pose: &Pose, opts: &SpriteOpts) -> Option<Self> {
        let anchor = curve.point_at_fraction(pose.path_progress)?;
        Some(Self {
            anchor_x: anchor.x,
            anchor_y: anchor.y,
            x: anchor.x,
            y: anchor.y + opts.hover_offset_y,
            rotation_z: pose.rotation_z,
            rotation_x: pose.rotation_x,
            rotation_y: pose.rotation_y,
            scale_x: pose.scale_x * pose.scale,
            scale_y: pose.scale_y * pose.scale,
        })
    }

    /// CSS `transform` value with full 3D rotation.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotateZ({}deg) rotateX({}deg) rotateY({}deg) scale({}, {})",
            self.x,
            self.y,
            self.rotation_z,
            self.rotation_x,
            self.rotation_y,
            self.scale_x,
            self.scale_y
        )
    }

    /// SVG `transform` attribute; pitch and yaw have no 2D equivalent and are dropped.
    pub fn svg_transform(&self) -> String {
        format!(
            "translate({} {}) rotate({}) scale({} {})",
            self.x, self.y, self.rotation_z, self.scale_x, self.scale_y
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sprite.rs"]
mod tests;
