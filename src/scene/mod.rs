//! Mass-spring-damper scene
//!
//! The scene is rebuilt from scratch every tick from a single sampled
//! mass position. Spring and damper are derived from that same position
//! in `SceneFrame::build`, so dependents never observe a half-updated
//! frame.

pub mod geometry;

use glam::DVec3;

use crate::trajectory::Sample;
pub use geometry::{Camera, DamperGeometry, Projected};

/// Centre of the fixed support block.
pub const SUPPORT_CENTER: DVec3 = DVec3::new(0.3, 4.0, 0.0);
/// Full extents of the support block.
pub const SUPPORT_SIZE: DVec3 = DVec3::new(2.0, 0.5, 2.0);
/// Where the spring hangs from the support.
pub const SPRING_ANCHOR: DVec3 = DVec3::new(0.3, 3.75, 0.0);
/// Where the damper hangs from the support.
pub const DAMPER_ANCHOR: DVec3 = DVec3::new(0.6, 3.75, 0.0);
/// Mass position before any sample has been applied.
pub const INITIAL_MASS_POSITION: DVec3 = DVec3::new(0.3, -0.2, 0.0);
pub const MASS_RADIUS: f64 = 1.0;
/// Height of the reference grid.
pub const GRID_Y: f64 = -2.0;
/// Half-extent of the reference grid.
pub const GRID_HALF_SIZE: f64 = 10.0;
/// Initial camera placement.
pub const CAMERA_POSITION: DVec3 = DVec3::new(5.0, 5.0, 5.0);
pub const CAMERA_TARGET: DVec3 = DVec3::new(0.3, 1.0, 0.0);

/// Names of the sample columns that hold the mass position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMapping {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for PositionMapping {
    fn default() -> Self {
        Self {
            x: "body1.r_0[1]".to_string(),
            y: "body1.r_0[2]".to_string(),
            z: "body1.r_0[3]".to_string(),
        }
    }
}

impl PositionMapping {
    /// Read the position from a sample. All three columns must be present.
    pub fn position(&self, sample: &Sample) -> Option<DVec3> {
        Some(DVec3::new(
            sample.get(&self.x)?,
            sample.get(&self.y)?,
            sample.get(&self.z)?,
        ))
    }
}

/// Everything needed to draw one frame of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub mass: DVec3,
    pub spring: Vec<DVec3>,
    pub damper: DamperGeometry,
}

impl SceneFrame {
    /// Frame with the mass resting at `mass`.
    pub fn at(mass: DVec3) -> Self {
        Self {
            mass,
            spring: geometry::helix_points(SPRING_ANCHOR, mass),
            damper: DamperGeometry::new(DAMPER_ANCHOR, mass),
        }
    }

    /// Frame before any trajectory is loaded.
    pub fn initial() -> Self {
        Self::at(INITIAL_MASS_POSITION)
    }

    /// Derive the next frame from the current sample.
    ///
    /// When the sample lacks one of the position columns the mass stays
    /// where it was in `previous`.
    pub fn build(previous: &SceneFrame, sample: Option<&Sample>, mapping: &PositionMapping) -> Self {
        match sample.and_then(|s| mapping.position(s)) {
            Some(mass) if mass == previous.mass => previous.clone(),
            Some(mass) => Self::at(mass),
            None => previous.clone(),
        }
    }

    /// Eight corners of the support block.
    pub fn support_corners() -> [DVec3; 8] {
        let h = SUPPORT_SIZE / 2.0;
        let c = SUPPORT_CENTER;
        [
            c + DVec3::new(-h.x, -h.y, -h.z),
            c + DVec3::new(h.x, -h.y, -h.z),
            c + DVec3::new(h.x, -h.y, h.z),
            c + DVec3::new(-h.x, -h.y, h.z),
            c + DVec3::new(-h.x, h.y, -h.z),
            c + DVec3::new(h.x, h.y, -h.z),
            c + DVec3::new(h.x, h.y, h.z),
            c + DVec3::new(-h.x, h.y, h.z),
        ]
    }

    /// Corner index pairs forming the block edges.
    pub const SUPPORT_EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self::initial()
    }
}

/// Default orbit camera for the scene.
pub fn default_camera() -> Camera {
    Camera::looking_at(CAMERA_POSITION, CAMERA_TARGET)
}
