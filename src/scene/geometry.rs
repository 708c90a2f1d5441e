//! Scene geometry: spring helix, damper segment and the orbit camera.

use std::f64::consts::PI;

use glam::{DQuat, DVec3};

/// Coil radius of the helical spring.
pub const SPRING_RADIUS: f64 = 0.3;
/// Number of turns in the spring.
pub const SPRING_COILS: usize = 20;
/// Points sampled along the helix.
pub const SPRING_SEGMENTS: usize = 200;

/// Fraction of the damper length covered by the cylinder body.
pub const DAMPER_BODY_FRACTION: f64 = 0.55;

/// Rotation taking the +Y axis onto `direction`.
fn align_y_to(direction: DVec3) -> DQuat {
    let length = direction.length();
    if length < f64::EPSILON {
        return DQuat::IDENTITY;
    }
    DQuat::from_rotation_arc(DVec3::Y, direction / length)
}

/// Helix from `start` to `end`, as a polyline.
///
/// The helix is built along +Y with the requested length and then
/// rotated so its axis points from `start` to `end`.
pub fn helix_points(start: DVec3, end: DVec3) -> Vec<DVec3> {
    let direction = end - start;
    let length = direction.length();
    let rotation = align_y_to(direction);

    (0..=SPRING_SEGMENTS)
        .map(|i| {
            let t = i as f64 / SPRING_SEGMENTS as f64;
            let angle = 2.0 * PI * SPRING_COILS as f64 * t;
            let local = DVec3::new(
                SPRING_RADIUS * angle.cos(),
                length * t,
                SPRING_RADIUS * angle.sin(),
            );
            start + rotation * local
        })
        .collect()
}

/// Damper between an anchor and the moving mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamperGeometry {
    pub start: DVec3,
    pub end: DVec3,
}

impl DamperGeometry {
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Point where the cylinder body ends and the piston rod begins.
    pub fn body_end(&self) -> DVec3 {
        self.start.lerp(self.end, DAMPER_BODY_FRACTION)
    }
}

/// A point projected onto the view plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Distance along the view direction
    pub depth: f64,
}

/// Orbit camera looking at a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub target: DVec3,
    /// Horizontal angle around the target, radians
    pub yaw: f64,
    /// Elevation above the horizontal plane, radians
    pub pitch: f64,
    pub distance: f64,
    /// Vertical field of view, radians
    pub fov: f64,
}

impl Camera {
    pub const MIN_DISTANCE: f64 = 2.0;
    pub const MAX_DISTANCE: f64 = 20.0;
    const MAX_PITCH: f64 = 85.0 * PI / 180.0;
    const NEAR: f64 = 0.1;

    /// Camera placed at `position`, looking at `target`.
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        let offset = position - target;
        let distance = offset
            .length()
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
        let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: offset.y.atan2(horizontal).clamp(-Self::MAX_PITCH, Self::MAX_PITCH),
            distance,
            fov: 60.0 * PI / 180.0,
        }
    }

    pub fn position(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + DVec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(2.0 * PI);
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Scale the distance to the target (factor < 1 zooms in).
    pub fn zoom(&mut self, factor: f64) {
        if factor > 0.0 {
            self.distance = (self.distance * factor).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
        }
    }

    /// Focal scale for the vertical field of view.
    pub fn focal(&self) -> f64 {
        1.0 / (self.fov / 2.0).tan()
    }

    /// Perspective projection into view-plane units where the vertical
    /// field of view spans `-1.0..=1.0`. `None` for points behind the camera.
    pub fn project(&self, point: DVec3) -> Option<Projected> {
        let eye = self.position();
        let forward = (self.target - eye).normalize();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);

        let rel = point - eye;
        let depth = rel.dot(forward);
        if depth < Self::NEAR {
            return None;
        }
        let focal = self.focal();
        Some(Projected {
            x: rel.dot(right) / depth * focal,
            y: rel.dot(up) / depth * focal,
            depth,
        })
    }

    /// Apparent radius of a sphere of `radius` at `depth`.
    pub fn projected_radius(&self, radius: f64, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        radius / depth * self.focal()
    }
}
