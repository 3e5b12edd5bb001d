//! Per-frame particle motion: rigid rotation about the vertical axis plus the
//! fixed per-particle float jitter.

use crate::particle::Particle;

/// Recomputes every particle's `position` from its base position and the
/// shared rotation angle. Nothing else is touched.
///
/// The planar distance from the axis is constant per particle since the base
/// never moves; it is recomputed each frame rather than cached.
pub fn advance(particles: &mut [Particle], rotation_angle: f64) {
    for p in particles.iter_mut() {
        let base_angle = p.base_position.z.atan2(p.base_position.x);
        let new_angle = base_angle + rotation_angle;
        let planar = (p.base_position.x * p.base_position.x
            + p.base_position.z * p.base_position.z)
            .sqrt();

        p.position.x = new_angle.cos() * planar + p.float_offset.x;
        p.position.y = p.base_position.y + p.float_offset.y;
        p.position.z = new_angle.sin() * planar + p.float_offset.z;
    }
}
