use nalgebra::Vector3;
use rand::Rng;

use crate::app_settings::HelixSettings;

pub type Position = Vector3<f64>;

/// One point of the helix cloud.
///
/// `base_position` and `float_offset` are fixed at spawn; only `position` and
/// `connections` change from frame to frame.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Position,
    pub base_position: Position,
    pub radius: f64,
    pub base_radius: f64,
    pub opacity: f64,
    /// Scalar derived from |base_y|, reserved for per-particle motion scaling
    pub speed: f64,
    /// Indices of particles this one connects to, rebuilt every frame
    pub connections: Vec<usize>,
    pub float_offset: Vector3<f64>,
}

impl Particle {
    pub fn new(base_position: Position, float_offset: Vector3<f64>, settings: &HelixSettings) -> Self {
        Self {
            position: base_position,
            base_position,
            radius: settings.particle_radius,
            base_radius: settings.particle_radius,
            opacity: settings.particle_opacity,
            speed: 0.1 + (base_position.y.abs() / 200.0) * 0.8,
            connections: Vec::new(),
            float_offset,
        }
    }
}

/// Builds the two mirrored helix strands.
///
/// Strand 0 and strand 1 share the same angle sweep but are flipped on X so
/// they interleave visually. Vertical placement is linear and centered on 0.
pub fn spawn_helices(settings: &HelixSettings, rng: &mut impl Rng) -> Vec<Particle> {
    let n = settings.particles_per_helix as usize;
    let jitter = settings.float_jitter;
    let mut particles = Vec::with_capacity(n * 2);

    for strand in 0..2 {
        let mirror = if strand == 0 { 1.0 } else { -1.0 };
        for i in 0..n {
            let angle = (i as f64 / n as f64) * std::f64::consts::TAU * settings.helix_turns;
            let base = Position::new(
                angle.cos() * settings.helix_radius * mirror,
                (i * 2) as f64 - n as f64,
                angle.sin() * settings.helix_radius,
            );
            let float_offset = if jitter > 0.0 {
                Vector3::new(
                    rng.gen_range(-jitter..jitter),
                    rng.gen_range(-jitter..jitter),
                    rng.gen_range(-jitter..jitter),
                )
            } else {
                Vector3::zeros()
            };
            particles.push(Particle::new(base, float_offset, settings));
        }
    }

    particles
}
