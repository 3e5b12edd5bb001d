//! Per-frame proximity graph: each particle picks up to three neighbors whose
//! current 3D distance falls inside the connection band, thinned by a coin
//! flip so the web of lines shifts from frame to frame.

use rand::Rng;

use crate::particle::Particle;

/// Out-degree cap per particle.
pub const MAX_CONNECTIONS: usize = 3;

/// Clears and recomputes every particle's connection list.
///
/// The scan is the full O(n²) pairwise pass in index order; once a source
/// particle has accepted three neighbors no further candidates are tested for
/// it. The relation is directed: `i → j` does not imply `j → i`. The random
/// source is passed in so tests can pin the acceptance draws.
pub fn rebuild(
    particles: &mut [Particle],
    min_dist: f64,
    max_dist: f64,
    rng: &mut impl Rng,
) {
    for p in particles.iter_mut() {
        p.connections.clear();
    }

    for i in 0..particles.len() {
        let mut accepted = 0;
        for j in 0..particles.len() {
            if accepted >= MAX_CONNECTIONS {
                break;
            }
            if i == j {
                continue;
            }
            let dist = (particles[i].position - particles[j].position).norm();
            if dist >= min_dist && dist <= max_dist && rng.gen::<f64>() > 0.5 {
                particles[i].connections.push(j);
                accepted += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::HelixSettings;
    use crate::particle::{spawn_helices, Position};
    use nalgebra::Vector3;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A particle parked at an exact position, no jitter.
    fn particle_at(x: f64, y: f64, z: f64) -> Particle {
        Particle::new(
            Position::new(x, y, z),
            Vector3::zeros(),
            &HelixSettings::default(),
        )
    }

    /// RNG whose f64 draws are all ~1.0, so every candidate is accepted.
    fn always_accept() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn degree_cap_self_and_duplicate_invariants() {
        let settings = HelixSettings::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut particles = spawn_helices(&settings, &mut rng);
        crate::kinematics::advance(&mut particles, 0.3);

        rebuild(&mut particles, 80.0, 120.0, &mut rng);

        for (i, p) in particles.iter().enumerate() {
            assert!(p.connections.len() <= MAX_CONNECTIONS);
            assert!(!p.connections.contains(&i));
            let mut seen = p.connections.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), p.connections.len());
        }
    }

    #[test]
    fn accepted_edges_lie_in_the_distance_band() {
        let settings = HelixSettings::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut particles = spawn_helices(&settings, &mut rng);
        crate::kinematics::advance(&mut particles, 1.0);

        rebuild(&mut particles, 80.0, 120.0, &mut rng);

        let mut edges = 0;
        for p in &particles {
            for &j in &p.connections {
                let dist = (p.position - particles[j].position).norm();
                assert!((80.0..=120.0).contains(&dist));
                edges += 1;
            }
        }
        // The helix spacing guarantees candidates in the band; a seeded run
        // with coin-flip acceptance should find plenty of them.
        assert!(edges > 0);
    }

    #[test]
    fn degree_caps_at_three_even_with_more_candidates() {
        // One hub with five neighbors at exactly distance 100.
        let mut particles = vec![
            particle_at(0.0, 0.0, 0.0),
            particle_at(100.0, 0.0, 0.0),
            particle_at(0.0, 100.0, 0.0),
            particle_at(0.0, 0.0, 100.0),
            particle_at(-100.0, 0.0, 0.0),
            particle_at(0.0, -100.0, 0.0),
        ];

        rebuild(&mut particles, 80.0, 120.0, &mut always_accept());

        // First three qualifying candidates in scan order, then the cap.
        assert_eq!(particles[0].connections, vec![1, 2, 3]);
    }

    #[test]
    fn rejecting_rng_yields_no_edges() {
        let mut particles = vec![
            particle_at(0.0, 0.0, 0.0),
            particle_at(100.0, 0.0, 0.0),
        ];

        // All draws ~0.0, which never exceeds the 0.5 threshold.
        rebuild(&mut particles, 80.0, 120.0, &mut StepRng::new(0, 0));

        assert!(particles[0].connections.is_empty());
        assert!(particles[1].connections.is_empty());
    }

    #[test]
    fn rebuild_discards_the_previous_graph() {
        let mut particles = vec![
            particle_at(0.0, 0.0, 0.0),
            particle_at(100.0, 0.0, 0.0),
        ];
        rebuild(&mut particles, 80.0, 120.0, &mut always_accept());
        assert_eq!(particles[0].connections, vec![1]);

        // Move the neighbor out of range; the old edge must not survive.
        particles[1].position = Position::new(500.0, 0.0, 0.0);
        rebuild(&mut particles, 80.0, 120.0, &mut always_accept());
        assert!(particles[0].connections.is_empty());
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let mut particles = vec![
            particle_at(0.0, 0.0, 0.0),
            particle_at(80.0, 0.0, 0.0),
            particle_at(0.0, 120.0, 0.0),
            particle_at(0.0, 0.0, 79.9),
        ];

        rebuild(&mut particles, 80.0, 120.0, &mut always_accept());

        assert_eq!(particles[0].connections, vec![1, 2]);
    }
}
