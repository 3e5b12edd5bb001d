//! 3D → 2D projection and scene drawing.
//!
//! Points get the perspective divide; connection lines are drawn between the
//! raw un-projected endpoints. The mismatch is inherited behavior and kept on
//! purpose: lines and points drift apart at high |z|, which reads as depth
//! haze rather than a glitch.

use crate::framebuffer::{Color, FrameBuffer};
use crate::particle::{Particle, Position};

const BACKGROUND: Color = Color::opaque(0, 0, 0);
const EDGE_COLOR: Color = Color::rgba(255, 255, 255, 0.2);
const POINT_R: u8 = 255;
const POINT_G: u8 = 225;
const POINT_B: u8 = 255;

/// Perspective projection onto a surface, origin at the surface center.
pub struct Projector {
    center_x: f64,
    center_y: f64,
    focal: f64,
}

impl Projector {
    pub fn new(surface_width: u32, surface_height: u32, focal: f64) -> Self {
        Self {
            center_x: surface_width as f64 / 2.0,
            center_y: surface_height as f64 / 2.0,
            focal,
        }
    }

    /// Scale factor at depth `z`: 1.0 at z = 0, shrinking with distance and
    /// growing past 1.0 for points in front of the z = 0 plane.
    pub fn perspective(&self, z: f64) -> f64 {
        self.focal / (self.focal + z)
    }

    /// Projects a 3D point to screen coordinates plus its scale factor.
    pub fn project(&self, p: &Position) -> (f64, f64, f64) {
        let scale = self.perspective(p.z);
        (
            self.center_x + p.x * scale,
            self.center_y + p.y * scale,
            scale,
        )
    }

    /// Screen position of a point without the perspective divide.
    pub fn flat(&self, p: &Position) -> (f64, f64) {
        (self.center_x + p.x, self.center_y + p.y)
    }
}

/// Draws one frame: clear, then every connection edge, then every point.
/// Render order is fixed, not depth-sorted. A zero-sized surface is skipped.
pub fn draw_scene(frame: &mut FrameBuffer, particles: &[Particle], focal: f64) {
    if frame.is_empty() {
        return;
    }

    frame.clear(BACKGROUND);
    let projector = Projector::new(frame.width(), frame.height(), focal);

    for p in particles {
        let (x0, y0) = projector.flat(&p.position);
        for &j in &p.connections {
            let (x1, y1) = projector.flat(&particles[j].position);
            frame.draw_line(x0, y0, x1, y1, EDGE_COLOR);
        }
    }

    for p in particles {
        // Behind the focal point the divide flips sign; nothing sane to draw.
        if p.position.z <= -focal {
            continue;
        }
        let (sx, sy, scale) = projector.project(&p.position);
        frame.fill_circle(
            sx,
            sy,
            p.radius * scale,
            Color::rgba(POINT_R, POINT_G, POINT_B, p.opacity as f32),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::HelixSettings;
    use nalgebra::Vector3;

    fn particle_at(x: f64, y: f64, z: f64) -> Particle {
        Particle::new(
            Position::new(x, y, z),
            Vector3::zeros(),
            &HelixSettings::default(),
        )
    }

    #[test]
    fn zero_depth_projects_to_raw_offset() {
        let projector = Projector::new(800, 600, 1000.0);
        assert_eq!(projector.perspective(0.0), 1.0);

        let (sx, sy, scale) = projector.project(&Position::new(30.0, -20.0, 0.0));
        assert_eq!(scale, 1.0);
        assert_eq!(sx, 430.0);
        assert_eq!(sy, 280.0);
    }

    #[test]
    fn farther_points_render_smaller() {
        let projector = Projector::new(800, 600, 1000.0);
        let far = projector.perspective(100.0);
        let near = projector.perspective(-100.0);
        assert!(far < 1.0);
        assert!(near > 1.0);
    }

    #[test]
    fn edges_use_unprojected_endpoints() {
        let projector = Projector::new(800, 600, 1000.0);
        let deep = Position::new(50.0, 0.0, 500.0);
        let (fx, fy) = projector.flat(&deep);
        let (px, py, _) = projector.project(&deep);
        // Same point, two screen positions: flat at the raw offset, the
        // projected one pulled toward center.
        assert_eq!((fx, fy), (450.0, 300.0));
        assert!(px < fx);
        assert_eq!(py, fy);
    }

    #[test]
    fn scene_paints_a_centered_particle() {
        let mut frame = FrameBuffer::new(64, 64);
        let particles = vec![particle_at(0.0, 0.0, 0.0)];
        draw_scene(&mut frame, &particles, 1000.0);

        let idx = ((32 * frame.width() + 32) * 4) as usize;
        let px = &frame.bytes()[idx..idx + 4];
        // Warm white at 0.7 alpha over black.
        assert!(px[0] > 150 && px[1] > 130 && px[2] > 150);
    }

    #[test]
    fn scene_draws_connection_lines_before_points() {
        let mut frame = FrameBuffer::new(256, 256);
        let mut a = particle_at(-60.0, 0.0, 0.0);
        a.connections.push(1);
        let b = particle_at(60.0, 0.0, 0.0);
        draw_scene(&mut frame, &[a, b], 1000.0);

        // Midpoint of the edge, far from both point sprites.
        let idx = ((128 * frame.width() + 128) * 4) as usize;
        let px = &frame.bytes()[idx..idx + 4];
        assert_eq!(&px[..3], &[51, 51, 51]);
    }

    #[test]
    fn zero_sized_surface_skips_the_frame() {
        let mut frame = FrameBuffer::new(0, 0);
        let particles = vec![particle_at(0.0, 0.0, 0.0)];
        draw_scene(&mut frame, &particles, 1000.0);
    }
}
