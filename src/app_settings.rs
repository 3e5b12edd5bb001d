use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Initial parameters for the helix simulation.
///
/// Loaded once at startup; nothing here changes while the visualization runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixSettings {
    /// Number of particles per helix strand (two strands total)
    pub particles_per_helix: u32,
    /// Radius of each helix around the vertical axis
    pub helix_radius: f64,
    /// Full revolutions a strand makes over its height
    pub helix_turns: f64,
    /// Rotation increment in radians per frame
    pub rotation_speed: f64,
    /// Half-width of the per-particle random jitter, per axis
    pub float_jitter: f64,
    /// Minimum 3D distance for a connection line
    pub connection_min_dist: f64,
    /// Maximum 3D distance for a connection line
    pub connection_max_dist: f64,
    /// Focal length of the perspective projection
    pub focal_length: f64,
    /// Rendered point radius at z = 0
    pub particle_radius: f64,
    /// Alpha of rendered points
    pub particle_opacity: f64,
    /// RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for HelixSettings {
    fn default() -> Self {
        Self {
            particles_per_helix: 200,
            helix_radius: 100.0,
            helix_turns: 3.0,
            rotation_speed: 0.005,
            float_jitter: 2.5,
            connection_min_dist: 80.0,
            connection_max_dist: 120.0,
            focal_length: 1000.0,
            particle_radius: 1.5,
            particle_opacity: 0.7,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("particles_per_helix must be at least 1")]
    NoParticles,
    #[error("helix_radius must be positive")]
    BadRadius,
    #[error("helix_turns must be positive")]
    BadTurns,
    #[error("connection distance band is inverted (min > max)")]
    BadDistanceBand,
    #[error("focal_length must be positive")]
    BadFocalLength,
}

impl HelixSettings {
    const SETTINGS_FILE: &'static str = "settings.toml";

    /// Loads settings from the settings file, or returns default settings if
    /// the file doesn't exist. Validated either way.
    pub fn load() -> Result<Self, SettingsError> {
        let settings = if Path::new(Self::SETTINGS_FILE).exists() {
            let contents = fs::read_to_string(Self::SETTINGS_FILE)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects parameter sets the simulation cannot be built from. A zero
    /// particle count would divide by zero in the helix angle formula.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.particles_per_helix == 0 {
            return Err(SettingsError::NoParticles);
        }
        if self.helix_radius <= 0.0 {
            return Err(SettingsError::BadRadius);
        }
        if self.helix_turns <= 0.0 {
            return Err(SettingsError::BadTurns);
        }
        if self.connection_min_dist > self.connection_max_dist {
            return Err(SettingsError::BadDistanceBand);
        }
        if self.focal_length <= 0.0 {
            return Err(SettingsError::BadFocalLength);
        }
        Ok(())
    }
}
