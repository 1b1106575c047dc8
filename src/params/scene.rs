//! Top-level scene configuration.

use super::{CameraParams, CloudParams, GrassParams, PlantParams, TerrainParams};
use crate::error::Result;

/// Everything needed to generate a scene, passed explicitly to the generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneConfig {
    pub terrain: TerrainParams,
    pub grass: GrassParams,
    pub plants: PlantParams,
    pub clouds: CloudParams,
    pub camera: CameraParams,
}

impl SceneConfig {
    /// Validate every section before any geometry is generated
    pub fn validate(&self) -> Result<()> {
        self.terrain.validate()?;
        self.grass.validate()?;
        self.plants.validate()?;
        self.clouds.validate()?;
        self.camera.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_reports_first_failing_section() {
        let mut config = SceneConfig::default();
        config.terrain.resolution = 1;
        config.grass.grid_resolution = 0;
        assert_eq!(config.validate(), Err(GeometryError::InvalidResolution(1)));
    }
}
