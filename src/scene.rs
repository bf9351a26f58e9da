//! Scene descriptor
//!
//! The host's scene file, reduced to what the simulation needs: playfield
//! bounds, the player body, the scrolling layers and the obstacle template.
//! Nodes are looked up by role when a [`crate::Simulation`] is built; a
//! missing player body is a construction error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::obstacle::ObstacleTemplate;
use crate::sim::scroll::covering_tile_count;

/// Most tiles a single layer may need to cover the viewport
pub const MAX_LAYER_TILES: usize = 4096;

/// Player body placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub x: f32,
    pub y: f32,
    /// Collision radius (used by the contact probe and ground rest)
    pub radius: f32,
}

/// A looping strip of identical tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub name: String,
    pub tile_width: f32,
    /// Vertical center of the strip
    pub tile_y: f32,
    /// Tiles in the chain; `None` picks the fewest that cover the viewport
    #[serde(default)]
    pub tile_count: Option<usize>,
    /// Fraction of the world scroll speed this layer moves at
    #[serde(default = "default_parallax")]
    pub parallax: f32,
}

fn default_parallax() -> f32 {
    1.0
}

/// Everything the simulation reads from the host scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub width: f32,
    pub height: f32,
    /// Top surface of the ground strip
    pub ground_top: f32,
    #[serde(default)]
    pub hero: Option<BodyDescriptor>,
    #[serde(default)]
    pub scroll_layers: Vec<LayerDescriptor>,
    #[serde(default)]
    pub obstacle: Option<ObstacleTemplate>,
}

impl Default for SceneDescriptor {
    /// Stock 320x568 portrait layout
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 568.0,
            ground_top: 90.0,
            hero: Some(BodyDescriptor {
                x: 80.0,
                y: 320.0,
                radius: 14.0,
            }),
            scroll_layers: vec![LayerDescriptor {
                name: "ground".to_string(),
                tile_width: 320.0,
                tile_y: 45.0,
                tile_count: None,
                parallax: 1.0,
            }],
            obstacle: Some(ObstacleTemplate::default()),
        }
    }
}

impl SceneDescriptor {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "scene",
            source,
        })
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Resolve the player body, failing if it is absent or malformed
    pub fn hero(&self) -> Result<&BodyDescriptor, SimError> {
        let hero = self.hero.as_ref().ok_or(SimError::MissingNode("hero"))?;
        if !(hero.x.is_finite() && hero.y.is_finite()) {
            return Err(SimError::scene("hero", "position is not finite"));
        }
        if !(hero.radius.is_finite() && hero.radius > 0.0) {
            return Err(SimError::scene("hero", "radius must be positive"));
        }
        Ok(hero)
    }

    /// Resolve the obstacle template
    pub fn obstacle_template(&self) -> Result<ObstacleTemplate, SimError> {
        let template = self.obstacle.ok_or(SimError::MissingNode("obstacle"))?;
        if !(template.width.is_finite() && template.width > 0.0) {
            return Err(SimError::scene("obstacle", "width must be positive"));
        }
        if !(template.gap_height.is_finite() && template.gap_height > 0.0) {
            return Err(SimError::scene("obstacle", "gap height must be positive"));
        }
        Ok(template)
    }

    /// Check playfield bounds and every scroll layer
    pub fn validate_layout(&self) -> Result<(), SimError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SimError::scene("scene", "width must be positive"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SimError::scene("scene", "height must be positive"));
        }
        if !self.ground_top.is_finite() {
            return Err(SimError::scene("scene", "ground top is not finite"));
        }
        for layer in &self.scroll_layers {
            if !(layer.tile_width.is_finite() && layer.tile_width > 0.0) {
                return Err(SimError::scene(&layer.name, "tile width must be positive"));
            }
            if !layer.tile_y.is_finite() || !layer.parallax.is_finite() {
                return Err(SimError::scene(&layer.name, "position is not finite"));
            }
            if layer.parallax < 0.0 {
                return Err(SimError::scene(&layer.name, "parallax must not be negative"));
            }
            let covering = covering_tile_count(self.width, layer.tile_width);
            if covering > MAX_LAYER_TILES {
                return Err(SimError::scene(
                    &layer.name,
                    format!(
                        "tile width {} needs more than {MAX_LAYER_TILES} tiles",
                        layer.tile_width
                    ),
                ));
            }
            let count = layer.tile_count.unwrap_or(covering);
            if count < covering {
                return Err(SimError::scene(
                    &layer.name,
                    format!("{count} tiles, {covering} needed to cover the viewport"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_resolves() {
        let scene = SceneDescriptor::default();
        scene.validate_layout().unwrap();
        assert_eq!(scene.hero().unwrap().x, 80.0);
        assert_eq!(scene.obstacle_template().unwrap(), ObstacleTemplate::default());
    }

    #[test]
    fn test_missing_hero_is_reported() {
        let scene = SceneDescriptor {
            hero: None,
            ..Default::default()
        };
        assert!(matches!(scene.hero(), Err(SimError::MissingNode("hero"))));
    }

    #[test]
    fn test_json_without_hero_parses_but_does_not_resolve() {
        let scene = SceneDescriptor::from_json(
            r#"{ "width": 320, "height": 568, "ground_top": 90,
                 "obstacle": { "width": 52, "gap_height": 130 } }"#,
        )
        .unwrap();
        assert!(scene.scroll_layers.is_empty());
        assert!(matches!(scene.hero(), Err(SimError::MissingNode("hero"))));
    }

    #[test]
    fn test_short_chain_is_rejected() {
        let mut scene = SceneDescriptor::default();
        scene.scroll_layers[0].tile_width = 100.0;
        scene.scroll_layers[0].tile_count = Some(1);
        let err = scene.validate_layout().unwrap_err();
        assert!(err.to_string().contains("5 needed to cover the viewport"));

        scene.scroll_layers[0].tile_count = Some(0);
        assert!(scene.validate_layout().is_err());

        scene.scroll_layers[0].tile_count = Some(5);
        scene.validate_layout().unwrap();
    }

    #[test]
    fn test_tiny_tile_is_rejected() {
        let mut scene = SceneDescriptor::default();
        scene.scroll_layers[0].tile_width = 1e-30;
        let err = scene.validate_layout().unwrap_err();
        assert!(err.to_string().contains("ground"));
    }

    #[test]
    fn test_zero_width_tile_is_rejected() {
        let mut scene = SceneDescriptor::default();
        scene.scroll_layers[0].tile_width = 0.0;
        let err = scene.validate_layout().unwrap_err();
        assert!(err.to_string().contains("ground"));
    }
}
