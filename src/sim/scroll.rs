//! Looping background strips
//!
//! Each layer is a chain of equal-width tiles. Tiles move left every step;
//! a tile whose right edge leaves the viewport jumps forward by the length
//! of the whole chain, which puts it directly behind the rightmost tile.

use serde::{Deserialize, Serialize};

use crate::scene::LayerDescriptor;

/// One background segment (x is the tile center in viewport coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl ScrollTile {
    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Fewest tiles that keep a `viewport_width` strip covered while scrolling
pub fn covering_tile_count(viewport_width: f32, tile_width: f32) -> usize {
    ((viewport_width / tile_width).ceil() as usize).saturating_add(1)
}

/// A chain of tiles scrolling together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollLayer {
    pub name: String,
    pub parallax: f32,
    tiles: Vec<ScrollTile>,
    /// Total chain length, the distance a wrapping tile jumps
    span: f32,
}

impl ScrollLayer {
    /// Lay tiles edge to edge starting at the left viewport bound.
    ///
    /// The descriptor must already have passed
    /// [`crate::SceneDescriptor::validate_layout`].
    pub fn new(desc: &LayerDescriptor, viewport_width: f32) -> Self {
        let w = desc.tile_width;
        let count = desc
            .tile_count
            .unwrap_or_else(|| covering_tile_count(viewport_width, w));

        let tiles = (0..count)
            .map(|i| ScrollTile {
                x: w / 2.0 + i as f32 * w,
                y: desc.tile_y,
                width: w,
            })
            .collect();

        Self {
            name: desc.name.clone(),
            parallax: desc.parallax,
            tiles,
            span: count as f32 * w,
        }
    }

    pub fn tiles(&self) -> &[ScrollTile] {
        &self.tiles
    }

    /// Shift left by `dx` and wrap tiles that left the viewport.
    ///
    /// Each tile is wrapped using only its own position, so any number of
    /// tiles can wrap in the same call. The chain repeats every `span`, so
    /// only `dx mod span` is applied and a tile wraps at most once.
    pub fn advance(&mut self, dx: f32) {
        let dx = dx.rem_euclid(self.span);
        for tile in &mut self.tiles {
            tile.x -= dx;
            if tile.right() <= 0.0 {
                tile.x += self.span;
            }
        }
    }
}

/// All background layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrollManager {
    pub layers: Vec<ScrollLayer>,
}

impl ScrollManager {
    pub fn new(descs: &[LayerDescriptor], viewport_width: f32) -> Self {
        Self {
            layers: descs
                .iter()
                .map(|d| ScrollLayer::new(d, viewport_width))
                .collect(),
        }
    }

    /// Move every layer left by `scroll_speed * dt`, scaled by its parallax
    pub fn advance(&mut self, dt: f32, scroll_speed: f32) {
        for layer in &mut self.layers {
            layer.advance(scroll_speed * layer.parallax * dt);
        }
    }

    /// Every tile of every layer, tagged with its layer index
    pub fn tiles(&self) -> impl Iterator<Item = (usize, &ScrollTile)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| layer.tiles.iter().map(move |t| (i, t)))
    }
}
