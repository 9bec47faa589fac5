//! Token-to-color resolution with a per-instance cache

use embedded_graphics::pixelcolor::Rgb565;
use heapless::LinearMap;
use log::warn;

use super::colors::{ColorPalette, ColorToken, FALLBACK_COLOR};

/// Maximum number of distinct tokens remembered by one resolver.
pub const RESOLVER_CACHE_CAPACITY: usize = 16;

/// Resolves [`ColorToken`]s against a palette.
///
/// Each resolver owns its cache; nothing is shared between instances. A
/// token the palette cannot resolve yields the fallback color, so
/// resolution never fails.
pub struct ColorResolver {
    palette: ColorPalette,
    fallback: Rgb565,
    cache: LinearMap<ColorToken, Rgb565, RESOLVER_CACHE_CAPACITY>,
}

impl ColorResolver {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            fallback: FALLBACK_COLOR,
            cache: LinearMap::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Rgb565) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve a token, consulting the cache first.
    pub fn resolve(&mut self, token: ColorToken) -> Rgb565 {
        if let Some(color) = self.cache.get(&token) {
            return *color;
        }

        let color = self.palette.token(token).unwrap_or_else(|| {
            warn!("No palette entry for {:?}, using fallback", token);
            self.fallback
        });

        if self.cache.insert(token, color).is_err() {
            warn!("Color cache full, {:?} resolved uncached", token);
        }
        color
    }

    /// Number of tokens currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}
