use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::{cache::ImageCache, decode::LayerImage},
    foundation::error::TraitmixResult,
    model::{Category, RenderLayer, SelectedLayers},
    render::surface::Surface,
    rules::build_render_layers,
};

/// Options for one composite pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Side of the square output canvas in pixels.
    pub size: u32,
    /// Paint the background layer. Its image is resolved either way so the
    /// cache stays warm for the next toggle.
    pub include_background: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: crate::export::ExportSize::Preview.px(),
            include_background: true,
        }
    }
}

/// Drives the full pipeline: rule engine, parallel image resolve, ordered
/// draw onto a fresh surface.
pub struct Compositor {
    cache: ImageCache,
}

impl Compositor {
    pub fn new(cache: ImageCache) -> Self {
        Self { cache }
    }

    /// The cache backing this compositor, shared across renders.
    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Composite one selection onto a fresh square surface.
    ///
    /// Layers whose image fails to load are dropped with a warning; the only
    /// fatal error out of a render is an unusable surface size.
    #[tracing::instrument(skip(self, selection))]
    pub fn render(
        &self,
        selection: &SelectedLayers,
        options: &RenderOptions,
    ) -> TraitmixResult<Surface> {
        let layers = build_render_layers(selection);
        let mut resolved = self.resolve_images(&layers);
        // Stable: emission order breaks depth ties.
        resolved.sort_by(|a, b| a.0.depth.total_cmp(&b.0.depth));

        let mut surface = Surface::new(options.size, options.size)?;
        for (layer, image) in &resolved {
            if !options.include_background && layer.origin == Category::Background {
                continue;
            }
            surface.draw_layer(image, layer.clip)?;
        }
        Ok(surface)
    }

    /// Fan image loads out across the rayon pool, fan back in preserving
    /// depth order, and drop layers whose load failed.
    fn resolve_images(&self, layers: &[RenderLayer]) -> Vec<(RenderLayer, Arc<LayerImage>)> {
        let loaded: Vec<(RenderLayer, TraitmixResult<Arc<LayerImage>>)> = layers
            .par_iter()
            .map(|layer| (layer.clone(), self.cache.get_or_load(&layer.source)))
            .collect();

        loaded
            .into_iter()
            .filter_map(|(layer, result)| match result {
                Ok(image) => Some((layer, image)),
                Err(err) => {
                    tracing::warn!(
                        source = %layer.source,
                        error = %err,
                        "dropping layer: image load failed"
                    );
                    None
                }
            })
            .collect()
    }
}
