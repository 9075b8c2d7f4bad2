//! Turns a selection into the ordered list of layers to draw.
//!
//! Two phases. Phase A walks the categories in their fixed order and emits at
//! most one layer per selected category, applying that category's override
//! rule (skip, path rewrite, depth raise, or the eyes branch chain). Phase B
//! evaluates a fixed ordered table of virtual-layer rules against the
//! classified tags; each firing rule re-emits a source from the *original*
//! selection at a displaced depth. Phase B never looks at Phase A's output.
//!
//! The result is sorted by depth with a stable sort, so two layers that land
//! on the same slot keep their emission order: category pass first, then rule
//! table order. Callers rely on that tie-break.

use crate::{
    classify::{SelectionTags, classify_selection},
    model::{Category, ClipRegion, RenderLayer, SelectedLayers},
    rules::depth,
};

/// One entry of the virtual-layer table: a named predicate over the tag set
/// and the layer it synthesizes from the selection. `emit` returns `None`
/// when the source it needs is absent or underivable; the rule then skips.
struct VirtualLayerRule {
    name: &'static str,
    applies: fn(&SelectionTags) -> bool,
    emit: fn(&SelectedLayers) -> Option<RenderLayer>,
}

const VIRTUAL_LAYER_RULES: &[VirtualLayerRule] = &[
    VirtualLayerRule {
        name: "astronaut_suit_over_eyes",
        applies: SelectionTags::has_astronaut,
        emit: |sel| {
            let source = sel.get(Category::Clothes)?;
            Some(RenderLayer::new(
                source,
                depth::ASTRONAUT_SUIT,
                Category::Clothes,
            ))
        },
    },
    VirtualLayerRule {
        name: "mask_tied_over_astronaut",
        applies: |t| t.has_astronaut() && t.tie_over_mask(),
        emit: |sel| {
            let source = sel.get(Category::Mask)?;
            Some(RenderLayer::new(
                source,
                depth::MASK_OVER_ASTRONAUT,
                Category::Mask,
            ))
        },
    },
    VirtualLayerRule {
        name: "mask_under_astronaut_collar",
        applies: |t| t.has_astronaut() && t.has_mask() && !t.tie_over_mask(),
        emit: |sel| {
            let source = sel.get(Category::Mask)?;
            Some(RenderLayer::new(
                source,
                depth::MASK_UNDER_ASTRONAUT,
                Category::Mask,
            ))
        },
    },
    VirtualLayerRule {
        name: "clothes_addon_sheet",
        applies: SelectionTags::chia_clothes,
        emit: |sel| {
            let source = derived_variant(sel.get(Category::Clothes)?, "_add")?;
            Some(RenderLayer::new(
                source,
                depth::CLOTHES_ADDON,
                Category::Clothes,
            ))
        },
    },
    VirtualLayerRule {
        name: "full_face_mask_over_all",
        applies: SelectionTags::full_face_mask,
        emit: |sel| {
            let source = sel.get(Category::Mask)?;
            Some(RenderLayer::new(
                source,
                depth::FULL_FACE_MASK,
                Category::Mask,
            ))
        },
    },
    VirtualLayerRule {
        name: "eye_band_over_eyes",
        applies: SelectionTags::eye_band_mask,
        emit: |sel| {
            let source = sel.get(Category::Mask)?;
            Some(RenderLayer::new(
                source,
                depth::MASK_OVER_EYES,
                Category::Mask,
            ))
        },
    },
    VirtualLayerRule {
        name: "mask_under_mouth_item",
        applies: SelectionTags::mask_displaced_by_mouth_item,
        emit: |sel| {
            let source = sel.get(Category::Mask)?;
            Some(RenderLayer::new(
                source,
                depth::MASK_UNDER_MOUTH_ITEM,
                Category::Mask,
            ))
        },
    },
    VirtualLayerRule {
        name: "mask_tail_behind_figure",
        applies: SelectionTags::eye_band_mask,
        emit: |sel| {
            let source = derived_variant(sel.get(Category::Mask)?, "_back")?;
            Some(RenderLayer::new(source, depth::MASK_TAIL, Category::Mask))
        },
    },
    VirtualLayerRule {
        name: "tattoo_under_mask",
        applies: |t| t.tattoo_eyes() && t.has_mask(),
        emit: |sel| {
            let source = sel.get(Category::Eyes)?;
            Some(RenderLayer::new(
                source,
                depth::TATTOO_UNDER_MASK,
                Category::Eyes,
            ))
        },
    },
    VirtualLayerRule {
        name: "eyes_over_tall_head",
        applies: SelectionTags::needs_eyes_over_head,
        emit: |sel| {
            let source = sel.get(Category::Eyes)?;
            Some(RenderLayer::new(
                source,
                depth::EYES_OVER_HEAD,
                Category::Eyes,
            ))
        },
    },
    VirtualLayerRule {
        name: "beard_over_mask",
        applies: |t| t.long_beard() && t.lower_face_mask(),
        emit: |sel| {
            let source = sel.get(Category::FacialHair)?;
            Some(RenderLayer::new(
                source,
                depth::OVER_MASK_DETAIL,
                Category::FacialHair,
            ))
        },
    },
    VirtualLayerRule {
        name: "nose_over_mask",
        applies: |t| t.clown_nose() && t.lower_face_mask(),
        emit: |sel| {
            let source = sel.get(Category::MouthBase)?;
            Some(RenderLayer::new(
                source,
                depth::OVER_MASK_DETAIL,
                Category::MouthBase,
            ))
        },
    },
    VirtualLayerRule {
        name: "mouth_item_over_suit",
        applies: |t| t.has_astronaut() && t.has_mouth_item(),
        emit: |sel| {
            let source = sel.get(Category::MouthItem)?;
            Some(RenderLayer::new(
                source,
                depth::MOUTH_ITEM_OVER_ASTRONAUT,
                Category::MouthItem,
            ))
        },
    },
    VirtualLayerRule {
        name: "laser_through_full_face_mask",
        applies: |t| t.laser_eyes() && t.full_face_mask(),
        emit: |sel| {
            let source = sel.get(Category::Eyes)?;
            Some(RenderLayer::new(
                source,
                depth::LASER_OVER_MASK,
                Category::Eyes,
            ))
        },
    },
];

/// Build the full, depth-ordered layer list for one selection.
///
/// Infallible: an empty or partial selection simply yields fewer layers, and
/// unknown sources fall through as plain one-layer categories.
pub fn build_render_layers(selection: &SelectedLayers) -> Vec<RenderLayer> {
    let tags = classify_selection(selection);
    let mut layers = Vec::new();

    for category in Category::ALL {
        let Some(source) = selection.get(category) else {
            continue;
        };
        push_category_layer(&mut layers, category, source, &tags);
    }

    for rule in VIRTUAL_LAYER_RULES {
        if !(rule.applies)(&tags) {
            continue;
        }
        let Some(layer) = (rule.emit)(selection) else {
            continue;
        };
        tracing::debug!(rule = rule.name, depth = layer.depth, "virtual layer added");
        layers.push(layer);
    }

    // Stable sort keeps emission order for equal depths.
    layers.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    layers
}

fn push_category_layer(
    layers: &mut Vec<RenderLayer>,
    category: Category,
    source: &str,
    tags: &SelectionTags,
) {
    let layer = match category {
        Category::Background => RenderLayer::new(source, depth::BACKGROUND, category),
        Category::Base => RenderLayer::new(source, depth::BASE, category),
        Category::Clothes => {
            if tags.has_astronaut() {
                // The suit rule re-adds it above the eyes.
                return;
            }
            RenderLayer::new(source, depth::CLOTHES, category)
        }
        Category::FacialHair => {
            if tags.full_face_mask() {
                return;
            }
            let depth = if tags.chin_cover_head() {
                depth::FACIAL_HAIR_OVER_HEAD
            } else {
                depth::FACIAL_HAIR
            };
            RenderLayer::new(source, depth, category)
        }
        Category::MouthBase => {
            if tags.full_face_mask() {
                return;
            }
            let depth = if tags.chin_cover_head() {
                depth::MOUTH_BASE_OVER_HEAD
            } else {
                depth::MOUTH_BASE
            };
            RenderLayer::new(source, depth, category)
        }
        Category::MouthItem => {
            if tags.full_face_mask() {
                return;
            }
            let depth = if tags.chin_cover_head() {
                depth::MOUTH_ITEM_OVER_HEAD
            } else {
                depth::MOUTH_ITEM
            };
            RenderLayer::new(source, depth, category)
        }
        Category::Mask => {
            if tags.mask_renders_elsewhere() {
                return;
            }
            RenderLayer::new(source, depth::MASK, category)
        }
        Category::Eyes => {
            let Some(layer) = eyes_layer(source, tags) else {
                return;
            };
            layer
        }
        Category::Head => {
            let source = if tags.head_swaps_when_masked() {
                masked_variant(source)
            } else {
                source.to_string()
            };
            RenderLayer::new(source, depth::HEAD, category)
        }
    };
    layers.push(layer);
}

/// The eyes category branches on head and mask context; the first matching
/// arm wins and at most one layer comes out of Phase A.
fn eyes_layer(source: &str, tags: &SelectionTags) -> Option<RenderLayer> {
    if tags.laser_eyes() && tags.laser_proof_helmet() {
        return Some(RenderLayer::new(
            source,
            depth::LASER_OVER_HEAD,
            Category::Eyes,
        ));
    }
    if tags.accessory_eyes() && tags.helmet_head() && !tags.mask_covers_eye_accessory() {
        return Some(
            RenderLayer::new(source, depth::ACCESSORY_BESIDE_HEAD, Category::Eyes)
                .with_clip(ClipRegion::RightHalf),
        );
    }
    if tags.tattoo_eyes() && tags.has_mask() {
        // Re-added under the mask by the tattoo rule.
        return None;
    }
    if tags.tall_head() {
        // Re-added above the head by the tall-head rule.
        return None;
    }
    Some(RenderLayer::new(source, depth::EYES, Category::Eyes))
}

/// Derive a sibling asset path by splicing `suffix` in front of the `.png`
/// extension. A trailing `_` before the extension collapses into the suffix.
/// Sources without a `.png` extension have no derivable sibling.
fn derived_variant(source: &str, suffix: &str) -> Option<String> {
    let stem = source
        .strip_suffix("_.png")
        .or_else(|| source.strip_suffix(".png"))?;
    Some(format!("{stem}{suffix}.png"))
}

/// The `_masked` helmet variant; sources without a derivable sibling keep
/// their original art.
fn masked_variant(source: &str) -> String {
    derived_variant(source, "_masked").unwrap_or_else(|| source.to_string())
}
