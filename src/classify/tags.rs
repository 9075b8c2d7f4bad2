use crate::{
    classify::kinds::{
        ClothesKind, EyesKind, FacialHairKind, HeadKind, MaskKind, MouthBaseKind, MouthItemKind,
    },
    model::{Category, SelectedLayers},
};

/// The classified view of a selection: one optional kind per rule-bearing
/// category (`None` when the category is empty).
///
/// Pure data; every predicate below is a function of these fields only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionTags {
    pub clothes: Option<ClothesKind>,
    pub facial_hair: Option<FacialHairKind>,
    pub mouth_base: Option<MouthBaseKind>,
    pub mouth_item: Option<MouthItemKind>,
    pub mask: Option<MaskKind>,
    pub eyes: Option<EyesKind>,
    pub head: Option<HeadKind>,
}

/// Classify every selected source exactly once.
pub fn classify_selection(selection: &SelectedLayers) -> SelectionTags {
    SelectionTags {
        clothes: selection.get(Category::Clothes).map(ClothesKind::from_source),
        facial_hair: selection
            .get(Category::FacialHair)
            .map(FacialHairKind::from_source),
        mouth_base: selection
            .get(Category::MouthBase)
            .map(MouthBaseKind::from_source),
        mouth_item: selection
            .get(Category::MouthItem)
            .map(MouthItemKind::from_source),
        mask: selection.get(Category::Mask).map(MaskKind::from_source),
        eyes: selection.get(Category::Eyes).map(EyesKind::from_source),
        head: selection.get(Category::Head).map(HeadKind::from_source),
    }
}

impl SelectionTags {
    pub fn has_astronaut(&self) -> bool {
        self.clothes == Some(ClothesKind::Astronaut)
    }

    pub fn chia_clothes(&self) -> bool {
        self.clothes == Some(ClothesKind::ChiaFarmer)
    }

    pub fn long_beard(&self) -> bool {
        self.facial_hair == Some(FacialHairKind::LongBeard)
    }

    pub fn clown_nose(&self) -> bool {
        self.mouth_base == Some(MouthBaseKind::ClownNose)
    }

    pub fn has_mouth_item(&self) -> bool {
        self.mouth_item.is_some()
    }

    pub fn protruding_mouth_item(&self) -> bool {
        self.mouth_item == Some(MouthItemKind::Protruding)
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn full_face_mask(&self) -> bool {
        self.mask == Some(MaskKind::FullFace)
    }

    pub fn eye_band_mask(&self) -> bool {
        self.mask == Some(MaskKind::EyeBand)
    }

    pub fn tie_over_mask(&self) -> bool {
        self.mask == Some(MaskKind::TieOver)
    }

    /// Masks that cover the lower face (the default kind and tied cloths).
    pub fn lower_face_mask(&self) -> bool {
        matches!(self.mask, Some(MaskKind::LowerFace | MaskKind::TieOver))
    }

    pub fn laser_eyes(&self) -> bool {
        self.eyes == Some(EyesKind::Laser)
    }

    pub fn tattoo_eyes(&self) -> bool {
        self.eyes == Some(EyesKind::Tattoo)
    }

    pub fn accessory_eyes(&self) -> bool {
        self.eyes == Some(EyesKind::Accessory)
    }

    pub fn has_eyes(&self) -> bool {
        self.eyes.is_some()
    }

    pub fn helmet_head(&self) -> bool {
        self.head.is_some_and(HeadKind::is_helmet)
    }

    pub fn laser_proof_helmet(&self) -> bool {
        self.head.is_some_and(HeadKind::is_laser_proof)
    }

    pub fn tall_head(&self) -> bool {
        self.head == Some(HeadKind::Tall)
    }

    pub fn chin_cover_head(&self) -> bool {
        self.head == Some(HeadKind::ChinCover)
    }

    /// Helmet art swaps to its `_masked` variant whenever any mask is worn.
    pub fn head_swaps_when_masked(&self) -> bool {
        self.has_mask() && self.helmet_head()
    }

    /// A full-face mask swallows a worn eye accessory entirely.
    pub fn mask_covers_eye_accessory(&self) -> bool {
        self.accessory_eyes() && self.full_face_mask()
    }

    /// A plain lower-face mask gets pushed under a protruding mouth item.
    /// Suit displacement wins when both apply.
    pub fn mask_displaced_by_mouth_item(&self) -> bool {
        self.has_mask()
            && self.protruding_mouth_item()
            && !self.full_face_mask()
            && !self.eye_band_mask()
            && !self.has_astronaut()
    }

    /// True when the mask category must not draw at its base depth because a
    /// displacement rule re-adds it elsewhere.
    pub fn mask_renders_elsewhere(&self) -> bool {
        self.full_face_mask()
            || self.eye_band_mask()
            || (self.has_mask() && self.has_astronaut())
            || self.mask_displaced_by_mouth_item()
    }

    pub fn needs_eyes_over_head(&self) -> bool {
        self.tall_head() && self.has_eyes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(build: impl FnOnce(&mut SelectedLayers)) -> SelectionTags {
        let mut sel = SelectedLayers::default();
        build(&mut sel);
        classify_selection(&sel)
    }

    #[test]
    fn empty_selection_has_no_tags() {
        let t = classify_selection(&SelectedLayers::default());
        assert_eq!(t, SelectionTags::default());
        assert!(!t.has_mask());
        assert!(!t.mask_renders_elsewhere());
    }

    #[test]
    fn classification_is_idempotent() {
        let mut sel = SelectedLayers::default();
        sel.set(Category::Clothes, "astronaut_white.png");
        sel.set(Category::Mask, "bandana_red.png");
        assert_eq!(classify_selection(&sel), classify_selection(&sel));
    }

    #[test]
    fn displacement_precedence_suit_beats_mouth_item() {
        let t = tags(|sel| {
            sel.set(Category::Clothes, "astronaut_white.png");
            sel.set(Category::Mask, "surgical.png");
            sel.set(Category::MouthItem, "briar_pipe.png");
        });
        assert!(t.mask_renders_elsewhere());
        assert!(!t.mask_displaced_by_mouth_item());
    }

    #[test]
    fn lower_face_masks_include_tied_cloths() {
        let bandana = tags(|sel| sel.set(Category::Mask, "bandana_red.png"));
        assert!(bandana.lower_face_mask());
        assert!(bandana.tie_over_mask());

        let band = tags(|sel| sel.set(Category::Mask, "ronin_band.png"));
        assert!(!band.lower_face_mask());
        assert!(band.mask_renders_elsewhere());
    }

    #[test]
    fn covered_accessory_needs_both_parts() {
        let covered = tags(|sel| {
            sel.set(Category::Eyes, "turtle_band.png");
            sel.set(Category::Mask, "hannibal.png");
        });
        assert!(covered.mask_covers_eye_accessory());

        let bare = tags(|sel| sel.set(Category::Eyes, "turtle_band.png"));
        assert!(!bare.mask_covers_eye_accessory());
    }
}
