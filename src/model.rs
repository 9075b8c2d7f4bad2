use crate::foundation::core::Rect;

/// Body-part categories, in pass order.
///
/// The variant order is load-bearing: it is the order the rule engine walks the
/// selection in, and therefore the draw order between layers that end up at the
/// same depth.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Background,
    Base,
    Clothes,
    FacialHair,
    MouthBase,
    MouthItem,
    Mask,
    Eyes,
    Head,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Background,
        Category::Base,
        Category::Clothes,
        Category::FacialHair,
        Category::MouthBase,
        Category::MouthItem,
        Category::Mask,
        Category::Eyes,
        Category::Head,
    ];
}

/// One optional asset source per category; the only state the engine consumes.
///
/// Sources are opaque path-like strings. The engine treats them read-only and
/// rebuilds everything derived from them on every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelectedLayers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facial_hair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

impl SelectedLayers {
    pub fn get(&self, category: Category) -> Option<&str> {
        self.slot(category).as_deref()
    }

    pub fn set(&mut self, category: Category, source: impl Into<String>) {
        *self.slot_mut(category) = Some(source.into());
    }

    pub fn clear(&mut self, category: Category) {
        *self.slot_mut(category) = None;
    }

    /// A selection is drawable once it has at least a base figure.
    pub fn has_required_selections(&self) -> bool {
        self.base.is_some()
    }

    fn slot(&self, category: Category) -> &Option<String> {
        match category {
            Category::Background => &self.background,
            Category::Base => &self.base,
            Category::Clothes => &self.clothes,
            Category::FacialHair => &self.facial_hair,
            Category::MouthBase => &self.mouth_base,
            Category::MouthItem => &self.mouth_item,
            Category::Mask => &self.mask,
            Category::Eyes => &self.eyes,
            Category::Head => &self.head,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Background => &mut self.background,
            Category::Base => &mut self.base,
            Category::Clothes => &mut self.clothes,
            Category::FacialHair => &mut self.facial_hair,
            Category::MouthBase => &mut self.mouth_base,
            Category::MouthItem => &mut self.mouth_item,
            Category::Mask => &mut self.mask,
            Category::Eyes => &mut self.eyes,
            Category::Head => &mut self.head,
        }
    }
}

/// Region of the destination canvas a layer is allowed to paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipRegion {
    #[default]
    Full,
    /// Paint only columns in `[size/2, size)`.
    RightHalf,
    /// Skip the leftmost fraction: paint columns in `[size * p, size)`.
    LeftFraction(f64),
}

impl ClipRegion {
    /// Destination-space clip rectangle for a square canvas of side `size`.
    pub fn to_rect(self, size: u32) -> Rect {
        let side = f64::from(size);
        match self {
            ClipRegion::Full => Rect::new(0.0, 0.0, side, side),
            ClipRegion::RightHalf => Rect::new(side / 2.0, 0.0, side, side),
            ClipRegion::LeftFraction(p) => Rect::new(side * p.clamp(0.0, 1.0), 0.0, side, side),
        }
    }
}

/// Ephemeral draw instruction produced by the rule engine.
///
/// Never persisted; the full list is rebuilt from [`SelectedLayers`] on every
/// pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderLayer {
    /// Identifying source path of the image to draw.
    pub source: String,
    /// Larger depths draw later (closer to the viewer).
    pub depth: f64,
    /// Category whose pass (or rule) produced this layer.
    pub origin: Category,
    #[serde(default)]
    pub clip: ClipRegion,
}

impl RenderLayer {
    pub fn new(source: impl Into<String>, depth: f64, origin: Category) -> Self {
        Self {
            source: source.into(),
            depth,
            origin,
            clip: ClipRegion::Full,
        }
    }

    pub fn with_clip(mut self, clip: ClipRegion) -> Self {
        self.clip = clip;
        self
    }
}
