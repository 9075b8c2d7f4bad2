//! The substring contract: each selected source is matched case-insensitively
//! against a short keyword list and collapses to one closed kind per category.
//! Anything unrecognized is the plain kind of its category and stays inert.

fn normalized(source: &str) -> String {
    source.trim().to_ascii_lowercase()
}

/// Clothes families the rule table cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClothesKind {
    /// Bulky suit whose collar wraps the whole figure.
    Astronaut,
    /// Outfit with a separate overlay sheet (`_add` asset).
    ChiaFarmer,
    Plain,
}

impl ClothesKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("astronaut") {
            Self::Astronaut
        } else if s.contains("chia") {
            Self::ChiaFarmer
        } else {
            Self::Plain
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacialHairKind {
    /// Beard long enough to hang over a lower-face mask.
    LongBeard,
    Plain,
}

impl FacialHairKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("wizard") || s.contains("long_beard") {
            Self::LongBeard
        } else {
            Self::Plain
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouthBaseKind {
    /// Nose prop that pokes through a lower-face mask.
    ClownNose,
    Plain,
}

impl MouthBaseKind {
    pub fn from_source(source: &str) -> Self {
        if normalized(source).contains("clown") {
            Self::ClownNose
        } else {
            Self::Plain
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouthItemKind {
    /// Item sticking out far enough to displace a mask (pipe, cigar).
    Protruding,
    Plain,
}

impl MouthItemKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("pipe") || s.contains("cigar") {
            Self::Protruding
        } else {
            Self::Plain
        }
    }
}

/// Mask families, distinguished by what part of the face they cover and how
/// they interact with bulky clothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskKind {
    /// Covers the whole face; drawn above everything facial.
    FullFace,
    /// Band across the eyes, knotted behind the head (`_back` asset).
    EyeBand,
    /// Cloth tied outside the collar when worn with a suit.
    TieOver,
    /// Default: covers the lower face only.
    LowerFace,
}

impl MaskKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("hannibal") {
            Self::FullFace
        } else if s.contains("ronin") {
            Self::EyeBand
        } else if s.contains("bandana") {
            Self::TieOver
        } else {
            Self::LowerFace
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyesKind {
    /// Beam effect that can outshine headgear and masks.
    Laser,
    /// Ink on the skin; slips under masks instead of over them.
    Tattoo,
    /// Worn accessory (band, goggles) that sits beside tall headgear.
    Accessory,
    Plain,
}

impl EyesKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("laser") {
            Self::Laser
        } else if s.contains("tyson") {
            Self::Tattoo
        } else if s.contains("turtle") {
            Self::Accessory
        } else {
            Self::Plain
        }
    }
}

/// Head families. Match order matters: a source naming several families keeps
/// the first one listed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadKind {
    /// Helmet with a `_masked` art variant for mask combinations.
    Helmet {
        /// Visor rated against laser eyes.
        laser_proof: bool,
    },
    /// Tall headgear the eyes must be re-drawn above.
    Tall,
    /// Covers the chin, pushing the mouth area above it.
    ChinCover,
    Plain,
}

impl HeadKind {
    pub fn from_source(source: &str) -> Self {
        let s = normalized(source);
        if s.contains("knight") {
            Self::Helmet { laser_proof: true }
        } else if s.contains("centurion") {
            Self::Helmet { laser_proof: false }
        } else if s.contains("crown") || s.contains("tophat") {
            Self::Tall
        } else if s.contains("hood") {
            Self::ChinCover
        } else {
            Self::Plain
        }
    }

    pub fn is_helmet(self) -> bool {
        matches!(self, Self::Helmet { .. })
    }

    pub fn is_laser_proof(self) -> bool {
        matches!(self, Self::Helmet { laser_proof: true })
    }
}
