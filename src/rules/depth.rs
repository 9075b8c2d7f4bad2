//! Every stacking depth used by the rule engine, in one place.
//!
//! Depths are plain `f64`s rather than an enum so displacement rules can slot
//! layers between the base categories (`10.25` sits between eyes and head).
//! Keeping the whole table in a single module makes relative order auditable
//! at a glance; no other module is allowed to invent a depth.

/// Base depth for each category when no displacement rule applies.
pub const BACKGROUND: f64 = 0.0;
pub const BASE: f64 = 2.0;
pub const CLOTHES: f64 = 4.0;
pub const FACIAL_HAIR: f64 = 5.0;
pub const MOUTH_BASE: f64 = 6.0;
pub const MOUTH_ITEM: f64 = 7.0;
pub const MASK: f64 = 8.0;
pub const EYES: f64 = 10.0;
pub const HEAD: f64 = 12.0;

/// Dangling mask tail drawn behind the figure, above the background.
pub const MASK_TAIL: f64 = 1.0;
/// Secondary clothes sheet layered over the garment itself.
pub const CLOTHES_ADDON: f64 = 4.5;
/// Lower-face mask pushed under a protruding mouth item.
pub const MASK_UNDER_MOUTH_ITEM: f64 = 6.5;
/// Eye tattoo that a worn mask must cover.
pub const TATTOO_UNDER_MASK: f64 = 7.5;
/// Facial detail (beard, nose) re-drawn on top of a lower-face mask.
pub const OVER_MASK_DETAIL: f64 = 8.75;
/// Eye-band mask drawn over the eyes it wraps.
pub const MASK_OVER_EYES: f64 = 10.25;
/// Mask tucked under an astronaut collar.
pub const MASK_UNDER_ASTRONAUT: f64 = 10.5;
/// Astronaut suit drawn over the face stack.
pub const ASTRONAUT_SUIT: f64 = 11.0;
/// Tie-over mask knotted outside the astronaut suit.
pub const MASK_OVER_ASTRONAUT: f64 = 11.5;
/// Mouth item poking out over the astronaut suit.
pub const MOUTH_ITEM_OVER_ASTRONAUT: f64 = 11.75;
/// Long beard spilling over chin-covering headgear.
pub const FACIAL_HAIR_OVER_HEAD: f64 = 12.1;
/// Clown nose re-drawn over chin-covering headgear.
pub const MOUTH_BASE_OVER_HEAD: f64 = 12.2;
/// Eye accessory worn beside an open helmet (right half only).
pub const ACCESSORY_BESIDE_HEAD: f64 = 12.25;
/// Mouth item re-drawn over chin-covering headgear.
pub const MOUTH_ITEM_OVER_HEAD: f64 = 12.3;
/// Full-face mask drawn over everything but lasers.
pub const FULL_FACE_MASK: f64 = 12.5;
/// Laser eyes burning through a full-face mask.
pub const LASER_OVER_MASK: f64 = 12.75;
/// Eyes re-drawn over tall headgear.
pub const EYES_OVER_HEAD: f64 = 13.0;
/// Laser eyes over a laser-proof helmet.
pub const LASER_OVER_HEAD: f64 = 13.5;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [(&str, f64); 27] = [
        ("BACKGROUND", BACKGROUND),
        ("BASE", BASE),
        ("CLOTHES", CLOTHES),
        ("FACIAL_HAIR", FACIAL_HAIR),
        ("MOUTH_BASE", MOUTH_BASE),
        ("MOUTH_ITEM", MOUTH_ITEM),
        ("MASK", MASK),
        ("EYES", EYES),
        ("HEAD", HEAD),
        ("MASK_TAIL", MASK_TAIL),
        ("CLOTHES_ADDON", CLOTHES_ADDON),
        ("MASK_UNDER_MOUTH_ITEM", MASK_UNDER_MOUTH_ITEM),
        ("TATTOO_UNDER_MASK", TATTOO_UNDER_MASK),
        ("OVER_MASK_DETAIL", OVER_MASK_DETAIL),
        ("MASK_OVER_EYES", MASK_OVER_EYES),
        ("MASK_UNDER_ASTRONAUT", MASK_UNDER_ASTRONAUT),
        ("ASTRONAUT_SUIT", ASTRONAUT_SUIT),
        ("MASK_OVER_ASTRONAUT", MASK_OVER_ASTRONAUT),
        ("MOUTH_ITEM_OVER_ASTRONAUT", MOUTH_ITEM_OVER_ASTRONAUT),
        ("FACIAL_HAIR_OVER_HEAD", FACIAL_HAIR_OVER_HEAD),
        ("MOUTH_BASE_OVER_HEAD", MOUTH_BASE_OVER_HEAD),
        ("ACCESSORY_BESIDE_HEAD", ACCESSORY_BESIDE_HEAD),
        ("MOUTH_ITEM_OVER_HEAD", MOUTH_ITEM_OVER_HEAD),
        ("FULL_FACE_MASK", FULL_FACE_MASK),
        ("LASER_OVER_MASK", LASER_OVER_MASK),
        ("EYES_OVER_HEAD", EYES_OVER_HEAD),
        ("LASER_OVER_HEAD", LASER_OVER_HEAD),
    ];

    #[test]
    fn all_slots_are_distinct() {
        let mut sorted = ALL;
        sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
        for pair in sorted.windows(2) {
            assert!(
                pair[0].1 < pair[1].1,
                "{} and {} share depth {}",
                pair[0].0,
                pair[1].0,
                pair[0].1
            );
        }
    }

    #[test]
    fn displaced_slots_sit_between_their_neighbours() {
        assert!(BACKGROUND < MASK_TAIL && MASK_TAIL < BASE);
        assert!(CLOTHES < CLOTHES_ADDON && CLOTHES_ADDON < FACIAL_HAIR);
        assert!(MOUTH_BASE < MASK_UNDER_MOUTH_ITEM && MASK_UNDER_MOUTH_ITEM < MOUTH_ITEM);
        assert!(MOUTH_ITEM < TATTOO_UNDER_MASK && TATTOO_UNDER_MASK < MASK);
        assert!(MASK < OVER_MASK_DETAIL && OVER_MASK_DETAIL < EYES);
        assert!(EYES < MASK_OVER_EYES && MASK_OVER_EYES < MASK_UNDER_ASTRONAUT);
        assert!(MASK_UNDER_ASTRONAUT < ASTRONAUT_SUIT && ASTRONAUT_SUIT < MASK_OVER_ASTRONAUT);
        assert!(MASK_OVER_ASTRONAUT < MOUTH_ITEM_OVER_ASTRONAUT);
        assert!(MOUTH_ITEM_OVER_ASTRONAUT < HEAD);
        assert!(HEAD < FACIAL_HAIR_OVER_HEAD);
        assert!(FACIAL_HAIR_OVER_HEAD < MOUTH_BASE_OVER_HEAD);
        assert!(MOUTH_BASE_OVER_HEAD < ACCESSORY_BESIDE_HEAD);
        assert!(ACCESSORY_BESIDE_HEAD < MOUTH_ITEM_OVER_HEAD);
        assert!(MOUTH_ITEM_OVER_HEAD < FULL_FACE_MASK);
        assert!(FULL_FACE_MASK < LASER_OVER_MASK);
        assert!(LASER_OVER_MASK < EYES_OVER_HEAD);
        assert!(EYES_OVER_HEAD < LASER_OVER_HEAD);
    }
}
