pub use kurbo::Rect;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_straight_rounds_to_nearest() {
        let c = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
        assert_eq!(c.r, ((100u16 * 128 + 127) / 255) as u8);
        assert_eq!(c.g, ((50u16 * 128 + 127) / 255) as u8);
        assert_eq!(c.b, ((200u16 * 128 + 127) / 255) as u8);
        assert_eq!(c.a, 128);
    }

    #[test]
    fn transparent_is_all_zero() {
        let c = Rgba8Premul::transparent();
        assert_eq!((c.r, c.g, c.b, c.a), (0, 0, 0, 0));
    }
}
