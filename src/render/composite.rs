use crate::foundation::error::{TraitmixError, TraitmixResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of premultiplied pixels with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> TraitmixResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TraitmixError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Convert a premultiplied buffer back to straight alpha, rounding to
/// nearest. Pixels with zero alpha come out fully zero.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_opacity_0_is_noop() {
        let dst = [1, 2, 3, 4];
        let src = [200, 200, 200, 200];
        assert_eq!(over(dst, src, 0.0), dst);
    }

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 40];
        let src = [255, 255, 255, 0];
        assert_eq!(over(dst, src, 1.0), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src, 1.0), src);
    }

    #[test]
    fn over_dst_transparent_returns_scaled_src() {
        let dst = [0, 0, 0, 0];
        let src = [100, 110, 120, 200];
        assert_eq!(over(dst, src, 1.0), src);
    }

    #[test]
    fn over_in_place_rejects_length_mismatch() {
        let mut dst = [0u8; 8];
        assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
        assert!(over_in_place(&mut dst[..7], &[0u8; 7], 1.0).is_err());
    }

    #[test]
    fn unpremultiply_rounds_to_nearest() {
        let mut px = vec![50, 25, 100, 128];
        unpremultiply_rgba8_in_place(&mut px);
        assert_eq!(px, [100, 50, 199, 128]);
    }

    #[test]
    fn unpremultiply_keeps_opaque_and_zeroes_transparent() {
        let mut px = vec![10, 20, 30, 255, 7, 7, 7, 0];
        unpremultiply_rgba8_in_place(&mut px);
        assert_eq!(px, [10, 20, 30, 255, 0, 0, 0, 0]);
    }
}
