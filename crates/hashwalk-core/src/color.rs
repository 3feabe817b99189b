//! Density colorizer: visit counts → packed `0x00RRGGBB` pixels.
//!
//! Counts are clamped to 255 and mapped onto a hue sweep starting at violet
//! (270°). Saturation and lightness are fixed, so only the hue carries signal.

pub const CLAMP: u32 = 255;
pub const HUE_OFFSET: u32 = 270;
pub const SATURATION: u8 = 255;
pub const LIGHTNESS: u8 = 200;

/// Hue in degrees (0..360) for a raw visit count.
pub fn density_hue(count: u32) -> u16 {
    let clamped = count.min(CLAMP);
    ((HUE_OFFSET + clamped * 360 / 256) % 360) as u16
}

/// Standard piecewise HSL→RGB. `hue` is in degrees, `saturation` and
/// `lightness` on a 0..=255 scale.
///
/// Channels go through a 16-bit intermediate and are rounded down to 8 bits
/// by dividing by 257, so values on the 8-bit grid come back exactly.
pub fn hsl_to_rgb(hue: u16, saturation: u8, lightness: u8) -> [u8; 3] {
    if saturation == 0 {
        return [lightness; 3];
    }
    let h = f64::from(hue % 360) / 360.0;
    let s = f64::from(saturation) / 255.0;
    let l = f64::from(lightness) / 255.0;

    let temp2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let temp1 = 2.0 * l - temp2;

    let channel = |mut t: f64| -> u8 {
        if t < 0.0 {
            t += 1.0;
        } else if t > 1.0 {
            t -= 1.0;
        }
        let v = if t * 6.0 < 1.0 {
            temp1 + (temp2 - temp1) * t * 6.0
        } else if t * 2.0 < 1.0 {
            temp2
        } else if t * 3.0 < 2.0 {
            temp1 + (temp2 - temp1) * (2.0 / 3.0 - t) * 6.0
        } else {
            temp1
        };
        let wide = (v.clamp(0.0, 1.0) * 65535.0).round() as u32;
        ((wide - (wide >> 8) + 0x80) >> 8) as u8
    };

    [
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    ]
}

pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Packed color for a single visit count.
pub fn density_color(count: u32) -> u32 {
    pack_rgb(hsl_to_rgb(density_hue(count), SATURATION, LIGHTNESS))
}

/// One entry per clamped count value.
pub fn density_palette() -> [u32; CLAMP as usize + 1] {
    let mut palette = [0u32; CLAMP as usize + 1];
    for (count, slot) in palette.iter_mut().enumerate() {
        *slot = density_color(count as u32);
    }
    palette
}

/// Overwrite each count with its packed color.
pub fn colorize_in_place(cells: &mut [u32]) {
    let palette = density_palette();
    for cell in cells.iter_mut() {
        *cell = palette[(*cell).min(CLAMP) as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_starts_at_violet_and_wraps() {
        assert_eq!(density_hue(0), 270);
        assert_eq!(density_hue(1), 271);
        // 270 + 64 * 360 / 256 = 360 → wraps to 0
        assert_eq!(density_hue(64), 0);
        assert_eq!(density_hue(255), 268);
    }

    #[test]
    fn counts_past_clamp_share_a_hue() {
        assert_eq!(density_hue(255), density_hue(256));
        assert_eq!(density_hue(255), density_hue(1000));
        assert_eq!(density_hue(255), density_hue(u32::MAX));
        assert_ne!(density_hue(0), density_hue(1000));
        assert_eq!(density_color(300), density_color(u32::MAX));
    }

    #[test]
    fn cold_cell_is_light_violet() {
        assert_eq!(hsl_to_rgb(270, SATURATION, LIGHTNESS), [200, 145, 255]);
        assert_eq!(density_color(0), 0x00C8_91FF);
    }

    #[test]
    fn middle_channel_rounds_to_nearest() {
        // hue 274: red is 53285/65535 of full scale, 207.33 on the 8-bit scale
        assert_eq!(density_hue(3), 274);
        assert_eq!(hsl_to_rgb(274, SATURATION, LIGHTNESS), [207, 145, 255]);
        assert_eq!(density_color(3), 0x00CF_91FF);
    }

    #[test]
    fn primary_hues_convert_exactly() {
        assert_eq!(hsl_to_rgb(0, 255, 128), [255, 1, 1]);
        assert_eq!(hsl_to_rgb(120, 255, 200), [145, 255, 145]);
        assert_eq!(hsl_to_rgb(240, 255, 200), [145, 145, 255]);
        assert_eq!(hsl_to_rgb(0, 0, 77), [77, 77, 77]);
    }

    #[test]
    fn pastel_gradient_keeps_channel_extremes() {
        for hue in 0..360u16 {
            let rgb = hsl_to_rgb(hue, SATURATION, LIGHTNESS);
            assert_eq!(*rgb.iter().max().unwrap(), 255, "hue {hue}: {rgb:?}");
            assert_eq!(*rgb.iter().min().unwrap(), 145, "hue {hue}: {rgb:?}");
        }
    }

    #[test]
    fn pack_round_trips_channels() {
        assert_eq!(pack_rgb([0x12, 0x34, 0x56]), 0x0012_3456);
        assert_eq!(unpack_rgb(0x00AB_CDEF), [0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn palette_matches_per_count_color() {
        let palette = density_palette();
        for count in [0u32, 1, 17, 128, 254, 255] {
            assert_eq!(palette[count as usize], density_color(count));
        }
    }

    #[test]
    fn colorize_overwrites_counts_with_clamped_colors() {
        let mut cells = vec![0, 1, 255, 256, 10_000];
        colorize_in_place(&mut cells);
        assert_eq!(cells[0], density_color(0));
        assert_eq!(cells[1], density_color(1));
        assert_eq!(cells[2], cells[3]);
        assert_eq!(cells[3], cells[4]);
        assert!(cells.iter().all(|&p| p >> 24 == 0));
    }
}
