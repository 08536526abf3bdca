use super::Rgb;

/// Warmest supported color temperature (K)
pub const CCT_MIN: u16 = 2700;
/// Coolest supported color temperature (K)
pub const CCT_MAX: u16 = 6500;
/// Color temperature used when nothing is stored
pub const CCT_DEFAULT: u16 = 4000;

const WARM_WHITE: Rgb = Rgb {
    r: 255,
    g: 147,
    b: 41,
};
const COOL_WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

const Q10_ONE: u32 = 1024;

/// Clamp a Kelvin value into the supported CCT range
pub const fn clamp_cct(kelvin: u16) -> u16 {
    if kelvin < CCT_MIN {
        CCT_MIN
    } else if kelvin > CCT_MAX {
        CCT_MAX
    } else {
        kelvin
    }
}

/// Convert a color temperature to an unscaled RGB color
///
/// Linear Q10 blend between a warm-white and a cool-white triplet over
/// `CCT_MIN..=CCT_MAX`. Out-of-range input is clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn cct_to_raw_rgb(kelvin: u16) -> Rgb {
    let kelvin = clamp_cct(kelvin);
    let span = (CCT_MAX - CCT_MIN) as u32;
    let pos = (kelvin - CCT_MIN) as u32;
    let alpha = pos * Q10_ONE / span;

    const fn lerp_q10(warm: u8, cool: u8, alpha: u32) -> u8 {
        ((warm as u32 * (Q10_ONE - alpha) + cool as u32 * alpha) / Q10_ONE) as u8
    }

    Rgb {
        r: lerp_q10(WARM_WHITE.r, COOL_WHITE.r, alpha),
        g: lerp_q10(WARM_WHITE.g, COOL_WHITE.g, alpha),
        b: lerp_q10(WARM_WHITE.b, COOL_WHITE.b, alpha),
    }
}

/// Convert mireds (Home Assistant color temperature) to Kelvin
#[allow(clippy::cast_possible_truncation)]
pub const fn mireds_to_kelvin(mireds: u16) -> u16 {
    if mireds == 0 {
        return CCT_MAX;
    }
    let kelvin = 1_000_000 / mireds as u32;
    if kelvin > u16::MAX as u32 {
        u16::MAX
    } else {
        kelvin as u16
    }
}

/// Convert Kelvin to mireds
#[allow(clippy::cast_possible_truncation)]
pub const fn kelvin_to_mireds(kelvin: u16) -> u16 {
    if kelvin == 0 {
        return u16::MAX;
    }
    let mireds = 1_000_000 / kelvin as u32;
    if mireds > u16::MAX as u32 {
        u16::MAX
    } else {
        mireds as u16
    }
}
