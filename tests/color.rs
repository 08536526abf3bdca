mod tests {
    use smartlamp_core::color::{
        BLACK, CCT_MAX, CCT_MIN, Rgb, WHITE, cct_to_raw_rgb, clamp_cct,
        kelvin_to_mireds, mireds_to_kelvin, rgb_from_u32, rgb_to_u32,
    };
    use smartlamp_core::ColorMode;

    #[test]
    fn test_cct_endpoints() {
        assert_eq!(cct_to_raw_rgb(CCT_MIN), Rgb::new(255, 147, 41));
        assert_eq!(cct_to_raw_rgb(CCT_MAX), WHITE);
        assert_eq!(cct_to_raw_rgb(1000), cct_to_raw_rgb(CCT_MIN));
        assert_eq!(cct_to_raw_rgb(20_000), WHITE);
    }

    #[test]
    fn test_cct_presets() {
        assert_eq!(cct_to_raw_rgb(3000), Rgb::new(255, 155, 57));
        assert_eq!(cct_to_raw_rgb(4000), Rgb::new(255, 183, 114));
        assert_eq!(cct_to_raw_rgb(4500), Rgb::new(255, 198, 142));
        assert_eq!(cct_to_raw_rgb(6000), Rgb::new(255, 240, 226));
    }

    #[test]
    fn test_cct_gets_cooler_monotonically() {
        let mut previous = cct_to_raw_rgb(CCT_MIN);
        for kelvin in (CCT_MIN..=CCT_MAX).step_by(50) {
            let color = cct_to_raw_rgb(kelvin);
            assert_eq!(color.r, 255);
            assert!(color.g >= previous.g);
            assert!(color.b >= previous.b);
            previous = color;
        }
    }

    #[test]
    fn test_clamp_cct() {
        assert_eq!(clamp_cct(0), CCT_MIN);
        assert_eq!(clamp_cct(5000), 5000);
        assert_eq!(clamp_cct(u16::MAX), CCT_MAX);
    }

    #[test]
    fn test_mireds() {
        assert_eq!(kelvin_to_mireds(4000), 250);
        assert_eq!(mireds_to_kelvin(250), 4000);
        assert_eq!(mireds_to_kelvin(370), 2702);
        assert_eq!(mireds_to_kelvin(0), CCT_MAX);
        assert_eq!(kelvin_to_mireds(0), u16::MAX);
        assert_eq!(kelvin_to_mireds(10), u16::MAX);
    }

    #[test]
    fn test_packing() {
        assert_eq!(rgb_to_u32(Rgb::new(0x12, 0x34, 0x56)), 0x0012_3456);
        assert_eq!(rgb_from_u32(0x00AB_CDEF), Rgb::new(0xAB, 0xCD, 0xEF));
        assert_eq!(rgb_from_u32(0xFF00_0000), BLACK);
    }

    #[test]
    fn test_color_mode_codes() {
        assert_eq!(ColorMode::default(), ColorMode::Temperature);
        assert_eq!(ColorMode::from_u8(ColorMode::Rgb.as_u8()), Some(ColorMode::Rgb));
        assert_eq!(ColorMode::from_u8(1), Some(ColorMode::Temperature));
        assert_eq!(ColorMode::from_u8(2), None);
    }
}
