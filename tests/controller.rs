mod common;

mod tests {
    use smartlamp_core::{
        Destinations, Effect, EventBus, EventKind, EventQueue, FadeCurve, Hsv, LampEvent,
        MemoryStore, PwmWindow, Rgb, Scene,
        color::{cct_to_raw_rgb, hsv2rgb, rgb_to_u32},
        scale_channel,
    };

    use crate::common::{LEDS, NONE, drain, lamp, run_ticks, settle};

    const PWM: PwmWindow = PwmWindow::DEFAULT;
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[test]
    fn test_boot_fades_in_to_saved_brightness() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        let boot = lamp.snapshot().unwrap();
        assert!(boot.on);
        assert_eq!(boot.brightness, 0);
        assert_eq!(boot.saved_brightness, 50);
        assert_eq!(boot.cct, 4000);
        assert!(boot.is_cct_mode());
        assert!(boot.fading);
        assert!(!lamp.dirty().unwrap().any());

        settle(&lamp, 0);
        assert_eq!(lamp.brightness().unwrap(), PWM.percent_to_level(50));
        assert_ne!(lamp.frame().unwrap()[0], BLACK);
    }

    #[test]
    fn test_boot_announces_state_to_everyone() {
        let gui: EventQueue<LampEvent, 32> = EventQueue::new();
        let mut store = MemoryStore::new();
        let _lamp = lamp(&mut store, EventBus::new().with_gui(gui.sender()));

        let kinds: Vec<_> = drain(&gui).iter().map(|event| (event.kind, event.value)).collect();
        assert_eq!(
            kinds,
            vec![
                (EventKind::Brightness, 50),
                (EventKind::Cct, 4000),
                (EventKind::AutoBrightness, 0),
            ]
        );
    }

    #[test]
    fn test_instant_brightness_matches_mapping() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        let mut previous = 0;
        for percent in 1..=100 {
            lamp.set_brightness(percent, 0, NONE).unwrap();
            let level = lamp.brightness().unwrap();
            assert_eq!(level, PWM.percent_to_level(percent));

            let output = scale_channel(255, level);
            assert!(output >= previous, "output dropped at {percent}%");
            previous = output;
        }
    }

    #[test]
    fn test_zero_percent_is_one_percent() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_brightness(0, 0, NONE).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 1);
        assert_eq!(lamp.brightness().unwrap(), PWM.min_visible_level());
        assert!(lamp.is_on().unwrap());
    }

    #[test]
    fn test_set_cct_is_idempotent() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_cct(4000, 0, NONE).unwrap();
        let first = lamp.snapshot().unwrap();
        lamp.set_cct(4000, 0, NONE).unwrap();
        let second = lamp.snapshot().unwrap();

        assert_eq!(first, second);
        assert_eq!(second.cct, 4000);
        assert!(second.is_cct_mode());
    }

    #[test]
    fn test_linear_fade_is_monotonic_and_exact() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        lamp.set_fade_curve(FadeCurve::Linear).unwrap();

        lamp.fade_to_brightness(20, 0).unwrap();
        assert_eq!(lamp.brightness().unwrap(), 20);

        // 60 levels of a 1000 ms full-range fade
        lamp.fade_to_brightness(80, 1000).unwrap();
        let mut previous = 20;
        let mut now = 0;
        for _ in 0..60 {
            lamp.tick(smartlamp_core::Instant::from_millis(now)).unwrap();
            now += 10;
            let level = lamp.brightness().unwrap();
            assert!(level >= previous);
            previous = level;
        }
        assert_eq!(lamp.brightness().unwrap(), 80);
        assert!(!lamp.is_fading().unwrap());
    }

    #[test]
    fn test_retrigger_converges_without_overshoot() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_brightness(20, 0, NONE).unwrap();
        lamp.set_brightness(80, 1000, NONE).unwrap();
        let now = run_ticks(&lamp, 0, 20);
        let peak = lamp.brightness().unwrap();
        assert!(peak > PWM.percent_to_level(20));
        assert!(peak < PWM.percent_to_level(80));

        lamp.set_brightness(30, 1000, NONE).unwrap();
        let mut now = now;
        for _ in 0..200 {
            lamp.tick(smartlamp_core::Instant::from_millis(now)).unwrap();
            now += 10;
            assert!(lamp.brightness().unwrap() <= peak);
        }
        assert_eq!(lamp.brightness().unwrap(), PWM.percent_to_level(30));
    }

    #[test]
    fn test_cancel_freezes_fade() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        let now = run_ticks(&lamp, 0, 10);
        lamp.cancel_fade().unwrap();
        let frozen = lamp.brightness().unwrap();
        run_ticks(&lamp, now, 50);

        assert!(!lamp.is_fading().unwrap());
        assert_eq!(lamp.brightness().unwrap(), frozen);
    }

    #[test]
    fn test_color_modes_are_exclusive() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_color(Rgb::new(255, 0, 0), 0, NONE).unwrap();
        assert!(!lamp.is_cct_mode().unwrap());
        assert_eq!(lamp.rgb().unwrap(), Rgb::new(255, 0, 0));

        lamp.set_cct(3000, 0, NONE).unwrap();
        assert!(lamp.is_cct_mode().unwrap());
        assert_eq!(lamp.cct().unwrap(), 3000);
    }

    #[test]
    fn test_cct_is_clamped() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_cct(1000, 0, NONE).unwrap();
        assert_eq!(lamp.cct().unwrap(), 2700);
        lamp.set_cct(10_000, 0, NONE).unwrap();
        assert_eq!(lamp.cct().unwrap(), 6500);
    }

    #[test]
    fn test_rgb_to_cct_fade_switches_mode_at_the_end() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);

        lamp.set_color(Rgb::new(255, 0, 0), 0, NONE).unwrap();
        lamp.set_cct(3000, 200, NONE).unwrap();

        // Reports where it is heading right away.
        assert_eq!(lamp.cct().unwrap(), 3000);
        assert!(lamp.is_cct_mode().unwrap());

        let now = run_ticks(&lamp, now, 10);
        let level = lamp.brightness().unwrap();
        let halfway = lamp.frame().unwrap()[0];
        assert_ne!(halfway, PWM.scale_color(Rgb::new(255, 0, 0), level));
        assert_ne!(halfway, PWM.cct_to_rgb(3000, level));

        run_ticks(&lamp, now, 20);
        let snapshot = lamp.snapshot().unwrap();
        assert!(snapshot.is_cct_mode());
        assert_eq!(snapshot.cct, 3000);
        assert_eq!(lamp.frame().unwrap()[0], PWM.cct_to_rgb(3000, level));
    }

    #[test]
    fn test_cct_to_rgb_fade_starts_from_visible_white() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);

        lamp.set_cct(2700, 0, NONE).unwrap();
        lamp.set_color(Rgb::new(0, 0, 255), 400, NONE).unwrap();
        assert!(!lamp.is_cct_mode().unwrap());
        assert_eq!(lamp.rgb().unwrap(), Rgb::new(0, 0, 255));

        run_ticks(&lamp, now, 1);
        let level = lamp.brightness().unwrap();
        let first = lamp.frame().unwrap()[0];
        let warm = PWM.scale_color(cct_to_raw_rgb(2700), level);
        // One tick into a 400 ms fade the red channel has barely moved.
        assert!(first.r <= warm.r);
        assert!(u16::from(first.r) + 4 >= u16::from(warm.r));
    }

    #[test]
    fn test_cct_to_rgb_fade_restarts_after_earlier_fade_to_same_color() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);
        let red = Rgb::new(255, 0, 0);

        lamp.set_color(red, 100, NONE).unwrap();
        let now = run_ticks(&lamp, now, 30);
        assert_eq!(lamp.rgb().unwrap(), red);

        lamp.set_cct(2700, 0, NONE).unwrap();
        let now = run_ticks(&lamp, now, 3);

        lamp.set_color(red, 1000, NONE).unwrap();
        run_ticks(&lamp, now, 1);
        let level = lamp.brightness().unwrap();
        let first = lamp.frame().unwrap()[0];
        let warm = PWM.scale_color(cct_to_raw_rgb(2700), level);

        assert_ne!(first, PWM.scale_color(red, level));
        assert!(first.g > 0);
        assert!(first.g <= warm.g);
        assert!(u16::from(first.g) + 4 >= u16::from(warm.g));
    }

    #[test]
    fn test_hsv_sets_rgb_mode() {
        let gui: EventQueue<LampEvent, 32> = EventQueue::new();
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new().with_gui(gui.sender()));
        drain(&gui);

        let color = Hsv {
            hue: 170,
            sat: 255,
            val: 255,
        };
        let expected = hsv2rgb(color);
        lamp.set_hsv(color, 0, NONE).unwrap();

        assert_eq!(lamp.rgb().unwrap(), expected);
        assert!(!lamp.is_cct_mode().unwrap());
        assert_eq!(
            drain(&gui),
            vec![LampEvent::new(EventKind::Rgb, rgb_to_u32(expected) as i32)]
        );
    }

    #[test]
    fn test_power_scenario() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_power(true, 0, NONE).unwrap();
        lamp.set_brightness(1, 0, NONE).unwrap();
        lamp.set_power(false, 0, NONE).unwrap();

        assert!(!lamp.is_on().unwrap());
        assert_eq!(lamp.brightness().unwrap(), 0);
        assert_eq!(lamp.saved_brightness().unwrap(), 1);
        assert!(lamp.frame().unwrap().iter().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_brightness_while_off_only_updates_saved() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_power(false, 0, NONE).unwrap();
        lamp.set_brightness(70, 0, NONE).unwrap();
        assert_eq!(lamp.brightness().unwrap(), 0);
        assert_eq!(lamp.saved_brightness().unwrap(), 70);
        assert!(lamp.dirty().unwrap().saved_brightness);

        lamp.set_power(true, 0, NONE).unwrap();
        assert_eq!(lamp.brightness().unwrap(), PWM.percent_to_level(70));
    }

    #[test]
    fn test_toggle_power() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.toggle_power(0, NONE).unwrap();
        assert!(!lamp.is_on().unwrap());
        lamp.toggle_power(0, NONE).unwrap();
        assert!(lamp.is_on().unwrap());
        assert_eq!(lamp.brightness().unwrap(), PWM.percent_to_level(50));
    }

    #[test]
    fn test_static_power_off_fades_then_goes_black() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);

        lamp.set_power(false, 1000, NONE).unwrap();
        assert!(lamp.is_fading().unwrap());
        let now = run_ticks(&lamp, now, 5);
        assert_ne!(lamp.frame().unwrap()[0], BLACK);

        settle(&lamp, now);
        assert_eq!(lamp.brightness().unwrap(), 0);
        assert!(lamp.frame().unwrap().iter().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_effect_power_off_is_immediate() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);

        lamp.set_effect(Effect::Rainbow, NONE).unwrap();
        let now = run_ticks(&lamp, now, 3);
        assert!(lamp.frame().unwrap().iter().any(|pixel| *pixel != BLACK));

        lamp.set_power(false, 1000, NONE).unwrap();
        assert!(!lamp.is_fading().unwrap());
        assert_eq!(lamp.brightness().unwrap(), 0);

        run_ticks(&lamp, now, 10);
        assert!(lamp.frame().unwrap().iter().all(|pixel| *pixel == BLACK));
        assert_eq!(lamp.effect().unwrap(), Effect::Rainbow);
    }

    #[test]
    fn test_effect_name_lookup() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_effect_by_name("Police", NONE).unwrap();
        assert_eq!(lamp.effect().unwrap(), Effect::Alert);
        lamp.set_effect_by_name("METEOR", NONE).unwrap();
        assert_eq!(lamp.effect().unwrap(), Effect::Comet);
        lamp.set_effect_by_name("strobe", NONE).unwrap();
        assert_eq!(lamp.effect().unwrap(), Effect::None);
    }

    #[test]
    fn test_stopping_effect_renders_static_frame() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        let now = settle(&lamp, 0);

        lamp.set_effect(Effect::Spin, NONE).unwrap();
        run_ticks(&lamp, now, 5);
        lamp.set_effect(Effect::None, NONE).unwrap();

        let level = lamp.brightness().unwrap();
        let expected = PWM.cct_to_rgb(4000, level);
        assert!(lamp.frame().unwrap().iter().all(|pixel| *pixel == expected));
    }

    #[test]
    fn test_scene_replaces_effect() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_effect_by_name("rainbow", NONE).unwrap();
        lamp.set_scene_by_name("night", NONE).unwrap();

        let snapshot = lamp.snapshot().unwrap();
        assert_eq!(snapshot.effect, Effect::None);
        assert_eq!(snapshot.scene, Scene::Night);
        assert_eq!(snapshot.scene.as_str(), "Night");
        assert_eq!(snapshot.cct, 2700);
        assert_eq!(snapshot.saved_brightness, 5);

        settle(&lamp, 0);
        let snapshot = lamp.snapshot().unwrap();
        assert_eq!(snapshot.brightness, PWM.percent_to_level(5));
        assert_eq!(snapshot.cct, 2700);
    }

    #[test]
    fn test_effect_clears_scene_and_unknown_scene_resets_label() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_scene(Scene::Cozy, NONE).unwrap();
        assert_eq!(lamp.scene().unwrap(), Scene::Cozy);
        lamp.set_effect(Effect::Breathing, NONE).unwrap();
        assert_eq!(lamp.scene().unwrap(), Scene::None);

        lamp.set_scene(Scene::Reading, NONE).unwrap();
        lamp.set_scene_by_name("party", NONE).unwrap();
        assert_eq!(lamp.scene().unwrap(), Scene::None);
        assert_eq!(lamp.cct().unwrap(), 4500);
    }

    #[test]
    fn test_saved_brightness_never_zero() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.set_saved_brightness(0).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 50);
        lamp.set_saved_brightness(150).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 100);
    }

    #[test]
    fn test_notifications_skip_excluded_destination() {
        let gui: EventQueue<LampEvent, 32> = EventQueue::new();
        let mqtt: EventQueue<LampEvent, 32> = EventQueue::new();
        let mut store = MemoryStore::new();
        let lamp = lamp(
            &mut store,
            EventBus::new().with_gui(gui.sender()).with_mqtt(mqtt.sender()),
        );
        drain(&gui);
        drain(&mqtt);

        lamp.set_brightness(30, 0, Destinations::MQTT).unwrap();
        lamp.set_color(Rgb::new(0x12, 0x34, 0x56), 0, Destinations::GUI).unwrap();

        assert_eq!(drain(&gui), vec![LampEvent::new(EventKind::Brightness, 30)]);
        assert_eq!(drain(&mqtt), vec![LampEvent::new(EventKind::Rgb, 0x0012_3456)]);
    }

    #[test]
    fn test_auto_brightness_toggle_is_idempotent() {
        let gui: EventQueue<LampEvent, 32> = EventQueue::new();
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new().with_gui(gui.sender()));
        drain(&gui);

        lamp.set_auto_brightness(false, NONE).unwrap();
        assert!(drain(&gui).is_empty());
        assert!(!lamp.dirty().unwrap().auto_brightness);

        lamp.set_auto_brightness(true, NONE).unwrap();
        lamp.set_auto_brightness(true, NONE).unwrap();
        assert_eq!(drain(&gui), vec![LampEvent::new(EventKind::AutoBrightness, 1)]);
        assert!(lamp.is_auto_brightness().unwrap());
        assert!(lamp.dirty().unwrap().auto_brightness);
    }

    #[test]
    fn test_ambient_light_drives_brightness() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());

        lamp.apply_ambient_lux(5.0, NONE).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 50);

        lamp.set_auto_brightness(true, NONE).unwrap();
        lamp.apply_ambient_lux(5.0, NONE).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 100);

        lamp.apply_ambient_lux(280.0, NONE).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 17);

        // Within the hysteresis band
        lamp.apply_ambient_lux(285.0, NONE).unwrap();
        assert_eq!(lamp.saved_brightness().unwrap(), 17);
    }

    #[test]
    fn test_frame_has_one_pixel_per_led() {
        let mut store = MemoryStore::new();
        let lamp = lamp(&mut store, EventBus::new());
        assert_eq!(lamp.frame().unwrap().len(), LEDS);
    }
}
