mod common;

mod tests {
    use myrtio_glow::{
        BreathDirection, BreathingState, BrightnessMode, BrightnessProfile, ButtonEvent,
        Duration, GlowMode, Instant, ModeConfig, ModeCoordinator, PatternEngine,
        PatternEngineConfig, Rgb, StrandPattern,
    };

    use super::common::RecordingDriver;

    fn coordinator_with(config: ModeConfig) -> ModeCoordinator<RecordingDriver, 22> {
        let engine = PatternEngine::new(RecordingDriver::default(), &PatternEngineConfig::DEFAULT);
        let mut coordinator = ModeCoordinator::new(engine, config);
        coordinator.begin(Instant::from_millis(0));
        coordinator
    }

    fn coordinator() -> ModeCoordinator<RecordingDriver, 22> {
        coordinator_with(ModeConfig::DEFAULT)
    }

    fn writes(coordinator: &ModeCoordinator<RecordingDriver, 22>) -> usize {
        coordinator.engine().strip().driver().writes()
    }

    #[test]
    fn test_begin_applies_startup_modes() {
        let coordinator = coordinator();

        assert_eq!(coordinator.applied_glow(), GlowMode::Solid);
        assert_eq!(coordinator.applied_brightness(), BrightnessMode::Bright);
        assert!(!coordinator.engine().is_auto_cycle());
        assert_eq!(coordinator.engine().brightness(), ModeConfig::DEFAULT.bright.base);
    }

    #[test]
    fn test_clicks_alternate_brightness() {
        let mut coordinator = coordinator();

        for click in 1..=7u64 {
            coordinator.handle_event(ButtonEvent::SingleClick);
            let expected = if click % 2 == 1 {
                BrightnessMode::Dim
            } else {
                BrightnessMode::Bright
            };
            assert_eq!(coordinator.requested_brightness(), expected);
            // Applied only on the next tick
            assert_ne!(coordinator.applied_brightness(), expected);

            coordinator.tick(Instant::from_millis(click * 10));
            assert_eq!(coordinator.applied_brightness(), expected);
        }
    }

    #[test]
    fn test_two_clicks_in_one_tick_cancel_out() {
        let mut coordinator = coordinator();
        let before = writes(&coordinator);

        coordinator.handle_event(ButtonEvent::SingleClick);
        coordinator.handle_event(ButtonEvent::SingleClick);
        coordinator.tick(Instant::from_millis(10));

        assert_eq!(coordinator.applied_brightness(), BrightnessMode::Bright);
        // Only the pending startup solid frame is rendered
        assert_eq!(writes(&coordinator), before + 1);
    }

    #[test]
    fn test_long_press_cycles_glow_modes() {
        let mut coordinator = coordinator();
        let expected = [
            GlowMode::Breathing,
            GlowMode::Rainbow,
            GlowMode::TheaterChase,
            GlowMode::TheaterChaseRainbow,
            GlowMode::Solid,
            GlowMode::Breathing,
        ];

        for (press, mode) in expected.iter().enumerate() {
            coordinator.handle_event(ButtonEvent::LongPress);
            coordinator.tick(Instant::from_millis(10 * (press as u64 + 1)));
            assert_eq!(coordinator.applied_glow(), *mode);
            assert!(!coordinator.engine().is_auto_cycle());
            if let Some(pattern) = mode.pattern() {
                assert_eq!(coordinator.engine().pattern(), pattern);
            }
        }
    }

    #[test]
    fn test_theater_chase_mode_uses_fixed_color() {
        let mut coordinator = coordinator();
        for _ in 0..3 {
            coordinator.handle_event(ButtonEvent::LongPress);
        }
        coordinator.tick(Instant::from_millis(10));

        let engine = coordinator.engine();
        assert_eq!(coordinator.applied_glow(), GlowMode::TheaterChase);
        assert_eq!(engine.pattern(), StrandPattern::TheaterChase);
        assert_eq!(engine.primary_color(), ModeConfig::DEFAULT.theater_chase_color);
        assert_eq!(engine.waits().theater_chase, Duration::from_millis(50));
        assert_eq!(engine.brightness(), ModeConfig::DEFAULT.bright.base);
        // Rendered on the same tick it was applied
        assert_eq!(engine.progress().theater_chase_offset(), 1);
    }

    #[test]
    fn test_chase_rainbow_starts_from_dark_strip() {
        let mut coordinator = coordinator();
        for _ in 0..3 {
            coordinator.handle_event(ButtonEvent::LongPress);
        }
        coordinator.tick(Instant::from_millis(10));
        coordinator.tick(Instant::from_millis(60));
        assert_eq!(coordinator.applied_glow(), GlowMode::TheaterChase);

        coordinator.handle_event(ButtonEvent::LongPress);
        coordinator.tick(Instant::from_millis(70));
        assert_eq!(coordinator.applied_glow(), GlowMode::TheaterChaseRainbow);

        let black = Rgb::new(0, 0, 0);
        let frame = coordinator.engine().strip().driver().last_frame();
        for (index, pixel) in frame.iter().enumerate() {
            if index % 3 == 0 {
                assert_ne!(*pixel, black, "dot {index} missing");
            } else {
                assert_eq!(*pixel, black, "pixel {index} left over");
            }
        }
    }

    #[test]
    fn test_pattern_mode_brightness_follows_clicks() {
        let mut coordinator = coordinator();
        coordinator.handle_event(ButtonEvent::LongPress);
        coordinator.handle_event(ButtonEvent::LongPress);
        coordinator.tick(Instant::from_millis(10));
        assert_eq!(coordinator.applied_glow(), GlowMode::Rainbow);

        coordinator.handle_event(ButtonEvent::SingleClick);
        coordinator.tick(Instant::from_millis(20));

        assert_eq!(coordinator.engine().brightness(), ModeConfig::DEFAULT.dim.base);
        assert_eq!(coordinator.engine().pattern(), StrandPattern::Rainbow);
    }

    #[test]
    fn test_solid_refresh_is_edge_triggered() {
        let mut coordinator = coordinator();
        let solid = ModeConfig::DEFAULT.solid_color;

        coordinator.tick(Instant::from_millis(10));
        let after_first_render = writes(&coordinator);
        assert!(
            coordinator
                .engine()
                .strip()
                .pixels()
                .iter()
                .all(|pixel| *pixel == solid)
        );

        coordinator.tick(Instant::from_millis(20));
        assert_eq!(writes(&coordinator), after_first_render);

        let now = Instant::from_millis(30);
        coordinator.sync_brightness(BrightnessMode::Dim, GlowMode::Solid, now);
        coordinator.tick(now);
        let after_sync = writes(&coordinator);
        assert!(after_sync > after_first_render);
        assert_eq!(coordinator.engine().strip().brightness(), ModeConfig::DEFAULT.dim.base);

        coordinator.sync_brightness(BrightnessMode::Dim, GlowMode::Solid, now);
        coordinator.tick(Instant::from_millis(40));
        assert_eq!(writes(&coordinator), after_sync);
    }

    fn run_breathing(config: ModeConfig, brightness: BrightnessMode) {
        let config = ModeConfig {
            glow: GlowMode::Breathing,
            brightness,
            ..config
        };
        let profile = *config.profile(brightness);
        let mut coordinator = coordinator_with(config);

        assert_eq!(coordinator.breathing().brightness(), profile.max);
        assert_eq!(coordinator.breathing().direction(), BreathDirection::Falling);

        let mut direction = BreathDirection::Falling;
        let mut previous = profile.max;
        let mut reversals = 0;
        let (mut hit_min, mut hit_max) = (false, false);
        for tick in 1..=2_000u64 {
            coordinator.tick(Instant::from_millis(tick * 10));
            let breathing = coordinator.breathing();
            let level = breathing.brightness();

            assert!(level >= profile.min && level <= profile.max, "level {level}");
            assert!(level.abs_diff(previous) <= profile.step, "jump {previous} -> {level}");
            assert_eq!(coordinator.engine().strip().brightness(), level);
            assert_eq!(coordinator.engine().brightness(), level);
            hit_min |= level == profile.min;
            hit_max |= level == profile.max && reversals > 0;

            if breathing.direction() != direction {
                let bound = match direction {
                    BreathDirection::Falling => profile.min,
                    BreathDirection::Rising => profile.max,
                };
                assert_eq!(level, bound);
                direction = breathing.direction();
                reversals += 1;
            }
            previous = level;
        }
        assert!(reversals >= 2, "only {reversals} reversals");
        assert!(hit_min && hit_max);
    }

    #[test]
    fn test_breathing_stays_in_bounds() {
        run_breathing(ModeConfig::DEFAULT, BrightnessMode::Bright);
        run_breathing(ModeConfig::DEFAULT, BrightnessMode::Dim);
    }

    #[test]
    fn test_breathing_clamps_uneven_steps() {
        // Neither range is a multiple of the step
        let config = ModeConfig {
            bright: BrightnessProfile {
                step: 5,
                ..ModeConfig::DEFAULT.bright
            },
            dim: BrightnessProfile {
                step: 5,
                ..ModeConfig::DEFAULT.dim
            },
            ..ModeConfig::DEFAULT
        };
        run_breathing(config.clone(), BrightnessMode::Bright);
        run_breathing(config, BrightnessMode::Dim);
    }

    #[test]
    fn test_breathing_step_lands_on_bounds() {
        let profile = BrightnessProfile {
            base: 100,
            min: 24,
            max: 160,
            step: 50,
        };
        let mut breathing = BreathingState::start(&profile, Instant::from_millis(0));
        let expected = [
            (110, BreathDirection::Falling),
            (60, BreathDirection::Falling),
            (24, BreathDirection::Rising),
            (74, BreathDirection::Rising),
            (124, BreathDirection::Rising),
            (160, BreathDirection::Falling),
            (110, BreathDirection::Falling),
        ];

        for (step, (level, direction)) in expected.into_iter().enumerate() {
            breathing.step(&profile, Instant::from_millis(30 * (step as u64 + 1)));
            assert_eq!(breathing.brightness(), level, "step {step}");
            assert_eq!(breathing.direction(), direction, "step {step}");
        }
    }

    #[test]
    fn test_breathing_respects_cadence() {
        let config = ModeConfig {
            glow: GlowMode::Breathing,
            ..ModeConfig::DEFAULT
        };
        let mut coordinator = coordinator_with(config);
        let max = ModeConfig::DEFAULT.bright.max;
        let step = ModeConfig::DEFAULT.bright.step;

        coordinator.tick(Instant::from_millis(29));
        assert_eq!(coordinator.breathing().brightness(), max);

        coordinator.tick(Instant::from_millis(30));
        assert_eq!(coordinator.breathing().brightness(), max - step);
    }

    #[test]
    fn test_click_restarts_breathing_with_new_profile() {
        let config = ModeConfig {
            glow: GlowMode::Breathing,
            ..ModeConfig::DEFAULT
        };
        let mut coordinator = coordinator_with(config);
        for tick in 1..=20u64 {
            coordinator.tick(Instant::from_millis(tick * 10));
        }
        assert!(coordinator.breathing().brightness() < ModeConfig::DEFAULT.bright.max);

        coordinator.handle_event(ButtonEvent::SingleClick);
        coordinator.tick(Instant::from_millis(210));

        assert_eq!(coordinator.breathing().brightness(), ModeConfig::DEFAULT.dim.max);
        assert_eq!(coordinator.breathing().direction(), BreathDirection::Falling);
    }

    #[test]
    fn test_update_breathing_ignored_outside_breathing() {
        let mut coordinator = coordinator();
        coordinator.tick(Instant::from_millis(10));
        let before = writes(&coordinator);

        coordinator.update_breathing(Instant::from_millis(1_000));

        assert_eq!(writes(&coordinator), before);
    }

    #[test]
    fn test_glow_and_brightness_change_in_one_tick() {
        let mut coordinator = coordinator();
        coordinator.handle_event(ButtonEvent::LongPress);
        coordinator.handle_event(ButtonEvent::SingleClick);
        coordinator.tick(Instant::from_millis(10));

        assert_eq!(coordinator.applied_glow(), GlowMode::Breathing);
        assert_eq!(coordinator.applied_brightness(), BrightnessMode::Dim);
        assert_eq!(coordinator.breathing().brightness(), ModeConfig::DEFAULT.dim.max);
    }
}
