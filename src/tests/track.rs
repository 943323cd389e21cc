mod test {
    use crate::{
        prelude::{
            compute_track, Epoch, GroundTrack, OrbitalElementSet, TrackError, TrackResult, Unit,
        },
        tests::toolkit::{
            assert_segmentation, random_pattern, EquatorialPropagator, FailingPropagator,
            ScriptedPropagator, ISS_2008, ISS_2020,
        },
    };

    fn equinox() -> Epoch {
        Epoch::from_gregorian_utc_hms(2024, 3, 20, 12, 0, 0)
    }

    fn sunlit_flags(result: &TrackResult) -> Vec<bool> {
        result.samples.iter().map(|sample| sample.sunlit).collect()
    }

    #[test]
    fn no_track_requested() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let propagator = EquatorialPropagator::new(equinox());

        for path_length in [0.0, -0.5, -1.0, f64::NEG_INFINITY] {
            let result = compute_track(&propagator, &tle, path_length, Some(equinox()));
            if path_length.is_finite() {
                let result = result.unwrap();
                assert!(result.is_empty());
                assert!(result.segments.is_empty());
            } else {
                assert!(matches!(result, Err(TrackError::PathLength(_))));
            }
        }

        // the propagator is never solicited
        assert_eq!(propagator.period_calls.get(), 0);
        assert_eq!(propagator.position_calls.get(), 0);
    }

    #[test]
    fn invalid_path_length() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let propagator = EquatorialPropagator::new(equinox());

        match compute_track(&propagator, &tle, f64::NAN, Some(equinox())) {
            Err(TrackError::PathLength(value)) => assert!(value.is_nan()),
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(propagator.position_calls.get(), 0);
    }

    #[test]
    fn oversized_path_length() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let propagator = EquatorialPropagator::new(equinox());

        for path_length in [f64::MAX, 1.0E17, 1.0E6] {
            match compute_track(&propagator, &tle, path_length, Some(equinox())) {
                Err(TrackError::PathLength(value)) => assert_eq!(value, path_length),
                other => panic!("unexpected result: {:?}", other),
            }
        }

        assert_eq!(propagator.period_calls.get(), 0);
        assert_eq!(propagator.position_calls.get(), 0);
    }

    #[test]
    fn equatorial_revolution() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let t0 = equinox();
        let propagator = EquatorialPropagator::new(t0);

        let result = compute_track(&propagator, &tle, 1.0, Some(t0)).unwrap();

        assert_eq!(propagator.period_calls.get(), 1);
        assert_eq!(propagator.position_calls.get(), 181);
        assert_eq!(result.samples.len(), 181);
        assert_segmentation(&result);

        // starts right below the sun, crosses the night side, comes back
        assert_eq!(result.segments.len(), 3);
        assert!(result.segments[0].sunlit());
        assert!(!result.segments[1].sunlit());
        assert!(result.segments[2].sunlit());

        assert_eq!(result.sunlit_segments().count(), 2);
        assert_eq!(result.eclipsed_segments().count(), 1);

        // ~2x110° of the 360° are lit at 400 km
        let nb_sunlit = result.samples.iter().filter(|s| s.sunlit).count();
        let ratio = nb_sunlit as f64 / result.samples.len() as f64;
        assert!(ratio > 0.55 && ratio < 0.67, "sunlit ratio: {}", ratio);

        assert_eq!(result.polyline().count(), 181);
    }

    #[test]
    fn sampling_instants() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let t0 = equinox();
        let propagator = EquatorialPropagator::new(t0);

        let result = GroundTrack::default()
            .with_start(t0)
            .with_path_length(0.5)
            .compute(&propagator, &tle)
            .unwrap();

        assert_eq!(result.samples.len(), 91);
        assert_eq!(result.samples[0].position.epoch, t0);

        let step = propagator.period_min / 180.0;
        for (i, sample) in result.samples.iter().enumerate() {
            let dt = (sample.position.epoch - t0).to_unit(Unit::Minute);
            assert!((dt - i as f64 * step).abs() < 1.0E-6, "sample #{}: {}", i, dt);
        }

        // half a revolution
        let last = result.samples[90].position.epoch;
        assert!(((last - t0).to_unit(Unit::Minute) - 46.0).abs() < 1.0E-6);

        // multiple revolutions
        let result = compute_track(&propagator, &tle, 2.0, Some(t0)).unwrap();
        assert_eq!(result.samples.len(), 361);
        assert_segmentation(&result);
    }

    #[test]
    fn default_start_is_now() {
        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        let before = Epoch::now().unwrap();
        let propagator = EquatorialPropagator::new(before);

        let result = compute_track(&propagator, &tle, 0.1, None).unwrap();
        assert_eq!(result.samples.len(), 19);

        let t0 = result.samples[0].position.epoch;
        assert!(t0 >= before);
        assert!((t0 - before).to_seconds() < 60.0);
    }

    #[test]
    fn scripted_transitions() {
        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = Epoch::from_gregorian_utc_hms(2024, 6, 21, 12, 0, 0);

        let mut pattern = vec![true; 40];
        pattern.extend(vec![false; 60]);
        pattern.push(true);
        pattern.extend(vec![false; 80]);

        let propagator = ScriptedPropagator {
            period_min: 90.0,
            t0,
            pattern: pattern.clone(),
        };

        let result = compute_track(&propagator, &tle, 1.0, Some(t0)).unwrap();
        assert_eq!(sunlit_flags(&result), pattern);
        assert_segmentation(&result);

        let lengths = result.segments.iter().map(|s| s.len()).collect::<Vec<_>>();
        assert_eq!(lengths, vec![40, 60, 1, 80]);

        // segment boundaries
        let step = propagator.step_min();
        assert_eq!(result.segments[0].start(), Some(t0));
        assert_eq!(
            result.segments[1].start(),
            Some(result.samples[40].position.epoch)
        );

        let end = result.segments[3].end().unwrap();
        assert!(((end - t0).to_unit(Unit::Minute) - 180.0 * step).abs() < 1.0E-6);
    }

    #[test]
    fn single_illumination() {
        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = Epoch::from_gregorian_utc_hms(2024, 12, 21, 0, 0, 0);

        for sunlit in [true, false] {
            let propagator = ScriptedPropagator {
                period_min: 95.0,
                t0,
                pattern: vec![sunlit; 181],
            };

            let result = compute_track(&propagator, &tle, 1.0, Some(t0)).unwrap();
            assert_eq!(result.segments.len(), 1);
            assert_eq!(result.segments[0].sunlit(), sunlit);
            assert_eq!(result.segments[0].len(), 181);
        }
    }

    #[test]
    fn random_transitions() {
        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = Epoch::from_gregorian_utc_hms(2024, 11, 3, 18, 0, 0);

        for p_sunlit in [0.1, 0.5, 0.9] {
            for _ in 0..10 {
                let pattern = random_pattern(181, p_sunlit);

                let propagator = ScriptedPropagator {
                    period_min: 100.0,
                    t0,
                    pattern: pattern.clone(),
                };

                let result = compute_track(&propagator, &tle, 1.0, Some(t0)).unwrap();
                assert_eq!(sunlit_flags(&result), pattern);
                assert_segmentation(&result);

                let transitions = pattern.windows(2).filter(|w| w[0] != w[1]).count();
                assert_eq!(result.segments.len(), transitions + 1);
            }
        }
    }

    #[test]
    fn propagation_failure() {
        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = equinox();

        let propagator = FailingPropagator {
            failure: t0 + 10.0 * Unit::Minute,
        };

        match compute_track(&propagator, &tle, 1.0, Some(t0)) {
            Err(TrackError::Propagator(e)) => assert_eq!(e.description(), "decayed"),
            other => panic!("unexpected result: {:?}", other),
        }

        // failure past the requested arc
        let result = compute_track(&propagator, &tle, 0.1, Some(t0)).unwrap();
        assert_eq!(result.samples.len(), 19);
    }

    #[test]
    fn invalid_orbital_period() {
        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = equinox();

        for period_min in [0.0, -90.0, f64::NAN] {
            let propagator = ScriptedPropagator {
                period_min,
                t0,
                pattern: vec![true; 181],
            };

            let result = compute_track(&propagator, &tle, 1.0, Some(t0));
            assert!(matches!(result, Err(TrackError::Propagator(_))));
        }
    }

    #[cfg(feature = "sgp4")]
    #[test]
    fn sgp4_revolution() {
        use crate::prelude::Sgp4Propagator;

        let tle = OrbitalElementSet::parse(ISS_2008).unwrap();
        let t0 = tle.epoch();

        let result = compute_track(&Sgp4Propagator::new(), &tle, 1.0, Some(t0)).unwrap();
        assert_eq!(result.samples.len(), 181);
        assert_segmentation(&result);

        // low earth orbit: both day and night are crossed
        assert!(result.sunlit_segments().count() > 0);
        assert!(result.eclipsed_segments().count() > 0);

        for sample in result.samples.iter() {
            assert!(sample.position.latitude.abs() <= 52.0);
        }
    }

    #[cfg(feature = "sgp4")]
    #[test]
    fn sgp4_stale_checksums() {
        use crate::prelude::Sgp4Propagator;

        let tle = OrbitalElementSet::parse(ISS_2020).unwrap();
        assert!(!tle.line_checksums_valid());

        let propagator = Sgp4Propagator::new();

        let result = compute_track(&propagator, &tle, 0.1, Some(tle.epoch())).unwrap();
        assert_eq!(result.samples.len(), 19);
        assert_segmentation(&result);

        let result = compute_track(&propagator, &tle, 1.0, Some(tle.epoch())).unwrap();
        assert_eq!(result.samples.len(), 181);
        assert_segmentation(&result);

        for sample in result.samples.iter() {
            assert!(sample.position.latitude.abs() <= 52.0);
        }
    }
}
