use approx::assert_relative_eq;
use mesh_vibration::{
    evaluate_motion, InMemoryParameters, MotionKind, MotionProfile, NoisyVibration,
    SimpleVibration, VibrationTerm,
};
use proptest::prelude::*;
use std::f64::consts::PI;

fn reference_velocity(amplitude: f64, frequency: f64, t: f64) -> f64 {
    let w = 2.0 * PI * frequency;
    amplitude * w * (w * t).sin()
}

proptest! {
    #[test]
    fn simple_matches_closed_form(
        amplitude in -1.0..1.0f64,
        frequency in 0.0..1000.0f64,
        t in 0.0..10.0f64,
    ) {
        let v = SimpleVibration::new(amplitude, frequency).velocity(t);

        prop_assert_eq!(v.x(), 0.0);
        prop_assert_eq!(v.y(), 0.0);
        prop_assert_eq!(v.z(), reference_velocity(amplitude, frequency, t));
    }

    #[test]
    fn noisy_is_superposition(
        amplitude in -1.0..1.0f64,
        frequency in 0.0..1000.0f64,
        noise_amplitude in -0.1..0.1f64,
        noise_frequency in 0.0..10000.0f64,
        t in 0.0..1.0f64,
    ) {
        let noisy = NoisyVibration::new(
            VibrationTerm::new(amplitude, frequency),
            VibrationTerm::new(noise_amplitude, noise_frequency),
        );
        let expected = SimpleVibration::new(amplitude, frequency).velocity(t).z()
            + SimpleVibration::new(noise_amplitude, noise_frequency).velocity(t).z();

        prop_assert_eq!(noisy.velocity(t).z(), expected);
    }

    #[test]
    fn both_start_at_rest(
        amplitude in -1.0..1.0f64,
        frequency in -1000.0..1000.0f64,
    ) {
        let noisy = NoisyVibration::new(
            VibrationTerm::new(amplitude, frequency),
            VibrationTerm::new(amplitude / 10.0, frequency * 10.0),
        );
        prop_assert_eq!(SimpleVibration::new(amplitude, frequency).velocity(0.0).z(), 0.0);
        prop_assert_eq!(noisy.velocity(0.0).z(), 0.0);
    }

    #[test]
    fn zero_frequency_never_moves(amplitude in -1.0..1.0f64, t in 0.0..1e6f64) {
        let noisy = NoisyVibration::new(
            VibrationTerm::new(amplitude, 0.0),
            VibrationTerm::new(amplitude, 0.0),
        );
        prop_assert_eq!(noisy.velocity(t).z(), 0.0);
    }

    #[test]
    fn velocity_repeats_every_period(
        amplitude in 0.001..1.0f64,
        frequency in 0.5..100.0f64,
        t in 0.0..2.0f64,
    ) {
        let motion = SimpleVibration::new(amplitude, frequency);
        let scale = amplitude * 2.0 * PI * frequency;
        let drift = (motion.velocity(t + 1.0 / frequency).z() - motion.velocity(t).z()).abs();

        prop_assert!(drift <= scale * 1e-9, "drift {} for scale {}", drift, scale);
    }
}

#[test]
fn quarter_period_scenario() {
    let store = InMemoryParameters::from_pairs([
        ("vibration_amplitude", 0.001),
        ("vibration_frequency", 50.0),
    ]);

    let v = evaluate_motion(MotionKind::Simple, 0.005, &store).unwrap();

    assert_relative_eq!(2.0 * PI * 50.0, 314.159265, epsilon = 1e-6);
    assert_relative_eq!(v.z(), 0.314159, epsilon = 1e-6);
}

#[test]
fn noisy_scenario_from_rpvar_store() {
    let store = InMemoryParameters::from_pairs([
        ("user/vibration_amplitude", 0.001),
        ("user/vibration_frequency", 50.0),
        ("user/noise_amplitude", 0.0001),
        ("user/noise_frequency", 500.0),
    ]);
    let t = 0.001;

    let v = evaluate_motion(MotionKind::Noisy, t, &store).unwrap();
    let expected = reference_velocity(0.001, 50.0, t) + reference_velocity(0.0001, 500.0, t);

    assert_eq!(v.x(), 0.0);
    assert_eq!(v.y(), 0.0);
    assert_relative_eq!(v.z(), expected, max_relative = 1e-9);
}

#[test]
fn profiles_are_shareable_across_threads() {
    let motion: std::sync::Arc<dyn MotionProfile> =
        std::sync::Arc::new(SimpleVibration::new(0.001, 50.0));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let motion = motion.clone();
            std::thread::spawn(move || motion.velocity(i as f64 * 0.001).z())
        })
        .collect();

    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, vz) in results.iter().enumerate() {
        assert_eq!(*vz, reference_velocity(0.001, 50.0, i as f64 * 0.001));
    }
}
