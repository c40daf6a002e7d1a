//! Reference scenarios for the oscillator and the solar estimator.

use physics_lab::oscillator::{simulate, OscillatorParams};
use physics_lab::solar::{
    clear_sky_power, clear_sky_sample, day_profile, instantaneous_power, year_energy,
    PanelConfig, SolarInstant, SunHoursTable,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;
use std::f64::consts::PI;

#[test]
fn free_oscillator_is_unit_cosine() {
    let params = OscillatorParams::free(1.0, 1.0);
    let traj = simulate(&params, 1.0, 0.0, 10.0, 0.001).unwrap();
    assert_eq!(traj.len(), 10_000);

    // One full period later the mass is back near x = 1
    let period_idx = (2.0 * PI / 0.001).round() as usize;
    let s = traj.states[period_idx];
    assert!((s.position - 1.0).abs() < 0.01, "x(2π) = {}", s.position);
    assert!(s.velocity.abs() < 0.01);

    // Half a period later it is near x = -1
    let half_idx = (PI / 0.001).round() as usize;
    assert!((traj.states[half_idx].position + 1.0).abs() < 0.01);
}

#[test]
fn free_oscillator_energy_drift_bounded_by_dt() {
    let params = OscillatorParams::free(1.0, 1.0);
    let dt = 0.001;
    let traj = simulate(&params, 1.0, 0.0, 10.0, dt).unwrap();
    let energies = traj.energies(&params);
    let e0 = energies[0];
    assert_eq!(e0, 0.5);
    // Forward Euler gains a factor (1 + dt²) per step: drift ≈ T·dt
    let max_drift = energies
        .iter()
        .map(|e| (e - e0).abs() / e0)
        .fold(0.0, f64::max);
    assert!(max_drift < 2.0 * 10.0 * dt, "drift {max_drift}");
    // Growth, not decay
    assert!(*energies.last().unwrap() > e0);
}

#[rstest]
#[case(0.01)]
#[case(0.001)]
#[case(0.0001)]
fn energy_drift_shrinks_with_dt(#[case] dt: f64) {
    let params = OscillatorParams::free(1.0, 1.0);
    let traj = simulate(&params, 1.0, 0.0, 10.0, dt).unwrap();
    let last = traj.final_state().unwrap();
    let drift = (params.mechanical_energy(last.position, last.velocity) - 0.5).abs() / 0.5;
    assert!(drift < 2.0 * 10.0 * dt, "dt {dt} drift {drift}");
}

#[test]
fn tracking_panel_peaks_at_noon_on_may_first() {
    let config = PanelConfig::default();
    let noon = clear_sky_sample(&config, SolarInstant::new(121.0, 12.0), true);

    for hour in (0..24).filter(|&h| h != 12) {
        let other = clear_sky_sample(&config, SolarInstant::new(121.0, f64::from(hour)), true);
        assert!(
            noon.sun.elevation >= other.sun.elevation,
            "hour {hour} is higher than noon"
        );
    }

    let mut rng = StdRng::seed_from_u64(0);
    let p12 = instantaneous_power(&config, 121.0, 12.0, true, true, &mut rng);
    let p6 = instantaneous_power(&config, 121.0, 6.0, true, true, &mut rng);
    let p18 = instantaneous_power(&config, 121.0, 18.0, true, true, &mut rng);
    assert!(p12 >= p6 && p12 >= p18, "{p12} {p6} {p18}");
    assert!(p12 > 0.0);
}

#[rstest]
#[case(10, false)]
#[case(121, true)]
#[case(151, false)]
#[case(172, true)]
#[case(355, false)]
fn full_sun_day_is_clear_sky(#[case] day: u32, #[case] follow_sun: bool) {
    let config = PanelConfig::default();
    let mut rng = StdRng::seed_from_u64(u64::from(day));
    let profile = day_profile(&config, day, 24.0, follow_sun, &mut rng).unwrap();

    assert!(profile.sun_mask.iter().all(|&lit| lit));
    for hour in 0..24 {
        assert_eq!(
            profile.power_w[hour],
            clear_sky_power(&config, f64::from(day), hour as f64, follow_sun)
        );
    }
}

#[test]
fn no_sun_day_collapses_inside_window() {
    let config = PanelConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    let profile = day_profile(&config, 121, 0.0, true, &mut rng).unwrap();

    assert_eq!((profile.first_hour, profile.last_hour), (5, 20));
    assert_eq!(profile.sunlit_hours(), 0);

    for hour in (0..profile.first_hour).chain(profile.last_hour..24) {
        assert_eq!(profile.power_w[hour], profile.clear_sky_w[hour]);
    }
    for hour in profile.first_hour..profile.last_hour {
        // Tracking: drawn irradiance < 120 W/m² times η·A
        assert!(profile.power_w[hour] < 120.0 * config.efficiency * config.area_m2);
    }
    assert!(profile.energy_kwh() < 0.3 * profile.clear_sky_energy_kwh());
}

#[test]
fn year_profile_follows_seasons() {
    let config = PanelConfig::default();
    let mut rng = StdRng::seed_from_u64(2023);
    let year = year_energy(&config, &SunHoursTable::visby(), true, &mut rng).unwrap();

    assert_eq!(year.daily_kwh.len(), 365);
    assert_eq!(year.clear_sky_kwh.len(), 365);
    let total: f64 = year.daily_kwh.iter().sum();
    assert!((total - year.total_kwh).abs() < 1e-9);
    assert!(year.total_kwh < year.clear_sky_total_kwh());

    let january: f64 = year.daily_kwh[..31].iter().sum();
    let june: f64 = year.daily_kwh[151..181].iter().sum();
    assert!(june > 5.0 * january, "june {june} january {january}");
}

#[test]
fn full_sun_year_equals_clear_sky() {
    let config = PanelConfig::default();
    let mut rng = StdRng::seed_from_u64(4);
    let year = year_energy(&config, &SunHoursTable::full_sun(), false, &mut rng).unwrap();
    assert_eq!(year.daily_kwh, year.clear_sky_kwh);
}
