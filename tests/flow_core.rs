//! 측정점 배치, 밀도, 유속, 유량 계산 회귀 테스트.
use duct_flow_toolbox::flow::{
    self, compute_absolute_pressure, compute_density, compute_mass_flow,
    compute_measurement_points, compute_mean_velocity, compute_volume_flow, lookup_coefficients,
    FlowError, SampleCount,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn coefficient_tables_match_sample_counts() {
    assert_eq!(lookup_coefficients(3).unwrap(), &[0.375, 0.925, 0.936]);
    assert_eq!(
        lookup_coefficients(4).unwrap(),
        &[0.331, 0.612, 0.800, 0.952]
    );
    assert_eq!(
        lookup_coefficients(5).unwrap(),
        &[0.287, 0.570, 0.689, 0.847, 0.962]
    );
    assert_eq!(
        lookup_coefficients(2),
        Err(FlowError::InvalidSampleCount(2))
    );
    assert_eq!(
        lookup_coefficients(6),
        Err(FlowError::InvalidSampleCount(6))
    );
}

#[test]
fn points_for_common_diameters() {
    let three = SampleCount::Three.coefficients();
    assert_eq!(
        compute_measurement_points(three, 100.0).unwrap(),
        vec![3.0, 4.0, 31.0, 69.0, 96.0, 97.0]
    );
    assert_eq!(
        compute_measurement_points(three, 250.0).unwrap(),
        vec![8.0, 9.0, 78.0, 172.0, 241.0, 242.0]
    );
    assert_eq!(
        compute_measurement_points(SampleCount::Four.coefficients(), 100.0).unwrap(),
        vec![2.0, 10.0, 19.0, 33.0, 67.0, 81.0, 90.0, 98.0]
    );
    assert_eq!(
        compute_measurement_points(SampleCount::Five.coefficients(), 100.0).unwrap(),
        vec![2.0, 8.0, 16.0, 22.0, 36.0, 64.0, 78.0, 84.0, 92.0, 98.0]
    );
    assert_eq!(
        compute_measurement_points(SampleCount::Five.coefficients(), 1000.0).unwrap(),
        vec![19.0, 76.0, 156.0, 215.0, 356.0, 644.0, 785.0, 844.0, 924.0, 981.0]
    );
}

#[test]
fn half_offsets_round_to_even() {
    // 반경 12 mm × 0.375 = 4.5 → 4
    assert_eq!(
        compute_measurement_points(SampleCount::Three.coefficients(), 24.0).unwrap(),
        vec![1.0, 1.0, 8.0, 16.0, 23.0, 23.0]
    );
}

#[test]
fn odd_diameter_gives_half_millimetre_points() {
    assert_eq!(
        compute_measurement_points(SampleCount::Three.coefficients(), 315.0).unwrap(),
        vec![10.5, 11.5, 98.5, 216.5, 303.5, 304.5]
    );
}

#[test]
fn points_are_sorted_and_inside_duct() {
    for count in SampleCount::ALL {
        for diameter in [50.0, 100.0, 315.0, 800.0, 1234.0] {
            let points = compute_measurement_points(count.coefficients(), diameter).unwrap();
            assert_eq!(points.len(), count.points_per_axis());
            assert!(points.windows(2).all(|w| w[0] <= w[1]), "{points:?}");
            assert!(points.iter().all(|&p| (0.0..=diameter).contains(&p)));
        }
    }
}

#[test]
fn non_positive_diameter_is_rejected() {
    let three = SampleCount::Three.coefficients();
    assert_eq!(
        compute_measurement_points(three, 0.0),
        Err(FlowError::InvalidDiameter(0.0))
    );
    assert!(matches!(
        compute_measurement_points(three, -10.0),
        Err(FlowError::InvalidDiameter(_))
    ));
}

#[test]
fn absolute_pressure_adds_static_to_ambient() {
    assert_close(compute_absolute_pressure(1013.25, 50.0), 101375.0, 1e-9);
    assert_close(compute_absolute_pressure(1000.0, -200.0), 99800.0, 1e-9);
}

#[test]
fn density_at_standard_pressure() {
    assert_close(
        compute_density(20.0, 101325.0).unwrap(),
        1.204599420092103,
        1e-12,
    );
    assert_close(compute_density(0.0, 101325.0).unwrap(), 1.2928, 1e-12);
}

#[test]
fn density_temperature_boundary() {
    assert_eq!(
        compute_density(-273.15, 101325.0),
        Err(FlowError::InvalidTemperature(-273.15))
    );
    assert!(compute_density(-273.14, 101325.0).unwrap() > 0.0);
    assert!(matches!(
        compute_density(20.0, 0.0),
        Err(FlowError::InvalidPressure(_))
    ));
}

#[test]
fn single_reading_velocity() {
    let v = compute_mean_velocity(20.0, 101375.0, 1.0, &[100]).unwrap();
    assert_close(v, 12.882095317845298, 1e-9);
}

#[test]
fn velocity_ignores_reading_sign() {
    let positive = compute_mean_velocity(20.0, 101375.0, 0.81, &[40, 45, 50]).unwrap();
    let mixed = compute_mean_velocity(20.0, 101375.0, 0.81, &[-40, 45, -50]).unwrap();
    assert_close(mixed, positive, 1e-12);
}

#[test]
fn two_axis_readings_average_every_point() {
    let readings = [120, -130, 110, 140, 125, 118, 100, 90];
    let v = compute_mean_velocity(120.0, 99000.0, 0.81, &readings).unwrap();
    assert_close(v, 13.17659057911354, 1e-9);
}

#[test]
fn velocity_rejects_bad_state() {
    assert_eq!(
        compute_mean_velocity(20.0, 101375.0, 1.0, &[]),
        Err(FlowError::NoReadings)
    );
    assert!(matches!(
        compute_mean_velocity(20.0, -5.0, 1.0, &[]),
        Err(FlowError::InvalidPressure(_))
    ));
    assert!(matches!(
        compute_mean_velocity(-300.0, 101375.0, 1.0, &[10]),
        Err(FlowError::InvalidTemperature(_))
    ));
}

#[test]
fn point_velocities_follow_reading_order() {
    let velocities = flow::point_velocities(20.0, 101375.0, 1.0, &[0, 100]).unwrap();
    assert_eq!(velocities.len(), 2);
    assert_close(velocities[0], 0.0, 1e-12);
    assert_close(velocities[1], 12.882095317845298, 1e-9);
}

#[test]
fn reference_measurement_end_to_end() {
    let coefficients = lookup_coefficients(3).unwrap();
    let points = compute_measurement_points(coefficients, 100.0).unwrap();
    assert_eq!(points.len(), 6);

    let p_abs = compute_absolute_pressure(1013.25, 50.0);
    assert_close(p_abs, 101375.0, 1e-9);
    let density = compute_density(20.0, p_abs).unwrap();
    assert_close(density, 1.2051938436894838, 1e-12);
    let v = compute_mean_velocity(20.0, p_abs, 1.0, &[40, 45, 50, 45, 40, 48]).unwrap();
    assert_close(v, 8.60197396407237, 1e-9);
    let volume = compute_volume_flow(v, 100.0);
    assert_close(volume, 0.06755974552975108, 1e-12);
    assert_eq!(compute_mass_flow(volume, density), 0.081);
}

#[test]
fn repeated_calls_are_identical() {
    let a = compute_mean_velocity(35.0, 100500.0, 0.81, &[12, 34, 56, 78, 90, 11]).unwrap();
    let b = compute_mean_velocity(35.0, 100500.0, 0.81, &[12, 34, 56, 78, 90, 11]).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}
