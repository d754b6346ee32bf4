//! 측정 설정, 측정값 묶음, 세션 파일 테스트.
use duct_flow_toolbox::{
    flow::{FlowError, SampleCount},
    measurement::{calculate, ConfigField, MeasurementConfig, MeasurementError, PressureReadings},
    session::{self, MeasurementSession},
    units::ResultUnit,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn reference_config() -> MeasurementConfig {
    let mut cfg = MeasurementConfig::default();
    cfg.set(ConfigField::Temperature, 20.0).unwrap();
    cfg.set(ConfigField::AmbientPressure, 1013.25).unwrap();
    cfg.set(ConfigField::StaticPressure, 50.0).unwrap();
    cfg.set(ConfigField::PrandtlCoefficient, 1.0).unwrap();
    cfg.set(ConfigField::DuctDiameter, 100.0).unwrap();
    cfg.set(ConfigField::SampleCount, 3.0).unwrap();
    cfg
}

fn reference_readings() -> PressureReadings {
    let mut readings = PressureReadings::new();
    readings.push_axis(vec![40, 45, 50, 45, 40, 48], 6).unwrap();
    readings
}

#[test]
fn incomplete_config_lists_missing_fields() {
    let mut cfg = MeasurementConfig::default();
    assert!(!cfg.is_complete());
    cfg.set(ConfigField::Temperature, 20.0).unwrap();
    cfg.set(ConfigField::DuctDiameter, 100.0).unwrap();
    assert_eq!(
        cfg.snapshot(),
        Err(MeasurementError::Incomplete(vec![
            ConfigField::AmbientPressure,
            ConfigField::StaticPressure,
            ConfigField::PrandtlCoefficient,
            ConfigField::SampleCount,
        ]))
    );
    assert!(reference_config().is_complete());
}

#[test]
fn rejected_values_keep_previous_input() {
    let mut cfg = reference_config();
    assert_eq!(
        cfg.set(ConfigField::Temperature, -273.15),
        Err(MeasurementError::Flow(FlowError::InvalidTemperature(-273.15)))
    );
    assert_eq!(cfg.temperature_c, Some(20.0));
    assert!(cfg.set(ConfigField::DuctDiameter, 0.0).is_err());
    assert_eq!(cfg.duct_diameter_mm, Some(100.0));
    assert_eq!(
        cfg.set(ConfigField::SampleCount, 3.5),
        Err(MeasurementError::NonIntegerSampleCount(3.5))
    );
    assert_eq!(
        cfg.set(ConfigField::SampleCount, 6.0),
        Err(MeasurementError::Flow(FlowError::InvalidSampleCount(6)))
    );
    assert_eq!(
        cfg.set(ConfigField::StaticPressure, f64::NAN),
        Err(MeasurementError::NotFinite(ConfigField::StaticPressure))
    );
    assert_eq!(cfg.sample_count, Some(SampleCount::Three));
}

#[test]
fn clearing_a_field_makes_config_incomplete() {
    let mut cfg = reference_config();
    cfg.clear(ConfigField::PrandtlCoefficient);
    assert_eq!(cfg.missing_fields(), vec![ConfigField::PrandtlCoefficient]);
}

#[test]
fn axes_are_concatenated_in_order() {
    let mut readings = PressureReadings::new();
    readings.push_axis(vec![1, 2, 3], 3).unwrap();
    readings.push_axis(vec![4, 5, 6], 3).unwrap();
    assert_eq!(readings.concatenated(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        readings.push_axis(vec![7, 8, 9], 3),
        Err(MeasurementError::TooManyAxes)
    );
}

#[test]
fn axis_length_must_match_points() {
    let mut readings = PressureReadings::new();
    assert_eq!(
        readings.push_axis(vec![1, 2], 6),
        Err(MeasurementError::AxisLength {
            axis: 1,
            expected: 6,
            actual: 2
        })
    );
    assert_eq!(
        readings.validate(6),
        Err(MeasurementError::Flow(FlowError::NoReadings))
    );
}

#[test]
fn reference_measurement_results_in_every_unit() {
    let inputs = reference_config().snapshot().unwrap();
    let result = calculate(&inputs, &reference_readings()).unwrap();
    assert_close(result.absolute_pressure_pa, 101375.0, 1e-9);
    assert_close(result.density_kg_per_m3, 1.2051938436894838, 1e-12);
    assert_close(result.mean_velocity_m_per_s, 8.60197396407237, 1e-9);
    assert_eq!(result.point_velocities_m_per_s.len(), 6);

    let expected = [
        (ResultUnit::CubicMeterPerSecond, 0.068),
        (ResultUnit::CubicMeterPerMinute, 4.054),
        (ResultUnit::CubicMeterPerHour, 243.215),
        (ResultUnit::KilogramPerSecond, 0.081),
        (ResultUnit::KilogramPerMinute, 4.86),
        (ResultUnit::KilogramPerHour, 291.6),
    ];
    for (unit, value) in expected {
        assert_eq!(result.value_in(unit), value, "{unit}");
    }
}

#[test]
fn two_axis_measurement_uses_all_readings() {
    let inputs = reference_config().snapshot().unwrap();
    let mut readings = reference_readings();
    readings.push_axis(vec![40, 45, 50, 45, 40, 48], 6).unwrap();
    let result = calculate(&inputs, &readings).unwrap();
    assert_eq!(result.point_velocities_m_per_s.len(), 12);
    // 같은 축을 두 번 넣으면 평균은 변하지 않는다
    assert_close(result.mean_velocity_m_per_s, 8.60197396407237, 1e-9);
}

#[test]
fn absolute_pressure_is_checked_before_readings() {
    let mut cfg = reference_config();
    cfg.set(ConfigField::AmbientPressure, 0.0).unwrap();
    cfg.set(ConfigField::StaticPressure, -5.0).unwrap();
    // 항목별 검증은 통과하므로 입력은 완료 상태다
    let inputs = cfg.snapshot().unwrap();
    assert_eq!(
        inputs.checked_absolute_pressure(),
        Err(FlowError::InvalidPressure(-5.0))
    );
    assert_eq!(
        calculate(&inputs, &PressureReadings::new()),
        Err(MeasurementError::Flow(FlowError::InvalidPressure(-5.0)))
    );

    let valid = reference_config().snapshot().unwrap();
    assert_eq!(valid.checked_absolute_pressure(), Ok(101375.0));
}

#[test]
fn calculate_rejects_mismatched_readings() {
    let inputs = reference_config().snapshot().unwrap();
    let mut readings = PressureReadings::new();
    readings.push_axis(vec![1, 2, 3, 4], 4).unwrap();
    assert!(matches!(
        calculate(&inputs, &readings),
        Err(MeasurementError::AxisLength { expected: 6, .. })
    ));
}

#[test]
fn session_roundtrip_through_file() {
    let file_name = format!("duct_flow_session_{}.toml", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    let mut original = MeasurementSession::new(reference_config(), reference_readings());
    original.recalculate().unwrap();
    session::save(&path, &original).unwrap();

    let mut loaded = session::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.config, original.config);
    assert_eq!(loaded.readings, original.readings);

    let result = loaded.recalculate().unwrap();
    assert_eq!(result.mass_flow_kg_per_s, 0.081);
    assert_eq!(result.value_in(ResultUnit::CubicMeterPerHour), 243.215);
}

#[test]
fn session_without_readings_cannot_be_recalculated() {
    let text = r#"
[config]
temperature_c = 20.0
ambient_pressure_hpa = 1013.25
static_pressure_pa = 50.0
prandtl_coefficient = 1.0
duct_diameter_mm = 100.0
sample_count = 3
"#;
    let mut loaded: MeasurementSession = toml::from_str(text).unwrap();
    assert_eq!(loaded.config.sample_count, Some(SampleCount::Three));
    assert_eq!(
        loaded.recalculate(),
        Err(MeasurementError::Flow(FlowError::NoReadings))
    );
}
