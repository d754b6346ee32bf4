//! `points`/`calc` 하위 명령 회귀 테스트.
use duct_flow_toolbox::{
    app::{self, AppError},
    flow::FlowError,
    i18n::Translator,
    measurement::{ConfigField, MeasurementConfig, MeasurementError, PressureReadings},
    session::{self, MeasurementSession, SessionError},
    units::ResultUnit,
};
use std::path::PathBuf;

fn temp_session_path(tag: &str) -> PathBuf {
    let file_name = format!("duct_flow_app_{tag}_{}.toml", std::process::id());
    std::env::temp_dir().join(file_name)
}

fn reference_session() -> MeasurementSession {
    let mut cfg = MeasurementConfig::default();
    cfg.set(ConfigField::Temperature, 20.0).unwrap();
    cfg.set(ConfigField::AmbientPressure, 1013.25).unwrap();
    cfg.set(ConfigField::StaticPressure, 50.0).unwrap();
    cfg.set(ConfigField::PrandtlCoefficient, 1.0).unwrap();
    cfg.set(ConfigField::DuctDiameter, 100.0).unwrap();
    cfg.set(ConfigField::SampleCount, 3.0).unwrap();
    let mut readings = PressureReadings::new();
    readings.push_axis(vec![40, 45, 50, 45, 40, 48], 6).unwrap();
    MeasurementSession::new(cfg, readings)
}

#[test]
fn calc_subcommand_recalculates_saved_session() {
    let path = temp_session_path("ok");
    session::save(&path, &reference_session()).unwrap();

    let tr = Translator::new("en");
    let result = app::calculate_session(&tr, &path, Some(ResultUnit::KilogramPerHour));
    let _ = std::fs::remove_file(&path);

    let result = result.unwrap();
    assert_eq!(result.mass_flow_kg_per_s, 0.081);
    assert_eq!(result.value_in(ResultUnit::KilogramPerHour), 291.6);
    assert_eq!(result.value_in(ResultUnit::CubicMeterPerMinute), 4.054);
}

#[test]
fn calc_subcommand_reports_bad_pressure() {
    let path = temp_session_path("bad_pressure");
    let mut bad = reference_session();
    bad.config.set(ConfigField::AmbientPressure, 0.0).unwrap();
    bad.config.set(ConfigField::StaticPressure, -5.0).unwrap();
    session::save(&path, &bad).unwrap();

    let result = app::calculate_session(&Translator::new("en"), &path, None);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        result.unwrap_err(),
        AppError::Measurement(MeasurementError::Flow(FlowError::InvalidPressure(_)))
    ));
}

#[test]
fn calc_subcommand_missing_file_is_io_error() {
    let path = temp_session_path("missing");
    let result = app::calculate_session(&Translator::new("en"), &path, None);
    assert!(matches!(
        result,
        Err(AppError::Session(SessionError::Io(_)))
    ));
}

#[test]
fn points_subcommand_validates_arguments() {
    let tr = Translator::new("en");
    assert!(app::print_points(&tr, 100.0, 3).is_ok());
    assert!(matches!(
        app::print_points(&tr, 100.0, 6),
        Err(AppError::Flow(FlowError::InvalidSampleCount(6)))
    ));
    assert!(matches!(
        app::print_points(&tr, 0.0, 3),
        Err(AppError::Flow(FlowError::InvalidDiameter(_)))
    ));
}
