use std::path::Path;
use thiserror::Error;

use crate::config::Config;
use crate::flow::{self, FlowError, SampleCount};
use crate::i18n::{keys, Translator};
use crate::measurement::{
    calculate, AxisCount, ConfigField, FlowResult, MeasurementConfig, MeasurementError,
    MeasurementInputs, PressureReadings,
};
use crate::session::{self, MeasurementSession, SessionError};
use crate::ui_cli::{self, InputAction, ResultChoice};
use crate::units::ResultUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 표준 입력이 닫힘
    #[error("입력 스트림이 닫혔습니다")]
    InputClosed,
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 로거 초기화 오류
    #[error("로거 초기화 오류: {0}")]
    Logger(#[from] log::SetLoggerError),
    /// 세션 파일 오류
    #[error("{0}")]
    Session(#[from] SessionError),
    /// 측정 데이터 오류
    #[error("측정 데이터 오류: {0}")]
    Measurement(#[from] MeasurementError),
    /// 유량 계산 오류
    #[error("계산 오류: {0}")]
    Flow(#[from] FlowError),
}

/// 새 측정 설정을 만든다. 설정에 기본 프란틀관 계수가 있으면 미리 채운다.
pub fn new_measurement(config: &Config) -> MeasurementConfig {
    let mut measurement = MeasurementConfig::default();
    if let Some(coef) = config.default_prandtl_coefficient {
        if let Err(err) = measurement.set(ConfigField::PrandtlCoefficient, coef) {
            log::warn!("ignoring default Prandtl coefficient {coef}: {err}");
        }
    }
    measurement
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &Config, tr: &Translator) -> Result<(), AppError> {
    let mut measurement = new_measurement(config);
    loop {
        match ui_cli::input_menu(tr)? {
            InputAction::Edit(field) => ui_cli::handle_field(tr, &mut measurement, field)?,
            InputAction::Start => match measurement.snapshot() {
                Ok(inputs) => {
                    // 측정값을 받기 전에 대기압/정압 조합을 확인한다
                    if let Err(err) = inputs.checked_absolute_pressure() {
                        log::warn!("calculation refused: {err}");
                        ui_cli::print_flow_error(tr, &err);
                        continue;
                    }
                    println!("{}", tr.t(keys::CALC_START));
                    run_calculation(tr, &measurement, &inputs)?;
                    break;
                }
                Err(MeasurementError::Incomplete(missing)) => {
                    log::info!("calculation requested with {} fields missing", missing.len());
                    ui_cli::print_incomplete(tr, &missing);
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
    println!("{}", tr.t(keys::APP_EXIT));
    ui_cli::wait_for_enter(tr)?;
    Ok(())
}

/// 측정점 안내 → 차압 입력 → 계산 → 결과 단위 메뉴 순서로 진행한다.
fn run_calculation(
    tr: &Translator,
    measurement: &MeasurementConfig,
    inputs: &MeasurementInputs,
) -> Result<(), AppError> {
    let points = inputs.measurement_points()?;
    let axes = ui_cli::read_axis_count(tr)?;
    let mut readings = PressureReadings::new();
    match axes {
        AxisCount::One => {
            readings.push_axis(ui_cli::read_axis_readings(tr, &points)?, points.len())?;
        }
        AxisCount::Two => {
            println!("{}", tr.t(keys::AXIS_FIRST));
            readings.push_axis(ui_cli::read_axis_readings(tr, &points)?, points.len())?;
            println!("{}", tr.t(keys::AXIS_SECOND));
            readings.push_axis(ui_cli::read_axis_readings(tr, &points)?, points.len())?;
        }
    }

    let result = calculate(inputs, &readings)?;
    log::info!(
        "calculated volume flow {} m3/s, mass flow {} kg/s",
        result.volume_flow_m3_per_s,
        result.mass_flow_kg_per_s
    );
    ui_cli::print_summary(tr, &result);
    show_results(tr, &result)?;

    if let Some(path) = ui_cli::read_session_path(tr)? {
        let session = MeasurementSession {
            config: measurement.clone(),
            readings,
            result: Some(result),
        };
        session::save(&path, &session)?;
        println!(
            "{}",
            tr.tf(keys::SESSION_SAVED, &[("path", path.display().to_string())])
        );
    }
    Ok(())
}

fn show_results(tr: &Translator, result: &FlowResult) -> Result<(), AppError> {
    loop {
        match ui_cli::result_menu(tr)? {
            ResultChoice::End => return Ok(()),
            ResultChoice::Show(unit) => ui_cli::print_result(tr, result, unit),
        }
    }
}

/// `points` 하위 명령: 직경과 측정 횟수로 측정 깊이만 출력한다.
pub fn print_points(tr: &Translator, diameter_mm: f64, sample_count: u32) -> Result<(), AppError> {
    let count = SampleCount::try_from(sample_count)?;
    let points = flow::compute_measurement_points(count.coefficients(), diameter_mm)?;
    ui_cli::print_points(tr, diameter_mm, count.count(), &points);
    Ok(())
}

/// `calc` 하위 명령: 세션 파일을 다시 계산해 요약과 결과를 출력한다.
pub fn calculate_session(
    tr: &Translator,
    path: &Path,
    unit: Option<ResultUnit>,
) -> Result<FlowResult, AppError> {
    let mut session = session::load(path)?;
    let result = session.recalculate()?.clone();
    ui_cli::print_summary(tr, &result);
    match unit {
        Some(unit) => ui_cli::print_result(tr, &result, unit),
        None => {
            for unit in ResultUnit::ALL {
                ui_cli::print_result(tr, &result, unit);
            }
        }
    }
    Ok(result)
}
