use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::flow::FlowError;
use crate::i18n::{field_label_key, keys, Translator};
use crate::measurement::{AxisCount, ConfigField, FlowResult, MeasurementConfig, MeasurementError};
use crate::session::SessionError;
use crate::units::ResultUnit;

/// 입력 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// 0) 계산 시작
    Start,
    /// 1~6) 측정 조건 입력/변경
    Edit(ConfigField),
}

/// 결과 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultChoice {
    End,
    Show(ResultUnit),
}

/// 변경 확인 질문에 대한 응답.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Unrecognized,
}

impl Confirmation {
    pub fn parse(answer: &str) -> Self {
        match answer.trim() {
            "y" | "Y" | "yes" | "Yes" | "YES" => Confirmation::Yes,
            "n" | "N" | "no" | "No" | "NO" => Confirmation::No,
            _ => Confirmation::Unrecognized,
        }
    }
}

pub fn parse_input_action(code: u32) -> Option<InputAction> {
    match code {
        0 => Some(InputAction::Start),
        other => ConfigField::from_menu_code(other).map(InputAction::Edit),
    }
}

pub fn parse_result_choice(code: u32) -> Option<ResultChoice> {
    match code {
        0 => Some(ResultChoice::End),
        other => ResultUnit::from_menu_code(other).map(ResultChoice::Show),
    }
}

fn field_prompt_key(field: ConfigField) -> &'static str {
    match field {
        ConfigField::Temperature => keys::PROMPT_TEMPERATURE,
        ConfigField::AmbientPressure => keys::PROMPT_AMBIENT_PRESSURE,
        ConfigField::StaticPressure => keys::PROMPT_STATIC_PRESSURE,
        ConfigField::PrandtlCoefficient => keys::PROMPT_PRANDTL,
        ConfigField::DuctDiameter => keys::PROMPT_DIAMETER,
        ConfigField::SampleCount => keys::PROMPT_ACCURACY,
    }
}

/// 입력 메뉴를 표시하고 선택값을 반환한다.
pub fn input_menu(tr: &Translator) -> Result<InputAction, AppError> {
    println!("{}", tr.t(keys::INPUT_MENU_TITLE));
    println!("{}", tr.t(keys::INPUT_MENU_START));
    for field in ConfigField::ALL {
        println!("{} - {}", field.menu_code(), tr.t(field_label_key(field)));
    }
    println!();
    read_menu_code(tr, parse_input_action)
}

/// 입력 항목 하나를 처리한다. 이미 값이 있으면 변경 여부를 먼저 묻는다.
pub fn handle_field(
    tr: &Translator,
    cfg: &mut MeasurementConfig,
    field: ConfigField,
) -> Result<(), AppError> {
    let label = tr.t(field_label_key(field));
    if let Some(current) = cfg.get(field) {
        println!("{}", tr.tf(keys::FIELD_EXISTS, &[("field", label.clone())]));
        let answer = read_line(&tr.tf(keys::PROMPT_CHANGE, &[("field", label.clone())]))?;
        match Confirmation::parse(&answer) {
            Confirmation::Yes => {}
            Confirmation::No => {
                println!(
                    "{}",
                    tr.tf(
                        keys::NO_CHANGE,
                        &[("field", label), ("value", current.to_string())]
                    )
                );
                return Ok(());
            }
            Confirmation::Unrecognized => {
                println!("{}", tr.t(keys::WRONG_ANSWER));
                return Ok(());
            }
        }
    }
    read_field_value(tr, cfg, field)
}

/// 허용 범위 안의 값이 들어올 때까지 반복해서 묻고 저장한다.
fn read_field_value(
    tr: &Translator,
    cfg: &mut MeasurementConfig,
    field: ConfigField,
) -> Result<(), AppError> {
    let prompt = tr.t(field_prompt_key(field));
    loop {
        let value = read_f64(tr, &prompt)?;
        match cfg.set(field, value) {
            Ok(()) => return Ok(()),
            Err(err) => {
                log::warn!("rejected {field} = {value}: {err}");
                println!("{}", rejection_message(tr, &err));
            }
        }
    }
}

fn rejection_message(tr: &Translator, err: &MeasurementError) -> String {
    match err {
        MeasurementError::Flow(FlowError::InvalidTemperature(_)) => {
            tr.t(keys::INVALID_TEMPERATURE)
        }
        MeasurementError::Flow(FlowError::InvalidDiameter(_)) => tr.t(keys::INVALID_DIAMETER),
        MeasurementError::Flow(FlowError::InvalidSampleCount(_))
        | MeasurementError::NonIntegerSampleCount(_) => tr.t(keys::INVALID_ACCURACY),
        other => tr.tf(
            keys::INVALID_VALUE,
            &[("reason", measurement_error_message(tr, other))],
        ),
    }
}

/// 계산 도메인 오류를 현재 언어로 옮긴다.
pub fn flow_error_message(tr: &Translator, err: &FlowError) -> String {
    match err {
        FlowError::InvalidSampleCount(n) => {
            tr.tf(keys::FLOW_SAMPLE_COUNT, &[("value", n.to_string())])
        }
        FlowError::InvalidTemperature(t) => {
            tr.tf(keys::FLOW_TEMPERATURE, &[("value", t.to_string())])
        }
        FlowError::InvalidDiameter(d) => tr.tf(keys::FLOW_DIAMETER, &[("value", d.to_string())]),
        FlowError::InvalidPressure(p) => tr.tf(keys::FLOW_PRESSURE, &[("value", p.to_string())]),
        FlowError::NoReadings => tr.t(keys::FLOW_NO_READINGS),
    }
}

/// 계산을 시작할 수 없는 입력 조합을 안내한다. 호출 후 입력 메뉴로 돌아간다.
pub fn print_flow_error(tr: &Translator, err: &FlowError) {
    println!("{}", flow_error_message(tr, err));
    if matches!(err, FlowError::InvalidPressure(_)) {
        println!("{}", tr.t(keys::INVALID_ABSOLUTE_PRESSURE));
    }
}

/// 측정 데이터 오류를 현재 언어로 옮긴다. 번역 문구가 없는 항목은 원문을 쓴다.
pub fn measurement_error_message(tr: &Translator, err: &MeasurementError) -> String {
    match err {
        MeasurementError::Flow(flow) => flow_error_message(tr, flow),
        MeasurementError::Incomplete(missing) => {
            let names = missing
                .iter()
                .map(|&f| tr.t(field_label_key(f)))
                .collect::<Vec<_>>()
                .join(", ");
            tr.tf(keys::MISSING_FIELDS, &[("fields", names)])
        }
        other => other.to_string(),
    }
}

/// 프로그램을 끝내는 오류의 표시 문구. 계산 관련 오류는 번역하고 나머지는 원문을 쓴다.
pub fn error_message(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Flow(flow) => flow_error_message(tr, flow),
        AppError::Measurement(m) | AppError::Session(SessionError::Measurement(m)) => {
            measurement_error_message(tr, m)
        }
        other => other.to_string(),
    }
}

/// 계산 시작 시 누락 항목을 안내한다.
pub fn print_incomplete(tr: &Translator, missing: &[ConfigField]) {
    println!("{}", tr.t(keys::INCOMPLETE));
    let names = missing
        .iter()
        .map(|&f| tr.t(field_label_key(f)))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}", tr.tf(keys::MISSING_FIELDS, &[("fields", names)]));
}

/// 한 축/두 축 측정 여부를 묻는다.
pub fn read_axis_count(tr: &Translator) -> Result<AxisCount, AppError> {
    loop {
        let answer = read_line(&tr.t(keys::PROMPT_AXES))?;
        let choice = answer.trim().parse::<u32>().ok();
        if let Some(axes) = choice.and_then(AxisCount::from_menu_code) {
            return Ok(axes);
        }
        println!("{}", tr.t(keys::WRONG_AXES));
    }
}

/// 측정점마다 위치를 보여주고 차압[Pa]을 정수로 입력받는다.
pub fn read_axis_readings(tr: &Translator, points: &[f64]) -> Result<Vec<i32>, AppError> {
    let prompt = tr.t(keys::PROMPT_READING);
    let mut readings = Vec::with_capacity(points.len());
    for (idx, depth) in points.iter().enumerate() {
        println!(
            "{}",
            tr.tf(
                keys::POINT_COORDINATE,
                &[("index", (idx + 1).to_string()), ("depth", depth.to_string())]
            )
        );
        readings.push(read_i32(tr, &prompt)?);
    }
    Ok(readings)
}

/// 결과 단위 메뉴를 표시하고 선택값을 반환한다.
pub fn result_menu(tr: &Translator) -> Result<ResultChoice, AppError> {
    println!("{}", tr.t(keys::RESULT_MENU_TITLE));
    println!("{}", tr.t(keys::RESULT_MENU_END));
    for unit in ResultUnit::ALL {
        println!("{} - {}", unit.menu_code(), unit.symbol());
    }
    println!();
    read_menu_code(tr, parse_result_choice)
}

pub fn print_result(tr: &Translator, result: &FlowResult, unit: ResultUnit) {
    println!(
        "{}",
        tr.tf(
            keys::RESULT_VALUE,
            &[
                ("value", result.value_in(unit).to_string()),
                ("unit", unit.symbol().to_string()),
            ]
        )
    );
}

/// 절대압, 밀도, 평균 유속 요약을 출력한다.
pub fn print_summary(tr: &Translator, result: &FlowResult) {
    println!(
        "{}",
        tr.tf(
            keys::RESULT_ABSOLUTE_PRESSURE,
            &[("value", format!("{:.1}", result.absolute_pressure_pa))]
        )
    );
    println!(
        "{}",
        tr.tf(
            keys::RESULT_DENSITY,
            &[("value", format!("{:.4}", result.density_kg_per_m3))]
        )
    );
    println!(
        "{}",
        tr.tf(
            keys::RESULT_MEAN_VELOCITY,
            &[("value", format!("{:.3}", result.mean_velocity_m_per_s))]
        )
    );
}

pub fn print_points(tr: &Translator, diameter_mm: f64, per_radius: u32, points: &[f64]) {
    println!(
        "{}",
        tr.tf(
            keys::POINTS_HEADING,
            &[
                ("diameter", diameter_mm.to_string()),
                ("count", per_radius.to_string()),
            ]
        )
    );
    for (idx, depth) in points.iter().enumerate() {
        println!(
            "{}",
            tr.tf(
                keys::POINTS_ROW,
                &[("index", (idx + 1).to_string()), ("depth", depth.to_string())]
            )
        );
    }
}

/// 저장 경로를 묻는다. 빈 입력이면 저장하지 않는다.
pub fn read_session_path(tr: &Translator) -> Result<Option<PathBuf>, AppError> {
    let answer = read_line(&tr.t(keys::PROMPT_SAVE_SESSION))?;
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}

pub fn wait_for_enter(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PRESS_ENTER));
    read_line("")?;
    Ok(())
}

fn read_menu_code<T>(tr: &Translator, parse: fn(u32) -> Option<T>) -> Result<T, AppError> {
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_ACTION))?;
        match sel.trim().parse::<u32>().ok().and_then(parse) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::ACTION_OUT_OF_RANGE)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_i32(tr: &Translator, prompt: &str) -> Result<i32, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<i32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_INTEGER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_listed_spellings_only() {
        assert_eq!(Confirmation::parse("YES\n"), Confirmation::Yes);
        assert_eq!(Confirmation::parse("n"), Confirmation::No);
        assert_eq!(Confirmation::parse("yEs"), Confirmation::Unrecognized);
    }

    #[test]
    fn menu_codes_map_to_commands() {
        assert_eq!(parse_input_action(0), Some(InputAction::Start));
        assert_eq!(
            parse_input_action(5),
            Some(InputAction::Edit(ConfigField::DuctDiameter))
        );
        assert_eq!(parse_input_action(7), None);
        assert_eq!(
            parse_result_choice(6),
            Some(ResultChoice::Show(ResultUnit::KilogramPerHour))
        );
        assert_eq!(parse_result_choice(0), Some(ResultChoice::End));
    }

    #[test]
    fn fatal_errors_follow_selected_language() {
        let en = Translator::new("en");
        let err = AppError::Measurement(MeasurementError::Flow(FlowError::InvalidPressure(-5.0)));
        assert_eq!(
            error_message(&en, &err),
            "Absolute pressure must be above zero (calculated -5 Pa)"
        );
        let incomplete = MeasurementError::Incomplete(vec![ConfigField::DuctDiameter]);
        let missing = AppError::Session(SessionError::Measurement(incomplete));
        assert_eq!(error_message(&en, &missing), "Missing: Diameter of the duct");

        let ko = Translator::new("ko");
        assert_eq!(
            flow_error_message(&ko, &FlowError::NoReadings),
            "차압 측정값이 없습니다"
        );
    }
}
