use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::measurement::ConfigField;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const PRESS_ENTER: &str = "general.press_enter";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_INTEGER: &str = "error.invalid_integer";

    pub const INPUT_MENU_TITLE: &str = "input_menu.title";
    pub const INPUT_MENU_START: &str = "input_menu.start";
    pub const PROMPT_ACTION: &str = "prompt.action";
    pub const ACTION_OUT_OF_RANGE: &str = "error.action_out_of_range";

    pub const FIELD_TEMPERATURE: &str = "field.temperature";
    pub const FIELD_AMBIENT_PRESSURE: &str = "field.ambient_pressure";
    pub const FIELD_STATIC_PRESSURE: &str = "field.static_pressure";
    pub const FIELD_PRANDTL: &str = "field.prandtl";
    pub const FIELD_DIAMETER: &str = "field.diameter";
    pub const FIELD_ACCURACY: &str = "field.accuracy";

    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_AMBIENT_PRESSURE: &str = "prompt.ambient_pressure";
    pub const PROMPT_STATIC_PRESSURE: &str = "prompt.static_pressure";
    pub const PROMPT_PRANDTL: &str = "prompt.prandtl";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_ACCURACY: &str = "prompt.accuracy";

    pub const INVALID_TEMPERATURE: &str = "error.invalid_temperature";
    pub const INVALID_DIAMETER: &str = "error.invalid_diameter";
    pub const INVALID_ACCURACY: &str = "error.invalid_accuracy";
    pub const INVALID_VALUE: &str = "error.invalid_value";
    pub const INVALID_ABSOLUTE_PRESSURE: &str = "error.invalid_absolute_pressure";

    pub const FLOW_SAMPLE_COUNT: &str = "flow_error.sample_count";
    pub const FLOW_TEMPERATURE: &str = "flow_error.temperature";
    pub const FLOW_DIAMETER: &str = "flow_error.diameter";
    pub const FLOW_PRESSURE: &str = "flow_error.pressure";
    pub const FLOW_NO_READINGS: &str = "flow_error.no_readings";

    pub const FIELD_EXISTS: &str = "edit.field_exists";
    pub const PROMPT_CHANGE: &str = "edit.prompt_change";
    pub const NO_CHANGE: &str = "edit.no_change";
    pub const WRONG_ANSWER: &str = "edit.wrong_answer";

    pub const INCOMPLETE: &str = "calc.incomplete";
    pub const MISSING_FIELDS: &str = "calc.missing_fields";
    pub const CALC_START: &str = "calc.start";
    pub const PROMPT_AXES: &str = "calc.prompt_axes";
    pub const WRONG_AXES: &str = "calc.wrong_axes";
    pub const AXIS_FIRST: &str = "calc.axis_first";
    pub const AXIS_SECOND: &str = "calc.axis_second";
    pub const POINT_COORDINATE: &str = "calc.point_coordinate";
    pub const PROMPT_READING: &str = "calc.prompt_reading";

    pub const RESULT_MENU_TITLE: &str = "result_menu.title";
    pub const RESULT_MENU_END: &str = "result_menu.end";
    pub const RESULT_VALUE: &str = "result.value";
    pub const RESULT_ABSOLUTE_PRESSURE: &str = "result.absolute_pressure";
    pub const RESULT_DENSITY: &str = "result.density";
    pub const RESULT_MEAN_VELOCITY: &str = "result.mean_velocity";
    pub const PROMPT_SAVE_SESSION: &str = "session.prompt_save";
    pub const SESSION_SAVED: &str = "session.saved";

    pub const POINTS_HEADING: &str = "points.heading";
    pub const POINTS_ROW: &str = "points.row";

    pub const GUI_APP_TITLE: &str = "gui.app_title";
    pub const GUI_INPUT_HEADING: &str = "gui.input.heading";
    pub const GUI_POINTS_HEADING: &str = "gui.points.heading";
    pub const GUI_AXES: &str = "gui.points.axes";
    pub const GUI_AXIS_ONE: &str = "gui.points.axis_one";
    pub const GUI_AXIS_TWO: &str = "gui.points.axis_two";
    pub const GUI_DEPTH: &str = "gui.points.depth";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_RESULT_HEADING: &str = "gui.result.heading";
    pub const GUI_RESULT_UNIT: &str = "gui.result.unit";
    pub const GUI_POINT_VELOCITY: &str = "gui.result.point_velocity";
    pub const GUI_OPEN_SESSION: &str = "gui.session.open";
    pub const GUI_SAVE_SESSION: &str = "gui.session.save";
    pub const GUI_NEW_SESSION: &str = "gui.session.new";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_NEEDS_INPUT: &str = "gui.needs_input";
}

/// 측정 설정 항목의 표시 이름 키.
pub fn field_label_key(field: ConfigField) -> &'static str {
    match field {
        ConfigField::Temperature => keys::FIELD_TEMPERATURE,
        ConfigField::AmbientPressure => keys::FIELD_AMBIENT_PRESSURE,
        ConfigField::StaticPressure => keys::FIELD_STATIC_PRESSURE,
        ConfigField::PrandtlCoefficient => keys::FIELD_PRANDTL,
        ConfigField::DuctDiameter => keys::FIELD_DIAMETER,
        ConfigField::SampleCount => keys::FIELD_ACCURACY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 `locales/`를 찾고, 그마저 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            log::info!("language pack loaded for {lang_code}");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩이 우선이고, 없으면 내장 문자열이다.
    /// 영어 문자열이 없으면 한국어로 폴백하며 키가 아예 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let built_in = match self.lang {
            Language::En => en(key).or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        built_in.unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// `{name}` 형태의 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블(점으로 연결).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = match toml::from_str(src) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("ignoring malformed language pack: {e}");
            return None;
        }
    };
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "측정을 마칩니다.",
        PRESS_ENTER => "\n\n엔터를 누르면 종료합니다",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_INTEGER => "정수를 입력하세요.",
        INPUT_MENU_TITLE => "\n=== Log-Chebyshev 덕트 유량 측정 ===\n필요한 입력값:",
        INPUT_MENU_START => "0 - 계산 시작",
        PROMPT_ACTION => "무엇을 하시겠습니까 [0-6]: ",
        ACTION_OUT_OF_RANGE => "범위를 벗어난 선택입니다. 다시 입력하세요.",
        FIELD_TEMPERATURE => "가스 온도",
        FIELD_AMBIENT_PRESSURE => "대기압",
        FIELD_STATIC_PRESSURE => "덕트 내 정압",
        FIELD_PRANDTL => "프란틀관 계수",
        FIELD_DIAMETER => "덕트 직경",
        FIELD_ACCURACY => "측정 정확도",
        PROMPT_TEMPERATURE => "가스 온도 [°C]: ",
        PROMPT_AMBIENT_PRESSURE => "대기압 [hPa]: ",
        PROMPT_STATIC_PRESSURE => "덕트 내 정압 [Pa]: ",
        PROMPT_PRANDTL => "프란틀관 계수 (직관형 0.81, 곡관형 1.0): ",
        PROMPT_DIAMETER => "덕트 직경 [mm]: ",
        PROMPT_ACCURACY => "반경당 측정 횟수 [3-5]: ",
        INVALID_TEMPERATURE => "절대영도(-273.15 °C)보다 높아야 합니다. 다시 입력하세요!",
        INVALID_DIAMETER => "직경은 0보다 커야 합니다. 다시 입력하세요!",
        INVALID_ACCURACY => "3~5 사이에서 선택하세요.",
        INVALID_VALUE => "허용되지 않는 값입니다: {reason}",
        INVALID_ABSOLUTE_PRESSURE => "대기압 또는 정압을 다시 입력하세요.",
        FLOW_SAMPLE_COUNT => "반경당 측정 횟수는 3, 4, 5 중 하나여야 합니다 (입력값: {value})",
        FLOW_TEMPERATURE => "온도는 -273.15 °C 보다 높아야 합니다 (입력값: {value} °C)",
        FLOW_DIAMETER => "덕트 직경은 0보다 커야 합니다 (입력값: {value} mm)",
        FLOW_PRESSURE => "절대압은 0보다 커야 합니다 (계산값: {value} Pa)",
        FLOW_NO_READINGS => "차압 측정값이 없습니다",
        FIELD_EXISTS => "{field} 값이 이미 있습니다.",
        PROMPT_CHANGE => "{field} 값을 변경하시겠습니까? (y/n): ",
        NO_CHANGE => "변경하지 않습니다. {field}: {value}",
        WRONG_ANSWER => "잘못된 응답입니다!",
        INCOMPLETE => "필요한 입력이 완료되지 않았습니다!",
        MISSING_FIELDS => "미입력 항목: {fields}",
        CALC_START => "계산을 시작합니다!",
        PROMPT_AXES => "덕트 압력을 한 축으로 측정합니까, 두 축으로 측정합니까? (1/2): ",
        WRONG_AXES => "1 또는 2를 입력하세요.",
        AXIS_FIRST => "첫 번째 축 측정",
        AXIS_SECOND => "두 번째 축 측정",
        POINT_COORDINATE => "{index}. 측정 위치: {depth} mm",
        PROMPT_READING => "차압 [Pa]: ",
        RESULT_MENU_TITLE => "\n결과 단위를 선택하세요:",
        RESULT_MENU_END => "0 - 계산 종료",
        RESULT_VALUE => "결과: {value} {unit}",
        RESULT_ABSOLUTE_PRESSURE => "절대압: {value} Pa",
        RESULT_DENSITY => "가스 밀도: {value} kg/m3",
        RESULT_MEAN_VELOCITY => "평균 유속: {value} m/s",
        PROMPT_SAVE_SESSION => "측정 세션을 저장할 파일 경로 (저장하지 않으려면 엔터): ",
        SESSION_SAVED => "세션을 저장했습니다: {path}",
        POINTS_HEADING => "직경 {diameter} mm, 반경당 {count}회 측정 위치 (벽면 기준):",
        POINTS_ROW => "{index}. {depth} mm",
        GUI_APP_TITLE => "덕트 유량 측정 (Log-Chebyshev)",
        GUI_INPUT_HEADING => "측정 조건",
        GUI_POINTS_HEADING => "측정 위치와 차압",
        GUI_AXES => "측정 축",
        GUI_AXIS_ONE => "1축",
        GUI_AXIS_TWO => "2축",
        GUI_DEPTH => "깊이 [mm]",
        GUI_CALCULATE => "계산",
        GUI_RESULT_HEADING => "결과",
        GUI_RESULT_UNIT => "표시 단위",
        GUI_POINT_VELOCITY => "측정점별 유속 [m/s]",
        GUI_OPEN_SESSION => "세션 열기",
        GUI_SAVE_SESSION => "세션 저장",
        GUI_NEW_SESSION => "새 측정",
        GUI_LANGUAGE => "언어",
        GUI_NEEDS_INPUT => "측정 조건 여섯 항목을 모두 입력하세요.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Measurement finished.",
        PRESS_ENTER => "\n\nPress enter to finish",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_INTEGER => "Please enter a whole number.",
        INPUT_MENU_TITLE => "\n=== Log-Chebyshev duct flow measurement ===\nRequired data:",
        INPUT_MENU_START => "0 - Calculation start",
        PROMPT_ACTION => "What do you want to do [0-6]: ",
        ACTION_OUT_OF_RANGE => "Action out of range. Try again.",
        FIELD_TEMPERATURE => "Gas temperature",
        FIELD_AMBIENT_PRESSURE => "Ambient pressure",
        FIELD_STATIC_PRESSURE => "Static pressure inside the duct",
        FIELD_PRANDTL => "Prandtl tube coefficient",
        FIELD_DIAMETER => "Diameter of the duct",
        FIELD_ACCURACY => "Measurement accuracy",
        PROMPT_TEMPERATURE => "Enter gas temperature in Celsius: ",
        PROMPT_AMBIENT_PRESSURE => "Enter ambient pressure [hPa]: ",
        PROMPT_STATIC_PRESSURE => "Enter static pressure inside the duct [Pa]: ",
        PROMPT_PRANDTL => "Enter Prandtl tube coefficient (0.81 straight, 1.0 curved): ",
        PROMPT_DIAMETER => "Enter diameter of the duct [mm]: ",
        PROMPT_ACCURACY => "Choose number of measurements per duct radius [3-5]: ",
        INVALID_TEMPERATURE => "Do not try to break the laws of physics. Try again!",
        INVALID_DIAMETER => "Value of diameter must be higher than zero. Try again!",
        INVALID_ACCURACY => "Choice out of range. Try again.",
        INVALID_VALUE => "Value not accepted: {reason}",
        INVALID_ABSOLUTE_PRESSURE => "Correct the ambient or static pressure.",
        FLOW_SAMPLE_COUNT => "Measurements per radius must be 3, 4 or 5 (got {value})",
        FLOW_TEMPERATURE => "Temperature must be above -273.15 °C (got {value} °C)",
        FLOW_DIAMETER => "Duct diameter must be above zero (got {value} mm)",
        FLOW_PRESSURE => "Absolute pressure must be above zero (calculated {value} Pa)",
        FLOW_NO_READINGS => "No differential pressure readings",
        FIELD_EXISTS => "{field} data already exist.",
        PROMPT_CHANGE => "Do you want to change {field}? (y/n): ",
        NO_CHANGE => "No change. {field} is still {value}",
        WRONG_ANSWER => "Wrong answer!",
        INCOMPLETE => "Input of necessary data has not been completed!",
        MISSING_FIELDS => "Missing: {fields}",
        CALC_START => "Start of calculations!",
        PROMPT_AXES => {
            "Do you want to measure pressure inside the duct along one axis or two? (1/2): "
        }
        WRONG_AXES => "Wrong answer. Try again.",
        AXIS_FIRST => "First axis measurement",
        AXIS_SECOND => "Second axis measurement",
        POINT_COORDINATE => "{index}. Measurement coordinate: {depth} mm",
        PROMPT_READING => "Differential pressure [Pa]: ",
        RESULT_MENU_TITLE => "\nSelect unit of the result:",
        RESULT_MENU_END => "0 - End of calculations",
        RESULT_VALUE => "Result is: {value} {unit}",
        RESULT_ABSOLUTE_PRESSURE => "Absolute pressure: {value} Pa",
        RESULT_DENSITY => "Gas density: {value} kg/m3",
        RESULT_MEAN_VELOCITY => "Mean velocity: {value} m/s",
        PROMPT_SAVE_SESSION => "File path to save the measurement session (enter to skip): ",
        SESSION_SAVED => "Session saved: {path}",
        POINTS_HEADING => {
            "Measurement depths for {diameter} mm duct, {count} per radius (from wall):"
        }
        POINTS_ROW => "{index}. {depth} mm",
        GUI_APP_TITLE => "Duct Flow Measurement (Log-Chebyshev)",
        GUI_INPUT_HEADING => "Measurement conditions",
        GUI_POINTS_HEADING => "Measurement points and readings",
        GUI_AXES => "Axes",
        GUI_AXIS_ONE => "One axis",
        GUI_AXIS_TWO => "Two axes",
        GUI_DEPTH => "Depth [mm]",
        GUI_CALCULATE => "Calculate",
        GUI_RESULT_HEADING => "Result",
        GUI_RESULT_UNIT => "Display unit",
        GUI_POINT_VELOCITY => "Velocity per reading [m/s]",
        GUI_OPEN_SESSION => "Open session",
        GUI_SAVE_SESSION => "Save session",
        GUI_NEW_SESSION => "New measurement",
        GUI_LANGUAGE => "Language",
        GUI_NEEDS_INPUT => "Enter all six measurement conditions first.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(normalize_lang("KO"), Some("ko-kr".to_string()));
        assert_eq!(normalize_lang("en-uk"), Some("en-us".to_string()));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_lang("fr"), None);
        assert_eq!(
            normalize_locale_string("ko_KR.UTF-8"),
            Some("ko-kr".to_string())
        );
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn fills_placeholders_and_falls_back_to_key() {
        let tr = Translator::new("en");
        let line = tr.tf(
            keys::NO_CHANGE,
            &[("field", "Gas temperature".into()), ("value", "20".into())],
        );
        assert_eq!(line, "No change. Gas temperature is still 20");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn flattens_nested_language_pack_tables() {
        let map = parse_toml_to_map("[calc]\nstart = \"Go!\"\n").expect("map");
        assert_eq!(map.get(keys::CALC_START).map(String::as_str), Some("Go!"));
    }
}
