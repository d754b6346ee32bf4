use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::flow::round_to;

/// 유량 표시 소수 자릿수
pub const DISPLAY_DECIMALS: usize = 3;

/// 유량 단위의 시간 기준. 내부 기준은 초당 값이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// 1 시간 단위에 해당하는 초
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3600.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
        }
    }
}

/// 결과로 표시할 물리량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowQuantity {
    /// 체적 유량 [m3]
    Volume,
    /// 질량 유량 [kg]
    Mass,
}

/// 결과 단위 메뉴(1~6)에 대응하는 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultUnit {
    CubicMeterPerSecond,
    CubicMeterPerMinute,
    CubicMeterPerHour,
    KilogramPerSecond,
    KilogramPerMinute,
    KilogramPerHour,
}

impl ResultUnit {
    pub const ALL: [ResultUnit; 6] = [
        ResultUnit::CubicMeterPerSecond,
        ResultUnit::CubicMeterPerMinute,
        ResultUnit::CubicMeterPerHour,
        ResultUnit::KilogramPerSecond,
        ResultUnit::KilogramPerMinute,
        ResultUnit::KilogramPerHour,
    ];

    pub fn from_menu_code(code: u32) -> Option<Self> {
        match code {
            1..=6 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn menu_code(self) -> u32 {
        match self {
            ResultUnit::CubicMeterPerSecond => 1,
            ResultUnit::CubicMeterPerMinute => 2,
            ResultUnit::CubicMeterPerHour => 3,
            ResultUnit::KilogramPerSecond => 4,
            ResultUnit::KilogramPerMinute => 5,
            ResultUnit::KilogramPerHour => 6,
        }
    }

    pub fn quantity(self) -> FlowQuantity {
        match self {
            ResultUnit::CubicMeterPerSecond
            | ResultUnit::CubicMeterPerMinute
            | ResultUnit::CubicMeterPerHour => FlowQuantity::Volume,
            ResultUnit::KilogramPerSecond
            | ResultUnit::KilogramPerMinute
            | ResultUnit::KilogramPerHour => FlowQuantity::Mass,
        }
    }

    pub fn time_unit(self) -> TimeUnit {
        match self {
            ResultUnit::CubicMeterPerSecond | ResultUnit::KilogramPerSecond => TimeUnit::Second,
            ResultUnit::CubicMeterPerMinute | ResultUnit::KilogramPerMinute => TimeUnit::Minute,
            ResultUnit::CubicMeterPerHour | ResultUnit::KilogramPerHour => TimeUnit::Hour,
        }
    }

    /// 화면 표시용 단위 기호 (예: `m3/h`)
    pub fn symbol(self) -> &'static str {
        match self {
            ResultUnit::CubicMeterPerSecond => "m3/s",
            ResultUnit::CubicMeterPerMinute => "m3/min",
            ResultUnit::CubicMeterPerHour => "m3/h",
            ResultUnit::KilogramPerSecond => "kg/s",
            ResultUnit::KilogramPerMinute => "kg/min",
            ResultUnit::KilogramPerHour => "kg/h",
        }
    }
}

impl fmt::Display for ResultUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 단위 문자열 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("알 수 없는 유량 단위: {0} (m3/s, m3/min, m3/h, kg/s, kg/min, kg/h)")]
pub struct UnitParseError(pub String);

impl FromStr for ResultUnit {
    type Err = UnitParseError;

    /// `m3/h`, `M³/H`, `kg/min` 같은 기호나 메뉴 번호(`1`~`6`)를 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('³', "3");
        if let Ok(code) = normalized.parse::<u32>() {
            return Self::from_menu_code(code).ok_or_else(|| UnitParseError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol() == normalized)
            .ok_or_else(|| UnitParseError(s.to_string()))
    }
}

/// 초당 유량을 지정한 시간 기준으로 환산하고 소수점 셋째 자리로 반올림한다.
///
/// 어떤 초당 값을 넘길지는 호출하는 쪽이 정한다. 체적 유량은 반올림 전 값을,
/// 질량 유량은 계산 단계에서 이미 셋째 자리로 반올림된 값을 넘긴다
/// (0.081 kg/s → 4.86 kg/min → 291.6 kg/h).
pub fn convert_flow(value_per_second: f64, unit: TimeUnit) -> f64 {
    round_to(value_per_second * unit.seconds(), DISPLAY_DECIMALS)
}
