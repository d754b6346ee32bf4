//! 측정 입력값, 차압 측정값, 결과를 묶는 데이터 모델과 계산 실행 단위.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::flow::{
    self, compute_absolute_pressure, compute_density, compute_mass_flow,
    compute_measurement_points, compute_volume_flow, FlowError, SampleCount,
};
use crate::units::{convert_flow, FlowQuantity, ResultUnit};

/// 측정 데이터 처리 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    /// 계산 도메인 오류
    #[error(transparent)]
    Flow(#[from] FlowError),
    /// 필수 입력값 누락
    #[error("필수 입력이 완료되지 않았습니다: {}", field_list(.0))]
    Incomplete(Vec<ConfigField>),
    /// 숫자가 아닌 값(NaN/무한대)
    #[error("{0} 값이 유한한 숫자가 아닙니다")]
    NotFinite(ConfigField),
    /// 측정 횟수 입력이 정수가 아님
    #[error("반경당 측정 횟수는 정수여야 합니다 (입력값: {0})")]
    NonIntegerSampleCount(f64),
    /// 축별 측정값 개수가 측정점 개수와 다름
    #[error("{axis}번째 축 측정값 개수 {actual}개가 측정점 개수 {expected}개와 다릅니다")]
    AxisLength {
        axis: usize,
        expected: usize,
        actual: usize,
    },
    /// 허용 축 수(2)를 넘음
    #[error("측정 축은 최대 2개입니다")]
    TooManyAxes,
}

fn field_list(fields: &[ConfigField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 입력 메뉴(1~6)에 대응하는 측정 설정 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigField {
    Temperature,
    AmbientPressure,
    StaticPressure,
    PrandtlCoefficient,
    DuctDiameter,
    SampleCount,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::Temperature,
        ConfigField::AmbientPressure,
        ConfigField::StaticPressure,
        ConfigField::PrandtlCoefficient,
        ConfigField::DuctDiameter,
        ConfigField::SampleCount,
    ];

    pub fn from_menu_code(code: u32) -> Option<Self> {
        match code {
            1..=6 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn menu_code(self) -> u32 {
        match self {
            ConfigField::Temperature => 1,
            ConfigField::AmbientPressure => 2,
            ConfigField::StaticPressure => 3,
            ConfigField::PrandtlCoefficient => 4,
            ConfigField::DuctDiameter => 5,
            ConfigField::SampleCount => 6,
        }
    }

    /// 세션 파일 키와 같은 식별자
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::Temperature => "temperature_c",
            ConfigField::AmbientPressure => "ambient_pressure_hpa",
            ConfigField::StaticPressure => "static_pressure_pa",
            ConfigField::PrandtlCoefficient => "prandtl_coefficient",
            ConfigField::DuctDiameter => "duct_diameter_mm",
            ConfigField::SampleCount => "sample_count",
        }
    }

    /// 항목별 허용 범위를 검사한다. 통과하면 저장할 값을 그대로 돌려준다.
    pub fn validate(self, value: f64) -> Result<f64, MeasurementError> {
        if !value.is_finite() {
            return Err(MeasurementError::NotFinite(self));
        }
        match self {
            ConfigField::Temperature => {
                if value <= flow::ABSOLUTE_ZERO_C {
                    return Err(FlowError::InvalidTemperature(value).into());
                }
            }
            ConfigField::DuctDiameter => {
                if value <= 0.0 {
                    return Err(FlowError::InvalidDiameter(value).into());
                }
            }
            ConfigField::SampleCount => {
                sample_count_from_f64(value)?;
            }
            ConfigField::AmbientPressure
            | ConfigField::StaticPressure
            | ConfigField::PrandtlCoefficient => {}
        }
        Ok(value)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn sample_count_from_f64(value: f64) -> Result<SampleCount, MeasurementError> {
    if value.fract() != 0.0 {
        return Err(MeasurementError::NonIntegerSampleCount(value));
    }
    // 음수는 0으로 포화되어 범위 오류가 된다
    Ok(SampleCount::try_from(value as u32)?)
}

/// 측정 설정. 각 항목은 입력 전까지 `None`이다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// 가스 온도 [°C]
    pub temperature_c: Option<f64>,
    /// 대기압 [hPa]
    pub ambient_pressure_hpa: Option<f64>,
    /// 덕트 내 정압 [Pa]
    pub static_pressure_pa: Option<f64>,
    /// 프란틀관 계수 (직관형 0.81, 곡관형 1.0)
    pub prandtl_coefficient: Option<f64>,
    /// 덕트 직경 [mm]
    pub duct_diameter_mm: Option<f64>,
    /// 반경당 측정 횟수
    pub sample_count: Option<SampleCount>,
}

impl MeasurementConfig {
    pub fn get(&self, field: ConfigField) -> Option<f64> {
        match field {
            ConfigField::Temperature => self.temperature_c,
            ConfigField::AmbientPressure => self.ambient_pressure_hpa,
            ConfigField::StaticPressure => self.static_pressure_pa,
            ConfigField::PrandtlCoefficient => self.prandtl_coefficient,
            ConfigField::DuctDiameter => self.duct_diameter_mm,
            ConfigField::SampleCount => self.sample_count.map(|n| f64::from(n.count())),
        }
    }

    /// 값을 검증한 뒤 저장한다. 검증에 실패하면 기존 값은 그대로 남는다.
    pub fn set(&mut self, field: ConfigField, value: f64) -> Result<(), MeasurementError> {
        let value = field.validate(value)?;
        match field {
            ConfigField::Temperature => self.temperature_c = Some(value),
            ConfigField::AmbientPressure => self.ambient_pressure_hpa = Some(value),
            ConfigField::StaticPressure => self.static_pressure_pa = Some(value),
            ConfigField::PrandtlCoefficient => self.prandtl_coefficient = Some(value),
            ConfigField::DuctDiameter => self.duct_diameter_mm = Some(value),
            ConfigField::SampleCount => self.sample_count = Some(sample_count_from_f64(value)?),
        }
        Ok(())
    }

    pub fn clear(&mut self, field: ConfigField) {
        match field {
            ConfigField::Temperature => self.temperature_c = None,
            ConfigField::AmbientPressure => self.ambient_pressure_hpa = None,
            ConfigField::StaticPressure => self.static_pressure_pa = None,
            ConfigField::PrandtlCoefficient => self.prandtl_coefficient = None,
            ConfigField::DuctDiameter => self.duct_diameter_mm = None,
            ConfigField::SampleCount => self.sample_count = None,
        }
    }

    pub fn missing_fields(&self) -> Vec<ConfigField> {
        ConfigField::ALL
            .into_iter()
            .filter(|&field| self.get(field).is_none())
            .collect()
    }

    /// 여섯 항목이 모두 입력되었는지 여부. 계산 시작 조건이다.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// 모든 항목을 다시 검증해 계산용 불변 입력값을 만든다.
    pub fn snapshot(&self) -> Result<MeasurementInputs, MeasurementError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(MeasurementError::Incomplete(missing));
        }
        let require = |field: ConfigField| -> Result<f64, MeasurementError> {
            let value = self
                .get(field)
                .ok_or_else(|| MeasurementError::Incomplete(vec![field]))?;
            field.validate(value)
        };
        let sample_count = self
            .sample_count
            .ok_or_else(|| MeasurementError::Incomplete(vec![ConfigField::SampleCount]))?;
        Ok(MeasurementInputs {
            temperature_c: require(ConfigField::Temperature)?,
            ambient_pressure_hpa: require(ConfigField::AmbientPressure)?,
            static_pressure_pa: require(ConfigField::StaticPressure)?,
            prandtl_coefficient: require(ConfigField::PrandtlCoefficient)?,
            duct_diameter_mm: require(ConfigField::DuctDiameter)?,
            sample_count,
        })
    }
}

/// 검증이 끝난 한 번의 계산용 입력값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementInputs {
    pub temperature_c: f64,
    pub ambient_pressure_hpa: f64,
    pub static_pressure_pa: f64,
    pub prandtl_coefficient: f64,
    pub duct_diameter_mm: f64,
    pub sample_count: SampleCount,
}

impl MeasurementInputs {
    pub fn coefficients(&self) -> &'static [f64] {
        self.sample_count.coefficients()
    }

    /// 벽면 기준 측정 깊이[mm] (오름차순)
    pub fn measurement_points(&self) -> Result<Vec<f64>, FlowError> {
        compute_measurement_points(self.coefficients(), self.duct_diameter_mm)
    }

    pub fn absolute_pressure_pa(&self) -> f64 {
        compute_absolute_pressure(self.ambient_pressure_hpa, self.static_pressure_pa)
    }

    /// 대기압과 정압의 조합이 양의 절대압을 주는지 확인한다. 측정값 입력 전에 호출한다.
    pub fn checked_absolute_pressure(&self) -> Result<f64, FlowError> {
        let absolute_pressure = self.absolute_pressure_pa();
        flow::check_absolute_pressure(absolute_pressure)?;
        Ok(absolute_pressure)
    }
}

/// 측정 축 개수 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisCount {
    One,
    Two,
}

impl AxisCount {
    pub fn from_menu_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(AxisCount::One),
            2 => Some(AxisCount::Two),
            _ => None,
        }
    }

    pub fn count(self) -> usize {
        match self {
            AxisCount::One => 1,
            AxisCount::Two => 2,
        }
    }
}

/// 축별 차압 측정값[Pa]. 각 축은 측정점 순서를 따른다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureReadings {
    axes: Vec<Vec<i32>>,
}

impl PressureReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 축의 측정값을 추가한다. 개수는 측정점 개수와 같아야 한다.
    pub fn push_axis(
        &mut self,
        readings: Vec<i32>,
        expected_points: usize,
    ) -> Result<(), MeasurementError> {
        if self.axes.len() >= AxisCount::Two.count() {
            return Err(MeasurementError::TooManyAxes);
        }
        if readings.len() != expected_points {
            return Err(MeasurementError::AxisLength {
                axis: self.axes.len() + 1,
                expected: expected_points,
                actual: readings.len(),
            });
        }
        self.axes.push(readings);
        Ok(())
    }

    pub fn axes(&self) -> &[Vec<i32>] {
        &self.axes
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// 1축 전체 다음 2축 전체 순서로 이어붙인 측정값. 이후 축 구분은 사용하지 않는다.
    pub fn concatenated(&self) -> Vec<i32> {
        self.axes.iter().flatten().copied().collect()
    }

    /// 파일 등 외부에서 읽은 측정값을 측정점 개수에 맞는지 확인한다.
    pub fn validate(&self, expected_points: usize) -> Result<(), MeasurementError> {
        if self.axes.is_empty() {
            return Err(FlowError::NoReadings.into());
        }
        if self.axes.len() > AxisCount::Two.count() {
            return Err(MeasurementError::TooManyAxes);
        }
        for (idx, axis) in self.axes.iter().enumerate() {
            if axis.len() != expected_points {
                return Err(MeasurementError::AxisLength {
                    axis: idx + 1,
                    expected: expected_points,
                    actual: axis.len(),
                });
            }
        }
        Ok(())
    }
}

/// 한 번의 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    /// 절대압 [Pa]
    pub absolute_pressure_pa: f64,
    /// 가스 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 평균 유속 [m/s]
    pub mean_velocity_m_per_s: f64,
    /// 체적 유량 [m3/s]
    pub volume_flow_m3_per_s: f64,
    /// 질량 유량 [kg/s], 소수점 셋째 자리 반올림
    pub mass_flow_kg_per_s: f64,
    /// 측정값별 국부 유속 [m/s] (이어붙인 측정값 순서)
    pub point_velocities_m_per_s: Vec<f64>,
}

impl FlowResult {
    /// 선택한 표시 단위로 환산한 결과값.
    pub fn value_in(&self, unit: ResultUnit) -> f64 {
        let per_second = match unit.quantity() {
            FlowQuantity::Volume => self.volume_flow_m3_per_s,
            FlowQuantity::Mass => self.mass_flow_kg_per_s,
        };
        convert_flow(per_second, unit.time_unit())
    }
}

/// 입력값과 측정값으로 절대압 → 유속 → 체적 유량 → 밀도 → 질량 유량 순서로 계산한다.
pub fn calculate(
    inputs: &MeasurementInputs,
    readings: &PressureReadings,
) -> Result<FlowResult, MeasurementError> {
    let points = inputs.measurement_points()?;
    let absolute_pressure = inputs.checked_absolute_pressure()?;
    readings.validate(points.len())?;
    let pressures = readings.concatenated();

    log::debug!("absolute pressure {absolute_pressure} Pa");
    let velocities = flow::point_velocities(
        inputs.temperature_c,
        absolute_pressure,
        inputs.prandtl_coefficient,
        &pressures,
    )?;
    let mean_velocity = flow::average_velocity(&velocities)?;
    let volume_flow = compute_volume_flow(mean_velocity, inputs.duct_diameter_mm);
    let density = compute_density(inputs.temperature_c, absolute_pressure)?;
    let mass_flow = compute_mass_flow(volume_flow, density);
    log::debug!(
        "{} readings, mean velocity {mean_velocity} m/s, volume flow {volume_flow} m3/s",
        pressures.len()
    );
    log::debug!("density {density} kg/m3, mass flow {mass_flow} kg/s");

    Ok(FlowResult {
        absolute_pressure_pa: absolute_pressure,
        density_kg_per_m3: density,
        mean_velocity_m_per_s: mean_velocity,
        volume_flow_m3_per_s: volume_flow,
        mass_flow_kg_per_s: mass_flow,
        point_velocities_m_per_s: velocities,
    })
}
