//! Log-Chebyshev 측정점 배치와 덕트 유량 계산 핵심 로직.
//!
//! 모든 함수는 상태가 없는 순수 계산이다. 입력이 물리적으로 불가능한 영역에 있으면
//! 값을 보정하지 않고 즉시 [`FlowError`]를 돌려준다.

pub mod coefficients;
pub mod flow_rate;
pub mod gas;
pub mod points;
pub mod rounding;
pub mod velocity;

use thiserror::Error;

pub use coefficients::{lookup_coefficients, SampleCount};
pub use flow_rate::{compute_mass_flow, compute_volume_flow};
pub use gas::{compute_absolute_pressure, compute_density, ABSOLUTE_ZERO_C};
pub use points::compute_measurement_points;
pub use rounding::round_to;
pub use velocity::{average_velocity, compute_mean_velocity, point_velocities, point_velocity};

/// 유량 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// 반경당 측정 횟수가 3~5가 아님
    #[error("반경당 측정 횟수는 3, 4, 5 중 하나여야 합니다 (입력값: {0})")]
    InvalidSampleCount(u32),
    /// 절대영도 이하의 온도
    #[error("온도는 -273.15 °C 보다 높아야 합니다 (입력값: {0} °C)")]
    InvalidTemperature(f64),
    /// 0 이하의 덕트 직경
    #[error("덕트 직경은 0보다 커야 합니다 (입력값: {0} mm)")]
    InvalidDiameter(f64),
    /// 0 이하의 절대압
    #[error("절대압은 0보다 커야 합니다 (계산값: {0} Pa)")]
    InvalidPressure(f64),
    /// 차압 측정값이 하나도 없음
    #[error("차압 측정값이 없습니다")]
    NoReadings,
}

/// `-273.15 °C` 초과인지 확인한다. NaN 역시 거부한다.
pub(crate) fn check_temperature(temperature_c: f64) -> Result<(), FlowError> {
    if temperature_c.is_nan() || temperature_c <= ABSOLUTE_ZERO_C {
        return Err(FlowError::InvalidTemperature(temperature_c));
    }
    Ok(())
}

pub(crate) fn check_absolute_pressure(absolute_pressure_pa: f64) -> Result<(), FlowError> {
    if absolute_pressure_pa.is_nan() || absolute_pressure_pa <= 0.0 {
        return Err(FlowError::InvalidPressure(absolute_pressure_pa));
    }
    Ok(())
}
