use super::{check_absolute_pressure, check_temperature, FlowError};

// 프란틀관 동압-속도 환산식의 온도 항 계수
const TEMPERATURE_SLOPE: f64 = 573.87;
const TEMPERATURE_OFFSET: f64 = 156_752.77;

/// 한 측정점의 국부 유속[m/s].
///
/// 차압의 부호는 버리고 절댓값으로 계산한다(역류성 음수 측정값 허용).
pub fn point_velocity(
    temperature_c: f64,
    absolute_pressure_pa: f64,
    prandtl_coefficient: f64,
    reading_pa: i32,
) -> Result<f64, FlowError> {
    check_temperature(temperature_c)?;
    check_absolute_pressure(absolute_pressure_pa)?;
    Ok(prandtl_coefficient
        * ((TEMPERATURE_SLOPE * temperature_c + TEMPERATURE_OFFSET) / absolute_pressure_pa).sqrt()
        * f64::from(reading_pa).abs().sqrt())
}

/// 모든 측정값(축 구분 없이 이어붙인 순서)의 국부 유속.
pub fn point_velocities(
    temperature_c: f64,
    absolute_pressure_pa: f64,
    prandtl_coefficient: f64,
    readings_pa: &[i32],
) -> Result<Vec<f64>, FlowError> {
    readings_pa
        .iter()
        .map(|&p| {
            point_velocity(
                temperature_c,
                absolute_pressure_pa,
                prandtl_coefficient,
                p,
            )
        })
        .collect()
}

/// 국부 유속의 산술 평균.
pub fn average_velocity(velocities: &[f64]) -> Result<f64, FlowError> {
    if velocities.is_empty() {
        return Err(FlowError::NoReadings);
    }
    let sum: f64 = velocities.iter().sum();
    Ok(sum / velocities.len() as f64)
}

/// 측정값 전체에 대한 평균 유속[m/s]. 축 평균이 아니라 측정값 하나하나의 평균이다.
pub fn compute_mean_velocity(
    temperature_c: f64,
    absolute_pressure_pa: f64,
    prandtl_coefficient: f64,
    readings_pa: &[i32],
) -> Result<f64, FlowError> {
    check_temperature(temperature_c)?;
    check_absolute_pressure(absolute_pressure_pa)?;
    let velocities = point_velocities(
        temperature_c,
        absolute_pressure_pa,
        prandtl_coefficient,
        readings_pa,
    )?;
    average_velocity(&velocities)
}
