use super::{check_absolute_pressure, check_temperature, FlowError};

/// 절대영도 [°C]
pub const ABSOLUTE_ZERO_C: f64 = -273.15;
/// 0 °C의 켈빈 값
pub const ZERO_CELSIUS_K: f64 = 273.15;
/// 표준 상태(0 °C, 101325 Pa) 공기 밀도 [kg/m3]
pub const NORMAL_DENSITY_KG_PER_M3: f64 = 1.2928;
/// 표준 대기압 [Pa]
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

const PA_PER_HPA: f64 = 100.0;

/// 대기압[hPa]과 덕트 내 정압[Pa]을 더해 절대압[Pa]을 구한다.
pub fn compute_absolute_pressure(ambient_pressure_hpa: f64, static_pressure_pa: f64) -> f64 {
    (ambient_pressure_hpa * PA_PER_HPA) + static_pressure_pa
}

/// 표준 상태 밀도를 실제 압력/온도로 보정한 가스 밀도[kg/m3].
pub fn compute_density(temperature_c: f64, absolute_pressure_pa: f64) -> Result<f64, FlowError> {
    check_temperature(temperature_c)?;
    check_absolute_pressure(absolute_pressure_pa)?;
    Ok(NORMAL_DENSITY_KG_PER_M3
        * (absolute_pressure_pa / STANDARD_PRESSURE_PA)
        * (ZERO_CELSIUS_K / (ZERO_CELSIUS_K + temperature_c)))
}
