use std::f64::consts::PI;

use super::rounding::round_to;

const MM_PER_M: f64 = 1000.0;

/// 단면적 × 평균 유속으로 체적 유량[m3/s]을 구한다.
pub fn compute_volume_flow(mean_velocity_m_per_s: f64, diameter_mm: f64) -> f64 {
    let diameter_m = diameter_mm / MM_PER_M;
    ((PI * diameter_m.powi(2)) / 4.0) * mean_velocity_m_per_s
}

/// 질량 유량[kg/s]. 소수점 셋째 자리로 반올림된 값이 기본 결과가 된다.
pub fn compute_mass_flow(volume_flow_m3_per_s: f64, density_kg_per_m3: f64) -> f64 {
    round_to(volume_flow_m3_per_s * density_kg_per_m3, 3)
}
