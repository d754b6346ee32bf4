use super::FlowError;

/// 덕트 벽면으로부터의 측정 깊이[mm]를 계산한다.
///
/// 계수마다 `반경 × 계수`를 정수 mm로 반올림(짝수 쪽 반올림)한 오프셋을 중심에서
/// 양쪽으로 적용해 두 점을 만든다. 결과는 오름차순이며 중복 점도 그대로 둔다.
pub fn compute_measurement_points(
    coefficients: &[f64],
    diameter_mm: f64,
) -> Result<Vec<f64>, FlowError> {
    if !diameter_mm.is_finite() || diameter_mm <= 0.0 {
        return Err(FlowError::InvalidDiameter(diameter_mm));
    }
    let radius = diameter_mm / 2.0;
    let mut points: Vec<f64> = coefficients
        .iter()
        .flat_map(|coef| {
            let offset = (radius * coef).round_ties_even();
            [radius + offset, radius - offset]
        })
        .collect();
    points.sort_by(|a, b| a.total_cmp(b));
    Ok(points)
}
