/// 값을 소수점 `decimals` 자리로 반올림한다.
///
/// 이진 부동소수 값을 정확한 십진 전개로 보고 반올림하며, 정확히 절반인 경우는
/// 짝수 쪽을 택한다. 따라서 `2.675`(실제 값 2.67499…)는 `2.67`이 된다.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
