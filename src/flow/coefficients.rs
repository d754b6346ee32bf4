use serde::{Deserialize, Serialize};
use std::fmt;

use super::FlowError;

const COEFFICIENTS_3: [f64; 3] = [0.375, 0.925, 0.936];
const COEFFICIENTS_4: [f64; 4] = [0.331, 0.612, 0.800, 0.952];
const COEFFICIENTS_5: [f64; 5] = [0.287, 0.570, 0.689, 0.847, 0.962];

/// 덕트 반경당 측정 횟수(측정 정확도).
///
/// 직렬화 시에는 정수(3/4/5)로 기록한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SampleCount {
    Three,
    Four,
    Five,
}

impl SampleCount {
    pub const ALL: [SampleCount; 3] = [SampleCount::Three, SampleCount::Four, SampleCount::Five];

    pub fn count(self) -> u32 {
        match self {
            SampleCount::Three => 3,
            SampleCount::Four => 4,
            SampleCount::Five => 5,
        }
    }

    /// Log-Chebyshev 정확도 계수(반경 대비 위치 비율)를 반환한다.
    pub fn coefficients(self) -> &'static [f64] {
        match self {
            SampleCount::Three => &COEFFICIENTS_3,
            SampleCount::Four => &COEFFICIENTS_4,
            SampleCount::Five => &COEFFICIENTS_5,
        }
    }

    /// 한 축에서 측정해야 하는 점의 개수(반경 양쪽).
    pub fn points_per_axis(self) -> usize {
        self.coefficients().len() * 2
    }
}

impl TryFrom<u32> for SampleCount {
    type Error = FlowError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(SampleCount::Three),
            4 => Ok(SampleCount::Four),
            5 => Ok(SampleCount::Five),
            other => Err(FlowError::InvalidSampleCount(other)),
        }
    }
}

impl From<SampleCount> for u32 {
    fn from(value: SampleCount) -> Self {
        value.count()
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// 측정 횟수(3~5)에 해당하는 정확도 계수 표를 조회한다.
pub fn lookup_coefficients(sample_count: u32) -> Result<&'static [f64], FlowError> {
    SampleCount::try_from(sample_count).map(SampleCount::coefficients)
}
