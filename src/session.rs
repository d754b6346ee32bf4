//! 한 번의 측정(설정 + 차압 측정값 + 결과)을 TOML 파일로 저장/로드한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::measurement::{
    calculate, FlowResult, MeasurementConfig, MeasurementError, PressureReadings,
};

/// 세션 파일 처리 오류.
#[derive(Debug, Error)]
pub enum SessionError {
    /// 파일 입출력 오류
    #[error("세션 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("세션 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("세션 파일 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 저장된 값으로 계산할 수 없음
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

/// 세션 파일 하나에 담기는 내용.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSession {
    pub config: MeasurementConfig,
    #[serde(default)]
    pub readings: PressureReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<FlowResult>,
}

impl MeasurementSession {
    pub fn new(config: MeasurementConfig, readings: PressureReadings) -> Self {
        Self {
            config,
            readings,
            result: None,
        }
    }

    /// 파일에 기록된 결과와 무관하게 설정과 측정값으로 다시 계산한다.
    pub fn recalculate(&mut self) -> Result<&FlowResult, MeasurementError> {
        let inputs = self.config.snapshot()?;
        let result = calculate(&inputs, &self.readings)?;
        Ok(self.result.insert(result))
    }
}

/// 세션 파일을 읽는다.
pub fn load(path: &Path) -> Result<MeasurementSession, SessionError> {
    let content = fs::read_to_string(path)?;
    let session: MeasurementSession = toml::from_str(&content)?;
    log::info!("loaded measurement session from {}", path.display());
    Ok(session)
}

/// 세션을 TOML로 기록한다.
pub fn save(path: &Path, session: &MeasurementSession) -> Result<(), SessionError> {
    let content = toml::to_string_pretty(session)?;
    fs::write(path, content)?;
    log::info!("saved measurement session to {}", path.display());
    Ok(())
}
