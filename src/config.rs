use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::units::ResultUnit;

/// 기본 설정 파일 경로(작업 디렉터리 기준)
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드 (auto/ko/en-us 등)
    pub language: String,
    /// 사용자 언어팩(TOML) 디렉터리
    pub language_pack_dir: Option<String>,
    /// 로그 레벨 (off/error/warn/info/debug/trace)
    pub log_level: String,
    /// GUI 결과 패널의 초기 단위
    pub default_result_unit: ResultUnit,
    /// 지정하면 새 측정의 프란틀관 계수를 이 값으로 채운다.
    pub default_prandtl_coefficient: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            log_level: "warn".to_string(),
            default_result_unit: ResultUnit::CubicMeterPerHour,
            default_prandtl_coefficient: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 기록한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("language = \"ko\"\n").expect("parse");
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.default_result_unit, ResultUnit::CubicMeterPerHour);
        assert!(cfg.default_prandtl_coefficient.is_none());
    }

    #[test]
    fn reads_result_unit_and_prandtl_default() {
        let src = "default_result_unit = \"KilogramPerHour\"\ndefault_prandtl_coefficient = 0.81\n";
        let cfg: Config = toml::from_str(src).expect("parse");
        assert_eq!(cfg.default_result_unit, ResultUnit::KilogramPerHour);
        assert_eq!(cfg.default_prandtl_coefficient, Some(0.81));
    }
}
