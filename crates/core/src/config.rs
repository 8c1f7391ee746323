//! 설정 관리 — preflight.yml 파싱 및 런타임 설정
//!
//! [`PreflightConfig`]는 스캔 한 번에 필요한 모든 사용자 설정을 담는
//! 최상위 구조체입니다. 모든 필드는 선택 사항이며, 설정 파일이 없으면
//! 기본값으로 동작합니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PREFLIGHT_URLS_PRODUCTION=https://example.com` 형식)
//! 3. 설정 파일 (`preflight.yml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), preflight_core::error::PreflightError> {
//! use preflight_core::config::PreflightConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PreflightConfig::load("preflight.yml").await?;
//!
//! // YAML 문자열에서 직접 파싱
//! let config = PreflightConfig::parse("urls:\n  production: https://example.com")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, PreflightError};

/// 검사별 타임아웃 기본값 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 검사별 타임아웃 상한 (초)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Preflight 통합 설정
///
/// `preflight.yml` 파일의 최상위 구조를 나타냅니다.
/// 검사들은 이 설정을 읽기 전용으로만 소비합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreflightConfig {
    /// 스테이징/프로덕션 URL
    pub urls: UrlsConfig,
    /// 검사별 옵션
    pub checks: ChecksConfig,
    /// 서비스 선언 오버라이드 (서비스명 -> 선언 여부 강제)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, bool>,
    /// 무시할 검사 ID 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    /// 검사별 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PreflightConfig {
    /// YAML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PreflightError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// YAML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PreflightError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PreflightError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PreflightError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본 설정으로 대체하여 로드합니다.
    ///
    /// 스캔 명령의 진입점입니다. 설정 파일 부재는 에러가 아니며,
    /// 파싱 실패나 유효하지 않은 값은 그대로 에러로 전파됩니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PreflightError> {
        let path = path.as_ref();
        match Self::from_file(path).await {
            Ok(mut config) => {
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(PreflightError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// YAML 문자열에서 설정을 파싱합니다.
    pub fn parse(yaml_str: &str) -> Result<Self, PreflightError> {
        serde_yaml::from_str(yaml_str).map_err(|e| {
            PreflightError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PREFLIGHT_{SECTION}_{FIELD}`
    /// 예: `PREFLIGHT_URLS_PRODUCTION=https://example.com`
    pub fn apply_env_overrides(&mut self) {
        override_opt_string(&mut self.urls.staging, "PREFLIGHT_URLS_STAGING");
        override_opt_string(&mut self.urls.production, "PREFLIGHT_URLS_PRODUCTION");
        override_opt_u64(&mut self.timeout_secs, "PREFLIGHT_TIMEOUT_SECS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PreflightError> {
        if let Some(secs) = self.timeout_secs {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    field: "timeoutSecs".to_owned(),
                    reason: format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
                }
                .into());
            }
        }

        for id in &self.ignore {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "ignore".to_owned(),
                    reason: "check id must not be empty".to_owned(),
                }
                .into());
            }
        }

        for name in self.services.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "services".to_owned(),
                    reason: "service name must not be empty".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// 유효한 타임아웃 값을 반환합니다 (미설정 시 기본값).
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// 설정을 YAML 문자열로 직렬화합니다.
    pub fn to_yaml(&self) -> Result<String, PreflightError> {
        serde_yaml::to_string(self).map_err(|e| {
            PreflightError::Config(ConfigError::SerializeFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 설정을 파일에 저장합니다.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), PreflightError> {
        let yaml = self.to_yaml()?;
        tokio::fs::write(path.as_ref(), yaml).await?;
        Ok(())
    }

    /// 무시 목록에 검사 ID를 추가합니다.
    ///
    /// 이미 존재하면 `false`를 반환하고 목록을 변경하지 않습니다.
    pub fn add_ignore(&mut self, check_id: &str) -> bool {
        if self.ignore.iter().any(|id| id == check_id) {
            return false;
        }
        self.ignore.push(check_id.to_owned());
        true
    }

    /// 무시 목록에서 검사 ID를 제거합니다.
    ///
    /// 존재하지 않으면 `false`를 반환합니다.
    pub fn remove_ignore(&mut self, check_id: &str) -> bool {
        let before = self.ignore.len();
        self.ignore.retain(|id| id != check_id);
        self.ignore.len() != before
    }

    /// 검사 ID가 무시 목록에 있는지 확인합니다 (정확히 일치해야 함).
    pub fn is_ignored(&self, check_id: &str) -> bool {
        self.ignore.iter().any(|id| id == check_id)
    }
}

/// 스테이징/프로덕션 URL 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlsConfig {
    /// 스테이징 base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<String>,
    /// 프로덕션 base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
}

/// 검사별 옵션
///
/// 각 옵션 블록은 해당 검사만 읽습니다. 블록이 없으면 검사는
/// 문서화된 기본 동작으로 대체합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecksConfig {
    /// SEO 메타데이터 검사 옵션
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_meta: Option<SeoMetaOptions>,
    /// 헬스 엔드포인트 검사 옵션
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_endpoint: Option<HealthEndpointOptions>,
    /// Stripe 웹훅 검사 옵션
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_webhook: Option<StripeWebhookOptions>,
}

/// SEO 메타데이터 검사 옵션
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMetaOptions {
    /// 메인 레이아웃 파일 경로 (루트 기준 상대 경로)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_layout: Option<String>,
}

/// 헬스 엔드포인트 검사 옵션
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthEndpointOptions {
    /// 프로브할 경로 (예: `/healthz`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Stripe 웹훅 검사 옵션
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeWebhookOptions {
    /// 웹훅 엔드포인트 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if !val.is_empty() {
            *target = Some(val);
        }
    }
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => tracing::warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
