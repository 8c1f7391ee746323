//! 에러 타입 — 도메인별 에러 정의

/// Preflight 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 검사 실행 에러
    #[error("check error: {0}")]
    Check(#[from] CheckError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 설정 직렬화 실패
    #[error("failed to serialize config: {reason}")]
    SerializeFailed { reason: String },
}

/// 검사 실행 에러
///
/// 검사가 `CheckResult` 대신 반환하는 프레임워크 수준 실패입니다.
/// 러너는 이를 Warn 심각도 결과로 변환하여 격리하며,
/// 나머지 검사 실행을 중단하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// 검사 내부의 예기치 못한 실패
    #[error("internal check failure: {0}")]
    Internal(String),

    /// HTTP 요청 구성 실패 (전송 실패는 검사가 Warn 결과로 처리)
    #[error("http error: {0}")]
    Http(String),

    /// DNS 리졸버 구성 실패
    #[error("dns resolver error: {0}")]
    Dns(String),

    /// 파일 I/O 실패
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}
