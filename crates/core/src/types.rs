//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 분류기와 검사, 러너가 주고받는 데이터 구조를 정의합니다.
//! 검사 결과는 생성 후 불변이며, 리포트는 레지스트리 순서를 그대로 보존합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 심각도 레벨
///
/// 검사 결과의 분류와 종료 코드 산출에만 사용됩니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Info < Warn < Error`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 정보성 결과
    #[default]
    Info,
    /// 경고 — 실행 자체는 통과
    Warn,
    /// 오류 — 리포트 전체를 실패로 만듦
    Error,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "informational" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::Warn => write!(f, "Warn"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// 추론된 프로젝트 스택
///
/// 분류기는 한 번의 실행에서 정확히 하나의 레이블만 산출합니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    /// Ruby on Rails
    Rails,
    /// Next.js
    Next,
    /// Laravel
    Laravel,
    /// 일반 Node.js
    Node,
    /// 정적 사이트
    Static,
    /// 어떤 규칙에도 매칭되지 않음
    #[default]
    Unknown,
}

impl Stack {
    /// 문자열에서 스택 레이블을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rails" => Some(Self::Rails),
            "next" | "nextjs" => Some(Self::Next),
            "laravel" => Some(Self::Laravel),
            "node" | "nodejs" => Some(Self::Node),
            "static" => Some(Self::Static),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rails => write!(f, "rails"),
            Self::Next => write!(f, "next"),
            Self::Laravel => write!(f, "laravel"),
            Self::Node => write!(f, "node"),
            Self::Static => write!(f, "static"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// 서비스 선언 근거 조각
///
/// 어떤 파일의 어떤 패턴이 매칭되어 선언으로 판정되었는지를 기록합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEvidence {
    /// 근거가 발견된 파일 (루트 기준 상대 경로)
    pub file: String,
    /// 매칭된 패턴
    pub pattern: String,
}

/// 서비스 선언 판정
///
/// `declared == false`이면 `evidence`는 항상 비어 있습니다.
/// 근거 없는 선언은 설정 오버라이드를 통해서만 가능하며,
/// 이 경우 오버라이드 출처가 근거로 기록됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDeclaration {
    /// 선언 여부
    pub declared: bool,
    /// 판정 근거 목록
    pub evidence: Vec<ServiceEvidence>,
}

impl ServiceDeclaration {
    /// 선언되지 않은 상태를 생성합니다.
    pub fn undeclared() -> Self {
        Self::default()
    }

    /// 근거를 추가하고 선언 상태로 전환합니다.
    pub fn add_evidence(&mut self, file: impl Into<String>, pattern: impl Into<String>) {
        self.declared = true;
        self.evidence.push(ServiceEvidence {
            file: file.into(),
            pattern: pattern.into(),
        });
    }

    /// 설정 오버라이드로 선언 여부를 강제합니다.
    ///
    /// `false`로 강제하면 기존 근거는 모두 제거됩니다.
    pub fn apply_override(&mut self, declared: bool, source: &str) {
        self.declared = declared;
        if declared {
            self.evidence.push(ServiceEvidence {
                file: source.to_owned(),
                pattern: "services override".to_owned(),
            });
        } else {
            self.evidence.clear();
        }
    }
}

/// 단일 검사의 결과
///
/// 검사가 한 번 산출한 결과는 이후 변경되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// 안정적인 기계 판독용 ID
    pub id: String,
    /// 사람이 읽는 제목
    pub title: String,
    /// 심각도
    pub severity: Severity,
    /// 통과 여부
    pub passed: bool,
    /// 결과 메시지
    pub message: String,
    /// 개선 제안 목록
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// 부가 정보 (verbose 출력용)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    /// 통과 결과를 생성합니다 (Info).
    pub fn pass(id: &str, title: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            severity: Severity::Info,
            passed: true,
            message: message.into(),
            suggestions: Vec::new(),
            details: Vec::new(),
        }
    }

    /// 경고 결과를 생성합니다 (Warn, 미통과).
    pub fn warn(id: &str, title: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            severity: Severity::Warn,
            passed: false,
            message: message.into(),
            suggestions: Vec::new(),
            details: Vec::new(),
        }
    }

    /// 오류 결과를 생성합니다 (Error, 미통과).
    pub fn error(id: &str, title: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            severity: Severity::Error,
            passed: false,
            message: message.into(),
            suggestions: Vec::new(),
            details: Vec::new(),
        }
    }

    /// 개선 제안을 덧붙입니다.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// 부가 정보를 덧붙입니다.
    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.id, self.message)
    }
}

/// 심각도별 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTally {
    /// 통과한 검사 수
    pub passed: usize,
    /// 경고 수
    pub warnings: usize,
    /// 오류 수
    pub errors: usize,
}

/// 스캔 리포트
///
/// 무시되지 않은 검사마다 결과 하나씩, 레지스트리 순서대로 담습니다.
/// 전체 판정은 Error 심각도 결과의 존재 여부로만 결정됩니다.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// 검사 결과 목록 (레지스트리 순서)
    pub results: Vec<CheckResult>,
}

impl Report {
    /// 결과 목록으로 리포트를 생성합니다.
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    /// Error 심각도 결과가 하나도 없으면 true를 반환합니다.
    ///
    /// Warn 결과만으로는 실패하지 않습니다.
    pub fn passed(&self) -> bool {
        !self
            .results
            .iter()
            .any(|r| r.severity == Severity::Error)
    }

    /// Error 심각도 결과 수를 반환합니다.
    pub fn error_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .count()
    }

    /// 심각도별 집계를 반환합니다.
    pub fn tally(&self) -> ReportTally {
        let mut tally = ReportTally::default();
        for result in &self.results {
            if result.passed {
                tally.passed += 1;
            } else if result.severity == Severity::Error {
                tally.errors += 1;
            } else {
                tally.warnings += 1;
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn severity_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Info.to_string(), "Info");
        assert_eq!(Severity::Warn.to_string(), "Warn");
        assert_eq!(Severity::Error.to_string(), "Error");
    }

    #[test]
    fn severity_from_str_loose() {
        assert_eq!(Severity::from_str_loose("info"), Some(Severity::Info));
        assert_eq!(Severity::from_str_loose("WARNING"), Some(Severity::Warn));
        assert_eq!(Severity::from_str_loose("Err"), Some(Severity::Error));
        assert_eq!(Severity::from_str_loose("fatal"), None);
    }

    #[test]
    fn severity_serialize_lowercase() {
        let json = serde_json::to_string(&Severity::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
    }

    #[test]
    fn stack_default_is_unknown() {
        assert_eq!(Stack::default(), Stack::Unknown);
    }

    #[test]
    fn stack_display_roundtrip() {
        for stack in [
            Stack::Rails,
            Stack::Next,
            Stack::Laravel,
            Stack::Node,
            Stack::Static,
            Stack::Unknown,
        ] {
            assert_eq!(Stack::from_str_loose(&stack.to_string()), Some(stack));
        }
    }

    #[test]
    fn service_declaration_default_is_undeclared() {
        let decl = ServiceDeclaration::undeclared();
        assert!(!decl.declared);
        assert!(decl.evidence.is_empty());
    }

    #[test]
    fn service_declaration_add_evidence_declares() {
        let mut decl = ServiceDeclaration::undeclared();
        decl.add_evidence("package.json", "stripe");
        assert!(decl.declared);
        assert_eq!(decl.evidence.len(), 1);
        assert_eq!(decl.evidence[0].file, "package.json");
    }

    #[test]
    fn service_declaration_override_false_clears_evidence() {
        let mut decl = ServiceDeclaration::undeclared();
        decl.add_evidence(".env", "STRIPE_");
        decl.apply_override(false, "preflight.yml");
        assert!(!decl.declared);
        assert!(decl.evidence.is_empty());
    }

    #[test]
    fn service_declaration_override_true_records_source() {
        let mut decl = ServiceDeclaration::undeclared();
        decl.apply_override(true, "preflight.yml");
        assert!(decl.declared);
        assert_eq!(decl.evidence[0].file, "preflight.yml");
    }

    #[test]
    fn check_result_pass_constructor() {
        let result = CheckResult::pass("favicon", "Favicon and app icons", "all present");
        assert!(result.passed);
        assert_eq!(result.severity, Severity::Info);
        assert_eq!(result.id, "favicon");
    }

    #[test]
    fn check_result_warn_constructor() {
        let result = CheckResult::warn("license", "LICENSE file", "not found")
            .with_suggestions(["Add a LICENSE file"]);
        assert!(!result.passed);
        assert_eq!(result.severity, Severity::Warn);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn check_result_error_constructor() {
        let result = CheckResult::error("secrets", "No secrets in tracked files", "found 2");
        assert_eq!(result.severity, Severity::Error);
        assert!(!result.passed);
    }

    #[test]
    fn check_result_display() {
        let result = CheckResult::warn("license", "LICENSE file", "not found");
        let display = result.to_string();
        assert!(display.contains("Warn"));
        assert!(display.contains("license"));
    }

    #[test]
    fn report_passes_without_errors() {
        let report = Report::new(vec![
            CheckResult::pass("a", "A", "ok"),
            CheckResult::warn("b", "B", "hmm"),
        ]);
        assert!(report.passed());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn report_fails_with_error() {
        let report = Report::new(vec![
            CheckResult::pass("a", "A", "ok"),
            CheckResult::error("b", "B", "bad"),
        ]);
        assert!(!report.passed());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn report_tally_counts() {
        let report = Report::new(vec![
            CheckResult::pass("a", "A", "ok"),
            CheckResult::pass("b", "B", "ok"),
            CheckResult::warn("c", "C", "hmm"),
            CheckResult::error("d", "D", "bad"),
        ]);
        let tally = report.tally();
        assert_eq!(tally.passed, 2);
        assert_eq!(tally.warnings, 1);
        assert_eq!(tally.errors, 1);
    }

    #[test]
    fn empty_report_passes() {
        assert!(Report::default().passed());
    }

    #[test]
    fn check_result_serialize_skips_empty_lists() {
        let result = CheckResult::pass("a", "A", "ok");
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("suggestions"));
        assert!(!json.contains("details"));
    }
}
