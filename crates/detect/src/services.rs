//! 서비스 분류 — 선언된 서드파티 통합 탐지
//!
//! 알려진 각 서비스에 대해 최대 세 가지 독립 출처에서 근거를 누적합니다:
//! 의존성 매니페스트 부분 문자열, 환경변수명 접두사 (라인 시작 매칭),
//! 마크업/템플릿 내 스크립트 정규식. 출처 간 우선순위는 없으며
//! 하나라도 매칭되면 선언으로 판정합니다 (논리 OR).
//!
//! 출력에는 알려진 서비스 키가 항상 전부 포함됩니다.
//! 근거가 없는 서비스는 `declared=false`이며 근거 목록이 비어 있습니다.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use preflight_core::types::ServiceDeclaration;

use crate::evidence::Evidence;

/// 분류 대상 서비스 목록
pub const KNOWN_SERVICES: &[&str] = &["plausible", "postmark", "sentry", "stripe"];

/// 서비스 하나의 탐지 규칙
struct ServiceRule {
    name: &'static str,
    /// 매니페스트 내용에 포함되어야 하는 부분 문자열
    manifest_needles: &'static [&'static str],
    /// 환경 파일 라인의 시작과 매칭되는 접두사 (전체 라인 일치가 아님)
    env_prefixes: &'static [&'static str],
    /// 마크업 내용에 대한 정규식 패턴
    markup_patterns: &'static [&'static str],
}

/// 서비스 탐지 규칙 테이블
const SERVICE_RULES: &[ServiceRule] = &[
    ServiceRule {
        name: "plausible",
        manifest_needles: &[],
        env_prefixes: &["PLAUSIBLE_", "NEXT_PUBLIC_PLAUSIBLE"],
        markup_patterns: &[r"plausible\.io/js/"],
    },
    ServiceRule {
        name: "postmark",
        manifest_needles: &["postmark"],
        env_prefixes: &["POSTMARK_"],
        markup_patterns: &[],
    },
    ServiceRule {
        name: "sentry",
        manifest_needles: &["sentry"],
        env_prefixes: &["SENTRY_"],
        markup_patterns: &[],
    },
    ServiceRule {
        name: "stripe",
        manifest_needles: &["stripe"],
        env_prefixes: &["STRIPE_"],
        markup_patterns: &[],
    },
];

/// 마크업 정규식은 한 번만 컴파일합니다.
static MARKUP_REGEXES: LazyLock<Vec<(&'static str, &'static str, Regex)>> = LazyLock::new(|| {
    SERVICE_RULES
        .iter()
        .flat_map(|rule| {
            rule.markup_patterns.iter().map(move |pattern| {
                let regex = Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid markup pattern '{pattern}': {e}"));
                (rule.name, *pattern, regex)
            })
        })
        .collect()
});

/// 증거로부터 서비스 선언을 분류합니다.
///
/// 개별 매니페스트나 환경 파일이 없어도 해당 출처만 건너뛰고
/// 나머지 출처로 계속 판정합니다.
pub fn detect_services(evidence: &Evidence) -> BTreeMap<String, ServiceDeclaration> {
    let mut services = BTreeMap::new();

    for rule in SERVICE_RULES {
        let mut declaration = ServiceDeclaration::undeclared();

        // 출처 1: 매니페스트 부분 문자열
        for (path, content) in evidence.manifests() {
            for needle in rule.manifest_needles {
                if content.contains(needle) {
                    declaration.add_evidence(path, *needle);
                }
            }
        }

        // 출처 2: 환경변수명 접두사 (라인 시작 매칭)
        for env_line in evidence.env_lines() {
            for prefix in rule.env_prefixes {
                if env_line.line.starts_with(prefix) {
                    declaration.add_evidence(env_line.file.clone(), *prefix);
                }
            }
        }

        services.insert(rule.name.to_owned(), declaration);
    }

    // 출처 3: 마크업 스크립트 정규식
    for (name, pattern, regex) in MARKUP_REGEXES.iter() {
        for (path, content) in evidence.markup() {
            if regex.is_match(content) {
                if let Some(declaration) = services.get_mut(*name) {
                    declaration.add_evidence(path, *pattern);
                }
            }
        }
    }

    for (name, declaration) in &services {
        if declaration.declared {
            debug!(
                service = name.as_str(),
                evidence = declaration.evidence.len(),
                "service declared"
            );
        }
    }

    services
}
