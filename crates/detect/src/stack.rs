//! 스택 분류 — 고정 순서 규칙 테이블
//!
//! 규칙 평가 순서는 계약의 일부입니다. 순서를 바꾸면 분류 결과가
//! 달라지므로 [`STACK_RULES`] 테이블 순서를 변경해서는 안 됩니다.

use preflight_core::types::Stack;

use crate::evidence::Evidence;

/// 스택 분류 규칙 하나
///
/// `all_of`의 모든 마커가 존재하고, `any_of`가 비어 있지 않다면
/// 그중 하나 이상이 존재해야 매칭됩니다.
struct StackRule {
    stack: Stack,
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
}

/// 스택 분류 규칙 테이블 (평가 순서 고정, 첫 매칭 우선)
///
/// Rails 규칙이 마커 두 개를 요구하는 것은 Gemfile 하나만으로
/// 오분류되는 것을 막기 위함입니다 (Laravel의 composer.json도 동일).
const STACK_RULES: &[StackRule] = &[
    StackRule {
        stack: Stack::Rails,
        all_of: &["Gemfile", "config/routes.rb"],
        any_of: &[],
    },
    StackRule {
        stack: Stack::Next,
        all_of: &[],
        any_of: &["next.config.js", "next.config.mjs", "next.config.ts"],
    },
    StackRule {
        stack: Stack::Laravel,
        all_of: &["artisan", "composer.json"],
        any_of: &[],
    },
    StackRule {
        stack: Stack::Node,
        all_of: &["package.json"],
        any_of: &[],
    },
    StackRule {
        stack: Stack::Static,
        all_of: &["index.html"],
        any_of: &[],
    },
];

/// 증거로부터 프로젝트 스택을 추론합니다.
///
/// 어떤 규칙에도 매칭되지 않으면 [`Stack::Unknown`]을 반환합니다.
/// 동일한 증거에 대해 항상 동일한 결과를 냅니다.
pub fn detect_stack(evidence: &Evidence) -> Stack {
    for rule in STACK_RULES {
        let all_present = rule.all_of.iter().all(|m| evidence.has_marker(m));
        let any_present =
            rule.any_of.is_empty() || rule.any_of.iter().any(|m| evidence.has_marker(m));
        if all_present && any_present {
            return rule.stack;
        }
    }
    Stack::Unknown
}
