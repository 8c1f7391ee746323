//! Sentry 초기화 검사
//!
//! Sentry가 선언된 프로젝트에서 실제 초기화 코드가 존재하는지 확인합니다.
//! 서비스 한정 검사이므로 선언되지 않았으면 통과로 단락합니다.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use crate::walk;

/// 초기화 코드 탐지 패턴 (언어별)
static INIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Sentry\.init",
        r"sentry\.init",
        r"@sentry/",
        r#"require\s*\(\s*['"]@sentry"#,
        r#"import.*from\s+['"]@sentry"#,
        r"Sentry::init",     // Ruby
        r"sentry_sdk\.init", // Python
        r"\bsentry-laravel\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static sentry pattern must compile"))
    .collect()
});

/// 탐색 대상 디렉토리
const SEARCH_DIRS: &[&str] = &["src", "app", "lib", "config", "config/initializers"];

/// 검사 대상 확장자
const EXTENSIONS: &[&str] = &["js", "ts", "tsx", "jsx", "rb", "py", "php"];

/// 파일 크기 상한 (바이트)
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Sentry 초기화 검사
pub struct SentryCheck;

#[async_trait]
impl Check for SentryCheck {
    fn id(&self) -> &'static str {
        "sentry"
    }

    fn title(&self) -> &'static str {
        "Sentry is initialized"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        if !ctx.service_declared("sentry") {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Sentry not declared, skipping",
            ));
        }

        for dir in SEARCH_DIRS {
            let dir_path = ctx.root_dir.join(dir);
            if !dir_path.is_dir() {
                continue;
            }

            for path in walk::walk_files(&dir_path, &["node_modules", "vendor"], MAX_FILE_SIZE) {
                let has_ext = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| EXTENSIONS.contains(&ext));
                if !has_ext {
                    continue;
                }

                let Ok(content) = std::fs::read_to_string(&path) else {
                    continue;
                };
                if INIT_PATTERNS.iter().any(|p| p.is_match(&content)) {
                    return Ok(CheckResult::pass(
                        self.id(),
                        self.title(),
                        "Sentry initialization found",
                    ));
                }
            }
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            "Sentry is declared but initialization not found",
        )
        .with_suggestions([
            "Add Sentry.init() to your application entry point",
            "Check Sentry documentation for your framework",
        ]))
    }
}
