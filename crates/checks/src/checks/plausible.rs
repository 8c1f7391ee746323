//! Plausible Analytics 검사
//!
//! Plausible이 선언된 프로젝트에서 추적 스크립트가 실제로 템플릿에
//! 포함되어 있는지 확인합니다.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::{CheckResult, Stack};

use crate::walk;

/// 스크립트 탐지 패턴
static SCRIPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"plausible\.io/js/",
        r"data-domain=",
        r"plausible-analytics",
        r"@plausible/tracker",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static plausible pattern must compile"))
    .collect()
});

/// 스택별 레이아웃 파일 위치
fn layout_files(stack: Stack) -> &'static [&'static str] {
    match stack {
        Stack::Rails => &[
            "app/views/layouts/application.html.erb",
            "app/views/layouts/application.html.haml",
        ],
        Stack::Next => &[
            "app/layout.tsx",
            "app/layout.js",
            "pages/_app.tsx",
            "pages/_app.js",
            "pages/_document.tsx",
            "pages/_document.js",
        ],
        Stack::Node => &[
            "views/layout.ejs",
            "views/layout.pug",
            "views/layout.hbs",
            "views/layouts/main.handlebars",
        ],
        Stack::Laravel => &[
            "resources/views/layouts/app.blade.php",
            "resources/views/app.blade.php",
        ],
        Stack::Static => &["index.html"],
        Stack::Unknown => &[],
    }
}

/// 레이아웃 외 공통 확인 위치
const COMMON_FILES: &[&str] = &["index.html", "public/index.html", "src/index.html"];

/// 대체 탐색 디렉토리 (React/Next 컴포넌트)
const FALLBACK_DIRS: &[&str] = &["src", "app", "components"];

/// 대체 탐색 확장자
const FALLBACK_EXTENSIONS: &[&str] = &["tsx", "jsx", "js", "ts"];

/// 파일 크기 상한 (바이트)
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Plausible Analytics 검사
pub struct PlausibleCheck;

#[async_trait]
impl Check for PlausibleCheck {
    fn id(&self) -> &'static str {
        "plausible"
    }

    fn title(&self) -> &'static str {
        "Plausible Analytics"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        if !ctx.service_declared("plausible") {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Plausible not declared, skipping",
            ));
        }

        let mut files_to_check: Vec<&str> = layout_files(ctx.stack).to_vec();
        files_to_check.extend_from_slice(COMMON_FILES);

        for file in files_to_check {
            let Ok(content) = std::fs::read_to_string(ctx.root_dir.join(file)) else {
                continue;
            };
            if SCRIPT_PATTERNS.iter().any(|p| p.is_match(&content)) {
                return Ok(CheckResult::pass(
                    self.id(),
                    self.title(),
                    "Plausible analytics script found",
                ));
            }
        }

        // 레이아웃에 없으면 컴포넌트 트리를 탐색 (React/Next 앱)
        for dir in FALLBACK_DIRS {
            let dir_path = ctx.root_dir.join(dir);
            if !dir_path.is_dir() {
                continue;
            }
            for path in walk::walk_files(&dir_path, &["node_modules"], MAX_FILE_SIZE) {
                let has_ext = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| FALLBACK_EXTENSIONS.contains(&ext));
                if !has_ext {
                    continue;
                }
                let Ok(content) = std::fs::read_to_string(&path) else {
                    continue;
                };
                if SCRIPT_PATTERNS.iter().any(|p| p.is_match(&content)) {
                    return Ok(CheckResult::pass(
                        self.id(),
                        self.title(),
                        "Plausible analytics script found",
                    ));
                }
            }
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            "Plausible is declared but script not found in templates",
        )
        .with_suggestions([
            "Add the Plausible script tag to your main layout",
            r#"Example: <script defer data-domain="yourdomain.com" src="https://plausible.io/js/script.js"></script>"#,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::types::{ServiceDeclaration, Severity};
    use std::collections::BTreeMap;

    fn ctx(dir: &tempfile::TempDir, stack: Stack, declared: bool) -> Context {
        let mut services = BTreeMap::new();
        let mut decl = ServiceDeclaration::undeclared();
        if declared {
            decl.add_evidence(".env", "PLAUSIBLE_");
        }
        services.insert("plausible".to_owned(), decl);
        Context::builder(dir.path())
            .stack(stack)
            .services(services)
            .build()
    }

    #[tokio::test]
    async fn undeclared_service_skips() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlausibleCheck
            .run(&ctx(&dir, Stack::Static, false))
            .await
            .unwrap();
        assert!(result.passed);
        assert!(result.message.contains("not declared"));
    }

    #[tokio::test]
    async fn script_in_rails_layout_passes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/views/layouts")).unwrap();
        std::fs::write(
            dir.path().join("app/views/layouts/application.html.erb"),
            r#"<script defer data-domain="x.com" src="https://plausible.io/js/script.js"></script>"#,
        )
        .unwrap();

        let result = PlausibleCheck
            .run(&ctx(&dir, Stack::Rails, true))
            .await
            .unwrap();
        assert!(result.passed);
    }

    #[tokio::test]
    async fn script_in_component_tree_passes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("components")).unwrap();
        std::fs::write(
            dir.path().join("components/Analytics.tsx"),
            r#"import Plausible from "@plausible/tracker";"#,
        )
        .unwrap();

        let result = PlausibleCheck
            .run(&ctx(&dir, Stack::Next, true))
            .await
            .unwrap();
        assert!(result.passed);
    }

    #[tokio::test]
    async fn declared_without_script_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let result = PlausibleCheck
            .run(&ctx(&dir, Stack::Static, true))
            .await
            .unwrap();
        assert_eq!(result.severity, Severity::Warn);
        assert!(!result.suggestions.is_empty());
    }
}
