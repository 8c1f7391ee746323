//! 디버그 구문 검사
//!
//! 언어별 디버그 구문(console.log, binding.pry, dd(), breakpoint() 등)이
//! 프로덕션 코드에 남아 있는지 라인 단위로 탐지합니다.
//! 주석 라인은 제외하며, 테스트/설정 파일과 빌드 산출물은 건너뜁니다.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use crate::walk;

/// 디버그 구문 패턴 하나
struct DebugPattern {
    regex: Regex,
    description: &'static str,
    /// 적용 대상 파일 접미사 (소문자)
    extensions: &'static [&'static str],
}

const JS_EXTS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".vue", ".svelte"];
const RUBY_EXTS: &[&str] = &[".rb", ".erb", ".rake"];
const PHP_EXTS: &[&str] = &[".php", ".blade.php"];
const PYTHON_EXTS: &[&str] = &[".py"];
const TWIG_EXTS: &[&str] = &[".twig", ".html.twig"];

static DEBUG_PATTERNS: LazyLock<Vec<DebugPattern>> = LazyLock::new(|| {
    let pattern = |source: &str, description: &'static str, extensions: &'static [&'static str]| {
        DebugPattern {
            regex: Regex::new(source).expect("static debug pattern must compile"),
            description,
            extensions,
        }
    };
    vec![
        // JavaScript/TypeScript
        pattern(
            r"\bconsole\.(log|debug|info|trace|dir|table)\s*\(",
            "console.log",
            JS_EXTS,
        ),
        pattern(r"\bdebugger\b", "debugger", JS_EXTS),
        // Ruby
        pattern(r"\bbinding\.pry\b", "binding.pry", RUBY_EXTS),
        pattern(r"\bbyebug\b", "byebug", RUBY_EXTS),
        pattern(r"\bbinding\.irb\b", "binding.irb", RUBY_EXTS),
        pattern(r"\bdebugger\b", "debugger", RUBY_EXTS),
        pattern(r"\bpp\s+", "pp (pretty print)", RUBY_EXTS),
        // PHP
        pattern(r"\bdd\s*\(", "dd()", PHP_EXTS),
        pattern(r"\bdump\s*\(", "dump()", PHP_EXTS),
        pattern(r"\bvar_dump\s*\(", "var_dump()", PHP_EXTS),
        pattern(r"\bprint_r\s*\(", "print_r()", PHP_EXTS),
        pattern(r"\bdie\s*\(", "die()", PHP_EXTS),
        pattern(r"\bexit\s*\(", "exit()", PHP_EXTS),
        pattern(r"\bray\s*\(", "ray() - Spatie Ray debugger", PHP_EXTS),
        // Python
        pattern(r"\bbreakpoint\s*\(\s*\)", "breakpoint()", PYTHON_EXTS),
        pattern(r"\bpdb\.set_trace\s*\(", "pdb.set_trace()", PYTHON_EXTS),
        pattern(r"\bipdb\.set_trace\s*\(", "ipdb.set_trace()", PYTHON_EXTS),
        pattern(r"\bimport\s+pdb\b", "import pdb", PYTHON_EXTS),
        pattern(r"\bimport\s+ipdb\b", "import ipdb", PYTHON_EXTS),
        // Go
        pattern(
            r#"\bfmt\.Print(ln|f)?\s*\([^)]*"DEBUG"#,
            "fmt.Print with DEBUG",
            &[".go"],
        ),
        pattern(r"\bspew\.Dump\s*\(", "spew.Dump()", &[".go"]),
        // Rust
        pattern(r"\bdbg!\s*\(", "dbg!()", &[".rs"]),
        pattern(r"\btodo!\s*\(", "todo!()", &[".rs"]),
        pattern(r"\bunimplemented!\s*\(", "unimplemented!()", &[".rs"]),
        // Java/Kotlin
        pattern(
            r"\bSystem\.out\.print(ln)?\s*\(",
            "System.out.println()",
            &[".java", ".kt"],
        ),
        // Elixir
        pattern(r"\bIO\.inspect\s*\(", "IO.inspect()", &[".ex", ".exs"]),
        pattern(r"\bIEx\.pry\b", "IEx.pry", &[".ex", ".exs"]),
        // Twig (Craft CMS, Symfony)
        pattern(r"\{\{\s*dump\s*\(", "{{ dump() }}", TWIG_EXTS),
        pattern(r"\{%\s*dump\s*", "{% dump %}", TWIG_EXTS),
    ]
});

/// 파일명에 포함되면 건너뛰는 패턴 (테스트, 번들, 설정 파일)
const SKIP_FILE_SUBSTRINGS: &[&str] = &[
    ".min.js",
    ".bundle.js",
    ".config.js",
    ".config.ts",
    "webpack.config",
    "vite.config",
    "jest.config",
    "vitest.config",
    "tailwind.config",
    "postcss.config",
    "eslint",
    "prettier",
    ".test.",
    ".spec.",
    "_test.go",
    "_test.rb",
    "test_",
];

/// 주석 라인 접두사 (단순 검사)
const COMMENT_PREFIXES: &[&str] = &["//", "#", "*", "/*", "{#", "<!--"];

/// 파일 크기 상한 (바이트)
const MAX_FILE_SIZE: u64 = 500 * 1024;

/// 리포트에 표시할 최대 발견 수
const MAX_DISPLAY_FINDINGS: usize = 5;

/// 디버그 구문 검사
pub struct DebugStatementsCheck;

#[async_trait]
impl Check for DebugStatementsCheck {
    fn id(&self) -> &'static str {
        "debug_statements"
    }

    fn title(&self) -> &'static str {
        "Debug statements"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let findings = scan_for_debug_statements(ctx);

        if findings.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "No debug statements found",
            ));
        }

        let mut suggestions: Vec<String> = findings
            .iter()
            .take(MAX_DISPLAY_FINDINGS)
            .cloned()
            .collect();
        if findings.len() > MAX_DISPLAY_FINDINGS {
            suggestions.push(format!(
                "... and {} more",
                findings.len() - MAX_DISPLAY_FINDINGS
            ));
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            format!("Found {} debug statement(s)", findings.len()),
        )
        .with_suggestions(suggestions))
    }
}

/// 프로젝트 트리에서 디버그 구문을 스캔합니다.
fn scan_for_debug_statements(ctx: &Context) -> Vec<String> {
    let mut findings = Vec::new();

    for path in walk::walk_files(&ctx.root_dir, walk::SKIP_DIRS_DEBUG, MAX_FILE_SIZE) {
        let name_lower = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if SKIP_FILE_SUBSTRINGS
            .iter()
            .any(|skip| name_lower.contains(skip))
        {
            continue;
        }

        let applicable: Vec<&DebugPattern> = DEBUG_PATTERNS
            .iter()
            .filter(|p| p.extensions.iter().any(|ext| name_lower.ends_with(ext)))
            .collect();
        if applicable.is_empty() {
            continue;
        }

        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };

        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if COMMENT_PREFIXES
                .iter()
                .any(|prefix| trimmed.starts_with(prefix))
            {
                continue;
            }

            for pattern in &applicable {
                if pattern.regex.is_match(line) {
                    findings.push(format!(
                        "{}:{} - {}",
                        walk::relative_display(&ctx.root_dir, &path),
                        line_idx + 1,
                        pattern.description
                    ));
                }
            }
        }
    }

    findings
}
