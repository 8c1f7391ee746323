//! 에러 페이지 검사 (404, 500)
//!
//! 스택별 관례 경로와 정적 웹 루트, 모노레포 변형(Next.js)에서
//! 커스텀 에러 페이지를 찾습니다. 404가 더 중요하며, 404만 있고
//! 500이 없는 경우는 통과로 처리합니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::{CheckResult, Stack};

use preflight_detect::paths;

/// 에러 페이지를 찾아볼 정적 웹 루트
const STATIC_WEB_ROOTS: &[&str] = &[
    "public", "static", "web", "www", "dist", "build", "_site", "out", "",
];

/// 모노레포 앱 내부에서 에러 페이지를 찾아볼 디렉토리
const MONOREPO_PAGE_DIRS: &[&str] = &["pages", "src/pages", "app", "src/app"];

/// 에러 페이지 소스 확장자 (Next.js 계열)
const PAGE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".js", ".jsx"];

/// 에러 페이지 검사
pub struct ErrorPagesCheck;

#[async_trait]
impl Check for ErrorPagesCheck {
    fn id(&self) -> &'static str {
        "error_pages"
    }

    fn title(&self) -> &'static str {
        "Error pages (404, 500)"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let root = &ctx.root_dir;
        let (paths_404, paths_500) = stack_error_paths(ctx.stack);

        let mut found_404 = first_existing_str(root, paths_404);
        let mut has_500 = first_existing_str(root, paths_500).is_some();

        // 정적 웹 루트의 404.html / 500.html
        if found_404.is_none() {
            found_404 = find_in_web_roots(root, "404.html");
        }
        if !has_500 {
            has_500 = find_in_web_roots(root, "500.html").is_some();
        }

        // Next.js 모노레포 변형
        if ctx.stack == Stack::Next {
            if found_404.is_none() {
                found_404 = find_monorepo_error_page(root, &["404", "not-found"]);
            }
            if !has_500 {
                has_500 =
                    find_monorepo_error_page(root, &["500", "error", "global-error"]).is_some();
            }
        }

        match (found_404, has_500) {
            (Some(_), true) => Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Custom error pages configured",
            )),
            (Some(found), false) => Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!("404 page found ({found}), 500 page not found"),
            )),
            (None, _) => Ok(CheckResult::warn(
                self.id(),
                self.title(),
                "No custom 404 page found",
            )
            .with_suggestions(stack_suggestions(ctx.stack))),
        }
    }
}

/// 스택별 기대 에러 페이지 경로를 반환합니다.
fn stack_error_paths(stack: Stack) -> (&'static [&'static str], &'static [&'static str]) {
    match stack {
        Stack::Rails => (
            &["public/404.html"],
            &["public/500.html", "public/422.html"],
        ),
        Stack::Laravel => (
            &[
                "resources/views/errors/404.blade.php",
                "resources/views/errors/404.html",
            ],
            &[
                "resources/views/errors/500.blade.php",
                "resources/views/errors/500.html",
            ],
        ),
        Stack::Next => (
            &[
                // Pages Router
                "pages/404.tsx",
                "pages/404.js",
                "pages/404.jsx",
                "src/pages/404.tsx",
                "src/pages/404.js",
                "src/pages/404.jsx",
                // App Router
                "app/not-found.tsx",
                "app/not-found.js",
                "app/not-found.jsx",
                "src/app/not-found.tsx",
                "src/app/not-found.js",
                "src/app/not-found.jsx",
            ],
            &[
                "pages/500.tsx",
                "pages/500.js",
                "pages/500.jsx",
                "pages/_error.tsx",
                "pages/_error.js",
                "pages/_error.jsx",
                "src/pages/500.tsx",
                "src/pages/500.js",
                "src/pages/500.jsx",
                "app/error.tsx",
                "app/error.js",
                "app/error.jsx",
                "app/global-error.tsx",
                "app/global-error.js",
                "app/global-error.jsx",
                "src/app/error.tsx",
                "src/app/error.js",
                "src/app/error.jsx",
            ],
        ),
        Stack::Node => (
            &["public/404.html", "static/404.html", "templates/404.html"],
            &["public/500.html", "static/500.html", "templates/500.html"],
        ),
        Stack::Static => (&["404.html"], &["500.html"]),
        Stack::Unknown => (
            &["404.html", "public/404.html"],
            &["500.html", "public/500.html"],
        ),
    }
}

/// 스택별 개선 제안을 반환합니다.
fn stack_suggestions(stack: Stack) -> Vec<String> {
    let suggestions: &[&str] = match stack {
        Stack::Rails => &["Add custom public/404.html and public/500.html"],
        Stack::Laravel => &[
            "Run: php artisan vendor:publish --tag=laravel-errors",
            "Or create resources/views/errors/404.blade.php",
        ],
        Stack::Next => &[
            "Create pages/404.tsx (Pages Router)",
            "Or create app/not-found.tsx (App Router)",
        ],
        _ => &["Add a custom 404.html page"],
    };
    suggestions.iter().map(|s| (*s).to_owned()).collect()
}

/// 경로 목록에서 첫 존재 경로를 문자열로 반환합니다.
fn first_existing_str(root: &Path, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| root.join(candidate).exists())
        .map(|candidate| (*candidate).to_owned())
}

/// 정적 웹 루트들에서 파일을 찾습니다.
fn find_in_web_roots(root: &Path, filename: &str) -> Option<String> {
    for web_root in STATIC_WEB_ROOTS {
        let relative = if web_root.is_empty() {
            PathBuf::from(filename)
        } else {
            PathBuf::from(web_root).join(filename)
        };
        if root.join(&relative).exists() {
            return Some(relative.display().to_string());
        }
    }
    None
}

/// 모노레포 앱들의 pages/app 디렉토리에서 에러 페이지를 찾습니다.
fn find_monorepo_error_page(root: &Path, basenames: &[&str]) -> Option<String> {
    for mono_root in paths::MONOREPO_ROOTS {
        let mono_dir = root.join(mono_root);
        let Ok(entries) = std::fs::read_dir(&mono_dir) else {
            continue;
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                if entry.file_type().ok()?.is_dir() {
                    entry.file_name().into_string().ok()
                } else {
                    None
                }
            })
            .collect();
        names.sort();

        for name in names {
            for page_dir in MONOREPO_PAGE_DIRS {
                for basename in basenames {
                    for ext in PAGE_EXTENSIONS {
                        let relative = PathBuf::from(mono_root)
                            .join(&name)
                            .join(page_dir)
                            .join(format!("{basename}{ext}"));
                        if root.join(&relative).exists() {
                            return Some(relative.display().to_string());
                        }
                    }
                }
            }
        }
    }
    None
}
