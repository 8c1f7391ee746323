//! LICENSE 파일 검사
//!
//! 루트와 상위 디렉토리(git 루트 또는 프로젝트 마커 경계까지)에서
//! LICENSE 파일을 찾고, 내용으로 라이선스 종류를 추정합니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

/// 인식하는 LICENSE 파일명 변형
const LICENSE_NAMES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "LICENCE.md",
    "license",
    "license.md",
    "license.txt",
];

/// 상위 디렉토리 탐색 최대 깊이
const MAX_PARENT_LEVELS: usize = 5;

/// 프로젝트 루트로 볼 수 있는 마커 파일
const PROJECT_MARKERS: &[&str] = &[
    ".git",
    "package.json",
    "go.mod",
    "Cargo.toml",
    "pyproject.toml",
    "Gemfile",
    "composer.json",
    "pom.xml",
    "build.gradle",
];

/// LICENSE 파일 검사
pub struct LicenseCheck;

#[async_trait]
impl Check for LicenseCheck {
    fn id(&self) -> &'static str {
        "license"
    }

    fn title(&self) -> &'static str {
        "LICENSE file"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        for dir in directories_to_check(&ctx.root_dir) {
            for name in LICENSE_NAMES {
                let full_path = dir.join(name);
                let Ok(content) = std::fs::read_to_string(&full_path) else {
                    continue;
                };
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let mut message = match detect_license_type(trimmed) {
                    Some(kind) => format!("{kind} license found"),
                    None => "LICENSE file found".to_owned(),
                };
                if dir != ctx.root_dir {
                    let shown = full_path
                        .strip_prefix(&ctx.root_dir)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| full_path.display().to_string());
                    message.push_str(&format!(" (at {shown})"));
                }
                return Ok(CheckResult::pass(self.id(), self.title(), message));
            }
        }

        Ok(CheckResult::warn(self.id(), self.title(), "No LICENSE file found")
            .with_suggestions([
                "Add a LICENSE file to your project",
                "Choose a license at https://choosealicense.com",
            ]))
    }
}

/// 루트와 탐색 대상 상위 디렉토리 목록을 반환합니다.
///
/// `.git`을 가진 상위를 만나면 그 디렉토리까지만 포함하고 멈춥니다.
/// 그 외의 상위는 프로젝트 마커가 있을 때만 포함합니다.
fn directories_to_check(root: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![root.to_path_buf()];
    let mut current = root.to_path_buf();

    for _ in 0..MAX_PARENT_LEVELS {
        let Some(parent) = current.parent().map(Path::to_path_buf) else {
            break;
        };
        if parent == current {
            break;
        }

        if parent.join(".git").exists() {
            dirs.push(parent);
            break;
        }
        if has_project_marker(&parent) {
            dirs.push(parent.clone());
        }
        current = parent;
    }

    dirs
}

fn has_project_marker(dir: &Path) -> bool {
    PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

/// 내용에서 라이선스 종류를 추정합니다.
fn detect_license_type(content: &str) -> Option<&'static str> {
    let lower = content.to_lowercase();

    if lower.contains("mit license")
        || lower.contains("permission is hereby granted, free of charge")
    {
        return Some("MIT");
    }
    if lower.contains("apache license") && lower.contains("version 2.0") {
        return Some("Apache 2.0");
    }
    if lower.contains("gnu affero general public license") {
        if lower.contains("version 3") {
            return Some("AGPL-3.0");
        }
        return Some("AGPL");
    }
    if lower.contains("gnu general public license") {
        if lower.contains("version 3") {
            return Some("GPL-3.0");
        }
        if lower.contains("version 2") {
            return Some("GPL-2.0");
        }
        return Some("GPL");
    }
    if lower.contains("bsd") {
        if lower.contains("3-clause") || lower.contains("three-clause") {
            return Some("BSD-3-Clause");
        }
        if lower.contains("2-clause") || lower.contains("two-clause") {
            return Some("BSD-2-Clause");
        }
        return Some("BSD");
    }
    if lower.contains("isc license") {
        return Some("ISC");
    }
    if lower.contains("mozilla public license") {
        return Some("MPL-2.0");
    }
    if lower.contains("unlicense") || lower.contains("this is free and unencumbered") {
        return Some("Unlicense");
    }
    if lower.contains("creative commons") {
        return Some("Creative Commons");
    }
    if lower.contains("proprietary") || lower.contains("all rights reserved") {
        return Some("Proprietary");
    }

    None
}
