//! 후보 경로 해석 — 단일 앱/모노레포 레이아웃 열거
//!
//! 파비콘, 매니페스트, 에러 페이지처럼 프레임워크 관례에 따라 위치가
//! 달라지는 논리적 파일에 대해, 검사들이 순서대로 탐색할 후보 경로를
//! 생성합니다. 반환 순서가 곧 탐색 우선순위이며, 복수 매칭 시
//! 첫 번째 발견 위치가 선택됩니다.

use std::path::{Path, PathBuf};

use tracing::debug;

/// 프레임워크별 관례적 웹 루트 (탐색 우선순위 순)
///
/// 빈 문자열은 프로젝트 루트 자체를 의미하며 의도적으로 마지막에 둡니다.
pub const WEB_ROOTS: &[&str] = &[
    "public",  // Laravel, Rails, 다수의 Node.js
    "static",  // Hugo 등 SSG
    "web",     // Craft CMS, Symfony
    "www",     // 일부 PHP 앱
    "dist",    // 빌드된 정적 사이트
    "build",   // 빌드 출력물
    "_site",   // Jekyll
    "out",     // Next.js 정적 export
    "app",     // Next.js App Router
    "src/app", // Next.js App Router (표준)
    "",        // 루트 디렉토리
];

/// 웹 루트 하위의 에셋 디렉토리
pub const ASSET_SUBDIRS: &[&str] = &["assets", "assets/images", "images", "img"];

/// 모노레포 루트 디렉토리명
pub const MONOREPO_ROOTS: &[&str] = &["apps", "packages", "services"];

/// 모노레포 앱 내부의 App Router 경로 접미사
pub const APP_DIR_SUFFIXES: &[&str] = &["src/app", "app"];

/// 단일 앱 레이아웃의 후보 경로를 열거합니다 (루트 기준 상대 경로).
///
/// 각 웹 루트에 대해 직접 경로를 먼저, 에셋 하위 디렉토리를 그 다음에
/// 배치합니다. 루트 디렉토리(빈 웹 루트)는 파일명 그대로입니다.
pub fn web_root_candidates(filename: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for root in WEB_ROOTS {
        if root.is_empty() {
            candidates.push(PathBuf::from(filename));
            continue;
        }
        candidates.push(PathBuf::from(root).join(filename));
        for subdir in ASSET_SUBDIRS {
            candidates.push(PathBuf::from(root).join(subdir).join(filename));
        }
    }
    candidates
}

/// 모노레포 App Router 레이아웃의 후보 경로를 열거합니다 (루트 기준 상대 경로).
///
/// 각 모노레포 루트의 1단계 하위 디렉토리를 이름순으로 순회하며
/// `src/app/<filename>`, `app/<filename>` 접미사를 붙입니다.
/// 모노레포 루트가 없으면 해당 분기는 후보를 내지 않습니다.
pub fn monorepo_app_candidates(root: &Path, filename: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for mono_root in MONOREPO_ROOTS {
        let mono_dir = root.join(mono_root);
        let entries = match std::fs::read_dir(&mono_dir) {
            Ok(entries) => entries,
            Err(_) => continue, // 모노레포 루트 부재는 후보 0개
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
            for suffix in APP_DIR_SUFFIXES {
                candidates.push(
                    PathBuf::from(mono_root)
                        .join(&name)
                        .join(suffix)
                        .join(filename),
                );
            }
        }
    }

    candidates
}

/// 단일 앱 후보를 먼저, 모노레포 후보를 그 뒤에 배치한 전체 후보 목록입니다.
pub fn candidate_paths(root: &Path, filename: &str) -> Vec<PathBuf> {
    let mut candidates = web_root_candidates(filename);
    candidates.extend(monorepo_app_candidates(root, filename));
    candidates
}

/// 후보 목록에서 실제로 존재하는 첫 경로를 반환합니다 (상대 경로 그대로).
pub fn first_existing(root: &Path, candidates: &[PathBuf]) -> Option<PathBuf> {
    for candidate in candidates {
        if root.join(candidate).exists() {
            debug!(path = %candidate.display(), "candidate path found");
            return Some(candidate.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_root_candidates_start_with_public() {
        let candidates = web_root_candidates("favicon.ico");
        assert_eq!(candidates[0], PathBuf::from("public/favicon.ico"));
    }

    #[test]
    fn web_root_candidates_include_asset_subdirs() {
        let candidates = web_root_candidates("favicon.ico");
        assert!(candidates.contains(&PathBuf::from("public/assets/favicon.ico")));
        assert!(candidates.contains(&PathBuf::from("static/images/favicon.ico")));
    }

    #[test]
    fn web_root_candidates_end_with_bare_filename() {
        let candidates = web_root_candidates("favicon.ico");
        assert_eq!(candidates.last(), Some(&PathBuf::from("favicon.ico")));
    }

    #[test]
    fn monorepo_candidates_empty_without_roots() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = monorepo_app_candidates(dir.path(), "favicon.ico");
        assert!(candidates.is_empty());
    }

    #[test]
    fn monorepo_candidates_enumerate_first_level_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("apps/web/src/app")).unwrap();
        std::fs::create_dir_all(dir.path().join("apps/admin")).unwrap();
        // 파일은 디렉토리가 아니므로 무시되어야 함
        std::fs::write(dir.path().join("apps/README.md"), "x").unwrap();

        let candidates = monorepo_app_candidates(dir.path(), "icon.png");
        assert!(candidates.contains(&PathBuf::from("apps/web/src/app/icon.png")));
        assert!(candidates.contains(&PathBuf::from("apps/admin/app/icon.png")));
        assert!(!candidates.iter().any(|p| p.to_string_lossy().contains("README")));
    }

    #[test]
    fn monorepo_candidates_sorted_by_app_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("apps/zeta")).unwrap();
        std::fs::create_dir_all(dir.path().join("apps/alpha")).unwrap();

        let candidates = monorepo_app_candidates(dir.path(), "icon.png");
        let alpha_pos = candidates
            .iter()
            .position(|p| p.starts_with("apps/alpha"))
            .unwrap();
        let zeta_pos = candidates
            .iter()
            .position(|p| p.starts_with("apps/zeta"))
            .unwrap();
        assert!(alpha_pos < zeta_pos);
    }

    #[test]
    fn single_app_match_precedes_monorepo_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("public")).unwrap();
        std::fs::write(dir.path().join("public/favicon.ico"), "icon").unwrap();
        std::fs::create_dir_all(dir.path().join("apps/web/src/app")).unwrap();
        std::fs::write(dir.path().join("apps/web/src/app/favicon.ico"), "icon").unwrap();

        let candidates = candidate_paths(dir.path(), "favicon.ico");
        let found = first_existing(dir.path(), &candidates).unwrap();
        assert_eq!(found, PathBuf::from("public/favicon.ico"));
    }

    #[test]
    fn first_existing_returns_none_without_match() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = candidate_paths(dir.path(), "favicon.ico");
        assert!(first_existing(dir.path(), &candidates).is_none());
    }

    #[test]
    fn monorepo_only_match_is_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("packages/site/app")).unwrap();
        std::fs::write(dir.path().join("packages/site/app/manifest.ts"), "x").unwrap();

        let candidates = candidate_paths(dir.path(), "manifest.ts");
        let found = first_existing(dir.path(), &candidates).unwrap();
        assert_eq!(found, PathBuf::from("packages/site/app/manifest.ts"));
    }
}
