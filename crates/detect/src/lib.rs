#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`evidence`]: 원시 증거 수집 (`Evidence`)
//! - [`stack`]: 스택 분류 규칙 (`detect_stack`)
//! - [`services`]: 서비스 선언 분류 (`detect_services`, `KNOWN_SERVICES`)
//! - [`paths`]: 웹 루트/모노레포 후보 경로 해석
//!
//! # Data Flow
//!
//! ```text
//! root dir --> Evidence::collect --> +--> detect_stack    --> Stack
//!                                    |
//!                                    +--> detect_services --> BTreeMap<name, ServiceDeclaration>
//! ```

pub mod evidence;
pub mod paths;
pub mod services;
pub mod stack;

// --- Public API Re-exports ---

pub use evidence::{Evidence, EnvLine};
pub use services::{detect_services, KNOWN_SERVICES};
pub use stack::detect_stack;
