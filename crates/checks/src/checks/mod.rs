//! 개별 검사 구현 — 검사 하나당 모듈 하나

pub mod debug_statements;
pub mod email_auth;
pub mod error_pages;
pub mod favicon;
pub mod health;
pub mod license;
pub mod plausible;
pub mod secrets;
pub mod sentry;
pub mod seo;
pub mod stripe_webhook;

pub use debug_statements::DebugStatementsCheck;
pub use email_auth::EmailAuthCheck;
pub use error_pages::ErrorPagesCheck;
pub use favicon::FaviconCheck;
pub use health::HealthEndpointCheck;
pub use license::LicenseCheck;
pub use plausible::PlausibleCheck;
pub use secrets::SecretScanCheck;
pub use sentry::SentryCheck;
pub use seo::SeoMetaCheck;
pub use stripe_webhook::StripeWebhookCheck;
