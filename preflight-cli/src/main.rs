//! Preflight CLI 진입점
//!
//! 인자 파싱, tracing 초기화, 서브커맨드 디스패치, 종료 코드 매핑을
//! 담당합니다. 리포트 출력은 commands/ 핸들러와 output 모듈의 몫입니다.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let writer = OutputWriter::new(cli.output);

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &writer).await,
        Commands::Ignore(args) => commands::ignore::execute_ignore(args).await,
        Commands::Unignore(args) => commands::ignore::execute_unignore(args).await,
        Commands::Checks => commands::checks::execute(&writer),
        Commands::Init(args) => commands::init::execute(args).await,
    };

    if let Err(e) = result {
        // 스캔 실패는 리포트가 이미 출력되었으므로 종료 코드만 전달
        if !matches!(e, CliError::CheckFailures(_)) {
            eprintln!("{} {e}", "error:".red().bold());
        }
        std::process::exit(e.exit_code());
    }
}

/// tracing 구독자를 초기화합니다.
///
/// `RUST_LOG` 환경변수가 있으면 그것을 쓰고, 없으면 `--log-level`
/// (기본 warn)을 사용합니다. 로그는 stderr로 내보내 리포트 출력과
/// 섞이지 않게 합니다.
fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
