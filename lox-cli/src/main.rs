//! Lox CLI - The Lox language command line interface.
//! Lox CLI - Lox 语言的命令行界面。

mod commands;
mod error;
mod output;

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use lox_diagnostic::ReportConfig;

pub use error::CliError;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "lox")]
#[command(author, version, about = "Lox - A tree-walking interpreter for the Lox language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script to run when no subcommand is given. / 未指定子命令时运行的脚本。
    file: Option<String>,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print diagnostics as plain one-line messages. / 以单行纯文本形式输出诊断。
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output. / 禁用彩色输出。
    #[arg(long, global = true)]
    no_color: bool,

    /// Leave notes and help out of diagnostics. / 诊断中不显示注释和帮助。
    #[arg(long, global = true)]
    no_hints: bool,

    /// Log filter, e.g. `debug` or `lox_parser=trace`. Overrides `LOX_LOG`.
    /// 日志过滤器，覆盖 `LOX_LOG`。
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Run a Lox file. / 运行 Lox 文件。
    Run {
        /// The file to run. / 要运行的文件。
        file: String,
    },

    /// Evaluate source given on the command line. / 求值命令行中的源代码。
    Eval {
        /// The source to evaluate. / 要求值的源代码。
        source: String,
    },

    /// Parse a file and report syntax errors. / 解析文件并报告语法错误。
    Check {
        /// The file to check. / 要检查的文件。
        file: String,

        /// Print the parsed program. / 打印解析后的程序。
        #[arg(long)]
        ast: bool,
    },

    /// Start an interactive REPL. / 启动交互式 REPL。
    Repl,
}

/// Settings shared by every command.
/// 所有命令共享的设置。
pub struct Context {
    pub verbose: bool,
    pub quiet: bool,
    pub report: ReportConfig,
}

/// Install the log subscriber when a filter is given by flag or `LOX_LOG`.
/// Without one, nothing is installed and logging costs nothing.
fn init_logging(filter: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match filter {
        Some(filter) => filter.to_string(),
        None => match std::env::var("LOX_LOG") {
            Ok(filter) if !filter.is_empty() => filter,
            _ => return,
        },
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(EnvFilter::new(filter))
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();

    init_logging(cli.log.as_deref());

    let color = !cli.no_color && std::io::stderr().is_terminal();
    output::set_color(color);

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        report: ReportConfig::new().color(color).hints(!cli.no_hints),
    };

    let result = match (cli.command, cli.file) {
        (Some(Commands::Run { file }), _) | (None, Some(file)) => commands::run::run(&file, &ctx),
        (Some(Commands::Eval { source }), _) => commands::eval::run(&source, &ctx),
        (Some(Commands::Check { file, ast }), _) => commands::check::run(&file, ast, &ctx),
        (Some(Commands::Repl), _) | (None, None) => commands::repl::run(&ctx),
    };

    if let Err(e) = result {
        if !e.is_reported() {
            output::error(&e.to_string());
        }
        std::process::exit(e.exit_code());
    }
}
