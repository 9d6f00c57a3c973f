//! Diagnostic and error reporting for Lox.
//! Lox 的诊断和错误报告。
//!
//! Diagnostics have two renderings: the plain one-line `Display` form
//! (`[line N] Error at 'x': message`) and a rich report built with ariadne.
//! 诊断信息有两种渲染方式：单行的 `Display` 形式和基于 ariadne 的详细报告。

mod codes;
mod config;
mod diagnostic;

pub use codes::ErrorCode;
pub use config::ReportConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label};

use ariadne::{ColorGenerator, Config, Label as AriadneLabel, Report, ReportKind, Source};

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    config: &ReportConfig,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    let mut report = Report::build(ReportKind::Error, filename, diagnostic.span.start as usize)
        .with_config(Config::default().with_color(config.color))
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        let mut ariadne_label =
            AriadneLabel::new((filename, label.span.range())).with_message(&label.message);
        if config.color {
            ariadne_label = ariadne_label.with_color(colors.next());
        }
        report = report.with_label(ariadne_label);
    }

    if config.show_notes {
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
    }

    if config.show_help {
        if let Some(help) = &diagnostic.help {
            report = report.with_help(help);
        }
    }

    report
        .finish()
        .eprint((filename, Source::from(source)))
}
