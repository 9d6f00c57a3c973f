//! Output formatting utilities.
//! 输出格式化工具。
//!
//! Status messages go to stderr so they never mix with program output.
//! 状态消息输出到标准错误，不与程序输出混在一起。

use std::sync::atomic::{AtomicBool, Ordering};

static COLOR: AtomicBool = AtomicBool::new(true);

/// Enable or disable ANSI colors.
/// 启用或禁用 ANSI 颜色。
pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

fn paint(code: &str, text: &str) -> String {
    if COLOR.load(Ordering::Relaxed) {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Print a success message in green.
/// 以绿色打印成功消息。
pub fn success(msg: &str) {
    eprintln!("{}", paint("32", msg));
}

/// Print an error message in red.
/// 以红色打印错误消息。
pub fn error(msg: &str) {
    eprintln!("{} {msg}", paint("31", "error:"));
}

/// Print an info message in blue.
/// 以蓝色打印信息消息。
pub fn info(msg: &str) {
    eprintln!("{} {msg}", paint("34", "info:"));
}
