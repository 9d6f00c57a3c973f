//! The `lox repl` command.

use lox_eval::Interpreter;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::{CliError, Context};

pub fn run(ctx: &Context) -> Result<(), CliError> {
    println!("Lox REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = DefaultEditor::new()?;

    // One interpreter for the whole session so definitions persist.
    let mut interpreter = Interpreter::new();

    loop {
        let readline = rl.readline("lox> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Handle REPL commands
                if line.starts_with(':') {
                    match line {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :help, :h    Show this help");
                            println!("  :quit, :q    Exit the REPL");
                            println!("  :env         Show global bindings");
                        }
                        ":env" => print_env(&interpreter),
                        _ => println!("Unknown command: {}", line),
                    }
                    continue;
                }

                // Errors are already reported; the session keeps going.
                let _ = super::execute_source(&mut interpreter, line, "<repl>", true, ctx);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_env(interpreter: &Interpreter) {
    let globals = interpreter.globals();
    for name in globals.names() {
        if let Some(value) = globals.lookup(&name) {
            println!("  {} = {}", name, value);
        }
    }
}
