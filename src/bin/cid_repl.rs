//! Interactive REPL for cidlang
//!
//! Usage: cid-repl

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::Result;
use cidlang::{exec_in, Evaluator, Expression, VERSION};

fn main() -> Result<()> {
    println!("cidlang {} - type :help for commands, :quit to leave", VERSION);

    let mut evaluator = Evaluator::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut line_num = 1;

    loop {
        print!("cid[{}]> ", line_num);
        io::stdout().flush()?;

        let input = match lines.next() {
            Some(line) => line?,
            None => break, // EOF
        };
        let input = input.trim();

        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" => {
                print_help();
                continue;
            }
            ":env" => {
                println!("{}", evaluator.env().names().join(" "));
                continue;
            }
            _ => {}
        }

        match exec_in(&mut evaluator, input) {
            Ok(Expression::Unspecified) => {}
            Ok(result) => println!("{}", result),
            Err(err) => {
                if let Some(code) = err.exit_code() {
                    process::exit(code);
                }
                eprintln!("{}", err);
            }
        }

        line_num += 1;
    }

    Ok(())
}

fn print_help() {
    println!("Enter an expression to evaluate it. Definitions persist between lines.");
    println!();
    println!("  (define square (lambda (x) (* x x)))");
    println!("  (square 12)");
    println!("  '(1 2 3)");
    println!();
    println!("Commands:");
    println!("  :help   show this message");
    println!("  :env    list global bindings");
    println!("  :quit   leave the REPL (or call (exit 0))");
}
