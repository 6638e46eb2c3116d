//! File runner for cidlang
//!
//! Usage: cid <file>

use std::collections::HashMap;
use std::process;

use anyhow::{Context, Result};
use cidlang::{Error, Expression};

fn main() {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: cid <file>");
            process::exit(1);
        }
    };

    match run(&path) {
        Ok(Expression::Unspecified) => {}
        Ok(result) => println!("{}", result),
        Err(err) => {
            // `(exit code)` ends the process with its own status.
            if let Some(code) = err.downcast_ref::<Error>().and_then(Error::exit_code) {
                process::exit(code);
            }
            eprintln!("{:#}", err);
            process::exit(1);
        }
    }
}

fn run(path: &str) -> Result<Expression> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("Unable to read file: {}", path))?;
    Ok(cidlang::exec(&source, HashMap::new())?)
}
