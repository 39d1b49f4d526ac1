use itertools::Itertools;
use relcore::catalog::Catalog;
use relcore::common::Result;
use relcore::config::Config;
use relcore::engine::Engine;
use relcore::event_log::TracingEventLog;
use std::io::{stdin, stdout, Write};
use std::path::Path;

const CATALOG_FILE: &str = "Catalog.toml";

fn main() -> Result<()> {
    env_logger_init();

    let config = Config::load()?;
    let catalog = Catalog::load(Path::new(CATALOG_FILE))?;
    let mut engine = Engine::init(config, catalog, Box::new(TracingEventLog))?;

    loop {
        print!("> ");
        let command = input()?;

        if command.is_empty() {
            continue;
        }
        execute(&command, &mut engine).unwrap_or_else(|err| println!("oops, {err}"));
    }
}

fn execute(command: &str, engine: &mut Engine) -> Result<()> {
    let words: Vec<&str> = command.split_whitespace().collect();
    match words.as_slice() {
        ["sel", idx, cond_val, table] => {
            let idx = parse_usize(idx)?;
            let cond_val = parse_i32(cond_val)?;
            let relation = engine.sel(idx, cond_val, table)?;
            println!(
                "[console] {} tuples, width {}.",
                relation.ntuples(),
                relation.nattrs
            );
            print_rows(&relation.tuples);
        }
        ["join", idx1, t1, idx2, t2] => {
            let idx1 = parse_usize(idx1)?;
            let idx2 = parse_usize(idx2)?;
            let relation = engine.join(idx1, t1, idx2, t2)?;
            println!(
                "[console] {} tuples, width {}.",
                relation.ntuples(),
                relation.nattrs
            );
            print_rows(&relation.tuples);
        }
        ["quit"] | ["exit"] => std::process::exit(0),
        _ => println!("[console] usage: sel <idx> <val> <table> | join <idx1> <t1> <idx2> <t2>"),
    }
    Ok(())
}

fn parse_usize(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| relcore::common::Error::InvalidInput(format!("'{raw}' is not a valid index")))
}

fn parse_i32(raw: &str) -> Result<i32> {
    raw.parse()
        .map_err(|_| relcore::common::Error::InvalidInput(format!("'{raw}' is not a valid integer")))
}

fn input() -> Result<String> {
    stdout().flush()?;

    let mut result = String::new();
    let mut input = String::new();
    loop {
        input.clear();
        stdin().read_line(&mut input)?;

        let trimmed = input.trim();
        match trimmed.ends_with('\\') {
            true => result.push_str(&trimmed[..trimmed.len() - 1]),
            false => {
                result.push_str(trimmed);
                break;
            }
        }
    }
    Ok(result)
}

fn print_rows(rows: &[Vec<i32>]) {
    rows.iter()
        .for_each(|row| println!("  {}", row.iter().map(|v| v.to_string()).join(", ")));
}

fn env_logger_init() {
    let _ = env_logger::try_init();
}
