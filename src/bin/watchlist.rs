use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use scout_compare::config::AppConfig;
use scout_compare::logging;
use scout_compare::schema::Position;
use scout_compare::watchlist::SqliteWatchList;

const USAGE: &str = "usage: watchlist [--db=PATH] <add|remove|list> <position> [key] [note]";

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init_stderr_logging(&config);

    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    let db_path = take_db_path_arg(&mut args)
        .or_else(|| config.db_path.clone())
        .context("unable to resolve watch-list db path")?;

    let command = args.first().map(String::as_str).ok_or_else(|| anyhow!(USAGE))?;
    let position = args
        .get(1)
        .map(|raw| {
            Position::from_slug(raw).ok_or_else(|| {
                let known: Vec<&str> = Position::ALL.iter().map(|p| p.slug()).collect();
                anyhow!("unknown position {raw:?}; expected one of {}", known.join(", "))
            })
        })
        .transpose()?;

    let list = SqliteWatchList::open(&db_path)?;
    match (command, position) {
        ("add", Some(position)) => {
            let key = args.get(2).ok_or_else(|| anyhow!(USAGE))?;
            let note = args.get(3).map(String::as_str);
            if list.add(position, key, note)? {
                println!("added {} to {}", key.trim(), position.slug());
            } else {
                println!("{} already on {}", key.trim(), position.slug());
            }
        }
        ("remove", Some(position)) => {
            let key = args.get(2).ok_or_else(|| anyhow!(USAGE))?;
            if list.remove(position, key)? {
                println!("removed {} from {}", key.trim(), position.slug());
            } else {
                println!("{} was not on {}", key.trim(), position.slug());
            }
        }
        ("list", Some(position)) => print_entries(&list, position)?,
        ("list", None) => {
            for position in Position::ALL {
                print_entries(&list, position)?;
            }
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn print_entries(list: &SqliteWatchList, position: Position) -> Result<()> {
    let entries = list.list(position)?;
    println!("{} ({})", position.label(), entries.len());
    for entry in entries {
        match entry.note {
            Some(note) => println!("  {}  {}  {note}", entry.join_key, entry.added_at),
            None => println!("  {}  {}", entry.join_key, entry.added_at),
        }
    }
    Ok(())
}

fn take_db_path_arg(args: &mut Vec<String>) -> Option<PathBuf> {
    let mut out = None;
    let mut idx = 0;
    while idx < args.len() {
        if let Some(path) = args[idx].strip_prefix("--db=") {
            let trimmed = path.trim().to_string();
            args.remove(idx);
            if !trimmed.is_empty() {
                out = Some(PathBuf::from(trimmed));
            }
            continue;
        }
        if args[idx] == "--db" {
            args.remove(idx);
            if idx < args.len() {
                let next = args.remove(idx);
                if !next.trim().is_empty() {
                    out = Some(PathBuf::from(next));
                }
            }
            continue;
        }
        idx += 1;
    }
    out
}
