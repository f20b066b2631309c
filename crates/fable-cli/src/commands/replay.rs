use std::path::Path;

use colored::Colorize;
use fable_engine::{PersistError, SaveStore};

use crate::store::JsonFileStore;

pub fn run(path: &Path) -> Result<(), String> {
    let state = JsonFileStore::new(path).load().map_err(|e| match e {
        PersistError::NotFound => format!("no saved game at '{}'", path.display()),
        other => other.to_string(),
    })?;

    println!("  {}\n", state.story().title.bold());
    print!("{}", state.history().transcript());

    let hero = state.hero();
    println!(
        "  {} turns | {} | HP {}/{}",
        state.history().len(),
        state.mode(),
        hero.health(),
        hero.max_health()
    );
    Ok(())
}
