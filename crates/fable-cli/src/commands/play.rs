use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use fable_engine::{Consequence, EngineConfig, GameEngine, Mode};

use crate::store::JsonFileStore;

pub fn run(story: &Path, seed: Option<u64>, save: &Path, autosave: bool) -> Result<(), String> {
    let story = super::load_story(story)?;
    let mut config = EngineConfig::default().with_autosave(autosave);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    println!("  {}\n", story.title.bold());
    let mut engine = GameEngine::new(story, config).with_store(JsonFileStore::new(save));
    let opening = engine.start_story().map_err(|e| e.to_string())?;
    print_consequence(&opening, engine.mode());
    println!(
        "  {}\n",
        "Type /save, /load, /history or /quit at any time.".dimmed()
    );

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/q" => break,
            "/save" => match engine.save_game() {
                Ok(()) => println!("{}\n", "Game saved.".green()),
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            "/load" => match engine.load_game() {
                Ok(history) => {
                    print!("{}", history.transcript());
                    println!("{}\n", "Game loaded.".green());
                }
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            "/history" => print!("{}", engine.history().transcript()),
            _ => {
                let consequence = engine.send_command(input).map_err(|e| e.to_string())?;
                print_consequence(&consequence, engine.mode());
            }
        }
    }

    Ok(())
}

fn print_consequence(consequence: &Consequence, mode: Mode) {
    println!("{}\n", consequence.narration());
    let stats = format!(
        "HP {} | AP {} | DEF {}",
        consequence.health(),
        consequence.attack_power(),
        consequence.defence()
    );
    match mode {
        Mode::Exploration => println!("  {}\n", stats.dimmed()),
        Mode::Combat => println!("  {} {}\n", "[COMBAT]".red().bold(), stats),
        Mode::GameOver => println!("  {} {}\n", "[THE END]".bold(), stats.dimmed()),
    }
}
