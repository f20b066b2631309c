use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let story = super::load_story(path)?;

    let problems = story.dangling_references();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {} {problem}", "broken:".red().bold());
        }
        return Err(format!(
            "'{}' has {} broken reference{}",
            story.title,
            problems.len(),
            if problems.len() == 1 { "" } else { "s" }
        ));
    }

    println!("  All checks passed for '{}'.", story.title);
    println!(
        "  {} rooms, {} passages, {} containers, {} items, {} enemies, {} characters",
        story.rooms().count(),
        story.passages().count(),
        story.containers().count(),
        story.items().count(),
        story.enemies().count(),
        story.characters().count(),
    );
    Ok(())
}
