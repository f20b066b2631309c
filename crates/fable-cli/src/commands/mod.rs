pub mod check;
pub mod play;
pub mod replay;

use std::path::Path;

use fable_world::Story;

use crate::story_file;

/// Read a story file, turning any failure into a printable message.
fn load_story(path: &Path) -> Result<Story, String> {
    story_file::read_story(path).map_err(|e| e.to_string())
}
