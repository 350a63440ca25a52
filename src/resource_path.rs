use std::path::{Path, PathBuf};

const SOUND_EXTENSIONS: [&str; 3] = ["mp3", "ogg", "wav"];

pub fn find_resource(relative_path: &str) -> Option<PathBuf> {
    let search_paths = [
        "",
        "assets/",
        "../",
        "../../",
    ];

    for base in &search_paths {
        let full_path = Path::new(base).join(relative_path);
        if full_path.exists() {
            return Some(full_path);
        }
    }

    None
}

pub fn find_sound(name: &str) -> Option<PathBuf> {
    SOUND_EXTENSIONS
        .iter()
        .find_map(|ext| find_resource(&format!("sounds/{}.{}", name, ext)))
}
