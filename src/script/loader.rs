use anyhow::{ensure, Context, Result};
use std::path::Path;

use super::types::RoomScript;

pub fn load_script(path: &Path) -> Result<RoomScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading room script {}", path.display()))?;
    let script: RoomScript = toml::from_str(&content)
        .with_context(|| format!("parsing room script {}", path.display()))?;
    Ok(script)
}

/// Load every `room_*.toml` in the wing directory, in filename order
/// (room_01 .. room_06). The game needs exactly six.
pub fn load_wing(wing_dir: &Path) -> Result<Vec<RoomScript>> {
    let mut entries: Vec<_> = std::fs::read_dir(wing_dir)
        .with_context(|| format!("reading wing directory {}", wing_dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with("room_") && name.ends_with(".toml")
        })
        .collect();

    entries.sort_by_key(|e| e.file_name());

    let mut scripts = Vec::new();
    for entry in entries {
        scripts.push(load_script(&entry.path())?);
    }

    ensure!(
        scripts.len() == 6,
        "expected 6 room scripts in {}, found {}",
        wing_dir.display(),
        scripts.len()
    );
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped_wing() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("rooms")
    }

    #[test]
    fn shipped_scripts_load_in_room_order() {
        let scripts = load_wing(&shipped_wing()).unwrap();
        let numbers: Vec<u32> = scripts.iter().map(|s| s.meta.room_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn shipped_hint_ladders_have_the_expected_thresholds() {
        let scripts = load_wing(&shipped_wing()).unwrap();
        for script in &scripts {
            let thresholds: Vec<u32> =
                script.narrative.hints.iter().map(|t| t.after).collect();
            if script.meta.room_number == 2 {
                assert_eq!(thresholds, [1, 2, 3], "room 2 has the arithmetic tier");
            } else {
                assert_eq!(
                    thresholds,
                    [1, 2],
                    "room {} ladder",
                    script.meta.room_number
                );
            }
        }
    }

    #[test]
    fn only_the_final_room_has_staged_blocks() {
        let scripts = load_wing(&shipped_wing()).unwrap();
        for script in &scripts {
            if script.meta.room_number == 6 {
                assert_eq!(script.narrative.stages.len(), 3);
            } else {
                assert!(script.narrative.stages.is_empty());
            }
        }
    }

    #[test]
    fn malformed_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("room_01.toml"), "meta = 3").unwrap();
        assert!(load_script(&dir.path().join("room_01.toml")).is_err());
    }

    #[test]
    fn wing_requires_all_six_rooms() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("room_01.toml"),
            r#"
[meta]
id = "solo"
room_number = 1
title = "SOLO"
theme = "alone"

[narrative]
body = "one room only"
prompt = "?"
placeholder = "..."
"#,
        )
        .unwrap();
        assert!(load_wing(dir.path()).is_err());
    }

    #[test]
    fn wing_sorts_by_filename_and_skips_strays() {
        let dir = tempfile::tempdir().unwrap();
        let stub = |n: u32| {
            format!(
                r#"
[meta]
id = "r{n}"
room_number = {n}
title = "R{n}"
theme = "t"

[narrative]
body = "b"
prompt = "p"
placeholder = "x"
"#
            )
        };
        // written out of order, plus files the filter must ignore
        for n in [3u32, 1, 6, 2, 5, 4] {
            std::fs::write(dir.path().join(format!("room_0{n}.toml")), stub(n)).unwrap();
        }
        std::fs::write(dir.path().join("notes.toml"), "x = 1").unwrap();
        std::fs::write(dir.path().join("room_zz.txt"), "not toml").unwrap();

        let scripts = load_wing(dir.path()).unwrap();
        let numbers: Vec<u32> = scripts.iter().map(|s| s.meta.room_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6]);
    }
}
