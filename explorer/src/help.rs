use crate::system::SystemKind;

const CONTROLS: &str = "\
  H - Toggle Help Menu                Left Mouse - Click or drag to hear orbits
  D - Toggle Audio Dampening        Middle Mouse - Drag to pan view
  C - Toggle Color                   Right Mouse - Stop orbit and sound
F11 - Toggle Fullscreen             Scroll Wheel - Zoom in and out
  S - Save Snapshot
  R - Reset View
  J - Hold down, move mouse, and
      release to make Julia sets.
      Press again to switch back.
Space - Animate the Julia point
  Esc - Quit
";

/// Key bindings followed by the numbered list of systems.
pub fn help_text() -> String {
    let mut text = String::from(CONTROLS);
    for system in SystemKind::ALL {
        text.push_str(&format!("  {} - {}\n", system.index() + 1, system.label()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_system() {
        let text = help_text();
        for system in SystemKind::ALL {
            assert!(text.contains(system.label()));
        }
        assert!(text.contains("5 - Hénon Map"));
        assert!(!text.contains('\u{fffd}'));
    }
}
