//! Built-in shortcuts and their actions

use crate::category::ShortcutCategory;
use crate::queue::ActionQueue;
use crate::record::{ShortcutRecord, ShortcutSpec};
use crate::registry::ShortcutRegistry;
use gsender_core::Action;

fn command(name: &str) -> Action {
    Action::Command {
        name: name.to_string(),
    }
}

fn gcode(code: &str) -> Action {
    Action::Gcode {
        code: code.to_string(),
    }
}

/// Default shortcuts shipped with the sender
pub fn builtin_shortcuts() -> Vec<(ShortcutSpec, Action)> {
    use ShortcutCategory::*;

    let entries = [
        ("START_JOB", "Start Job", "~", Carving, command("gcode:start")),
        ("PAUSE_JOB", "Pause Job", "!", Carving, command("gcode:pause")),
        ("STOP_JOB", "Stop Job", "@", Carving, command("gcode:stop")),
        ("FEEDHOLD", "Feed Hold", "#", General, command("feedhold")),
        ("CYCLE_START", "Cycle Start", "$", General, command("cyclestart")),
        ("UNLOCK", "Unlock Machine", "ctrl+u", General, gcode("$X")),
        ("HOMING", "Home Machine", "ctrl+alt+command+h", Location, gcode("$H")),
        ("ZERO_ALL", "Zero All Axes", "shift+z", Location, gcode("G10 L20 P1 X0 Y0 Z0")),
        ("GO_TO_ZERO", "Go to XY Zero", "shift+g", Location, gcode("G90 G0 X0 Y0")),
        ("JOG_X_PLUS", "Jog X+", "shift+right", Jogging, gcode("$J=G91 G21 X1 F1000")),
        ("JOG_X_MINUS", "Jog X-", "shift+left", Jogging, gcode("$J=G91 G21 X-1 F1000")),
        ("JOG_Y_PLUS", "Jog Y+", "shift+up", Jogging, gcode("$J=G91 G21 Y1 F1000")),
        ("JOG_Y_MINUS", "Jog Y-", "shift+down", Jogging, gcode("$J=G91 G21 Y-1 F1000")),
        ("JOG_Z_PLUS", "Jog Z+", "shift+pageup", Jogging, gcode("$J=G91 G21 Z1 F500")),
        ("JOG_Z_MINUS", "Jog Z-", "shift+pagedown", Jogging, gcode("$J=G91 G21 Z-1 F500")),
        ("JOG_STOP", "Stop Jog", "esc", Jogging, command("jog:cancel")),
        ("PROBE_Z", "Probe Z", "ctrl+alt+command+p", Probing, gcode("G38.2 Z-25 F100")),
        ("FEED_PLUS", "Feed +10%", "ctrl+alt+command+=", Overrides, command("feedOverride:+10")),
        ("FEED_MINUS", "Feed -10%", "ctrl+alt+command+-", Overrides, command("feedOverride:-10")),
        ("SPINDLE_ON", "Spindle/Laser On", "ctrl+alt+command+s", SpindleLaser, gcode("M3")),
        ("SPINDLE_OFF", "Spindle/Laser Off", "ctrl+alt+command+x", SpindleLaser, gcode("M5")),
        ("COOLANT_FLOOD", "Flood Coolant", "ctrl+alt+command+f", Coolant, gcode("M8")),
        ("COOLANT_OFF", "Coolant Off", "ctrl+alt+command+o", Coolant, gcode("M9")),
        ("VISUALIZER_RESET", "Reset View", "ctrl+alt+command+v", Visualizer, command("visualizer:reset")),
        ("LOAD_FILE", "Load File", "ctrl+alt+command+l", Toolbar, command("file:load")),
    ];

    entries
        .into_iter()
        .map(|(id, title, keys, category, action)| (ShortcutSpec::new(id, title, keys, category), action))
        .collect()
}

/// Records for the built-in shortcuts, bound to their defaults
pub fn builtin_records() -> Vec<ShortcutRecord> {
    builtin_shortcuts()
        .into_iter()
        .map(|(spec, _)| spec.into_record())
        .collect()
}

/// Register every built-in shortcut so it enqueues its action on `queue`
pub fn register_builtins(registry: &mut ShortcutRegistry, queue: &ActionQueue) -> usize {
    let shortcuts = builtin_shortcuts();
    let count = shortcuts.len();
    for (spec, action) in shortcuts {
        let binding = queue.binding(spec.id.clone(), action);
        registry.register(spec, binding);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_defaults_do_not_collide() {
        let records = builtin_records();
        let combos: HashSet<String> = records.iter().map(|r| r.combo().to_string()).collect();
        assert_eq!(combos.len(), records.len());

        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_register_builtins() {
        let (queue, _receiver) = ActionQueue::channel();
        let mut registry = ShortcutRegistry::new();
        let count = register_builtins(&mut registry, &queue);
        assert_eq!(registry.len(), count);
        assert_eq!(registry.get("START_JOB").unwrap().current_keys, "~");
    }
}
