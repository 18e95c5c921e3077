//! Customizable keyboard shortcuts for the tour editor.
//!
//! Hosts translate their native key events into a [`KeyPress`] and ask
//! [`KeyBindings::action_for`] what to do. Which bindings are live depends on
//! the editor mode and on whether drawing mode is on.

use serde::{Deserialize, Serialize};

use crate::editor::{DrawTool, EditorMode};
use crate::model::HotspotKind;

/// Keys the editor can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl KeyCode {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
    ];

    const DIGITS: [KeyCode; 10] = [
        KeyCode::Key0,
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
        KeyCode::Key9,
    ];

    /// Parse a DOM `KeyboardEvent.key` value (case-insensitive for letters).
    pub fn from_key_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                return Some(Self::LETTERS[index]);
            }
            if let Some(d) = c.to_digit(10) {
                return Some(Self::DIGITS[d as usize]);
            }
            if c == ' ' {
                return Some(KeyCode::Space);
            }
            return None;
        }
        match name {
            "Enter" => Some(KeyCode::Enter),
            "Escape" | "Esc" => Some(KeyCode::Escape),
            "Tab" => Some(KeyCode::Tab),
            "Backspace" => Some(KeyCode::Backspace),
            "Delete" | "Del" => Some(KeyCode::Delete),
            "Home" => Some(KeyCode::Home),
            "End" => Some(KeyCode::End),
            "ArrowLeft" | "Left" => Some(KeyCode::ArrowLeft),
            "ArrowRight" | "Right" => Some(KeyCode::ArrowRight),
            "ArrowUp" | "Up" => Some(KeyCode::ArrowUp),
            "ArrowDown" | "Down" => Some(KeyCode::ArrowDown),
            _ => None,
        }
    }

    /// Digit keys 1-9 map to scene indices 0-8.
    pub fn scene_index(&self) -> Option<usize> {
        Self::DIGITS[1..]
            .iter()
            .position(|k| k == self)
    }
}

/// Modifier state of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn plain(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        }
    }

    pub fn ctrl_shift(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::NONE
            },
        }
    }
}

/// What a shortcut asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    ToggleMode,
    PrevScene,
    NextScene,
    FirstScene,
    LastScene,
    GoToScene(usize),
    PlaceHotspot(HotspotKind),
    Cancel,
    ToggleDrawingMode,
    SelectDrawTool(DrawTool),
    Undo,
    Redo,
    ClearRoutes,
}

/// Keybinding configuration.
///
/// Undo and redo keys fire with Ctrl held; Ctrl+Shift+undo also redoes.
/// Every other binding fires only without modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_mode: KeyCode,
    pub prev_scene: KeyCode,
    pub next_scene: KeyCode,
    pub first_scene: KeyCode,
    pub last_scene: KeyCode,
    pub hotspot_navigation: KeyCode,
    pub hotspot_info: KeyCode,
    pub hotspot_route: KeyCode,
    pub cancel: KeyCode,
    pub toggle_drawing: KeyCode,
    pub tool_line: KeyCode,
    pub tool_arrow: KeyCode,
    pub tool_point: KeyCode,
    pub undo: KeyCode,
    pub redo: KeyCode,
    pub clear_routes: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_mode: KeyCode::Space,
            prev_scene: KeyCode::ArrowLeft,
            next_scene: KeyCode::ArrowRight,
            first_scene: KeyCode::Home,
            last_scene: KeyCode::End,
            hotspot_navigation: KeyCode::H,
            hotspot_info: KeyCode::I,
            hotspot_route: KeyCode::R,
            cancel: KeyCode::Escape,
            toggle_drawing: KeyCode::D,
            tool_line: KeyCode::L,
            tool_arrow: KeyCode::A,
            tool_point: KeyCode::O,
            undo: KeyCode::Z,
            redo: KeyCode::Y,
            clear_routes: KeyCode::Delete,
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a key press to an action for the current editor state.
    pub fn action_for(
        &self,
        press: KeyPress,
        mode: EditorMode,
        drawing_mode: bool,
    ) -> Option<EditorAction> {
        let key = press.key;
        let m = press.modifiers;

        if m.ctrl && !m.alt && !m.meta {
            if !drawing_mode {
                return None;
            }
            return match (key, m.shift) {
                (k, false) if k == self.undo => Some(EditorAction::Undo),
                (k, false) if k == self.redo => Some(EditorAction::Redo),
                (k, true) if k == self.undo => Some(EditorAction::Redo),
                _ => None,
            };
        }
        if !m.is_empty() {
            return None;
        }

        if key == self.toggle_mode {
            return Some(EditorAction::ToggleMode);
        }
        match mode {
            EditorMode::Preview => self.preview_action(key),
            EditorMode::Edit => self.edit_action(key, drawing_mode),
        }
    }

    fn preview_action(&self, key: KeyCode) -> Option<EditorAction> {
        if key == self.prev_scene {
            Some(EditorAction::PrevScene)
        } else if key == self.next_scene {
            Some(EditorAction::NextScene)
        } else if key == self.first_scene {
            Some(EditorAction::FirstScene)
        } else if key == self.last_scene {
            Some(EditorAction::LastScene)
        } else {
            key.scene_index().map(EditorAction::GoToScene)
        }
    }

    fn edit_action(&self, key: KeyCode, drawing_mode: bool) -> Option<EditorAction> {
        if drawing_mode && key == self.clear_routes {
            Some(EditorAction::ClearRoutes)
        } else if key == self.hotspot_navigation {
            Some(EditorAction::PlaceHotspot(HotspotKind::Navigation))
        } else if key == self.hotspot_info {
            Some(EditorAction::PlaceHotspot(HotspotKind::Info))
        } else if key == self.hotspot_route {
            Some(EditorAction::PlaceHotspot(HotspotKind::Route))
        } else if key == self.cancel {
            Some(EditorAction::Cancel)
        } else if key == self.toggle_drawing {
            Some(EditorAction::ToggleDrawingMode)
        } else {
            self.tool_for_key(key).map(EditorAction::SelectDrawTool)
        }
    }

    /// Get the draw tool bound to a key, if any.
    pub fn tool_for_key(&self, key: KeyCode) -> Option<DrawTool> {
        if key == self.tool_line {
            Some(DrawTool::Line)
        } else if key == self.tool_arrow {
            Some(DrawTool::Arrow)
        } else if key == self.tool_point {
            Some(DrawTool::Point)
        } else {
            None
        }
    }

    pub fn key_for_tool(&self, tool: DrawTool) -> KeyCode {
        match tool {
            DrawTool::Line => self.tool_line,
            DrawTool::Arrow => self.tool_arrow,
            DrawTool::Point => self.tool_point,
        }
    }

    pub fn set_tool_key(&mut self, tool: DrawTool, key: KeyCode) {
        match tool {
            DrawTool::Line => self.tool_line = key,
            DrawTool::Arrow => self.tool_arrow = key,
            DrawTool::Point => self.tool_point = key,
        }
    }

    /// Describe what an unmodified key is already bound to, if anything.
    pub fn key_conflict(&self, key: KeyCode, exclude_tool: Option<DrawTool>) -> Option<String> {
        let named = [
            (self.toggle_mode, "Toggle mode"),
            (self.prev_scene, "Previous scene"),
            (self.next_scene, "Next scene"),
            (self.first_scene, "First scene"),
            (self.last_scene, "Last scene"),
            (self.hotspot_navigation, "Navigation hotspot"),
            (self.hotspot_info, "Info hotspot"),
            (self.hotspot_route, "Route hotspot"),
            (self.cancel, "Cancel"),
            (self.toggle_drawing, "Drawing mode"),
            (self.clear_routes, "Clear routes"),
        ];
        if let Some((_, name)) = named.iter().find(|(k, _)| *k == key) {
            return Some(name.to_string());
        }
        for tool in [DrawTool::Line, DrawTool::Arrow, DrawTool::Point] {
            if exclude_tool != Some(tool) && self.key_for_tool(tool) == key {
                return Some(format!("{} tool", tool.name()));
            }
        }
        key.scene_index().map(|i| format!("Scene {}", i + 1))
    }
}

/// Convert a KeyCode to a display string.
pub fn key_to_string(key: KeyCode) -> &'static str {
    match key {
        KeyCode::A => "A",
        KeyCode::B => "B",
        KeyCode::C => "C",
        KeyCode::D => "D",
        KeyCode::E => "E",
        KeyCode::F => "F",
        KeyCode::G => "G",
        KeyCode::H => "H",
        KeyCode::I => "I",
        KeyCode::J => "J",
        KeyCode::K => "K",
        KeyCode::L => "L",
        KeyCode::M => "M",
        KeyCode::N => "N",
        KeyCode::O => "O",
        KeyCode::P => "P",
        KeyCode::Q => "Q",
        KeyCode::R => "R",
        KeyCode::S => "S",
        KeyCode::T => "T",
        KeyCode::U => "U",
        KeyCode::V => "V",
        KeyCode::W => "W",
        KeyCode::X => "X",
        KeyCode::Y => "Y",
        KeyCode::Z => "Z",
        KeyCode::Key0 => "0",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Key4 => "4",
        KeyCode::Key5 => "5",
        KeyCode::Key6 => "6",
        KeyCode::Key7 => "7",
        KeyCode::Key8 => "8",
        KeyCode::Key9 => "9",
        KeyCode::Space => "Space",
        KeyCode::Enter => "Enter",
        KeyCode::Escape => "Esc",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Del",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::ArrowLeft => "←",
        KeyCode::ArrowRight => "→",
        KeyCode::ArrowUp => "↑",
        KeyCode::ArrowDown => "↓",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dom_key_names() {
        assert_eq!(KeyCode::from_key_name("l"), Some(KeyCode::L));
        assert_eq!(KeyCode::from_key_name("L"), Some(KeyCode::L));
        assert_eq!(KeyCode::from_key_name("7"), Some(KeyCode::Key7));
        assert_eq!(KeyCode::from_key_name(" "), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_key_name("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_key_name("F13"), None);
        assert_eq!(KeyCode::from_key_name("é"), None);
    }

    #[test]
    fn test_scene_digits() {
        assert_eq!(KeyCode::Key1.scene_index(), Some(0));
        assert_eq!(KeyCode::Key9.scene_index(), Some(8));
        assert_eq!(KeyCode::Key0.scene_index(), None);
    }

    #[test]
    fn test_navigation_only_in_preview() {
        let kb = KeyBindings::default();
        let right = KeyPress::plain(KeyCode::ArrowRight);
        assert_eq!(
            kb.action_for(right, EditorMode::Preview, false),
            Some(EditorAction::NextScene)
        );
        assert_eq!(kb.action_for(right, EditorMode::Edit, false), None);
        assert_eq!(
            kb.action_for(KeyPress::plain(KeyCode::Key3), EditorMode::Preview, false),
            Some(EditorAction::GoToScene(2))
        );
    }

    #[test]
    fn test_tools_only_in_edit() {
        let kb = KeyBindings::default();
        let a = KeyPress::plain(KeyCode::A);
        assert_eq!(
            kb.action_for(a, EditorMode::Edit, false),
            Some(EditorAction::SelectDrawTool(DrawTool::Arrow))
        );
        assert_eq!(kb.action_for(a, EditorMode::Preview, false), None);
    }

    #[test]
    fn test_undo_redo_need_drawing_mode() {
        let kb = KeyBindings::default();
        let undo = KeyPress::ctrl(KeyCode::Z);
        assert_eq!(kb.action_for(undo, EditorMode::Edit, false), None);
        assert_eq!(
            kb.action_for(undo, EditorMode::Edit, true),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            kb.action_for(KeyPress::ctrl_shift(KeyCode::Z), EditorMode::Edit, true),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            kb.action_for(KeyPress::ctrl(KeyCode::Y), EditorMode::Edit, true),
            Some(EditorAction::Redo)
        );
    }

    #[test]
    fn test_delete_clears_only_in_drawing_mode() {
        let kb = KeyBindings::default();
        let del = KeyPress::plain(KeyCode::Delete);
        assert_eq!(kb.action_for(del, EditorMode::Edit, false), None);
        assert_eq!(
            kb.action_for(del, EditorMode::Edit, true),
            Some(EditorAction::ClearRoutes)
        );
    }

    #[test]
    fn test_rebinding_and_conflicts() {
        let mut kb = KeyBindings::default();
        assert_eq!(kb.key_conflict(KeyCode::D, None).as_deref(), Some("Drawing mode"));
        assert_eq!(kb.key_conflict(KeyCode::L, Some(DrawTool::Line)), None);
        kb.set_tool_key(DrawTool::Line, KeyCode::K);
        assert_eq!(kb.tool_for_key(KeyCode::K), Some(DrawTool::Line));
        assert_eq!(kb.tool_for_key(KeyCode::L), None);
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let kb: KeyBindings = serde_json::from_str(r#"{"tool_line":"K"}"#).expect("parse");
        assert_eq!(kb.tool_line, KeyCode::K);
        assert_eq!(kb.tool_arrow, KeyCode::A);
    }
}
