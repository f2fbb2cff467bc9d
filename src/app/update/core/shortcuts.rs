use super::super::super::messages::Message;
use super::super::super::state::{App, Section};
use crate::hotkeys::{self, HotkeyAction, KeyModifiers};
use iced::keyboard::{Key, Modifiers};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = Self::canonical_key_name(&key)?;
        let modifiers = Self::key_modifiers(modifiers);
        let action = hotkeys::match_chord(&self.prefs.hotkey_configs, modifiers, &pressed);

        if self.camouflage.active {
            // Only the way out works while disguised.
            return match (pressed.as_str(), action) {
                ("Escape" | "F12", _) if modifiers == KeyModifiers::NONE => {
                    Some(Message::ToggleCamouflage)
                }
                ("Tab", _) if modifiers == KeyModifiers::CTRL => Some(Message::NextCamouflage),
                (_, Some(HotkeyAction::ToggleCamouflage)) => Some(Message::ToggleCamouflage),
                (_, Some(HotkeyAction::ShowHide)) => Some(Message::MinimizeWindow),
                _ => None,
            };
        }

        let message = match action? {
            HotkeyAction::ShowHide => Message::MinimizeWindow,
            HotkeyAction::NextPage => Message::NextPage,
            HotkeyAction::PreviousPage => Message::PreviousPage,
            HotkeyAction::NextChapter => Message::NextChapter,
            HotkeyAction::PreviousChapter => Message::PreviousChapter,
            HotkeyAction::AddBookmark => Message::AddBookmark,
            HotkeyAction::ToggleImmersive => Message::ToggleImmersive,
            HotkeyAction::ToggleCamouflage => Message::ToggleCamouflage,
            HotkeyAction::SaveProgress => Message::SaveProgress,
            HotkeyAction::BackToBookshelf if self.section == Section::Settings => {
                Message::CloseSettings
            }
            HotkeyAction::BackToBookshelf => Message::BackToBookshelf,
            HotkeyAction::ToggleTimer => Message::ToggleTimer,
        };
        Some(message)
    }

    /// Key name in the spelling the hotkey table stores.
    pub(super) fn canonical_key_name(key: &Key) -> Option<String> {
        match key.as_ref() {
            Key::Named(named) => hotkeys::normalize_key_name(&format!("{named:?}")),
            Key::Character(ch) => hotkeys::normalize_key_name(ch),
            Key::Unidentified => None,
        }
    }

    pub(super) fn key_modifiers(modifiers: Modifiers) -> KeyModifiers {
        KeyModifiers {
            ctrl: modifiers.control(),
            alt: modifiers.alt(),
            shift: modifiers.shift(),
            logo: modifiers.logo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::key::Named;

    #[test]
    fn named_keys_use_table_spelling() {
        let cases = [
            (Named::PageDown, "PageDown"),
            (Named::ArrowUp, "Up"),
            (Named::Escape, "Escape"),
            (Named::F11, "F11"),
        ];
        for (named, expected) in cases {
            assert_eq!(
                App::canonical_key_name(&Key::Named(named)).as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn characters_are_uppercased() {
        assert_eq!(
            App::canonical_key_name(&Key::Character("d".into())).as_deref(),
            Some("D")
        );
    }

    #[test]
    fn modifiers_map_one_to_one() {
        let mapped = App::key_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(mapped, KeyModifiers::CTRL.with_shift());
        assert_eq!(App::key_modifiers(Modifiers::empty()), KeyModifiers::NONE);
    }
}
