use super::super::messages::Message;
use super::super::state::App;
use crate::camouflage::CamouflageTemplate;
use crate::preferences::{MAX_AUTO_PAGE_SECS, MIN_AUTO_PAGE_SECS};
use crate::theme;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, checkbox, column, container, horizontal_rule, horizontal_space, pick_list,
    row, scrollable, slider, text, text_input,
};
use iced::{Element, Length};

const COLUMN_CHOICES: [u8; 3] = [1, 2, 3];

impl App {
    pub(super) fn settings_view(&self) -> Element<'_, Message> {
        let header = row![
            text("Settings").size(24.0),
            horizontal_space(),
            button("Done").on_press(Message::CloseSettings),
        ]
        .align_y(Vertical::Center);

        let content = column![
            header,
            self.reading_section(),
            horizontal_rule(1),
            self.theme_section(),
            horizontal_rule(1),
            self.hotkey_section(),
            horizontal_rule(1),
            self.camouflage_section(),
            horizontal_rule(1),
            self.transfer_section(),
        ]
        .spacing(16)
        .padding(16);

        scrollable(container(content).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn reading_section(&self) -> Element<'_, Message> {
        let prefs = &self.prefs;
        column![
            text("Reading").size(18.0),
            checkbox("Reopen the last book on startup", prefs.auto_resume_last_book)
                .on_toggle(|_| Message::ToggleAutoResume),
            checkbox(
                format!("Save progress every {} seconds", prefs.auto_save_interval),
                prefs.auto_save_progress
            )
            .on_toggle(|_| Message::ToggleAutoSaveProgress),
            checkbox("Reading timer", prefs.enable_reading_timer)
                .on_toggle(|_| Message::ToggleReadingTimerEnabled),
            checkbox("Immersive mode", prefs.immersive_mode_enabled)
                .on_toggle(|_| Message::ToggleImmersive),
            checkbox("Keep window on top", prefs.window_topmost)
                .on_toggle(|_| Message::ToggleTopmost),
            row![
                text("Columns"),
                pick_list(
                    COLUMN_CHOICES,
                    Some(prefs.column_count),
                    Message::ColumnCountChanged
                ),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text(format!("Auto page every {} s", prefs.auto_page_interval)),
                slider(
                    MIN_AUTO_PAGE_SECS as f32..=MAX_AUTO_PAGE_SECS as f32,
                    prefs.auto_page_interval as f32,
                    |value| Message::AutoPageIntervalChanged(value.round() as u64),
                )
                .step(1.0),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            button("Reset reading layout").on_press(Message::ResetReaderPreferences),
        ]
        .spacing(10)
        .into()
    }

    fn theme_section(&self) -> Element<'_, Message> {
        let mut themes = theme::presets();
        if let Some(custom) = &self.prefs.custom_theme {
            themes.push(custom.to_reading_theme());
        }
        let selected = self.reading_theme();
        let origin = if selected.built_in {
            "Built-in"
        } else {
            "Your colors"
        };

        column![
            text("Theme").size(18.0),
            row![
                text("Preset"),
                pick_list(themes, Some(selected), |theme| Message::SelectTheme(theme.name)),
                text(origin).size(13.0),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text("Background"),
                text_input("#RRGGBB", &self.settings.custom_background)
                    .on_input(Message::CustomBackgroundChanged)
                    .width(Length::Fixed(120.0)),
                text("Text"),
                text_input("#RRGGBB", &self.settings.custom_foreground)
                    .on_input(Message::CustomForegroundChanged)
                    .on_submit(Message::ApplyCustomTheme)
                    .width(Length::Fixed(120.0)),
                button("Apply custom").on_press(Message::ApplyCustomTheme),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        ]
        .spacing(10)
        .into()
    }

    fn hotkey_section(&self) -> Element<'_, Message> {
        let rows: Vec<Element<'_, Message>> = self
            .prefs
            .hotkey_configs
            .iter()
            .enumerate()
            .map(|(idx, config)| {
                let input = self
                    .settings
                    .hotkey_inputs
                    .get(idx)
                    .map_or("", String::as_str);
                row![
                    text(config.action.description()).width(Length::Fixed(200.0)),
                    text_input("Ctrl+Key", input)
                        .on_input(move |value| Message::HotkeyInputChanged(idx, value))
                        .on_submit(Message::ApplyHotkey(idx))
                        .width(Length::Fixed(180.0)),
                    button("Apply").on_press(Message::ApplyHotkey(idx)),
                    checkbox("Enabled", config.enabled)
                        .on_toggle(move |_| Message::ToggleHotkeyEnabled(idx)),
                ]
                .spacing(8)
                .align_y(Vertical::Center)
                .into()
            })
            .collect();

        column![
            text("Hotkeys").size(18.0),
            Column::with_children(rows).spacing(6),
            button("Restore defaults").on_press(Message::RestoreDefaultHotkeys),
        ]
        .spacing(10)
        .into()
    }

    fn camouflage_section(&self) -> Element<'_, Message> {
        let template = self.camouflage.template;
        column![
            text("Disguise").size(18.0),
            row![
                pick_list(
                    CamouflageTemplate::ALL,
                    Some(template),
                    Message::SelectCamouflage
                ),
                text(template.description()).size(13.0),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        ]
        .spacing(10)
        .into()
    }

    fn transfer_section(&self) -> Element<'_, Message> {
        column![
            text("Preferences file").size(18.0),
            text_input("Path to a JSON file", &self.settings.preferences_path)
                .on_input(Message::PreferencesPathChanged),
            row![
                button("Export").on_press(Message::ExportPreferences),
                button("Import").on_press(Message::ImportPreferences),
                horizontal_space(),
                button("Reset everything").on_press(Message::ResetAllPreferences),
            ]
            .spacing(8),
        ]
        .spacing(10)
        .into()
    }
}
