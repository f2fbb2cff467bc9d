use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::ImportPathChanged(path) => self.handle_import_path_changed(path),
            Message::ImportRequested => self.handle_import_requested(&mut effects),
            Message::SelectBook(book_id) => self.handle_select_book(book_id),
            Message::OpenBook(book_id) => self.request_open(book_id, &mut effects),
            Message::OpenSelectedBook => self.handle_open_selected_book(&mut effects),
            Message::DeleteSelectedBook => self.handle_delete_selected_book(&mut effects),
            Message::BookLoaded { book_id, opened } => {
                self.handle_book_loaded(book_id, opened, &mut effects)
            }
            Message::BookLoadFailed { book_id, error } => {
                self.handle_book_load_failed(book_id, error)
            }

            Message::NextPage => self.handle_next_page(&mut effects),
            Message::PreviousPage => self.handle_previous_page(&mut effects),
            Message::JumpToBeginning => self.handle_jump_to_beginning(&mut effects),
            Message::JumpToEnd => self.handle_jump_to_end(&mut effects),
            Message::NextChapter => self.handle_next_chapter(&mut effects),
            Message::PreviousChapter => self.handle_previous_chapter(&mut effects),
            Message::GoToChapter(index) => self.handle_go_to_chapter(index, &mut effects),
            Message::GoToBookmark(id) => self.handle_go_to_bookmark(id, &mut effects),
            Message::BookmarkNameChanged(name) => self.handle_bookmark_name_changed(name),
            Message::BookmarkNoteChanged(note) => self.handle_bookmark_note_changed(note),
            Message::AddBookmark => self.handle_add_bookmark(&mut effects),
            Message::RemoveBookmark(id) => self.handle_remove_bookmark(id, &mut effects),
            Message::SaveProgress => self.save_progress(false, &mut effects),
            Message::BackToBookshelf => self.handle_back_to_bookshelf(&mut effects),
            Message::ToggleTimer => self.handle_toggle_timer(),

            Message::IncreaseFontSize => self.handle_font_size_step(1, &mut effects),
            Message::DecreaseFontSize => self.handle_font_size_step(-1, &mut effects),
            Message::IncreasePageSize => self.handle_page_size_step(true, &mut effects),
            Message::DecreasePageSize => self.handle_page_size_step(false, &mut effects),
            Message::ResetReaderPreferences => {
                self.handle_reset_reader_preferences(&mut effects)
            }
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::SelectTheme(name) => self.handle_select_theme(name, &mut effects),
            Message::ToggleImmersive => self.handle_toggle_immersive(&mut effects),
            Message::ToggleChapterPanel => self.handle_toggle_chapter_panel(&mut effects),
            Message::ToggleBookmarkPanel => self.handle_toggle_bookmark_panel(&mut effects),
            Message::ToggleStatisticsPanel => self.handle_toggle_statistics_panel(&mut effects),
            Message::ToggleAutoPage => self.handle_toggle_auto_page(&mut effects),
            Message::AutoPageIntervalChanged(seconds) => {
                self.handle_auto_page_interval_changed(seconds, &mut effects)
            }
            Message::ColumnCountChanged(columns) => {
                self.handle_column_count_changed(columns, &mut effects)
            }
            Message::ToggleTopmost => self.handle_toggle_topmost(&mut effects),

            Message::ShowSettings => self.handle_show_settings(),
            Message::CloseSettings => self.handle_close_settings(),
            Message::ToggleAutoResume => self.handle_toggle_auto_resume(&mut effects),
            Message::ToggleAutoSaveProgress => self.handle_toggle_auto_save_progress(&mut effects),
            Message::ToggleReadingTimerEnabled => {
                self.handle_toggle_reading_timer_enabled(&mut effects)
            }
            Message::CustomBackgroundChanged(value) => {
                self.handle_custom_background_changed(value)
            }
            Message::CustomForegroundChanged(value) => {
                self.handle_custom_foreground_changed(value)
            }
            Message::ApplyCustomTheme => self.handle_apply_custom_theme(&mut effects),
            Message::HotkeyInputChanged(index, value) => {
                self.handle_hotkey_input_changed(index, value)
            }
            Message::ApplyHotkey(index) => self.handle_apply_hotkey(index, &mut effects),
            Message::ToggleHotkeyEnabled(index) => {
                self.handle_toggle_hotkey_enabled(index, &mut effects)
            }
            Message::RestoreDefaultHotkeys => self.handle_restore_default_hotkeys(&mut effects),
            Message::PreferencesPathChanged(path) => self.handle_preferences_path_changed(path),
            Message::ExportPreferences => self.handle_export_preferences(&mut effects),
            Message::ImportPreferences => self.handle_import_preferences(&mut effects),
            Message::PreferencesExported(result) => self.handle_preferences_exported(result),
            Message::PreferencesImported(result) => {
                self.handle_preferences_imported(result, &mut effects)
            }
            Message::ResetAllPreferences => self.handle_reset_all_preferences(&mut effects),

            Message::ToggleCamouflage => self.handle_toggle_camouflage(),
            Message::NextCamouflage => self.handle_next_camouflage(&mut effects),
            Message::SelectCamouflage(template) => {
                self.handle_select_camouflage(template, &mut effects)
            }

            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::ClockTick(now) => self.handle_clock_tick(now),
            Message::AutoPageTick(_) => self.handle_auto_page_tick(&mut effects),
            Message::AutoSaveTick(_) => self.handle_auto_save_tick(&mut effects),
            Message::MinimizeWindow => effects.push(Effect::MinimizeWindow),
            Message::CloseRequested => self.handle_close_requested(&mut effects),
        }

        effects
    }
}
