use super::super::state::{App, Section};
use super::Effect;
use crate::camouflage::CamouflageTemplate;
use chrono::{Local, NaiveDate};
use std::time::Instant;
use tracing::{debug, info};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    /// Close out the reading session: stop the timer, store the position and
    /// fold the session's minutes into the book and the statistics.
    pub(super) fn finish_session(&mut self, effects: &mut Vec<Effect>) {
        let Some(book_id) = self.reader.book_id else {
            return;
        };
        let timer_total = self.timer.stop();
        self.timer.reset();
        let session_minutes = self
            .library
            .get(book_id)
            .map_or(0, |book| timer_total.saturating_sub(book.reading_minutes));

        let len = self.reader.len();
        let offset = self.reader.offset;
        if let Some(book) = self.library.get_mut(book_id) {
            book.set_position(offset, len);
            book.reading_minutes += session_minutes;
        }
        if session_minutes > 0 {
            let chars_read = offset.saturating_sub(self.reader.session_start_offset);
            self.stats.record_minutes(today(), session_minutes);
            self.stats.record_speed(chars_read, session_minutes);
            effects.push(Effect::SaveStatistics);
        }
        self.reader.session_start_offset = offset;
        info!(session_minutes, offset, "Reading session finished");
        effects.push(Effect::SaveLibrary);
    }

    pub(super) fn handle_toggle_timer(&mut self) {
        if self.timer.is_running() {
            self.timer.pause();
            self.status_message = "Reading timer paused.".to_string();
        } else if self.timer.is_paused() {
            self.timer.resume();
            self.status_message = "Reading timer resumed.".to_string();
        } else if let Some(minutes) = self.current_book().map(|book| book.reading_minutes) {
            self.timer.start(minutes);
            self.status_message = "Reading timer started.".to_string();
        }
    }

    pub(super) fn handle_toggle_camouflage(&mut self) {
        if self.camouflage.active {
            self.camouflage.active = false;
            if std::mem::take(&mut self.camouflage.resume_timer) {
                self.timer.resume();
            }
            debug!("Camouflage lowered");
        } else {
            self.camouflage.active = true;
            self.camouflage.resume_timer = self.timer.is_running();
            self.timer.pause();
            debug!(template = self.camouflage.template.key(), "Camouflage raised");
        }
    }

    pub(super) fn handle_next_camouflage(&mut self, effects: &mut Vec<Effect>) {
        let next = self.camouflage.template.next();
        self.handle_select_camouflage(next, effects);
    }

    pub(super) fn handle_select_camouflage(
        &mut self,
        template: CamouflageTemplate,
        effects: &mut Vec<Effect>,
    ) {
        self.camouflage.template = template;
        self.prefs.camouflage_template = template.key().to_string();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_clock_tick(&mut self, _now: Instant) {
        // Redraw only; the clock label reads the timer during `view`.
    }

    pub(super) fn handle_auto_save_tick(&mut self, effects: &mut Vec<Effect>) {
        if self.prefs.auto_save_progress && self.section == Section::Reader {
            self.save_progress(true, effects);
        }
    }

    pub(super) fn handle_close_requested(&mut self, effects: &mut Vec<Effect>) {
        self.finish_session(effects);
        effects.push(Effect::SavePreferences);
        effects.push(Effect::Quit);
    }
}
