mod reducer;
mod runtime;
mod shortcuts;

use super::super::messages::Message;
use super::super::state::{App, Section};
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.timer.is_running() {
            subscriptions.push(time::every(Duration::from_secs(1)).map(Message::ClockTick));
        }

        let reading = app.section == Section::Reader && app.reader.book_id.is_some();
        if reading && app.prefs.auto_page_enabled && !app.camouflage.active {
            let interval = Duration::from_secs(app.prefs.auto_page_interval);
            subscriptions.push(time::every(interval).map(Message::AutoPageTick));
        }
        if reading && app.prefs.auto_save_progress {
            let interval = Duration::from_secs(app.prefs.auto_save_interval);
            subscriptions.push(time::every(interval).map(Message::AutoSaveTick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
