mod bookshelf;
mod camouflage;
mod reader;
mod settings;

use super::messages::Message;
use super::state::{App, STATUS_FONT_SIZE_PX, Section};
use iced::alignment::Vertical;
use iced::widget::{column, container, horizontal_space, row, text};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        if self.camouflage.active {
            return self.camouflage_view();
        }

        let body = match self.section {
            Section::Bookshelf => self.bookshelf_view(),
            Section::Reader => self.reader_view(),
            Section::Settings => self.settings_view(),
        };

        if self.section == Section::Reader && self.prefs.immersive_mode_enabled {
            return container(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        column![body, self.status_bar()]
            .height(Length::Fill)
            .into()
    }

    fn status_bar(&self) -> Element<'_, Message> {
        let loading = if self.reader.loading.is_some() {
            "Loading…"
        } else {
            ""
        };
        container(
            row![
                text(self.status_message.as_str()).size(STATUS_FONT_SIZE_PX),
                horizontal_space(),
                text(loading).size(STATUS_FONT_SIZE_PX),
            ]
            .spacing(12)
            .align_y(Vertical::Center),
        )
        .padding([4, 12])
        .width(Length::Fill)
        .into()
    }
}
