use super::super::messages::Message;
use super::super::state::App;
use crate::library::Book;
use chrono::Local;
use iced::alignment::Vertical;
use iced::widget::{Column, button, column, container, horizontal_space, row, scrollable, text, text_input};
use iced::{Element, Length};

impl App {
    pub(super) fn bookshelf_view(&self) -> Element<'_, Message> {
        let header = row![
            text("Bookshelf").size(24.0),
            horizontal_space(),
            button("Settings").on_press(Message::ShowSettings),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let import_row = row![
            text_input("Path to a .txt novel", &self.shelf.path_input)
                .on_input(Message::ImportPathChanged)
                .on_submit(Message::ImportRequested)
                .width(Length::Fill),
            button("Import").on_press(Message::ImportRequested),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let has_selection = self.shelf.selected.is_some();
        let actions = row![
            button("Open").on_press_maybe(has_selection.then_some(Message::OpenSelectedBook)),
            button("Remove").on_press_maybe(has_selection.then_some(Message::DeleteSelectedBook)),
            horizontal_space(),
            text(format!("{} books", self.library.len())),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let list: Element<'_, Message> = if self.library.is_empty() {
            container(text("No books yet. Import a local .txt file to start reading."))
                .padding(24)
                .into()
        } else {
            let rows: Vec<Element<'_, Message>> =
                self.library.books().iter().map(|book| self.book_row(book)).collect();
            scrollable(Column::with_children(rows).spacing(4).width(Length::Fill))
                .height(Length::Fill)
                .into()
        };

        column![header, import_row, actions, list]
            .spacing(12)
            .padding(16)
            .height(Length::Fill)
            .into()
    }

    fn book_row<'a>(&self, book: &'a Book) -> Element<'a, Message> {
        let marker = if self.shelf.selected == Some(book.id) {
            "▶ "
        } else {
            "   "
        };
        let last_opened = book
            .last_opened_utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let details = format!(
            "{:.1}%  ·  {} min  ·  {}",
            book.progress() * 100.0,
            book.reading_minutes,
            last_opened
        );

        let label = row![
            text(format!("{marker}{}", book.title)).width(Length::Fill),
            text(details).size(13.0),
        ]
        .spacing(12)
        .align_y(Vertical::Center);

        row![
            button(label)
                .on_press(Message::SelectBook(book.id))
                .style(button::text)
                .width(Length::Fill),
            button("Read").on_press(Message::OpenBook(book.id)),
        ]
        .spacing(8)
        .align_y(Vertical::Center)
        .into()
    }
}
