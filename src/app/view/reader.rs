use super::super::messages::Message;
use super::super::state::{App, COLUMN_SPACING_PX, PANEL_WIDTH_PX, READER_PADDING_PX};
use crate::pagination;
use crate::reading_timer::format_session;
use chrono::Local;
use iced::alignment::Vertical;
use iced::widget::text::LineHeight;
use iced::widget::{
    Column, Row, button, column, container, horizontal_rule, horizontal_space, row, scrollable,
    text, text_input,
};
use iced::{Element, Length, Pixels};

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

impl App {
    pub(super) fn reader_view(&self) -> Element<'_, Message> {
        let page = self.page_body();
        if self.prefs.immersive_mode_enabled {
            return page;
        }

        let mut body: Row<'_, Message> = Row::new().spacing(12).height(Length::Fill);
        if self.prefs.show_chapter_panel {
            body = body.push(self.chapter_panel());
        }
        body = body.push(page);
        if self.prefs.show_bookmark_panel {
            body = body.push(self.bookmark_panel());
        }
        if self.prefs.show_statistics_panel {
            body = body.push(self.statistics_panel());
        }

        column![self.reader_header(), self.reader_toolbar(), body]
            .spacing(8)
            .padding(12)
            .height(Length::Fill)
            .into()
    }

    fn reader_header(&self) -> Element<'_, Message> {
        let title = self.current_book().map_or("", |book| book.title.as_str());
        let chapter = self
            .reader
            .current_chapter()
            .and_then(|idx| self.reader.chapters().get(idx))
            .map_or("", |chapter| chapter.title.as_str());
        let len = self.reader.len();
        let progress = format!(
            "Page {}  ·  {:.1}%",
            pagination::progress_display(self.reader.offset, self.page_size(), len),
            pagination::progress_percentage(self.reader.offset, len)
        );

        row![
            text(title).size(18.0),
            text(chapter),
            horizontal_space(),
            text(progress),
            text(self.clock_label()),
        ]
        .spacing(16)
        .align_y(Vertical::Center)
        .into()
    }

    fn clock_label(&self) -> String {
        if !self.prefs.enable_reading_timer {
            return String::new();
        }
        let session = format_session(self.timer.current_session());
        if self.timer.is_paused() {
            format!("{session} (paused)")
        } else {
            session
        }
    }

    fn reader_toolbar(&self) -> Element<'_, Message> {
        let len = self.reader.len();
        let page_size = self.page_size();
        let can_next = pagination::can_go_next(self.reader.offset, page_size, len);
        let can_previous = pagination::can_go_previous(self.reader.offset);

        let navigation = row![
            button("Bookshelf").on_press(Message::BackToBookshelf),
            button("Previous").on_press_maybe(can_previous.then_some(Message::PreviousPage)),
            button("Next").on_press_maybe(can_next.then_some(Message::NextPage)),
            button("Prev Chapter").on_press(Message::PreviousChapter),
            button("Next Chapter").on_press(Message::NextChapter),
            button("Start").on_press(Message::JumpToBeginning),
            button("End").on_press(Message::JumpToEnd),
            button("Save").on_press(Message::SaveProgress),
        ]
        .spacing(6)
        .align_y(Vertical::Center);

        let timer_label = if self.timer.is_running() {
            "Pause Timer"
        } else {
            "Resume Timer"
        };
        let auto_page_label = if self.prefs.auto_page_enabled {
            "Auto Page: On"
        } else {
            "Auto Page: Off"
        };
        let theme_label = if self.prefs.use_dark_theme {
            "Day Mode"
        } else {
            "Night Mode"
        };

        let appearance = row![
            button("A-").on_press(Message::DecreaseFontSize),
            text(format!("{} pt", self.prefs.font_size)),
            button("A+").on_press(Message::IncreaseFontSize),
            button("Page-").on_press(Message::DecreasePageSize),
            text(format!("{page_size} chars")),
            button("Page+").on_press(Message::IncreasePageSize),
            button(theme_label).on_press(Message::ToggleTheme),
            button("Chapters").on_press(Message::ToggleChapterPanel),
            button("Bookmarks").on_press(Message::ToggleBookmarkPanel),
            button("Stats").on_press(Message::ToggleStatisticsPanel),
            button(auto_page_label).on_press(Message::ToggleAutoPage),
            button(timer_label).on_press(Message::ToggleTimer),
            button("Immersive").on_press(Message::ToggleImmersive),
            button("Disguise").on_press(Message::ToggleCamouflage),
            button("Settings").on_press(Message::ShowSettings),
        ]
        .spacing(6)
        .align_y(Vertical::Center);

        column![navigation, appearance].spacing(6).into()
    }

    /// Current page laid out in `column_count` columns.
    fn page_body(&self) -> Element<'_, Message> {
        let page = self.reader.page_text(self.page_size());
        let columns = split_columns(page, usize::from(self.prefs.column_count));
        let line_height = LineHeight::Absolute(Pixels(self.prefs.line_height));
        let indent = if self.prefs.enable_first_line_indent {
            indent_for(self.prefs.first_line_indent, self.prefs.font_size)
        } else {
            String::new()
        };

        let mut rendered: Vec<Element<'_, Message>> = Vec::with_capacity(columns.len());
        for chunk in columns {
            let paragraphs: Vec<Element<'_, Message>> = chunk
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| {
                    text(format!("{indent}{line}"))
                        .size(self.prefs.font_size as f32)
                        .line_height(line_height)
                        .width(Length::Fill)
                        .into()
                })
                .collect();
            rendered.push(
                Column::with_children(paragraphs)
                    .spacing(self.prefs.paragraph_spacing)
                    .width(Length::FillPortion(1))
                    .into(),
            );
        }

        let page_row = Row::with_children(rendered)
            .spacing(COLUMN_SPACING_PX)
            .width(Length::Fill);

        container(scrollable(container(page_row).padding(READER_PADDING_PX)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn chapter_panel(&self) -> Element<'_, Message> {
        let current = self.reader.current_chapter();
        let entries: Vec<Element<'_, Message>> = self
            .reader
            .chapters()
            .iter()
            .enumerate()
            .map(|(idx, chapter)| {
                let marker = if Some(idx) == current { "▶ " } else { "" };
                button(text(format!("{marker}{}", chapter.title)).size(14.0))
                    .on_press(Message::GoToChapter(idx))
                    .style(button::text)
                    .width(Length::Fill)
                    .into()
            })
            .collect();

        side_panel(
            format!("Chapters ({})", self.reader.chapters().len()),
            scrollable(Column::with_children(entries).spacing(2)).into(),
        )
    }

    fn bookmark_panel(&self) -> Element<'_, Message> {
        let form = column![
            text_input("Name (optional)", &self.reader.bookmark_name)
                .on_input(Message::BookmarkNameChanged)
                .on_submit(Message::AddBookmark),
            text_input("Note (optional)", &self.reader.bookmark_note)
                .on_input(Message::BookmarkNoteChanged)
                .on_submit(Message::AddBookmark),
            button("Add Bookmark").on_press(Message::AddBookmark),
        ]
        .spacing(6);

        let entries: Vec<Element<'_, Message>> = self
            .current_book()
            .map(|book| {
                book.bookmarks
                    .iter()
                    .map(|bookmark| {
                        let mut entry = column![
                            text(format!(
                                "{}  ({:.1}%)",
                                bookmark.name,
                                book.bookmark_progress(bookmark)
                            )),
                            text(
                                bookmark
                                    .created_utc
                                    .with_timezone(&Local)
                                    .format("%Y-%m-%d %H:%M")
                                    .to_string()
                            )
                            .size(12.0),
                        ]
                        .spacing(2);
                        if let Some(note) = &bookmark.note {
                            entry = entry.push(text(note.as_str()).size(12.0));
                        }
                        entry
                            .push(
                                row![
                                    button("Go").on_press(Message::GoToBookmark(bookmark.id)),
                                    button("Remove")
                                        .on_press(Message::RemoveBookmark(bookmark.id)),
                                ]
                                .spacing(6),
                            )
                            .into()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let list = if entries.is_empty() {
            column![text("No bookmarks yet.").size(13.0)]
        } else {
            Column::with_children(entries).spacing(10)
        };

        side_panel(
            "Bookmarks".to_string(),
            column![form, horizontal_rule(1), scrollable(list)]
                .spacing(8)
                .into(),
        )
    }

    fn statistics_panel(&self) -> Element<'_, Message> {
        let today = Local::now().date_naive();
        let book_minutes = if self.timer.is_running() || self.timer.is_paused() {
            self.timer.total_minutes()
        } else {
            self.current_book().map_or(0, |book| book.reading_minutes)
        };
        let lines = [
            format!("Session: {}", format_session(self.timer.current_session())),
            format!("This book: {book_minutes} min"),
            format!("Today: {} min", self.stats.minutes_on(today)),
            format!("Total: {} min", self.stats.total_reading_minutes),
            format!("Books finished: {}", self.stats.books_read),
            format!("Chapters read: {}", self.stats.total_chapters_read),
            format!("Speed: {} chars/min", self.stats.average_reading_speed),
            format!("Current streak: {} days", self.stats.current_streak),
            format!("Longest streak: {} days", self.stats.longest_streak),
        ];
        let rows: Vec<Element<'_, Message>> =
            lines.into_iter().map(|line| text(line).into()).collect();
        let content = Column::with_children(rows).spacing(6);

        side_panel("Statistics".to_string(), content.into())
    }
}

fn side_panel<'a>(title: String, content: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(16.0), content].spacing(8))
        .padding(8)
        .width(Length::Fixed(PANEL_WIDTH_PX))
        .height(Length::Fill)
        .into()
}

/// Leading ideographic spaces approximating `indent_px` at `font_size`.
fn indent_for(indent_px: f32, font_size: u32) -> String {
    if font_size == 0 || !indent_px.is_finite() || indent_px <= 0.0 {
        return String::new();
    }
    let count = (indent_px / font_size as f32).round() as usize;
    std::iter::repeat_n(IDEOGRAPHIC_SPACE, count).collect()
}

/// Split `page` into `columns` runs of roughly equal character count,
/// breaking at line ends where one falls in the back half of a run.
fn split_columns(page: &str, columns: usize) -> Vec<&str> {
    let columns = columns.max(1);
    let total = page.chars().count();
    if columns == 1 || total == 0 {
        return vec![page];
    }
    let per_column = total.div_ceil(columns);
    let mut parts = Vec::with_capacity(columns);
    let mut rest = page;
    for _ in 1..columns {
        let Some((cut, _)) = rest.char_indices().nth(per_column) else {
            break;
        };
        let split_at = rest[..cut]
            .rfind('\n')
            .filter(|&newline| newline >= cut / 2)
            .map_or(cut, |newline| newline + 1);
        let (head, tail) = rest.split_at(split_at);
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_keeps_the_page() {
        assert_eq!(split_columns("abc\ndef", 1), vec!["abc\ndef"]);
    }

    #[test]
    fn columns_cover_the_whole_page() {
        let page = "一二三四五\n六七八九十\n甲乙丙丁戊\n";
        let parts = split_columns(page, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.concat(), page);
        assert_eq!(parts[0], "一二三四五\n");
    }

    #[test]
    fn short_pages_yield_fewer_columns() {
        let parts = split_columns("ab", 3);
        assert_eq!(parts.concat(), "ab");
        assert!(parts.len() <= 3);
    }

    #[test]
    fn indent_rounds_to_whole_characters() {
        assert_eq!(indent_for(32.0, 16).chars().count(), 2);
        assert_eq!(indent_for(0.0, 16), "");
    }
}
