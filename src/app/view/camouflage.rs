use super::super::messages::Message;
use super::super::state::{App, SHEET_SAMPLE_ROWS};
use crate::camouflage::{CamouflageTemplate, SHEET_COLUMNS, sample_code, sample_rows};
use iced::widget::{Column, Row, column, container, horizontal_space, row, scrollable, text};
use iced::{Background, Border, Color, Element, Font, Length};

const SHEET_CELL_WIDTH: f32 = 130.0;
const ROW_HEADER_WIDTH: f32 = 40.0;
const GRID_LINE: Color = Color {
    r: 0.85,
    g: 0.85,
    b: 0.85,
    a: 1.0,
};
const HEADER_FILL: Color = Color {
    r: 0.93,
    g: 0.94,
    b: 0.95,
    a: 1.0,
};
const EDITOR_BACKGROUND: Color = Color {
    r: 0.12,
    g: 0.12,
    b: 0.13,
    a: 1.0,
};
const EDITOR_GUTTER: Color = Color {
    r: 0.45,
    g: 0.45,
    b: 0.48,
    a: 1.0,
};
const EDITOR_TEXT: Color = Color {
    r: 0.85,
    g: 0.86,
    b: 0.88,
    a: 1.0,
};

impl App {
    pub(super) fn camouflage_view(&self) -> Element<'_, Message> {
        match self.camouflage.template {
            CamouflageTemplate::Spreadsheet => spreadsheet(),
            CamouflageTemplate::CodeEditor => code_editor(),
        }
    }
}

fn cell<'a>(content: String, fill: Color) -> Element<'a, Message> {
    container(text(content).size(13.0).color(Color::BLACK))
        .padding([4, 6])
        .width(Length::Fixed(SHEET_CELL_WIDTH))
        .style(move |_| container::Style {
            background: Some(Background::Color(fill)),
            border: Border {
                color: GRID_LINE,
                width: 0.5,
                radius: 0.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn row_header<'a>(label: String) -> Element<'a, Message> {
    container(text(label).size(13.0).color(Color::BLACK))
        .padding([4, 6])
        .width(Length::Fixed(ROW_HEADER_WIDTH))
        .style(|_| container::Style {
            background: Some(Background::Color(HEADER_FILL)),
            ..container::Style::default()
        })
        .into()
}

fn spreadsheet<'a>() -> Element<'a, Message> {
    let mut header: Row<'a, Message> = Row::new().push(row_header(String::new()));
    for name in SHEET_COLUMNS {
        header = header.push(cell(name.to_string(), HEADER_FILL));
    }

    let mut grid: Column<'a, Message> = Column::new().push(header);
    for (idx, sheet_row) in sample_rows(SHEET_SAMPLE_ROWS).iter().enumerate() {
        let mut line: Row<'a, Message> = Row::new().push(row_header((idx + 1).to_string()));
        for value in sheet_row.cells() {
            line = line.push(cell(value.to_string(), Color::WHITE));
        }
        grid = grid.push(line);
    }

    let status = row![
        text("Ready").size(12.0).color(Color::BLACK),
        horizontal_space(),
        text("Sheet1").size(12.0).color(Color::BLACK),
    ];

    container(
        column![
            text("Sales_Report_Q1").size(14.0).color(Color::BLACK),
            scrollable(grid).height(Length::Fill),
            status,
        ]
        .spacing(6)
        .padding(8),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(|_| container::Style {
        background: Some(Background::Color(Color::WHITE)),
        ..container::Style::default()
    })
    .into()
}

fn code_editor<'a>() -> Element<'a, Message> {
    let lines: Vec<Element<'a, Message>> = sample_code()
        .into_iter()
        .map(|(number, line)| {
            row![
                text(format!("{number:>4}"))
                    .font(Font::MONOSPACE)
                    .size(14.0)
                    .color(EDITOR_GUTTER),
                text(line).font(Font::MONOSPACE).size(14.0).color(EDITOR_TEXT),
            ]
            .spacing(16)
            .into()
        })
        .collect();

    container(scrollable(Column::with_children(lines).spacing(2).padding(12)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| container::Style {
            background: Some(Background::Color(EDITOR_BACKGROUND)),
            ..container::Style::default()
        })
        .into()
}
