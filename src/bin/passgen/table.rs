use std::fmt::{self, Display};
use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use passgen::CharacterSet;

use crate::ProgError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum ListFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct SetRow {
    name: &'static str,
    description: &'static str,
    members: String,
    ambiguous: String,
}

impl SetRow {
    fn new(set: CharacterSet) -> SetRow {
        SetRow {
            name: set.name(),
            description: set.describe(),
            members: set.members().iter().collect(),
            ambiguous: set.ambiguous().iter().collect(),
        }
    }
}

impl TableDisplay for SetRow {
    fn columns() -> usize {
        4
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Name",
            1 => "Description",
            2 => "Characters",
            3 => "Ambiguous",
            _ => panic!("column index out of range"),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => self.name,
            1 => self.description,
            2 => &self.members,
            3 => &self.ambiguous,
            _ => panic!("column index out of range"),
        }
    }
}

pub(crate) fn list_sets(format: ListFormat) -> Result<(), ProgError> {
    let rows = CharacterSet::ALL.map(SetRow::new);
    write_sets(&rows, format, io::stdout().lock()).context("failed to output character sets")?;
    Ok(())
}

fn write_sets(rows: &[SetRow], format: ListFormat, mut output: impl Write) -> anyhow::Result<()> {
    match format {
        ListFormat::Table => display_table(rows, &mut output)?,
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut output, rows)?;
            writeln!(output)?;
        }
        ListFormat::Yaml => serde_yaml::to_writer(&mut output, rows)?,
    }
    Ok(())
}

pub fn display_table<ItemType: TableDisplay>(
    rows: &[ItemType],
    mut output: impl Write,
) -> io::Result<()> {
    let column_count = ItemType::columns();
    let mut column_widths = Vec::with_capacity(column_count);
    for column_index in 0..column_count {
        column_widths.push(ItemType::column_name(column_index).width());
    }

    for row in rows {
        for column_index in 0..column_count {
            column_widths[column_index] = std::cmp::max(
                row.item(column_index).width(),
                column_widths[column_index],
            );
        }
    }

    output_row(&mut output, column_count, |column_index| {
        Padded(
            ItemType::column_name(column_index),
            column_widths[column_index],
        )
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in rows {
        output_row(&mut output, column_count, |column_index| {
            Padded(row.item(column_index), column_widths[column_index])
        })?;
    }

    Ok(())
}

pub trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> &str;
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index > 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        f.write_str(self.0)?;
        for _ in 0..padding {
            f.write_str(" ")?;
        }
        Ok(())
    }
}
