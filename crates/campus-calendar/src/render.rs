//! Plain-text rendering of the month grid and the side panel.
//!
//! Each view is a `Display` wrapper, so it can be printed directly or
//! turned into a `String` with `to_string()`.

use std::fmt;

use crate::format::{format_cost, format_date_es, WEEKDAY_HEADERS};
use crate::grid::{GridCell, MonthGrid, MAX_VISIBLE_EVENTS};
use crate::view::SidePanel;

/// Inner width of one grid cell, in characters.
pub const CELL_WIDTH: usize = 14;

const NO_UPCOMING: &str = "No hay eventos próximos";

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn write_border(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("+")?;
    for _ in 0..7 {
        write!(f, "{}+", "-".repeat(CELL_WIDTH))?;
    }
    writeln!(f)
}

fn write_row<'s>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'s str>,
) -> fmt::Result {
    f.write_str("|")?;
    for cell in cells {
        write!(f, "{:<width$}|", fit(cell, CELL_WIDTH), width = CELL_WIDTH)?;
    }
    writeln!(f)
}

/// The month as a boxed 7-column table.
///
/// Each week is a day-number line, up to two title lines and an overflow
/// line. Today's number is bracketed.
pub struct MonthView<'g, 'a>(pub &'g MonthGrid<'a>);

impl fmt::Display for MonthView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;
        let total_width = 7 * (CELL_WIDTH + 1) + 1;

        writeln!(f, "{:^width$}", grid.cursor().to_string(), width = total_width)?;
        write_border(f)?;
        let headers: Vec<String> = WEEKDAY_HEADERS
            .iter()
            .map(|h| format!("{:^width$}", h, width = CELL_WIDTH))
            .collect();
        write_row(f, headers.iter().map(String::as_str))?;
        write_border(f)?;

        for week in grid.weeks() {
            // Line 0 holds day numbers, lines 1..=MAX_VISIBLE_EVENTS titles, the last one overflow.
            let mut lines: Vec<Vec<String>> = vec![Vec::with_capacity(7); MAX_VISIBLE_EVENTS + 2];

            for cell in week {
                match cell {
                    GridCell::Blank => {
                        for line in lines.iter_mut() {
                            line.push(String::new());
                        }
                    }
                    GridCell::Day(day) => {
                        lines[0].push(if day.is_today {
                            format!("[{}]", day.day())
                        } else {
                            format!(" {}", day.day())
                        });
                        for slot in 0..MAX_VISIBLE_EVENTS {
                            let title = day
                                .visible_events()
                                .get(slot)
                                .map(|e| format!("· {}", e.title))
                                .unwrap_or_default();
                            lines[slot + 1].push(title);
                        }
                        lines[MAX_VISIBLE_EVENTS + 1]
                            .push(day.overflow_label().unwrap_or_default());
                    }
                }
            }

            for line in &lines {
                write_row(f, line.iter().map(String::as_str))?;
            }
            write_border(f)?;
        }

        Ok(())
    }
}

/// The detail of the selected event, or the upcoming list.
pub struct SidePanelView<'p, 'a>(pub &'p SidePanel<'a>);

impl fmt::Display for SidePanelView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SidePanel::Detail(detail) => {
                writeln!(f, "Detalles del Evento")?;
                writeln!(f, "  {}", detail.title)?;
                if !detail.description.is_empty() {
                    writeln!(f, "  {}", detail.description)?;
                }
                writeln!(f, "  Fecha: {}", detail.date_label)?;
                writeln!(f, "  Costo: {}", detail.cost_label)?;
                if let Some(link) = &detail.link {
                    writeln!(f, "  Más información: {}", link)?;
                }
            }
            SidePanel::Upcoming(events) => {
                writeln!(f, "Próximos Eventos")?;
                if events.is_empty() {
                    writeln!(f, "  {}", NO_UPCOMING)?;
                }
                for event in events {
                    writeln!(
                        f,
                        "  {}  {}  [{}] {}",
                        format_date_es(event.date()),
                        format_cost(event.cost),
                        event.id,
                        event.title
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Screen shown when the fetch failed; retry is only offered here.
pub struct LoadError<'m>(pub &'m str);

impl fmt::Display for LoadError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error al cargar eventos")?;
        writeln!(f, "  {}", self.0)?;
        writeln!(f, "  Intentar de nuevo: vuelve a ejecutar el comando.")
    }
}

pub struct Stats(pub usize);

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Eventos Disponibles", self.0)
    }
}
