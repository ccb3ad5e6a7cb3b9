//! Display labels and value formatting for the calendar (es-ES).

use chrono::{Datelike, NaiveDate};
use url::Url;

/// Label shown instead of a price when an event costs nothing.
pub const FREE_LABEL: &str = "Gratis";

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// Spanish name for a 1-based month; empty for anything outside 1..=12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// `Gratis` for exactly zero, otherwise a dollar amount with two decimals.
pub fn format_cost(cost: f64) -> String {
    if cost == 0.0 {
        return FREE_LABEL.to_string();
    }
    format!("${:.2}", cost)
}

/// Short es-ES date: day/month/year without zero padding.
pub fn format_date_es(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Overflow marker for a day cell hiding `hidden` events.
pub fn overflow_label(hidden: usize) -> String {
    format!("+{} más", hidden)
}

/// Turn an event link into an openable URL.
///
/// Links without an `http://` or `https://` prefix get `https://`.
pub fn normalize_external_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host().is_some() => Some(url),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Dropping unusable event link {:?}: {}", raw, e);
            None
        }
    }
}
