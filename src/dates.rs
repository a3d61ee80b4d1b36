//! Date-range driver: turns a station URL template and a closed date
//! interval into the sequence of per-day page URLs.

use chrono::NaiveDate;

/// Placeholder recognized in station URL templates.
const DATE_PLACEHOLDER: &str = "{date}";

/// Lazy iterator over `(date, url)` pairs for `[start, end]` inclusive,
/// one entry per calendar day.
pub struct DateUrlIter {
    template: String,
    current: Option<NaiveDate>,
    end: NaiveDate,
}

pub fn date_url_iter(template: &str, start: NaiveDate, end: NaiveDate) -> DateUrlIter {
    DateUrlIter {
        template: template.to_string(),
        current: Some(start),
        end,
    }
}

impl Iterator for DateUrlIter {
    type Item = (NaiveDate, String);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.current?;
        if date > self.end {
            self.current = None;
            return None;
        }
        self.current = date.succ_opt();
        Some((date, build_url(&self.template, date)))
    }
}

/// Builds the page URL for one day.
///
/// Templates may carry a `{date}` placeholder; every occurrence is replaced
/// with `YYYY-MM-DD`. Plain station URLs get the Weather Underground
/// dashboard daily-table path appended.
pub fn build_url(template: &str, date: NaiveDate) -> String {
    let d = date.format("%Y-%m-%d").to_string();
    if template.contains(DATE_PLACEHOLDER) {
        template.replace(DATE_PLACEHOLDER, &d)
    } else {
        format!("{}/table/{d}/{d}/daily", template.trim_end_matches('/'))
    }
}

/// Derives the short station identifier from a template line: the last path
/// segment, ignoring any `{date}` suffix and a trailing `/table` segment.
pub fn station_id(template: &str) -> &str {
    let base = template.split(DATE_PLACEHOLDER).next().unwrap_or(template);
    let base = base.trim_end_matches('/');
    let base = base.strip_suffix("/table").unwrap_or(base);
    base.rsplit('/').next().unwrap_or(base)
}
