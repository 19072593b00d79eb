use crate::record::StatsTable;

// First row whose stat name matches (case-insensitive) wins, walking
// categories in table order and rows in scrape order.
pub fn stat_values<'a>(
    stats: Option<&'a StatsTable>,
    stat_name: &str,
) -> (Option<&'a str>, Option<&'a str>) {
    let Some(stats) = stats else {
        return (None, None);
    };
    for rows in stats.values() {
        for row in rows {
            if row.stat.eq_ignore_ascii_case(stat_name) {
                return (row.home.as_deref(), row.away.as_deref());
            }
        }
    }
    (None, None)
}

pub fn parse_float(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse::<f64>().ok()
}

pub fn parse_percentage(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    raw.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}
