const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Default excerpt length for achievement cards.
pub const EXCERPT_CHARS: usize = 150;

/// Shortens `"September 2023"` to `"Sep 2023"`; anything else is returned as is.
pub fn short_month_date(date: &str) -> String {
    let parts: Vec<&str> = date.split(' ').collect();
    if let [month, year] = parts.as_slice() {
        if MONTHS.contains(month) {
            return format!("{} {}", &month[..3], year);
        }
    }
    date.to_string()
}

/// Cuts `text` to `max_chars` characters and appends `...` when it was longer.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((end, _)) => format!("{}...", text[..end].trim()),
    }
}
