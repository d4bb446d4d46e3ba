use std::path::PathBuf;

/// Maps a site path to the file that serves it from a static host.
///
/// `/` becomes `index.html` and `/projects/my-app` becomes
/// `projects/my-app/index.html`. Segments are made filesystem-safe; an
/// empty or dot-only segment yields `None`.
pub fn page_file_name(site_path: &str) -> Option<PathBuf> {
    let mut file = PathBuf::new();
    for segment in site_path.split('/').filter(|s| !s.is_empty()) {
        let decoded = urlencoding::decode(segment).ok()?;
        let safe = sanitize_segment(&decoded)?;
        file.push(safe);
    }
    file.push("index.html");
    Some(file)
}

fn sanitize_segment(input: &str) -> Option<String> {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        return None;
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    Some(cleaned)
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
