/// Convert an XHTML fragment to plain markdown.
///
/// Fragments may start or stop in the middle of an element when a section
/// boundary falls inside a document; the converter tolerates unbalanced tags.
pub fn html_to_markdown(html: &str) -> String {
    tidy(&html2md::parse_html(html))
}

/// Strip trailing spaces, keep at most one blank line between blocks, end with
/// a single newline. Whitespace-only input becomes empty.
fn tidy(md: &str) -> String {
    let mut out = String::with_capacity(md.len());
    let mut previous_blank = true;
    for line in md.lines().map(str::trim_end) {
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push_str(line);
        out.push('\n');
        previous_blank = blank;
    }

    let body = out.trim_end();
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}
