/// Strip HTML from review comments before storage.
///
/// `<script>` elements are removed along with their content; any other tag
/// is dropped but its text content kept. Comments are plain text as far as
/// the application is concerned, so there is no allow-list of safe tags.
pub fn sanitize_comment(input: &str) -> Option<String> {
    let stripped = strip_html(input);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];

        if starts_with_ignore_ascii_case(after, "<script") {
            match find_ignore_ascii_case(after, "</script>") {
                Some(end) => rest = &after[end + "</script>".len()..],
                None => return out, // unterminated script swallows the rest
            }
        } else {
            match after.find('>') {
                Some(end) => rest = &after[end + 1..],
                None => return out,
            }
        }
    }

    out.push_str(rest);
    out
}

fn starts_with_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Byte offset of an ASCII needle in `haystack`, ignoring ASCII case.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    debug_assert!(needle.is_ascii());
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
