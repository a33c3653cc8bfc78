//! Pure markdown escaping utilities.
//!
//! Text is escaped so it reads back as literal text: characters that open
//! inline formatting are escaped everywhere, characters that only matter as
//! block markers are escaped only at the start of a line.

/// Escape special Markdown characters in a single line of text.
///
/// Escaped anywhere: `\`, `*`, `_`, `` ` ``, `[`, `]`.
/// Escaped at line start: `-`, `+ `, `=`, `#` (ATX heading), `>`, `~~~`
/// and `N. ` (ordered list marker).
///
/// # Examples
///
/// ```
/// use marticle::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*", false), "\\*bold\\*");
/// assert_eq!(escape_markdown("# not a heading", true), "\\# not a heading");
/// assert_eq!(escape_markdown("# mid-line", false), "# mid-line");
/// ```
pub fn escape_markdown(text: &str, at_line_start: bool) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    let rest = if at_line_start {
        escape_line_start(text, &mut result)
    } else {
        text
    };

    for c in rest.chars() {
        match c {
            '\\' | '*' | '_' | '`' | '[' | ']' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Escape a block marker at the start of `text`, returning the unprocessed rest.
fn escape_line_start<'a>(text: &'a str, out: &mut String) -> &'a str {
    if text.starts_with("+ ") || text.starts_with('-') || text.starts_with('>') {
        out.push('\\');
        let marker_len = if text.starts_with('+') { 2 } else { 1 };
        out.push_str(&text[..marker_len]);
        return &text[marker_len..];
    }

    if text.starts_with("~~~") {
        out.push_str("\\~~~");
        return &text[3..];
    }

    let equals = text.bytes().take_while(|&b| b == b'=').count();
    if equals > 0 {
        out.push('\\');
        out.push_str(&text[..equals]);
        return &text[equals..];
    }

    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && text[hashes..].starts_with(' ') {
        out.push('\\');
        out.push_str(&text[..=hashes]);
        return &text[hashes + 1..];
    }

    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && text[digits..].starts_with(". ") {
        out.push_str(&text[..digits]);
        out.push_str("\\. ");
        return &text[digits + 2..];
    }

    text
}

/// Calculate the minimum fence length needed for a code block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
///
/// # Examples
///
/// ```
/// use marticle::markdown::calculate_fence_length;
///
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Calculate the minimum backtick count needed for inline code.
///
/// # Examples
///
/// ```
/// use marticle::markdown::calculate_inline_code_ticks;
///
/// assert_eq!(calculate_inline_code_ticks("code"), 1);
/// assert_eq!(calculate_inline_code_ticks("code with ` backtick"), 2);
/// ```
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn longest_run(content: &str, target: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == target {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}
