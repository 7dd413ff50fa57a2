//! Newline-delimited list bodies

/// Split a text body into its non-empty lines.
///
/// Lines end with `\n` or `\r\n`. Empty lines are dropped and order is kept.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render items as a newline-delimited body, one item per line.
pub fn join_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().fold(String::new(), |mut body, item| {
        body.push_str(item.as_ref());
        body.push('\n');
        body
    })
}
