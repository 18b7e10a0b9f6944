/// Line index the metadata line is inserted at (directly after the opening `---`).
pub const INSERT_AT: usize = 1;

/// Render `key: "value"` with YAML double-quote escaping applied to `value`.
pub fn metadata_line(key: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{key}: \"{escaped}\"")
}

/// Insert `line` as the second line of `content`, leaving every other byte untouched.
///
/// The inserted line borrows the first line's terminator (`\r\n` or `\n`). A
/// first line without a terminator gets a `\n` so the result still has the
/// inserted line on its own row. Empty content yields just the inserted line.
pub fn insert_line(content: &[u8], line: &str) -> Vec<u8> {
    let mut lines: Vec<&[u8]> = content.split_inclusive(|b| *b == b'\n').collect();

    let terminator: &[u8] = match lines.first() {
        Some(first) if first.ends_with(b"\r\n") => b"\r\n",
        _ => b"\n",
    };

    let mut inserted = Vec::with_capacity(line.len() + terminator.len());
    inserted.extend_from_slice(line.as_bytes());
    inserted.extend_from_slice(terminator);

    let mut out = Vec::with_capacity(content.len() + inserted.len() + 1);
    if lines.is_empty() {
        out.extend_from_slice(&inserted);
        return out;
    }

    let first = lines.remove(0);
    out.extend_from_slice(first);
    if !first.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(&inserted);
    for rest in lines {
        out.extend_from_slice(rest);
    }
    out
}
