//! Byte-order mark detection on the first header cell.

/// Known byte-order marks, in the order they are checked.
///
/// The first match wins, so a UTF-32LE mark is reported (and stripped) as
/// UTF-16LE, whose mark is its prefix.
pub static BYTE_ORDER_MARKS: &[(&str, &[u8])] = &[
    ("UTF-8", &[0xEF, 0xBB, 0xBF]),
    ("UTF-16LE", &[0xFF, 0xFE]),
    ("UTF-16BE", &[0xFE, 0xFF]),
    ("UTF-32LE", &[0xFF, 0xFE, 0x00, 0x00]),
    ("UTF-32BE", &[0x00, 0x00, 0xFE, 0xFF]),
];

/// Returns the encoding name of the byte-order mark `cell` starts with.
pub fn detect_bom(cell: &[u8]) -> Option<&'static str> {
    BYTE_ORDER_MARKS
        .iter()
        .find(|(_, mark)| cell.starts_with(mark))
        .map(|(name, _)| *name)
}

/// Strips a leading byte-order mark, if any.
pub fn strip_bom(cell: &[u8]) -> &[u8] {
    BYTE_ORDER_MARKS
        .iter()
        .find_map(|(_, mark)| cell.strip_prefix(*mark))
        .unwrap_or(cell)
}

/// Decodes header cells into names, stripping a byte-order mark from the first one.
pub fn header_names<H: AsRef<[u8]>>(headers: &[H]) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let cell = cell.as_ref();
            let cell = if i == 0 { strip_bom(cell) } else { cell };
            String::from_utf8_lossy(cell).into_owned()
        })
        .collect()
}
