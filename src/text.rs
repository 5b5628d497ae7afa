/// Detect the dominant line ending by first occurrence.
///
/// The engine scans `\n`-normalized text; callers restore `\r\n` on the way
/// out so a fixed document keeps the ending style it arrived with.
pub(crate) fn detect_line_ending(input: &str) -> &'static str {
    let rn_pos = input.find("\r\n");
    let n_pos = input.find('\n');

    if let (Some(rn), Some(n)) = (rn_pos, n_pos) {
        if rn < n {
            return "\r\n";
        }
    } else if rn_pos.is_some() {
        return "\r\n";
    }

    "\n"
}
