/// Neutralizes an indicator so chat clients do not turn it into a live link
///
/// Every `.` becomes `[.]` and every `://` becomes `[://]`. Applying it twice
/// brackets twice.
pub fn defang(text: &str) -> String {
    text.replace('.', "[.]").replace("://", "[://]")
}
