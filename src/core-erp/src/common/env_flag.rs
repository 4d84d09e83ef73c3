/// True for the accepted spellings of an enabled flag: "1", "true", "yes", "y" (case-insensitive).
pub fn parse_flag(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "1" || v == "true" || v == "yes" || v == "y"
}
