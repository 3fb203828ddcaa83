/// Get at most `max_chars` characters from the start of a string
pub fn str_prefix(full_str: &str, max_chars: usize) -> &str {
    match full_str.char_indices().nth(max_chars) {
        Some((end, _)) => &full_str[..end],
        None => full_str,
    }
}

#[cfg(test)]
mod tests {
    use super::str_prefix;

    #[test]
    fn test_str_prefix() {
        assert_eq!(str_prefix("Saltholmen", 4), "Salt");
        assert_eq!(str_prefix("Vrångö", 4), "Vrån");
        assert_eq!(str_prefix("281", 500), "281");
        assert_eq!(str_prefix("", 3), "");
    }
}
