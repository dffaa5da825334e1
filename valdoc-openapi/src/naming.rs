//! Human-readable text derived from identifiers.

/// Split an identifier into words the way a snake-case conversion does.
///
/// Boundaries are non-alphanumeric characters, lower-to-upper transitions
/// (`pageSize`), the end of an acronym (`XMLHttp` -> `XML`, `Http`) and
/// letter/digit transitions (`v1` -> `v`, `1`).
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut current, &mut words);
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            if prev.is_alphanumeric() && is_boundary(prev, c, next) {
                flush(&mut current, &mut words);
            }
        }
        current.push(c);
    }
    flush(&mut current, &mut words);
    words
}

fn is_boundary(prev: char, c: char, next: Option<char>) -> bool {
    let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
    let acronym_end =
        prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase);
    let digit_edge = prev.is_numeric() != c.is_numeric();
    lower_to_upper || acronym_end || digit_edge
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// `snake_case` form of an identifier.
pub fn snake_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Lower-cased words joined by spaces, first letter upper-cased:
/// `"users pageSize"` -> `"Users page size"`.
pub fn sentence(input: &str) -> String {
    upper_first(&snake_case(input).replace('_', " "))
}

pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_and_separators() {
        assert_eq!(words("users pageSize"), vec!["users", "page", "Size"]);
        assert_eq!(words("user-profiles/by_id"), vec!["user", "profiles", "by", "id"]);
    }

    #[test]
    fn splits_acronyms_and_digits() {
        assert_eq!(words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(words("v1users"), vec!["v", "1", "users"]);
    }

    #[test]
    fn snake_case_lowercases() {
        assert_eq!(snake_case("UserController.find"), "user_controller_find");
        assert_eq!(snake_case("  "), "");
    }

    #[test]
    fn sentence_capitalizes_first_letter_only() {
        assert_eq!(sentence("users pageSize"), "Users page size");
        assert_eq!(sentence("widgets"), "Widgets");
        assert_eq!(sentence(""), "");
    }

    #[test]
    fn upper_first_leaves_rest_untouched() {
        assert_eq!(upper_first("users API"), "Users API");
    }
}
