//! Markdown and naming helpers shared by the output backends

/// `s` as inline code
pub fn code(s: &str) -> String {
    format!("`{}`", s)
}

/// Level 3 heading
pub fn section(name: &str) -> String {
    format!("### {}\n", name)
}

/// Lower-cased name with spaces replaced by hyphens (`Other Resources` → `other-resources`)
pub fn hyphenate(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Identifier usable as a file name, URL fragment or XML id
///
/// Like [`hyphenate`], with every character other than ASCII alphanumerics,
/// `-`, `_` and `.` replaced by `-`.
pub fn escape_name(name: &str) -> String {
    hyphenate(name)
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '-',
        })
        .collect()
}

/// First sentence of a description, used as chapter short description
pub fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let line = text.lines().next().unwrap_or("");
    match line.find(". ") {
        Some(idx) => &line[..=idx],
        None => line,
    }
}

/// Prefix every non-empty line of `text` with `indent`
pub fn indent(text: &str, indent: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.is_empty() {
            result.push_str(indent);
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

/// Split a display type into its container prefix and the type name
///
/// `[]Container` gives `("[]", "Container")`, `map[string][]Quantity` gives
/// `("map[string][]", "Quantity")`.
pub fn split_type_prefix(display_type: &str) -> (&str, &str) {
    let mut rest = display_type;
    loop {
        if let Some(r) = rest.strip_prefix("[]") {
            rest = r;
        } else if let Some(r) = rest.strip_prefix("map[string]") {
            rest = r;
        } else {
            break;
        }
    }
    display_type.split_at(display_type.len() - rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(code("apiVersion: v1"), "`apiVersion: v1`");
        assert_eq!(section("PodSpec"), "### PodSpec\n");
    }

    #[test]
    fn test_names() {
        assert_eq!(hyphenate("Other Resources"), "other-resources");
        assert_eq!(escape_name("Pod-v1.PodSpec"), "pod-v1.podspec");
        assert_eq!(escape_name("Config & Storage"), "config---storage");
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(
            first_sentence("Pod is a collection of containers. It runs on a host."),
            "Pod is a collection of containers."
        );
        assert_eq!(first_sentence("  No period here  "), "No period here");
        assert_eq!(first_sentence("Line one\nLine two. More."), "Line one");
        assert_eq!(first_sentence(""), "");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b\n");
    }

    #[test]
    fn test_split_type_prefix() {
        assert_eq!(split_type_prefix("Container"), ("", "Container"));
        assert_eq!(split_type_prefix("[]Container"), ("[]", "Container"));
        assert_eq!(
            split_type_prefix("map[string][]Quantity"),
            ("map[string][]", "Quantity")
        );
    }
}
