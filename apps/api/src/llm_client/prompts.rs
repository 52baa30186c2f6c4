// Prompt-building utilities shared by every stage.
// The prompt text itself is per stage and per locale, see letter::prompts.

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Values are inserted verbatim and never rescanned, so candidate material
/// that happens to contain `{claims}` or similar cannot pull in other fields.
/// Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match replaced {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let out = fill_template(
            "Dear {name}, welcome to {program}.",
            &[("name", "Ada"), ("program", "PhD")],
        );
        assert_eq!(out, "Dear Ada, welcome to PhD.");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_literal_braces() {
        let out = fill_template(r#"{"risk": "low"} {missing} {x}"#, &[("x", "1")]);
        assert_eq!(out, r#"{"risk": "low"} {missing} 1"#);
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{a}|{b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b}|B");
    }

    #[test]
    fn test_fill_template_repeated_key() {
        assert_eq!(fill_template("{n}+{n}", &[("n", "2")]), "2+2");
    }

    #[test]
    fn test_fill_template_unclosed_brace() {
        assert_eq!(fill_template("open { brace", &[("x", "y")]), "open { brace");
    }
}
