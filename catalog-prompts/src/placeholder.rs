//! Bracketed placeholders such as `[CARGO]` that users fill in before submitting.

use catalog_primitives::PromptRecord;

/// Returns the bracketed placeholders in `text`, in order of first appearance.
///
/// Each entry keeps its brackets so callers can search the draft for it
/// directly. Empty brackets and an unterminated `[` are ignored; brackets do
/// not nest.
#[must_use]
pub fn placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(']') else {
            break;
        };
        let inner = &after_open[..close];
        // a second `[` before the close restarts the scan there
        if let Some(reopen) = inner.rfind('[') {
            rest = &after_open[reopen..];
            continue;
        }
        if !inner.trim().is_empty() {
            let token = format!("[{inner}]");
            if !found.contains(&token) {
                found.push(token);
            }
        }
        rest = &after_open[close + 1..];
    }

    found
}

/// Returns the placeholders in a record's template text.
#[must_use]
pub fn placeholders_of(record: &PromptRecord) -> Vec<String> {
    placeholders(record.content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_placeholders_in_order() {
        let text = "Cargo [CARGO] do órgão [ÓRGÃO], com [NÚMERO] horas.";
        assert_eq!(placeholders(text), ["[CARGO]", "[ÓRGÃO]", "[NÚMERO]"]);
    }

    #[test]
    fn deduplicates_and_keeps_inner_punctuation() {
        let text = "[MATÉRIA, ex: Direito Administrativo] e de novo [MATÉRIA, ex: Direito Administrativo]";
        assert_eq!(placeholders(text), ["[MATÉRIA, ex: Direito Administrativo]"]);
    }

    #[test]
    fn ignores_empty_and_unterminated_brackets() {
        assert!(placeholders("lista [] vazia").is_empty());
        assert!(placeholders("sem fim [CARGO").is_empty());
        assert!(placeholders("texto preenchido").is_empty());
    }

    #[test]
    fn innermost_open_bracket_wins() {
        assert_eq!(placeholders("[a [TEMA] b"), ["[TEMA]"]);
    }
}
