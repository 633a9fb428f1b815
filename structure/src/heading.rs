//! Heading text normalization.

/// Characters (besides letters, digits and spaces) allowed in a shouted
/// heading that gets title-cased.
const SHOUTED_PUNCTUATION: &[char] = &[',', '\'', '&', '-', '(', ')', '/', ':', '%'];

/// Turns a heading line into display text.
///
/// Whitespace is collapsed. A line written entirely in capitals (letters,
/// digits and title punctuation only) is title-cased word by word, keeping
/// short words and acronyms upper case. Any other line is returned as is.
#[must_use]
pub fn normalize_heading(line: &str) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    if !is_all_caps_title(&collapsed) {
        return collapsed;
    }
    collapsed
        .split(' ')
        .map(|word| {
            if word.chars().count() <= 3 || is_acronym(word) {
                word.to_string()
            } else {
                title_case_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Has letters, no lowercase letters, and only title punctuation.
fn is_all_caps_title(line: &str) -> bool {
    line.chars().any(char::is_alphabetic)
        && line.chars().all(|c| {
            (c.is_alphanumeric() && !c.is_lowercase())
                || c == ' '
                || SHOUTED_PUNCTUATION.contains(&c)
        })
}

/// Mixed letter/digit tokens (`K12`, `COVID19`) and slash-joined
/// abbreviations (`Q/A`) keep their capitals.
fn is_acronym(word: &str) -> bool {
    let has_letter = word.chars().any(char::is_alphabetic);
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    has_letter && (has_digit || word.contains('/'))
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut seen_letter = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if seen_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
                seen_letter = true;
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shouted_headings_become_title_case() {
        assert_eq!(normalize_heading("BIOLOGY UNIT"), "Biology Unit");
        assert_eq!(normalize_heading("LESSON   PLAN:"), "Lesson Plan:");
        assert_eq!(normalize_heading("(INTRODUCTION)"), "(Introduction)");
    }

    #[test]
    fn short_words_and_acronyms_stay_upper() {
        assert_eq!(normalize_heading("DNA AND RNA"), "DNA AND RNA");
        assert_eq!(normalize_heading("THE ROLE OF DNA"), "THE Role OF DNA");
        assert_eq!(normalize_heading("COVID19 SAFETY"), "COVID19 Safety");
        assert_eq!(normalize_heading("STUDENT Q/A"), "Student Q/A");
    }

    #[test]
    fn mixed_case_headings_are_kept() {
        assert_eq!(normalize_heading("Cell   Structure"), "Cell Structure");
        assert_eq!(normalize_heading("WHAT IS DNA?"), "WHAT IS DNA?");
        assert_eq!(normalize_heading("2024"), "2024");
    }
}
