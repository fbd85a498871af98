//! Small text helpers shared by the prompt resolvers and the git wrapper

/// Convert a schema field name into the form shown to the operator
///
/// Underscores become spaces and each word is Title-Cased, so
/// `target_directory` prompts as `Target Directory`.
#[must_use]
pub fn display_name(field: &str) -> String {
    title_case(&field.replace('_', " "))
}

/// Title-Case a string: the first letter of every word is uppercased and
/// the rest lowercased. Word boundaries are any non-alphabetic character.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }

    out
}
