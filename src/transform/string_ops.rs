use std::{borrow::Cow, collections::HashSet, sync::LazyLock};

use regex::Regex;

static WORD_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid separator pattern"));

fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '_' || ch == '-'
}

/// Trims leading/trailing whitespace while borrowing the original when unchanged.
pub fn trim(input: &str) -> Cow<'_, str> {
    Cow::Borrowed(input.trim())
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// Words are separated by whitespace, `_` and `-`; the separators themselves
/// are kept. Punctuation before a word's first alphanumeric character (`(`,
/// quotes) is copied through. A word starting with a digit keeps the digit and
/// lowercases what follows. A leading letter whose uppercase form is more than
/// one character (`ß` → `SS`) is left untouched so that the result is stable
/// under repeated application.
pub fn title_case(input: &str) -> Cow<'_, str> {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if is_word_separator(ch) {
            output.push(ch);
            at_word_start = true;
            continue;
        }
        if !at_word_start {
            output.extend(ch.to_lowercase());
            continue;
        }
        if !ch.is_alphanumeric() {
            output.push(ch);
            continue;
        }
        let mut upper = ch.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => output.push(single),
            _ => output.push(ch),
        }
        at_word_start = false;
    }
    if output == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(output)
    }
}

/// Rewrites a column name to Title Case words joined by single spaces,
/// treating runs of whitespace, `_` and `-` as one separator.
pub fn normalize_header(input: &str) -> String {
    WORD_SEPARATORS
        .split(input)
        .filter(|word| !word.is_empty())
        .map(|word| title_case(word).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Makes every name unique by suffixing later duplicates with ` 2`, ` 3`, ...
///
/// The first occurrence keeps its name. Suffixes already taken by another
/// column are skipped.
pub fn disambiguate<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let reserved: HashSet<&str> = names.iter().map(String::as_str).collect();
    let mut output = Vec::with_capacity(names.len());

    for name in &names {
        if taken.insert(name.clone()) {
            output.push(name.clone());
            continue;
        }
        let mut counter = 2usize;
        let unique = loop {
            let candidate = format!("{name} {counter}");
            if !taken.contains(&candidate) && !reserved.contains(candidate.as_str()) {
                break candidate;
            }
            counter += 1;
        };
        taken.insert(unique.clone());
        output.push(unique);
    }
    output
}
