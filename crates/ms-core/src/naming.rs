//! Name normalization and generation casings.
//!
//! Every user-supplied identifier is reduced to a lower snake case comparison
//! key by [`normalize`]. The key is the snake case of the camel case form, so
//! separators that the camel casings drop (`line_1` against `line1`) are
//! dropped from the key too. Every casing used by the generator is derived
//! from the key and is injective over keys, so two names that pass the
//! uniqueness rule never produce the same class, attribute, column or file
//! name.
//!
//! ```
//! use ms_core::naming::{class_name, normalize, table_name};
//!
//! assert_eq!(normalize("UserName"), "user_name");
//! assert_eq!(normalize("user-name"), "user_name");
//! assert_eq!(class_name("user_profile"), "UserProfile");
//! assert_eq!(table_name("Category", false), "categories");
//! assert_eq!(table_name("Category", true), "category");
//! ```

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// Maximum length of a normalized name, in characters.
///
/// Matches the `PostgreSQL` identifier limit, the strictest of the supported
/// dialects. Model names are measured after pluralization.
pub const MAX_NAME_LENGTH: usize = 63;

/// Words whose plural is the word itself.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Plurals that no suffix rule produces.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("index", "indices"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("tooth", "teeth"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("woman", "women"),
];

/// Canonicalizes a name into its lower snake case comparison key.
///
/// Case and separators (`-`, `_`, whitespace, case changes) are insignificant,
/// including a separator before a digit. Total over all inputs.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.to_lower_camel_case().to_snake_case()
}

/// Returns `true` if `raw` matches the identifier grammar.
///
/// The grammar is letters, digits, and underscores, not starting with a
/// digit. The empty string is accepted here; emptiness is reported by the
/// required-name rule instead.
///
/// # Examples
///
/// ```
/// use ms_core::naming::is_identifier;
///
/// assert!(is_identifier("user_name"));
/// assert!(is_identifier("_private"));
/// assert!(is_identifier(""));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("user-name"));
/// assert!(!is_identifier("user name"));
/// ```
#[must_use]
pub fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        Some(_) => false,
    }
}

/// Caps raw input at [`MAX_NAME_LENGTH`] characters.
#[must_use]
pub fn clamp_input(raw: &str) -> String {
    raw.chars().take(MAX_NAME_LENGTH).collect()
}

/// Pluralizes a snake case key by pluralizing its last word.
///
/// # Examples
///
/// ```
/// use ms_core::naming::pluralize;
///
/// assert_eq!(pluralize("post"), "posts");
/// assert_eq!(pluralize("blog_category"), "blog_categories");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("address"), "addresses");
/// ```
#[must_use]
pub fn pluralize(key: &str) -> String {
    match key.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => format!("{head}_{}", pluralize_word(last)),
        _ => pluralize_word(key),
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_owned();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_owned();
    }

    if let Some(stem) = word.strip_suffix('y') {
        let vowel_before = stem.ends_with(&['a', 'e', 'i', 'o', 'u'][..]);
        if !stem.is_empty() && !vowel_before {
            return format!("{stem}ies");
        }
        return format!("{word}s");
    }
    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{stem}ses");
    }
    if word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("sh")
        || word.ends_with("ch")
    {
        return format!("{word}es");
    }
    if word.ends_with('s') {
        return word.to_owned();
    }
    format!("{word}s")
}

/// Class case of a name: `blog post` becomes `BlogPost`.
#[must_use]
pub fn class_name(name: &str) -> String {
    normalize(name).to_upper_camel_case()
}

/// Attribute case of a name: `published_at` becomes `publishedAt`.
#[must_use]
pub fn attribute_name(name: &str) -> String {
    normalize(name).to_lower_camel_case()
}

/// Snake case column name.
#[must_use]
pub fn column_name(name: &str) -> String {
    normalize(name)
}

/// Kebab case used for generated file names.
#[must_use]
pub fn file_stem(name: &str) -> String {
    normalize(name).replace('_', "-")
}

/// Table name of a model, pluralized unless `singular` is set.
#[must_use]
pub fn table_name(name: &str, singular: bool) -> String {
    let key = normalize(name);
    if singular { key } else { pluralize(&key) }
}
