use heck::ToSnakeCase;

pub(crate) fn escape_rust_keyword<T>(string: T) -> String
where
    T: ToString,
{
    let string = string.to_string();
    if RUST_KEYWORDS.iter().any(|s| s.eq(&string)) {
        format!("r#{string}")
    } else if RUST_SPECIAL_KEYWORDS.iter().any(|s| s.eq(&string)) {
        format!("{string}_")
    } else {
        string
    }
}

/// Snake-cased identifier text that is safe to use as a field or module name
pub(crate) fn snake_ident_str(name: &str) -> String {
    let snake = name.to_snake_case();
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        escape_rust_keyword(format!("_{snake}"))
    } else {
        escape_rust_keyword(snake)
    }
}

/// Name behind an identifier from [`snake_ident_str`]: the file stem of a module or the
/// column a field stands for
pub(crate) fn snake_name_str(name: &str) -> String {
    let ident = snake_ident_str(name);
    match ident.strip_prefix("r#") {
        Some(raw) => raw.to_owned(),
        None => ident,
    }
}

pub(crate) const RUST_KEYWORDS: [&str; 48] = [
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "union", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers
pub(crate) const RUST_SPECIAL_KEYWORDS: [&str; 4] = ["crate", "Self", "self", "super"];
