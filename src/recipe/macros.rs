// src/recipe/macros.rs

//! RPM macro expansion for source and patch fields
//!
//! Supported forms:
//! - `%{name}` and `%name`: replaced by the definition, left as-is if undefined
//! - `%{?name}`: the definition, or nothing if undefined
//! - `%{?name:text}` / `%{!?name:text}`: `text` if defined / not defined
//! - `%%`: a literal `%`
//!
//! Definitions are expanded recursively up to [`MAX_DEPTH`] levels. A
//! macro is never expanded inside its own expansion, and expansion stops
//! substituting once the output reaches [`MAX_EXPANDED_LEN`] bytes; the
//! remaining references are kept as written.

/// Maximum nesting of macro-in-macro expansion
pub const MAX_DEPTH: usize = 16;

/// Output size after which references are no longer substituted
pub const MAX_EXPANDED_LEN: usize = 64 * 1024;

/// Substitutions allowed per top-level expansion
const MAX_SUBSTITUTIONS: usize = 4096;

/// Expand macro references in `text` using `lookup` for definitions
pub fn expand<'a>(text: &str, lookup: &dyn Fn(&str) -> Option<&'a str>) -> String {
    if !text.contains('%') {
        return text.to_string();
    }

    let mut expander = Expander {
        lookup,
        active: Vec::new(),
        substitutions: 0,
    };
    let mut out = String::with_capacity(text.len());
    expander.expand_into(text, &mut out);
    out
}

struct Expander<'f, 'a> {
    lookup: &'f dyn Fn(&str) -> Option<&'a str>,
    /// Macros currently being expanded, outermost first
    active: Vec<String>,
    substitutions: usize,
}

impl Expander<'_, '_> {
    fn expand_into(&mut self, text: &str, out: &mut String) {
        let mut rest = text;

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('%') {
                out.push('%');
                rest = tail;
            } else if let Some(body) = after.strip_prefix('{') {
                match matching_brace(body) {
                    Some(end) => {
                        let inner = &body[..end];
                        if !self.expand_braced(inner, out) {
                            out.push_str("%{");
                            out.push_str(inner);
                            out.push('}');
                        }
                        rest = &body[end + 1..];
                    }
                    None => {
                        // Unterminated reference, keep the remainder verbatim
                        out.push_str(&rest[pos..]);
                        rest = "";
                    }
                }
            } else {
                let ident_len = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                let ident = &after[..ident_len];
                let starts_ok = ident
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

                let value = if starts_ok { (self.lookup)(ident) } else { None };
                let substituted = value.is_some_and(|value| self.substitute(ident, value, out));
                if !substituted {
                    out.push('%');
                    out.push_str(ident);
                }
                rest = &after[ident_len..];
            }
        }

        out.push_str(rest);
    }

    /// Expand the contents of a `%{...}` reference; false means "leave as written"
    fn expand_braced(&mut self, inner: &str, out: &mut String) -> bool {
        if let Some(cond) = inner.strip_prefix("!?") {
            let (name, text) = split_conditional(cond);
            if let (None, Some(text)) = ((self.lookup)(name), text) {
                self.expand_into(text, out);
            }
            return true;
        }

        if let Some(cond) = inner.strip_prefix('?') {
            let (name, text) = split_conditional(cond);
            match ((self.lookup)(name), text) {
                (Some(_), Some(text)) => self.expand_into(text, out),
                (Some(value), None) => {
                    if !self.substitute(name, value, out) {
                        out.push_str("%{");
                        out.push_str(inner);
                        out.push('}');
                    }
                }
                (None, _) => {}
            }
            return true;
        }

        match (self.lookup)(inner) {
            Some(value) => self.substitute(inner, value, out),
            None => false,
        }
    }

    /// Append the expansion of `name`; false if it must stay literal
    fn substitute(&mut self, name: &str, value: &str, out: &mut String) -> bool {
        if self.active.len() >= MAX_DEPTH
            || self.active.iter().any(|active| active == name)
            || self.substitutions >= MAX_SUBSTITUTIONS
            || out.len() >= MAX_EXPANDED_LEN
        {
            return false;
        }

        self.substitutions += 1;
        self.active.push(name.to_string());
        self.expand_into(value, out);
        self.active.pop();
        true
    }
}

fn split_conditional(cond: &str) -> (&str, Option<&str>) {
    match cond.split_once(':') {
        Some((name, text)) => (name, Some(text)),
        None => (cond, None),
    }
}

/// Index of the `}` closing a reference whose `{` was just consumed
fn matching_brace(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
