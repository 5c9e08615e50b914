//! Text rendering utilities for error messages.
//!
//! Resolution errors talk about services by type name. Fully qualified
//! names (`alloc::sync::Arc<dyn my_app::mail::Mailer>`) drown the signal,
//! so errors render them through [`shorten_type_name`] and join candidate
//! chains with [`render_chain`].

/// Joins a sequence of names into an arrow-separated chain.
///
/// # Examples
/// ```
/// use sanduq_support::rendering::render_chain;
///
/// let chain = vec!["StampedNotifier", "RetryNotifier", "SmtpNotifier"];
/// assert_eq!(render_chain(&chain), "StampedNotifier → RetryNotifier → SmtpNotifier");
/// ```
pub fn render_chain(entries: &[impl AsRef<str>]) -> String {
    entries
        .iter()
        .map(|entry| entry.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Strips module paths from a fully qualified type name while keeping its
/// generic structure intact.
///
/// ```
/// use sanduq_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::mail::SmtpMailer"), "SmtpMailer");
/// assert_eq!(
///     shorten_type_name("alloc::boxed::Box<dyn my_app::mail::Mailer>"),
///     "Box<dyn Mailer>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment = String::new();
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                // path prefix ends here, drop what we collected
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' => {
                result.push_str(&segment);
                segment.clear();
                result.push(ch);
            }
            _ => segment.push(ch),
        }
    }

    result.push_str(&segment);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_of_one_has_no_arrow() {
        assert_eq!(render_chain(&["SmtpNotifier"]), "SmtpNotifier");
    }

    #[test]
    fn empty_chain_renders_empty() {
        let none: [&str; 0] = [];
        assert_eq!(render_chain(&none), "");
    }

    #[test]
    fn plain_path_is_stripped() {
        assert_eq!(shorten_type_name("core::option::Option"), "Option");
    }

    #[test]
    fn generics_keep_their_shape() {
        assert_eq!(
            shorten_type_name("std::vec::Vec<my_app::jobs::Job>"),
            "Vec<Job>"
        );
    }

    #[test]
    fn trait_objects_keep_dyn() {
        assert_eq!(
            shorten_type_name("alloc::sync::Arc<dyn my_app::mail::Mailer>"),
            "Arc<dyn Mailer>"
        );
    }

    #[test]
    fn tuples_and_references_survive() {
        assert_eq!(
            shorten_type_name("(&std::string::String, core::primitive::u32)"),
            "(&String, u32)"
        );
    }

    #[test]
    fn bare_name_unchanged() {
        assert_eq!(shorten_type_name("Mailer"), "Mailer");
    }
}