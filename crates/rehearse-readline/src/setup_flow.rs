//! Parsing of the answers given during interactive setup.
//!
//! Menus accept either the 1-based number shown next to an entry or the
//! entry's name.

use rehearse_core::setup::{DomainCatalog, DomainEntry, InterviewType};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// `quit` or `exit`, in any case.
pub fn is_quit_command(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

fn menu_index(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

pub fn parse_domain_choice(catalog: &DomainCatalog, input: &str) -> Option<&'static DomainEntry> {
    let domains = catalog.domains();
    match menu_index(input, domains.len()) {
        Some(index) => domains.get(index),
        None => catalog.find(input),
    }
}

/// A number picks a suggested role; any other non-blank text is taken as is.
pub fn parse_role_choice(suggestions: &[&str], input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match menu_index(input, suggestions.len()) {
        Some(index) => Some(suggestions[index].to_string()),
        None => Some(input.to_string()),
    }
}

pub fn interview_type_menu() -> Vec<InterviewType> {
    InterviewType::iter().collect()
}

pub fn parse_interview_type_choice(input: &str) -> Option<InterviewType> {
    let types = interview_type_menu();
    match menu_index(input, types.len()) {
        Some(index) => types.get(index).copied(),
        None => InterviewType::from_str(input.trim()).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_command_ignores_case() {
        for input in ["quit", "QUIT", " Exit ", "eXiT"] {
            assert!(is_quit_command(input), "{input:?}");
        }
        assert!(!is_quit_command("quitting"));
        assert!(!is_quit_command("/restart"));
    }

    #[test]
    fn test_domain_by_number_or_name() {
        let catalog = DomainCatalog::new();
        assert_eq!(parse_domain_choice(&catalog, "1").unwrap().name, "Tech & IT");
        assert_eq!(parse_domain_choice(&catalog, " 8 ").unwrap().name, "Engineering");
        assert_eq!(parse_domain_choice(&catalog, "healthcare").unwrap().name, "Healthcare");
        assert!(parse_domain_choice(&catalog, "0").is_none());
        assert!(parse_domain_choice(&catalog, "9").is_none());
        assert!(parse_domain_choice(&catalog, "Astronomy").is_none());
    }

    #[test]
    fn test_role_by_number_or_free_text() {
        let suggestions = ["Software Engineer", "Data Scientist"];
        assert_eq!(parse_role_choice(&suggestions, "2").as_deref(), Some("Data Scientist"));
        assert_eq!(
            parse_role_choice(&suggestions, "  Site Reliability Engineer ").as_deref(),
            Some("Site Reliability Engineer")
        );
        assert_eq!(parse_role_choice(&suggestions, "7").as_deref(), Some("7"));
        assert_eq!(parse_role_choice(&suggestions, "   "), None);
    }

    #[test]
    fn test_interview_type_by_number_or_label() {
        assert_eq!(parse_interview_type_choice("1"), Some(InterviewType::Technical));
        assert_eq!(parse_interview_type_choice("3"), Some(InterviewType::HrBehavioral));
        assert_eq!(parse_interview_type_choice("managerial"), Some(InterviewType::Managerial));
        assert_eq!(parse_interview_type_choice("HR/Behavioral"), Some(InterviewType::HrBehavioral));
        assert_eq!(parse_interview_type_choice("4"), None);
        assert_eq!(parse_interview_type_choice("casual"), None);
    }
}
