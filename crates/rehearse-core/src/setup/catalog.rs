//! Built-in interview domains with suggested roles.

/// A domain and the roles suggested for it during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainEntry {
    pub name: &'static str,
    pub roles: &'static [&'static str],
}

const DOMAINS: &[DomainEntry] = &[
    DomainEntry {
        name: "Tech & IT",
        roles: &["Software Engineer", "Data Scientist", "Cloud Architect"],
    },
    DomainEntry {
        name: "Business & Sales",
        roles: &["Sales Manager", "Marketing Analyst", "Business Development"],
    },
    DomainEntry {
        name: "Healthcare",
        roles: &["Nurse Practitioner", "Medical Assistant"],
    },
    DomainEntry {
        name: "Finance",
        roles: &["Financial Analyst", "Accountant"],
    },
    DomainEntry {
        name: "Education",
        roles: &["High School Teacher", "University Lecturer"],
    },
    DomainEntry {
        name: "Retail & Hospitality",
        roles: &["Retail Associate", "Restaurant Manager"],
    },
    DomainEntry {
        name: "Creative & Design",
        roles: &["UX/UI Designer", "Graphic Artist"],
    },
    DomainEntry {
        name: "Engineering",
        roles: &["Mechanical Engineer", "Civil Engineer"],
    },
];

/// Read-only view over the built-in domains.
///
/// Roles are suggestions only; setup accepts any non-empty role.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainCatalog;

impl DomainCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All domains in menu order.
    pub fn domains(&self) -> &'static [DomainEntry] {
        DOMAINS
    }

    /// Looks up a domain by name, ignoring ASCII case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&'static DomainEntry> {
        let name = name.trim();
        DOMAINS
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Suggested roles for a domain; empty for unknown domains.
    pub fn roles_for(&self, name: &str) -> &'static [&'static str] {
        self.find(name).map(|entry| entry.roles).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_all_domains_in_order() {
        let names: Vec<&str> = DomainCatalog::new().domains().iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "Tech & IT");
        assert_eq!(names[7], "Engineering");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = DomainCatalog::new();
        let entry = catalog.find("  tech & it ").expect("domain should exist");
        assert_eq!(entry.name, "Tech & IT");
        assert!(entry.roles.contains(&"Software Engineer"));
    }

    #[test]
    fn test_unknown_domain_has_no_roles() {
        let catalog = DomainCatalog::new();
        assert!(catalog.find("Aerospace").is_none());
        assert!(catalog.roles_for("Aerospace").is_empty());
    }
}
