/// Fallback when no allowed domain is configured
pub const DEFAULT_ALLOWED_DOMAIN: &str = "company.com";

/// Organizational email-domain policy
///
/// Built once from configuration and injected into every component that
/// admits users. Holds the allowed domain trimmed and lower-cased.
///
/// # Example
/// ```
/// use marketplace_api::domain::user::IdentityGate;
///
/// let gate = IdentityGate::new("Company.com");
/// assert!(gate.is_allowed_email("jane@COMPANY.com"));
/// assert!(!gate.is_allowed_email("jane@gmail.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityGate {
    allowed_domain: String,
}

impl IdentityGate {
    pub fn new(allowed_domain: impl AsRef<str>) -> Self {
        let domain = allowed_domain.as_ref().trim().to_lowercase();
        let allowed_domain = if domain.is_empty() {
            DEFAULT_ALLOWED_DOMAIN.to_string()
        } else {
            domain
        };
        Self { allowed_domain }
    }

    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// True iff `email` has exactly one '@' and its domain equals the
    /// allowed domain, ignoring case
    pub fn is_allowed_email(&self, email: &str) -> bool {
        let Some((_, domain)) = email.trim().split_once('@') else {
            return false;
        };
        !domain.is_empty() && !domain.contains('@') && domain.to_lowercase() == self.allowed_domain
    }
}

impl Default for IdentityGate {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_domain() {
        let gate = IdentityGate::default();
        assert!(gate.is_allowed_email("alice@company.com"));
    }

    #[test]
    fn domain_comparison_ignores_case() {
        let gate = IdentityGate::new("  Company.COM ");
        assert_eq!(gate.allowed_domain(), "company.com");
        assert!(gate.is_allowed_email("alice@CoMpAnY.cOm"));
    }

    #[test]
    fn rejects_other_domain() {
        let gate = IdentityGate::default();
        assert!(!gate.is_allowed_email("alice@gmail.com"));
        assert!(!gate.is_allowed_email("alice@sub.company.com"));
    }

    #[test]
    fn rejects_malformed_input() {
        let gate = IdentityGate::default();
        assert!(!gate.is_allowed_email(""));
        assert!(!gate.is_allowed_email("alice"));
        assert!(!gate.is_allowed_email("alice@"));
        assert!(!gate.is_allowed_email("alice@company.com@company.com"));
    }

    #[test]
    fn empty_configuration_falls_back_to_default() {
        let gate = IdentityGate::new("   ");
        assert_eq!(gate.allowed_domain(), DEFAULT_ALLOWED_DOMAIN);
    }

    #[test]
    fn two_gates_coexist_with_different_domains() {
        let corp = IdentityGate::new("company.com");
        let lab = IdentityGate::new("lab.example");

        assert!(corp.is_allowed_email("a@company.com"));
        assert!(!corp.is_allowed_email("a@lab.example"));
        assert!(lab.is_allowed_email("a@lab.example"));
    }
}
