//! Path alias rewriting
//!
//! Arguments starting with `cf_o/`, `cf_s/` or `cf_i/` are expanded to the
//! organization, space or instance backend path of the service key. Every
//! other argument passes through untouched, and the argument count and order
//! never change.

use cf_vault_core::{
    CommandArguments, CredentialRecord, INSTANCE_PREFIX, ORG_PREFIX, PATH_SEPARATOR, SPACE_PREFIX,
};

/// Which backend path of a [`CredentialRecord`] an alias expands to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendScope {
    Organization,
    Space,
    Instance,
}

impl BackendScope {
    /// The backend path for this scope
    #[must_use]
    pub fn backend_path(self, creds: &CredentialRecord) -> &str {
        match self {
            BackendScope::Organization => &creds.shared_org_path,
            BackendScope::Space => &creds.shared_space_path,
            BackendScope::Instance => &creds.generic_backend_path,
        }
    }
}

/// A literal argument prefix and the backend it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub prefix: &'static str,
    pub scope: BackendScope,
}

/// The fixed rules, in the order they are tried
pub const REWRITE_RULES: [RewriteRule; 3] = [
    RewriteRule {
        prefix: ORG_PREFIX,
        scope: BackendScope::Organization,
    },
    RewriteRule {
        prefix: SPACE_PREFIX,
        scope: BackendScope::Space,
    },
    RewriteRule {
        prefix: INSTANCE_PREFIX,
        scope: BackendScope::Instance,
    },
];

impl RewriteRule {
    /// Expand `arg` if it starts with this rule's prefix
    #[must_use]
    pub fn apply(&self, arg: &str, creds: &CredentialRecord) -> Option<String> {
        arg.strip_prefix(self.prefix)
            .map(|rest| format!("{}{PATH_SEPARATOR}{rest}", self.scope.backend_path(creds)))
    }
}

/// Rewrite a single argument; empty backend paths are substituted as-is
#[must_use]
pub fn rewrite_arg(arg: &str, creds: &CredentialRecord) -> String {
    REWRITE_RULES
        .iter()
        .find_map(|rule| rule.apply(arg, creds))
        .unwrap_or_else(|| arg.to_string())
}

/// Rewrite every argument in order
pub fn rewrite<I, S>(args: I, creds: &CredentialRecord) -> CommandArguments
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| rewrite_arg(arg.as_ref(), creds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_vault_core::SecretToken;
    use proptest::prelude::*;

    fn creds(org: &str, space: &str, generic: &str) -> CredentialRecord {
        CredentialRecord {
            name: "my-key".to_string(),
            address: "https://vault.example.com".to_string(),
            token: SecretToken::new("s.tok"),
            generic_backend_path: generic.to_string(),
            shared_org_path: org.to_string(),
            shared_space_path: space.to_string(),
        }
    }

    #[test]
    fn test_organization_alias() {
        let c = creds("orgs/acme", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("cf_o/secret/foo", &c), "orgs/acme/secret/foo");
    }

    #[test]
    fn test_space_alias() {
        let c = creds("orgs/acme", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("cf_s/db/pass", &c), "spaces/dev/db/pass");
    }

    #[test]
    fn test_instance_alias() {
        let c = creds("orgs/acme", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("cf_i/token", &c), "instances/abc123/token");
    }

    #[test]
    fn test_bare_prefix_yields_trailing_separator() {
        let c = creds("orgs/acme", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("cf_i/", &c), "instances/abc123/");
    }

    #[test]
    fn test_empty_backend_is_substituted() {
        let c = creds("", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("cf_o/secret/foo", &c), "/secret/foo");
    }

    #[test]
    fn test_prefix_must_lead() {
        let c = creds("orgs/acme", "spaces/dev", "instances/abc123");
        assert_eq!(rewrite_arg("secret/cf_o/foo", &c), "secret/cf_o/foo");
        assert_eq!(rewrite_arg("cf_o", &c), "cf_o");
        assert_eq!(rewrite_arg("CF_O/foo", &c), "CF_O/foo");
        assert_eq!(rewrite_arg("-field=cf_i/x", &c), "-field=cf_i/x");
    }

    #[test]
    fn test_rewrite_mixed_arguments() {
        let c = creds("orgs/acme", "spaces/dev", "instances/inst-1");
        let args = ["write", "cf_i/secret/data", "value=cf_s/x", "cf_s/db"];

        let rewritten = rewrite(args, &c);

        assert_eq!(
            rewritten.to_vec(),
            vec!["write", "instances/inst-1/secret/data", "value=cf_s/x", "spaces/dev/db"]
        );
    }

    #[test]
    fn test_rules_are_ordered() {
        let prefixes: Vec<_> = REWRITE_RULES.iter().map(|r| r.prefix).collect();
        assert_eq!(prefixes, vec!["cf_o/", "cf_s/", "cf_i/"]);
    }

    proptest! {
        #[test]
        fn test_rewrite_preserves_length_and_order(
            args in prop::collection::vec("(cf_[osi]/)?[a-z/]{0,12}", 0..16),
            org in "[a-z/]{0,8}",
            space in "[a-z/]{0,8}",
            generic in "[a-z/]{0,8}",
        ) {
            let c = creds(&org, &space, &generic);
            let rewritten = rewrite(&args, &c);

            prop_assert_eq!(rewritten.len(), args.len());
            for (original, output) in args.iter().zip(rewritten.iter()) {
                prop_assert_eq!(output, &rewrite_arg(original, &c));
            }
        }

        #[test]
        fn test_unprefixed_arguments_pass_through(
            arg in "[a-zA-Z0-9_=./-]{0,24}",
            org in "[a-z/]{0,8}",
        ) {
            prop_assume!(!REWRITE_RULES.iter().any(|r| arg.starts_with(r.prefix)));
            let c = creds(&org, "spaces/dev", "instances/abc");
            prop_assert_eq!(rewrite([arg.as_str()], &c).to_vec(), vec![arg.clone()]);
        }
    }
}
