//! Admin API paths, relative to `{base_url}/api/service`
//!
//! Static listings are plain paths. Paths carrying user input are built as
//! segment lists so each value is percent-encoded as a single segment.

/// Group listing
pub const GROUPS: &str = "/groups";

/// User listing
pub const USERS: &str = "/users";

/// Keycloak login events
pub const LOGIN_EVENTS: &str = "/events/main";

/// Keycloak admin events
pub const ADMIN_EVENTS: &str = "/events/admin";

/// Split a static path into its segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Mappers of one identity provider
pub fn sso_mappers(sso_alias: &str) -> [&str; 3] {
    ["idp", sso_alias, "mappers"]
}

/// Delete one identity-provider mapper
pub fn sso_mapper_delete<'a>(sso_alias: &'a str, mapper_id: &'a str) -> [&'a str; 5] {
    ["idp", sso_alias, "mappers", mapper_id, "delete"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_of_static_paths() {
        assert_eq!(segments(GROUPS), vec!["groups"]);
        assert_eq!(segments(LOGIN_EVENTS), vec!["events", "main"]);
        assert_eq!(segments("/api/service"), vec!["api", "service"]);
    }

    #[test]
    fn test_sso_paths_keep_alias_whole() {
        assert_eq!(sso_mappers("a/b"), ["idp", "a/b", "mappers"]);
        assert_eq!(
            sso_mapper_delete("okta", "m1"),
            ["idp", "okta", "mappers", "m1", "delete"]
        );
    }
}
