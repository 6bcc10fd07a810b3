use serde::Deserialize;

/// The authenticated user, as reported by the login response.
///
/// Every field is best-effort - the backend sometimes returns the token with
/// no user object at all, and nothing downstream may rely on these being set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Principal {
    /// Name for display, falling back to email when no name was provided.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_principal() {
        let json = r#"{"id": 12, "name": "Store Admin", "email": "admin@test.com", "role": "superadmin"}"#;
        let p: Principal = serde_json::from_str(json).expect("parse principal");
        assert_eq!(p.id, Some(12));
        assert_eq!(p.display_name(), "Store Admin");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let p: Principal = serde_json::from_str(r#"{"email": "admin@test.com"}"#).expect("parse");
        assert_eq!(p.display_name(), "admin@test.com");

        let p: Principal = serde_json::from_str("{}").expect("parse");
        assert_eq!(p.display_name(), "unknown");
    }
}
