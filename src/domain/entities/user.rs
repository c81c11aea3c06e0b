use std::fmt;

/// A chat participant. On WhatsApp the id is the phone part of the JID and
/// the push name is whatever the contact set as their display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub push_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            push_name: None,
        }
    }

    pub fn with_push_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.push_name = Some(name);
        }
        self
    }

    pub fn display_name(&self) -> &str {
        self.push_name.as_deref().unwrap_or(&self.id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_id() {
        let user = User::new("6281234567890");
        assert_eq!(user.display_name(), "6281234567890");

        let named = User::new("6281234567890").with_push_name("Ayu");
        assert_eq!(named.display_name(), "Ayu");
    }

    #[test]
    fn empty_push_name_is_ignored() {
        let user = User::new("1").with_push_name("");
        assert_eq!(user.display_name(), "1");
    }
}
