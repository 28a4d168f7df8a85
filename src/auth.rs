// Credentials carried in the request's Configuration/Parameters block
use crate::field::strict_int;

pub const MAX_USERNAME_LEN: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCredentials {
    username: Option<String>,
    password: Option<String>,
    company_id: Option<String>,
}

impl AuthCredentials {
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        company_id: Option<String>,
    ) -> Self {
        Self {
            username,
            password,
            company_id,
        }
    }

    /// The username, if present and no longer than 64 characters.
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty() && name.chars().count() <= MAX_USERNAME_LEN)
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }

    /// The company id, if it is a whole positive integer.
    pub fn company_id(&self) -> Option<u64> {
        self.company_id
            .as_deref()
            .and_then(strict_int)
            .filter(|id| *id > 0)
            .and_then(|id| u64::try_from(id).ok())
    }

    pub fn is_valid(&self) -> bool {
        self.password().is_some() && self.username().is_some() && self.company_id().is_some()
    }
}
