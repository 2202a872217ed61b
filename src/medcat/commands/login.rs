use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::remote::RemoteStore;
use crate::session::TokenStore;

/// Authenticate and persist the returned token. A response without a
/// token is a failure even when the status was a success.
pub fn login<S: RemoteStore, T: TokenStore>(
    store: &S,
    tokens: &T,
    email: &str,
    password: &str,
) -> Result<CmdResult> {
    let token = store.authenticate(email, password)?;
    tokens.save(&token)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged in as {}.", email)));
    Ok(result)
}

pub fn logout<T: TokenStore>(tokens: &T) -> Result<CmdResult> {
    tokens.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info("Logged out."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::{InMemoryStore, Op};
    use crate::session::InMemoryTokenStore;

    #[test]
    fn login_persists_token() {
        let store = InMemoryStore::new();
        let tokens = InMemoryTokenStore::new();

        login(&store, &tokens, "admin@example.org", "hunter2").unwrap();
        assert_eq!(tokens.load().unwrap().as_deref(), Some("test-token"));
    }

    #[test]
    fn failed_auth_saves_nothing() {
        let store = InMemoryStore::new();
        store.fail_on(Op::Authenticate);
        let tokens = InMemoryTokenStore::new();

        assert!(login(&store, &tokens, "admin@example.org", "wrong").is_err());
        assert!(tokens.load().unwrap().is_none());
    }

    #[test]
    fn logout_clears_token() {
        let store = InMemoryStore::new();
        let tokens = InMemoryTokenStore::new();
        login(&store, &tokens, "admin@example.org", "hunter2").unwrap();

        logout(&tokens).unwrap();
        assert!(tokens.load().unwrap().is_none());
    }
}
