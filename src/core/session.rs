use crate::core::principal::Principal;
use crate::db::types::PrincipalKind;

/// Identity of the caller for the lifetime of one request.
///
/// Holds a single tagged [`Principal`] together with the id of the persisted login
/// session that authorized it. Built per request by the auth extractor, so logins of
/// different users never share or overwrite each other's state.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionContext {
    current: Option<Current>,
}

#[derive(Debug, Clone)]
struct Current {
    session_id: String,
    principal: Principal,
}

impl SessionContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn authenticated(session_id: impl Into<String>, principal: Principal) -> Self {
        let mut context = Self::new();
        context.set_current(session_id, principal);
        context
    }

    /// Replaces whatever identity was held before.
    pub(crate) fn set_current(&mut self, session_id: impl Into<String>, principal: Principal) {
        self.current = Some(Current { session_id: session_id.into(), principal });
    }

    pub(crate) fn current(&self) -> Option<&Principal> {
        self.current.as_ref().map(|current| &current.principal)
    }

    pub(crate) fn session_id(&self) -> Option<&str> {
        self.current.as_ref().map(|current| current.session_id.as_str())
    }

    /// Username of the current principal if it is of `kind`.
    pub(crate) fn current_identifier(&self, kind: PrincipalKind) -> Option<&str> {
        self.current().filter(|principal| principal.kind() == kind).map(Principal::username)
    }

    /// Swaps in a refreshed copy of the same account (e.g. after a username change).
    /// Returns false and leaves the context untouched for any other account.
    pub(crate) fn replace_principal(&mut self, principal: Principal) -> bool {
        match self.current.as_mut() {
            Some(current) if current.principal.same_account(&principal) => {
                current.principal = principal;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }
}
