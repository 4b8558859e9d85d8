use super::*;
use acct_core::ID;

/// Identity extracted from a verified token. Lives for one request.
/// Carries no role: that is read from the directory when a policy needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller {
    id: ID<Account>,
}

impl Caller {
    pub fn id(&self) -> ID<Account> {
        self.id
    }
    /// Looks up the caller's own record. `None` when it was deleted after the
    /// token was minted.
    pub async fn resolve<D>(&self, directory: &D) -> Result<Option<Account>, AuthError>
    where
        D: Directory,
    {
        directory.find_by_id(self.id).await
    }
}

impl From<ID<Account>> for Caller {
    fn from(id: ID<Account>) -> Self {
        Self { id }
    }
}
