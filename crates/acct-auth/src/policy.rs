//! Per-operation access control.
//!
//! Pure decision table over the resolved caller record and the target
//! identity. Handlers resolve both, ask [`authorize`], and only mutate on
//! [`Decision::Allow`].
//!
//! | Operation  | Allowed when                              |
//! |------------|-------------------------------------------|
//! | `Register` | always, no caller needed                  |
//! | `Profile`  | caller record exists                      |
//! | `List`     | caller is admin                           |
//! | `Update`   | caller owns target, or caller is admin    |
//! | `Delete`   | caller owns target, or caller is admin    |
//! | `Grant`    | caller is admin                           |
use super::*;
use acct_core::ID;
use acct_core::Unique;

/// Operation a request wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Profile,
    List,
    Update(ID<Account>),
    Delete(ID<Account>),
    /// Changing an account's administrator flag.
    Grant,
}

/// Entitlement class a denied caller was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Administrator,
    Ownership,
    /// The caller's own record is gone.
    Account,
}

impl std::fmt::Display for Entitlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "administrator permissions"),
            Self::Ownership => write!(f, "ownership or administrator permissions"),
            Self::Account => write!(f, "an existing account"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Entitlement),
}

impl Decision {
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(entitlement) => Err(AuthError::Forbidden(entitlement)),
        }
    }
}

/// Decides `operation` for `caller`, the directory record of the token
/// subject. `None` means the record no longer exists.
pub fn authorize(operation: Operation, caller: Option<&Account>) -> Decision {
    if operation == Operation::Register {
        return Decision::Allow;
    }
    let Some(caller) = caller else {
        return Decision::Deny(Entitlement::Account);
    };
    match operation {
        Operation::Register | Operation::Profile => Decision::Allow,
        Operation::List | Operation::Grant => match caller.is_admin() {
            true => Decision::Allow,
            false => Decision::Deny(Entitlement::Administrator),
        },
        Operation::Update(target) | Operation::Delete(target) => {
            match caller.id() == target || caller.is_admin() {
                true => Decision::Allow,
                false => Decision::Deny(Entitlement::Ownership),
            }
        }
    }
}
