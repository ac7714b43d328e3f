use std::fmt;

use docstore_types::User;

/// An operation an acting user is asking the store to perform.
#[derive(Clone, Debug)]
pub enum Action<'a> {
    Get { uid: &'a str },
    Set { uid: &'a str },
    Delete { uid: &'a str },
    Query,
}

impl fmt::Display for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get { uid } => write!(f, "get:{uid}"),
            Self::Set { uid } => write!(f, "set:{uid}"),
            Self::Delete { uid } => write!(f, "delete:{uid}"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Capability check consulted before every store effect.
///
/// The store core consumes this hook but does not own the policy behind
/// it. Operations invoked without an acting user (`None`) skip the check
/// entirely; that path is reserved for internal and bootstrap use. A
/// denied check fails the operation before any side effect.
pub trait AccessGate: Send + Sync {
    /// Returns `true` if `user` may perform `action`.
    fn allow(&self, user: &User, action: &Action<'_>) -> bool;
}

/// The default gate: every user may do everything.
pub struct AllowAll;

impl AccessGate for AllowAll {
    fn allow(&self, _user: &User, _action: &Action<'_>) -> bool {
        true
    }
}

/// Gate granting full access to members of one group and none to anyone
/// else.
pub struct GroupGate {
    group: String,
}

impl GroupGate {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }
}

impl AccessGate for GroupGate {
    fn allow(&self, user: &User, _action: &Action<'_>) -> bool {
        user.in_group(&self.group)
    }
}
