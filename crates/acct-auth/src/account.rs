use acct_core::ID;
use acct_core::Unique;
use std::time::SystemTime;

/// Registered account. Owned by the directory; handlers only hold
/// per-request copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: ID<Self>,
    name: String,
    email: String,
    hashword: String,
    admin: bool,
    created: SystemTime,
    updated: SystemTime,
}

impl Account {
    /// New non-admin account with a fresh identity. `hashword` must already be
    /// a digest, never plaintext.
    pub fn new(name: String, email: String, hashword: String) -> Self {
        let now = SystemTime::now();
        Self {
            id: ID::default(),
            name,
            email: normalize(&email),
            hashword,
            admin: false,
            created: now,
            updated: now,
        }
    }
    pub fn hydrate(
        id: ID<Self>,
        name: String,
        email: String,
        hashword: String,
        admin: bool,
        created: SystemTime,
        updated: SystemTime,
    ) -> Self {
        Self {
            id,
            name,
            email,
            hashword,
            admin,
            created,
            updated,
        }
    }
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
    pub fn is_admin(&self) -> bool {
        self.admin
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }
    pub fn updated(&self) -> SystemTime {
        self.updated
    }
    /// Applies the present fields of `patch` and bumps the update time.
    pub fn apply(&mut self, patch: &Patch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = normalize(email);
        }
        if let Some(hashword) = &patch.hashword {
            self.hashword = hashword.clone();
        }
        if let Some(admin) = patch.admin {
            self.admin = admin;
        }
        self.updated = SystemTime::now();
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Partial update issued as a single directory write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub hashword: Option<String>,
    pub admin: Option<bool>,
}

/// Emails are unique case-insensitively.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(feature = "database")]
pub(crate) mod schema {
    /// Table backing the PostgreSQL directory.
    pub const ACCOUNTS: &str = "accounts";
    pub const COLUMNS: &str = "id, name, email, hashword, admin, created, updated";

    pub fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            ACCOUNTS,
            " (
                id          UUID PRIMARY KEY,
                name        TEXT NOT NULL,
                email       VARCHAR(255) UNIQUE NOT NULL,
                hashword    TEXT NOT NULL,
                admin       BOOLEAN NOT NULL DEFAULT FALSE,
                created     TIMESTAMPTZ NOT NULL,
                updated     TIMESTAMPTZ NOT NULL
            );"
        )
    }
    pub fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_accounts_email ON ",
            ACCOUNTS,
            " (email);"
        )
    }
}
