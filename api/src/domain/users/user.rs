pub const USERNAME_MAX_LEN: usize = 100;
pub const NAME_MAX_LEN: usize = 100;

/// A user identity as stored in the `usuario` table.
///
/// The record is a passive value: setters overwrite without validation and
/// every constraint (unique username, column lengths, id assignment) belongs
/// to the store. The credential can be read but has no public mutator; it is
/// only ever filled in by the storage layer when a row is materialized.
///
/// ```compile_fail
/// let mut user = monedas_api::domain::users::user::User::new(1, "ana", "Ana Perez");
/// user.set_password("secret");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    id: i64,
    username: String,
    name: String,
    password: Option<String>,
    roles: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
            password: None,
            roles: None,
        }
    }

    /// Rebuilds a record from a stored row, credential included.
    pub(crate) fn from_row(
        id: i64,
        username: String,
        name: String,
        password: Option<String>,
        roles: Option<String>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            password,
            roles,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn roles(&self) -> Option<&str> {
        self.roles.as_deref()
    }

    pub fn set_roles(&mut self, roles: Option<String>) {
        self.roles = roles;
    }
}
