use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl UserRole {
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// Usuario administrado por la aplicación. Las credenciales viven en el
/// proveedor de identidad; aquí solo se guarda el vínculo (`firebase_uid`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: String,
    email: String,
    name: String,
    role: UserRole,
    mobile: Option<String>,
    status: bool,
    in_trash: bool,
    firebase_uid: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<String>,
}

impl User {
    // Crear desde valores existentes (para reconstrucción desde BD)
    #[allow(clippy::too_many_arguments)]
    pub fn from_data(
        id: String,
        email: String,
        name: String,
        role: UserRole,
        mobile: Option<String>,
        status: bool,
        in_trash: bool,
        firebase_uid: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
        deleted_by: Option<String>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            role,
            mobile,
            status,
            in_trash,
            firebase_uid,
            created_at,
            updated_at,
            deleted_at,
            deleted_by,
        }
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.status
    }

    pub fn in_trash(&self) -> bool {
        self.in_trash
    }

    /// UID en el proveedor de identidad, si el usuario está vinculado
    pub fn firebase_uid(&self) -> Option<&str> {
        self.firebase_uid.as_deref().filter(|uid| !uid.is_empty())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn deleted_by(&self) -> Option<&str> {
        self.deleted_by.as_deref()
    }

    /// Cambios de estado al mover a la papelera. `TrashPgRepository` aplica
    /// las mismas columnas en SQL; los repositorios en memoria usan este método.
    pub fn move_to_trash(&mut self, deleted_by: &str, at: DateTime<Utc>) {
        self.in_trash = true;
        self.status = false;
        self.deleted_at = Some(at);
        self.deleted_by = Some(deleted_by.to_string());
        self.updated_at = at;
    }

    /// Inverso de `move_to_trash`; mismas columnas que el UPDATE de restauración
    pub fn restore(&mut self, at: DateTime<Utc>) {
        self.in_trash = false;
        self.status = true;
        self.deleted_at = None;
        self.deleted_by = None;
        self.updated_at = at;
    }
}
