// Database Models
//
// Serde models for every PsyCare table, together with the table descriptors
// and the ownership rule each one is guarded by.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::store::Table;

/// Integer primary key of `users`, also the subject of every credential.
pub type UserId = i32;

/// A row type stored in one table.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: Table;

    /// Body of the 404 for a missing row or one the caller may not touch.
    const NOT_FOUND: &'static str;

    /// Body of the `{ "message": ... }` answer to a successful delete.
    const DELETED: &'static str;

    /// When set, any authenticated user may list and read rows; writes still
    /// go through [`Resource::is_accessible_by`].
    const SHARED_READS: bool = false;

    /// Whether `subject` owns, or is a party to, this row.
    fn is_accessible_by(&self, subject: UserId) -> bool;
}

// ============================================================================
// USERS
// ============================================================================

/// User account, including the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub pronouns: Option<String>,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public view of a [`User`]; never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub pronouns: Option<String>,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            bio: user.bio,
            pronouns: user.pronouns,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl Resource for User {
    const TABLE: Table = Table {
        name: "users",
        key: "user_id",
        columns: &["name", "email", "password", "bio", "pronouns", "age", "created_at", "updated_at"],
        owners: &["user_id"],
        unique: &["email"],
    };
    const NOT_FOUND: &'static str = "Usuario no encontrado";
    const DELETED: &'static str = "Cuenta eliminada exitosamente";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

// ============================================================================
// PERSONAL TRACKING
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalRecord {
    pub record_id: i32,
    pub user_id: UserId,
    pub emotion: String,
    pub intensity: Option<i32>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl Resource for EmotionalRecord {
    const TABLE: Table = Table {
        name: "emotional_records",
        key: "record_id",
        columns: &["user_id", "emotion", "intensity", "description", "date"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Registro no encontrado";
    const DELETED: &'static str = "Registro emocional eliminado";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub habit_id: i32,
    pub user_id: UserId,
    pub habit_type: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Habit {
    const TABLE: Table = Table {
        name: "habits",
        key: "habit_id",
        columns: &["user_id", "habit_type", "description", "date", "created_at"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Hábito no encontrado";
    const DELETED: &'static str = "Hábito eliminado";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: i32,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub status: String,
}

impl Resource for Alert {
    const TABLE: Table = Table {
        name: "alerts",
        key: "alert_id",
        columns: &["user_id", "type", "description", "date", "status"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Alerta no encontrada";
    const DELETED: &'static str = "Alerta eliminada";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questionnaire_id: i32,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form answers, stored as JSONB.
    pub responses: Value,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Questionnaire {
    const TABLE: Table = Table {
        name: "questionnaires",
        key: "questionnaire_id",
        columns: &["user_id", "type", "responses", "date", "created_at"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Cuestionario no encontrado";
    const DELETED: &'static str = "Cuestionario eliminado";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i32,
    pub user_id: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub read_status: String,
    pub date: DateTime<Utc>,
}

impl Resource for Notification {
    const TABLE: Table = Table {
        name: "notifications",
        key: "notification_id",
        columns: &["user_id", "message", "type", "read_status", "date"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Notificación no encontrada";
    const DELETED: &'static str = "Notificación eliminada";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

/// A therapy session between a patient and a professional. Either party may
/// read, edit or cancel it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: i32,
    pub patient_id: UserId,
    pub professional_id: UserId,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Session {
    const TABLE: Table = Table {
        name: "sessions",
        key: "session_id",
        columns: &["patient_id", "professional_id", "date", "notes", "created_at"],
        owners: &["patient_id", "professional_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Sesión no encontrada";
    const DELETED: &'static str = "Sesión eliminada";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.patient_id == subject || self.professional_id == subject
    }
}

/// One settings row per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub settings_id: i32,
    pub user_id: UserId,
    pub notification_preferences: Option<Value>,
    pub privacy_settings: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Resource for UserSettings {
    const TABLE: Table = Table {
        name: "user_settings",
        key: "settings_id",
        columns: &["user_id", "notification_preferences", "privacy_settings", "created_at"],
        owners: &["user_id"],
        unique: &["user_id"],
    };
    const NOT_FOUND: &'static str = "Configuración no encontrada";
    const DELETED: &'static str = "Configuración eliminada";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportReport {
    pub report_id: i32,
    pub user_id: UserId,
    pub reason: String,
    pub body: String,
    pub page: Option<String>,
    pub folio: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Resource for SupportReport {
    const TABLE: Table = Table {
        name: "support_reports",
        key: "report_id",
        columns: &["user_id", "reason", "body", "page", "folio", "status", "created_at"],
        owners: &["user_id"],
        unique: &["folio"],
    };
    const NOT_FOUND: &'static str = "Reporte no encontrado";
    const DELETED: &'static str = "Reporte eliminado";

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

// ============================================================================
// PUBLISHED CONTENT
// ============================================================================

/// Psychoeducation article written by a professional. Readable by everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i32,
    pub professional_id: UserId,
    pub title: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Article {
    const TABLE: Table = Table {
        name: "articles",
        key: "article_id",
        columns: &["professional_id", "title", "content", "media_url", "media_type", "created_at", "updated_at"],
        owners: &["professional_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Artículo no encontrado o no autorizado";
    const DELETED: &'static str = "Artículo eliminado";
    const SHARED_READS: bool = true;

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.professional_id == subject
    }
}

/// Forum section. Not owned by anyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumIndex {
    pub index_id: i32,
    pub title: String,
    pub description: Option<String>,
}

impl Resource for ForumIndex {
    const TABLE: Table = Table {
        name: "forum_index",
        key: "index_id",
        columns: &["title", "description"],
        owners: &[],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Índice de foro no encontrado";
    const DELETED: &'static str = "Índice de foro eliminado exitosamente";
    const SHARED_READS: bool = true;

    fn is_accessible_by(&self, _subject: UserId) -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumEntry {
    pub entry_id: i32,
    pub index_id: i32,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for ForumEntry {
    const TABLE: Table = Table {
        name: "forum_entries",
        key: "entry_id",
        columns: &["index_id", "user_id", "title", "content", "media_url", "created_at"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Entrada de foro no encontrada";
    const DELETED: &'static str = "Entrada de foro eliminada exitosamente";
    const SHARED_READS: bool = true;

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumComment {
    pub comment_id: i32,
    pub entry_id: i32,
    pub user_id: UserId,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for ForumComment {
    const TABLE: Table = Table {
        name: "forum_entry_comments",
        key: "comment_id",
        columns: &["entry_id", "user_id", "content", "media_url", "created_at"],
        owners: &["user_id"],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Comentario no encontrado";
    const DELETED: &'static str = "Comentario eliminado exitosamente";
    const SHARED_READS: bool = true;

    fn is_accessible_by(&self, subject: UserId) -> bool {
        self.user_id == subject
    }
}

/// Tag on a forum entry. Writes are checked against the entry's author by the
/// tag routes, so the row itself carries no owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumTag {
    pub tag_id: i32,
    pub entry_id: i32,
    pub tag: String,
}

impl Resource for ForumTag {
    const TABLE: Table = Table {
        name: "forum_entry_tags",
        key: "tag_id",
        columns: &["entry_id", "tag"],
        owners: &[],
        unique: &[],
    };
    const NOT_FOUND: &'static str = "Etiqueta no encontrada";
    const DELETED: &'static str = "Etiqueta eliminada exitosamente";
    const SHARED_READS: bool = true;

    fn is_accessible_by(&self, _subject: UserId) -> bool {
        true
    }
}
