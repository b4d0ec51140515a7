/// Database row types — these map directly to SQLite rows.
/// Distinct from tether-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub nickname: Option<String>,
    pub image: Option<String>,
    pub created_at: String,
}
