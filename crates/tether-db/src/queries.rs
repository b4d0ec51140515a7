use crate::Database;
use crate::models::UserRow;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- User directory --

    pub fn upsert_user(
        &self,
        id: &str,
        username: &str,
        nickname: Option<&str>,
        image: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, nickname, image) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    username = excluded.username,
                    nickname = excluded.nickname,
                    image = excluded.image,
                    updated_at = datetime('now')",
                rusqlite::params![id, username, nickname, image],
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    pub fn user_exists(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT 1 FROM users WHERE id = ?1", [id], |row| row.get(0))
                .optional()?;
            Ok(found.is_some())
        })
    }
}

fn query_user(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, username, nickname, image, created_at FROM users WHERE id = ?1",
            [id],
            |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    nickname: row.get(2)?,
                    image: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn upsert_then_get_round_trips() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user("u1", "alice", Some("Ali"), None).unwrap();

        let row = db.get_user("u1").unwrap().unwrap();
        assert_eq!(row.username, "alice");
        assert_eq!(row.nickname.as_deref(), Some("Ali"));
        assert!(row.image.is_none());
    }

    #[test]
    fn upsert_overwrites_profile_fields() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user("u1", "alice", None, None).unwrap();
        db.upsert_user("u1", "alice", Some("Ali"), Some("https://cdn/a.png"))
            .unwrap();

        let row = db.get_user("u1").unwrap().unwrap();
        assert_eq!(row.nickname.as_deref(), Some("Ali"));
        assert_eq!(row.image.as_deref(), Some("https://cdn/a.png"));
    }

    #[test]
    fn missing_user_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_user("nope").unwrap().is_none());
        assert!(!db.user_exists("nope").unwrap());
    }
}
