use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Well-known key the session token lives under.
pub const TOKEN_KEY: &str = "session_token";

/// Local key-value store. The only writer is the login/logout pair, so a
/// write fully replaces the key.
pub struct TokenStore {
    conn: Connection,
}

impl TokenStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.sqlite");
        let store = TokenStore::open(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_put_get_roundtrip() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.put(TOKEN_KEY, "aaa.bbb.ccc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("aaa.bbb.ccc"));
    }

    #[test]
    fn test_put_replaces_existing() {
        let (_dir, store) = temp_store();
        store.put(TOKEN_KEY, "one.two.three").unwrap();
        store.put(TOKEN_KEY, "four.five.six").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("four.five.six"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.put(TOKEN_KEY, "aaa.bbb.ccc").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }
}
