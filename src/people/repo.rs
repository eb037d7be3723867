use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

/// One row of the `person` table.
///
/// The `password` column holds a salted one-way hash, never the plaintext,
/// and is excluded from serialization so no rendered or encoded view of a
/// person can leak it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Person {
    /// Exact-match lookup by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, name, email, password
            FROM person
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(person)
    }

    /// Insert a new row and return it with its storage-assigned id. A single
    /// statement, so a failed insert leaves nothing behind.
    pub async fn create(
        db: &SqlitePool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO person (name, email, password)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(person)
    }

    /// Every person, ordered by name ascending.
    pub async fn list_all(db: &SqlitePool) -> anyhow::Result<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, name, email, password
            FROM person
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn create_assigns_ids_and_find_matches_exactly() {
        let state = AppState::in_memory().await.expect("in-memory state");

        let created = Person::create(&state.db, "Kent", "kent@test.com", "hash-1")
            .await
            .expect("insert should succeed");
        assert!(created.id > 0);
        assert_eq!(created.email, "kent@test.com");

        let found = Person::find_by_email(&state.db, "kent@test.com")
            .await
            .expect("lookup should succeed")
            .expect("row should exist");
        assert_eq!(found.id, created.id);

        let missing = Person::find_by_email(&state.db, "nobody@test.com")
            .await
            .expect("lookup should succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_all_orders_by_name() {
        let state = AppState::in_memory().await.expect("in-memory state");

        Person::create(&state.db, "Kent", "kent@test.com", "h1")
            .await
            .unwrap();
        Person::create(&state.db, "Bunny", "bunny@test.com", "h2")
            .await
            .unwrap();

        let people = Person::list_all(&state.db).await.expect("list");
        let names: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bunny", "Kent"]);
    }

    #[tokio::test]
    async fn duplicate_email_violates_the_unique_constraint() {
        let state = AppState::in_memory().await.expect("in-memory state");

        Person::create(&state.db, "Kent", "kent@test.com", "h1")
            .await
            .unwrap();
        let err = Person::create(&state.db, "Anyone", "kent@test.com", "h2")
            .await
            .expect_err("second insert should fail");
        let db_err = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .expect("should be a database error");
        assert!(db_err.is_unique_violation());
    }

    #[test]
    fn serialization_never_includes_the_password() {
        let person = Person {
            id: 1,
            name: "Kent".into(),
            email: "kent@test.com".into(),
            password: "$argon2id$v=19$...".into(),
        };
        let json = serde_json::to_value(&person).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("password"));
        assert_eq!(object.get("email").unwrap(), "kent@test.com");
    }
}
