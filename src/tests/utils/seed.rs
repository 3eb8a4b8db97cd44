use ::surrealdb::{Surreal, engine::remote::ws::Client, sql::Thing};

pub struct SeededAccount {
    pub id: String,
    pub username: String,
    pub password: String,
}

/// Inserts an account whose hash SurrealDB itself computes, so sign-in is
/// checked against an Argon2 PHC string produced outside this crate.
pub async fn seed_account(conn: &Surreal<Client>) -> SeededAccount {
    let username = "test_account";
    let password = "secret1";

    let mut response = conn
        .query(
            r#"
            LET $account = (CREATE account CONTENT {
                username: $username,
                password_hash: crypto::argon2::generate($password)
            });
            RETURN $account[0].id;
            "#,
        )
        .bind(("username", username))
        .bind(("password", password))
        .await
        .unwrap();

    let thing: Option<Thing> = response.take(1).unwrap();

    SeededAccount {
        id: thing.unwrap().id.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}
