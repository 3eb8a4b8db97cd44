
pub mod utils;

use ::surrealdb::{Surreal, engine::remote::ws::Client};

use crate::tests::utils::crypto::generate_keypair;
use std::sync::Arc;

use serde::Deserialize;
use surrealdb_migrations::MigrationRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::{
    surrealdb::{SURREALDB_PORT, SurrealDb},
    testcontainers::runners::AsyncRunner,
};

use crate::{MIGRATIONS_DIR, infrastructure::databases::surrealdb};
use crate::{
    config::{AppConfig, HashingConfig},
    container::Container,
};

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test::TestRequest,
};

use serde_json::json;

use rstest::*;

struct Database {
    pub connection: Surreal<Client>,
    pub container: ContainerAsync<SurrealDb>,
}

pub struct TestContext {
    pub db: Database,
    pub config: AppConfig,
    pub container: Arc<Container>,
}

#[fixture]
async fn context() -> TestContext {
    let db_container = SurrealDb::default()
        .with_tag("v2.2.1")
        .start()
        .await
        .unwrap();

    let mut config = AppConfig::load().unwrap();

    config.surrealdb.host = "127.0.0.1".to_string();
    config.surrealdb.port = db_container
        .get_host_port_ipv4(SURREALDB_PORT)
        .await
        .unwrap();
    config.hashing = HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };

    let db_connection = surrealdb::connect(&config.surrealdb).await.unwrap();

    MigrationRunner::new(&db_connection)
        .load_files(&MIGRATIONS_DIR)
        .up()
        .await
        .unwrap();

    let keys = generate_keypair();

    let db = Database {
        connection: db_connection.clone(),
        container: db_container,
    };

    let container = Arc::new(Container::new(db_connection, keys, &config).unwrap());

    TestContext {
        db,
        config,
        container,
    }
}

async fn request_cookie<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = TestRequest::post()
        .uri("/api/v1/account/signin")
        .set_json(json!({
            "username": username,
            "password": password,
        }))
        .send_request(app)
        .await;

    let headers = res.headers().clone();
    let header = headers.get("set-cookie").unwrap();
    let cookie = header.to_str().unwrap();

    Cookie::parse_encoded(cookie.to_owned()).unwrap()
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Error {
    kind: String,
    message: String,
}
