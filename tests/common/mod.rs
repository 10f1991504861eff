use roster_api::config::{EnvConfig, CONFIG};
use roster_api::db::postgres_service::PostgresService;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

#[allow(dead_code)]
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        init_test_config();

        let postgres = Postgres::default();
        let container = postgres
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

// OnceLock is process-wide, so every test funnels through get_or_init.
pub fn init_test_config() {
    let _ = CONFIG.get_or_init(|| EnvConfig {
        port: 8080,
        db_url: String::new(), // containers hand out their own urls
        admin_key: TEST_ADMIN_KEY.to_string(),
    });
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use roster_api::types::team::RTeamCreate;
    use roster_api::types::user::RUserCreate;

    pub fn sample_user_with_email(email: &str) -> RUserCreate {
        RUserCreate {
            name: "Test User".to_string(),
            email: email.to_string(),
        }
    }

    pub fn sample_team(name: &str) -> RTeamCreate {
        RTeamCreate {
            name: name.to_string(),
            invitations_open: true,
        }
    }
}
