use actix_web::{web, App};
use entity::team::Model as TeamModel;
use roster_api::{
    db::postgres_service::PostgresService,
    types::token::TokenType,
    types::user::DBUserCreate,
    utils::token::{construct_token, encrypt, new_token},
};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient { db }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .configure(roster_api::routes::configure_routes)
    }

    #[allow(dead_code)]
    pub async fn create_test_user(&self) -> (Uuid, String) {
        self.create_user_with(true).await
    }

    #[allow(dead_code)]
    pub async fn create_unverified_user(&self) -> (Uuid, String) {
        self.create_user_with(false).await
    }

    async fn create_user_with(&self, verified: bool) -> (Uuid, String) {
        let key = new_token(TokenType::User);
        let encrypted = encrypt(&key).expect("Failed to encrypt token");
        let random_id = Uuid::new_v4();

        let user_id = self
            .db
            .create_user(DBUserCreate {
                name: "Test User".to_string(),
                email: format!("user-{}@test.com", random_id),
                auth_hash: encrypted,
                role: entity::user::roles::PLAYER,
                verified,
            })
            .await
            .expect("Failed to create user");

        (user_id, construct_token(&user_id, &key))
    }

    #[allow(dead_code)]
    pub async fn create_team_for(&self, captain: Uuid, name: &str) -> TeamModel {
        self.db
            .create_team(captain, name.to_string(), true)
            .await
            .expect("Failed to create team")
    }
}
