// service/account_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    dtos::userdtos::{
        FilterUserDto, ProfileDto, SignupDto, UpdateEmailDto, UpdatePasswordDto, UpdateProfileDto,
    },
    error::ErrorMessage,
    models::usermodel::{FreelancerSummary, User, UserRole},
    service::error::{is_unique_violation, ServiceError},
    utils::{password, validation},
};

#[derive(Debug, Clone)]
pub struct AccountService {
    db_client: Arc<DBClient>,
}

fn hash_password(raw: &str) -> Result<String, ServiceError> {
    password::hash(raw).map_err(|e| match e {
        ErrorMessage::ExceededMaxPasswordLength(_) => ServiceError::Validation(e.to_string()),
        other => ServiceError::from(other),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AccountService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn signup(&self, body: SignupDto) -> Result<User, ServiceError> {
        let role = body
            .role
            .as_deref()
            .and_then(UserRole::parse)
            .ok_or(ServiceError::InvalidRole)?;

        let email = body.email.unwrap_or_default().trim().to_string();
        if !validation::is_valid_email(&email) {
            return Err(ServiceError::InvalidEmailFormat);
        }

        let raw_password = body.password.unwrap_or_default();
        if !validation::is_strong_password(&raw_password) {
            return Err(ServiceError::WeakPassword);
        }

        let name = non_blank(body.name)
            .ok_or(ServiceError::MissingFields("Missing required fields!"))?;

        let hashed = hash_password(&raw_password)?;

        let user = self
            .db_client
            .save_user(name.trim().to_string(), email, hashed, role)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::DuplicateEmail
                } else {
                    ServiceError::Database(e)
                }
            })?;

        tracing::info!("user {} signed up as {}", user.id, user.role.to_str());
        Ok(user)
    }

    pub async fn login(
        &self,
        email: Option<String>,
        raw_password: Option<String>,
    ) -> Result<User, ServiceError> {
        let (Some(email), Some(raw_password)) = (email, raw_password) else {
            return Err(ServiceError::InvalidCredentials);
        };

        let user = self
            .db_client
            .get_user(None, Some(email.trim()))
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        let matched = password::compare(&raw_password, &user.password)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        if !matched {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<FilterUserDto, ServiceError> {
        let user = self
            .db_client
            .get_user(Some(user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        Ok(FilterUserDto::filter_user(&user))
    }

    pub async fn get_profile(&self, user_id: Option<i64>) -> Result<ProfileDto, ServiceError> {
        let user_id = user_id.ok_or(ServiceError::UserNotFound)?;
        let user = self
            .db_client
            .get_user(Some(user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        let stats = match user.role {
            UserRole::Freelancer => Some(self.db_client.get_freelancer_stats(user.id).await?),
            UserRole::Client => None,
        };

        Ok(ProfileDto::new(&user, stats))
    }

    pub async fn update_profile(&self, body: UpdateProfileDto) -> Result<ProfileDto, ServiceError> {
        let user_id = body.user_id.ok_or(ServiceError::UserNotFound)?;

        self.db_client
            .update_user_profile(user_id, body.skills, body.company_name)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        self.get_profile(Some(user_id)).await
    }

    pub async fn update_email(&self, body: UpdateEmailDto) -> Result<(), ServiceError> {
        let (Some(user_id), Some(email)) = (body.user_id, non_blank(body.email)) else {
            return Err(ServiceError::MissingFields("User ID and email are required!"));
        };

        let email = email.trim();
        if !validation::is_valid_email(email) {
            return Err(ServiceError::InvalidEmailFormat);
        }

        self.db_client
            .update_user_email(user_id, email)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::EmailTaken
                } else {
                    ServiceError::Database(e)
                }
            })?
            .ok_or(ServiceError::UserNotFound)?;

        Ok(())
    }

    pub async fn update_password(&self, body: UpdatePasswordDto) -> Result<(), ServiceError> {
        let (Some(user_id), Some(raw_password)) = (body.user_id, non_blank(body.password)) else {
            return Err(ServiceError::MissingFields("User ID and password are required!"));
        };

        if !validation::is_strong_password(&raw_password) {
            return Err(ServiceError::WeakPassword);
        }

        let hashed = hash_password(&raw_password)?;

        self.db_client
            .update_user_password(user_id, hashed)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        Ok(())
    }

    pub async fn list_freelancers(
        &self,
        name: Option<String>,
    ) -> Result<Vec<FreelancerSummary>, ServiceError> {
        Ok(self.db_client.get_freelancers(name.as_deref()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::test_client;

    fn signup_body(name: &str, email: &str, pass: &str, role: &str) -> SignupDto {
        SignupDto {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(pass.to_string()),
            role: Some(role.to_string()),
        }
    }

    async fn service() -> AccountService {
        AccountService::new(Arc::new(test_client().await))
    }

    #[tokio::test]
    async fn test_signup_validation_order() {
        let service = service().await;

        let err = service
            .signup(signup_body("A", "bad-email", "12", "admin"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRole));

        let err = service
            .signup(signup_body("A", "bad-email", "12", "client"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidEmailFormat));

        let err = service
            .signup(signup_body("A", "a@b.co", "12345", "client"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::WeakPassword));
    }

    #[tokio::test]
    async fn test_signup_hashes_and_rejects_duplicates() {
        let service = service().await;
        let user = service
            .signup(signup_body("Carol", "carol@example.com", "secret1", "client"))
            .await
            .unwrap();
        assert_ne!(user.password, "secret1");

        let err = service
            .signup(signup_body("Other", "carol@example.com", "secret1", "freelancer"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_login() {
        let service = service().await;
        service
            .signup(signup_body("Carol", "carol@example.com", "secret1", "client"))
            .await
            .unwrap();

        let user = service
            .login(Some("carol@example.com".into()), Some("secret1".into()))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Client);

        let wrong = service
            .login(Some("carol@example.com".into()), Some("nope123".into()))
            .await
            .unwrap_err();
        assert!(matches!(wrong, ServiceError::InvalidCredentials));

        let unknown = service
            .login(Some("ghost@example.com".into()), Some("secret1".into()))
            .await
            .unwrap_err();
        assert!(matches!(unknown, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_profile_shapes_by_role() {
        let service = service().await;
        let client = service
            .signup(signup_body("Carol", "carol@example.com", "secret1", "client"))
            .await
            .unwrap();
        let freelancer = service
            .signup(signup_body("Frank", "frank@example.com", "secret1", "freelancer"))
            .await
            .unwrap();

        let client_profile = service.get_profile(Some(client.id)).await.unwrap();
        assert!(client_profile.stats.is_none());

        let freelancer_profile = service.get_profile(Some(freelancer.id)).await.unwrap();
        let stats = freelancer_profile.stats.unwrap();
        assert_eq!(stats.average_rating, "N/A");
        assert_eq!(stats.total_earnings, 0.0);

        assert!(matches!(
            service.get_profile(Some(999)).await,
            Err(ServiceError::UserNotFound)
        ));
        assert!(matches!(
            service.get_profile(None).await,
            Err(ServiceError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_email_and_password() {
        let service = service().await;
        let carol = service
            .signup(signup_body("Carol", "carol@example.com", "secret1", "client"))
            .await
            .unwrap();
        service
            .signup(signup_body("Frank", "frank@example.com", "secret1", "freelancer"))
            .await
            .unwrap();

        let taken = service
            .update_email(UpdateEmailDto {
                user_id: Some(carol.id),
                email: Some("frank@example.com".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(taken, ServiceError::EmailTaken));

        let missing = service
            .update_email(UpdateEmailDto {
                user_id: Some(carol.id),
                email: None,
            })
            .await
            .unwrap_err();
        assert_eq!(missing.to_string(), "User ID and email are required!");

        service
            .update_password(UpdatePasswordDto {
                user_id: Some(carol.id),
                password: Some("newsecret".into()),
            })
            .await
            .unwrap();

        assert!(service
            .login(Some("carol@example.com".into()), Some("newsecret".into()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let service = service().await;
        let carol = service
            .signup(signup_body("Carol", "carol@example.com", "secret1", "client"))
            .await
            .unwrap();

        let profile = service
            .update_profile(UpdateProfileDto {
                user_id: Some(carol.id),
                skills: None,
                company_name: Some("Acme".into()),
            })
            .await
            .unwrap();
        assert_eq!(profile.company_name.as_deref(), Some("Acme"));
        assert!(profile.skills.is_none());
    }
}
