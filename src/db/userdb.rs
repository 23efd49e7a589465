// db/userdb.rs
use async_trait::async_trait;
use chrono::Utc;

use super::db::DBClient;
use crate::models::usermodel::{FreelancerStats, FreelancerSummary, User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<i64>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: i64,
        skills: Option<String>,
        company_name: Option<String>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn update_user_email(
        &self,
        user_id: i64,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: i64,
        password: String,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_freelancers(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<FreelancerSummary>, sqlx::Error>;

    async fn get_user_ids_by_role(&self, role: UserRole) -> Result<Vec<i64>, sqlx::Error>;

    async fn get_freelancer_stats(&self, user_id: i64) -> Result<FreelancerStats, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<i64>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, role, skills, company_name, created_at
                FROM users
                WHERE id = ?
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, role, skills, company_name, created_at
                FROM users
                WHERE email = ?
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, password, role, skills, company_name, created_at
            "#,
        )
        .bind(name.into())
        .bind(email.into())
        .bind(password.into())
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: i64,
        skills: Option<String>,
        company_name: Option<String>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET skills = COALESCE(?, skills), company_name = COALESCE(?, company_name)
            WHERE id = ?
            RETURNING id, name, email, password, role, skills, company_name, created_at
            "#,
        )
        .bind(skills)
        .bind(company_name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_user_email(
        &self,
        user_id: i64,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = ?
            WHERE id = ?
            RETURNING id, name, email, password, role, skills, company_name, created_at
            "#,
        )
        .bind(email)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: i64,
        password: String,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password = ?
            WHERE id = ?
            RETURNING id, name, email, password, role, skills, company_name, created_at
            "#,
        )
        .bind(password)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_freelancers(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<FreelancerSummary>, sqlx::Error> {
        let pattern = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("%{}%", n.to_lowercase()));

        sqlx::query_as::<_, FreelancerSummary>(
            r#"
            SELECT id, name, email, skills
            FROM users
            WHERE role = 'freelancer'
              AND (?1 IS NULL OR LOWER(name) LIKE ?1)
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_ids_by_role(&self, role: UserRole) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE role = ? ORDER BY id")
            .bind(role)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_freelancer_stats(&self, user_id: i64) -> Result<FreelancerStats, sqlx::Error> {
        sqlx::query_as::<_, FreelancerStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM bids
                  WHERE freelancer_id = ?1 AND status = 'Completed') AS completed_jobs,
                (SELECT COUNT(*) FROM bids
                  WHERE freelancer_id = ?1 AND status = 'Approved') AS ongoing_jobs,
                (SELECT AVG(rating) FROM reviews
                  WHERE reviewed_id = ?1) AS average_rating,
                (SELECT COALESCE(SUM(bid_amount), 0.0) FROM bids
                  WHERE freelancer_id = ?1 AND status IN ('Completed', 'Approved')) AS total_earnings
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
