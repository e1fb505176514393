//! Admin credential service: first-run password, login and password change

use std::sync::Arc;

use menu_security::PasswordService;
use tracing::{info, warn};

use super::StoreLock;
use crate::error::DomainError;
use crate::repositories::SiteRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPasswordOutcome {
    /// The submitted password is now the admin credential.
    Established,
    /// A credential already exists; nothing was changed.
    AlreadySet,
    /// The submission was blank.
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordChange<'a> {
    pub current: &'a str,
    pub new: &'a str,
    /// Checked only when the form supplies it.
    pub confirm: Option<&'a str>,
}

pub struct AuthService<R: SiteRepository + ?Sized> {
    repo: Arc<R>,
    lock: StoreLock,
}

impl<R: SiteRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, lock: StoreLock) -> Self {
        Self { repo, lock }
    }

    pub async fn has_password(&self) -> bool {
        self.repo.load_config().await.has_admin_password()
    }

    /// First-run setup. Never overwrites an existing credential.
    pub async fn set_initial_password(&self, password: &str) -> Result<SetPasswordOutcome, DomainError> {
        let password = password.trim();
        let _guard = self.lock.acquire().await;

        let mut config = self.repo.load_config().await;
        if config.has_admin_password() {
            warn!("Ignoring initial password submission: a credential is already set");
            return Ok(SetPasswordOutcome::AlreadySet);
        }
        if password.is_empty() {
            return Ok(SetPasswordOutcome::Empty);
        }

        config.admin_password_hash =
            PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        self.repo.save_config(&config).await?;

        info!("Admin password established");
        Ok(SetPasswordOutcome::Established)
    }

    pub async fn login(&self, password: &str) -> Result<(), DomainError> {
        let config = self.repo.load_config().await;
        if !config.has_admin_password() {
            warn!("Login failed: no admin password set");
            return Err(DomainError::InvalidCredentials);
        }

        let valid = PasswordService::verify(password, &config.admin_password_hash).map_err(|e| {
            warn!("Login failed: stored hash unusable: {}", e);
            DomainError::InvalidCredentials
        })?;
        if !valid {
            warn!("Login failed: invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        info!("Admin login successful");
        Ok(())
    }

    /// The current password must verify unless no credential is set yet.
    pub async fn change_password(&self, change: PasswordChange<'_>) -> Result<(), DomainError> {
        let new_password = change.new.trim();
        if new_password.is_empty() {
            return Err(DomainError::ValidationError("New password is required".into()));
        }
        if change.confirm.is_some_and(|confirm| confirm.trim() != new_password) {
            return Err(DomainError::ValidationError("Password confirmation does not match".into()));
        }

        let _guard = self.lock.acquire().await;
        let mut config = self.repo.load_config().await;
        if config.has_admin_password() {
            let valid = PasswordService::verify(change.current, &config.admin_password_hash)
                .map_err(|_| DomainError::InvalidCredentials)?;
            if !valid {
                warn!("Password change rejected: current password invalid");
                return Err(DomainError::InvalidCredentials);
            }
        }

        config.admin_password_hash = PasswordService::hash(new_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        self.repo.save_config(&config).await?;

        info!("Admin password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SiteConfig;
    use crate::repositories::MockSiteRepository;

    fn config_with_password(password: &str) -> SiteConfig {
        SiteConfig {
            admin_password_hash: PasswordService::hash(password).unwrap(),
            ..SiteConfig::default()
        }
    }

    fn service(mock: MockSiteRepository) -> AuthService<MockSiteRepository> {
        AuthService::new(Arc::new(mock), StoreLock::default())
    }

    #[tokio::test]
    async fn test_first_password_is_established() {
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(SiteConfig::default);
        mock.expect_save_config()
            .times(1)
            .withf(|config| PasswordService::verify("ilk-sifre", &config.admin_password_hash).unwrap())
            .returning(|_| Ok(()));

        let outcome = service(mock).set_initial_password("  ilk-sifre ").await.unwrap();
        assert_eq!(outcome, SetPasswordOutcome::Established);
    }

    #[tokio::test]
    async fn test_existing_password_is_never_overwritten() {
        let existing = config_with_password("ilk-sifre");
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(move || existing.clone());
        mock.expect_save_config().never();

        let outcome = service(mock).set_initial_password("baska-sifre").await.unwrap();
        assert_eq!(outcome, SetPasswordOutcome::AlreadySet);
    }

    #[tokio::test]
    async fn test_blank_initial_password_is_rejected() {
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(SiteConfig::default);
        mock.expect_save_config().never();

        let outcome = service(mock).set_initial_password("   ").await.unwrap();
        assert_eq!(outcome, SetPasswordOutcome::Empty);
    }

    #[tokio::test]
    async fn test_login() {
        let existing = config_with_password("dogru");
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(move || existing.clone());
        let auth = service(mock);

        assert!(auth.login("dogru").await.is_ok());
        assert!(matches!(auth.login("yanlis").await, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_without_credential_fails() {
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(SiteConfig::default);

        let result = service(mock).login("").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let existing = config_with_password("eski");
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(move || existing.clone());
        mock.expect_save_config().never();

        let result = service(mock)
            .change_password(PasswordChange { current: "tahmin", new: "yeni", confirm: None })
            .await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password() {
        let existing = config_with_password("eski");
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(move || existing.clone());
        mock.expect_save_config()
            .times(1)
            .withf(|config| PasswordService::verify("yeni", &config.admin_password_hash).unwrap())
            .returning(|_| Ok(()));

        service(mock)
            .change_password(PasswordChange { current: "eski", new: "yeni", confirm: Some("yeni") })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_without_credential_skips_current_check() {
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().returning(SiteConfig::default);
        mock.expect_save_config().times(1).returning(|_| Ok(()));

        service(mock)
            .change_password(PasswordChange { current: "", new: "yeni", confirm: None })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_validation() {
        let mut mock = MockSiteRepository::new();
        mock.expect_load_config().never();
        mock.expect_save_config().never();
        let auth = service(mock);

        let blank = auth
            .change_password(PasswordChange { current: "", new: "  ", confirm: None })
            .await;
        assert!(matches!(blank, Err(DomainError::ValidationError(_))));

        let mismatch = auth
            .change_password(PasswordChange { current: "", new: "bir", confirm: Some("iki") })
            .await;
        assert!(matches!(mismatch, Err(DomainError::ValidationError(_))));
    }
}
