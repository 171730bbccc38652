//! License validation service
//!
//! Runs the ordered checks for a stylesheet request. The first failing check
//! decides the outcome and nothing after it is evaluated:
//!
//! 1. a key must be present
//! 2. the font must be in the catalog (before any credential lookup)
//! 3. the key must match a stored credential
//! 4. the credential must be active
//! 5. the credential must hold a grant for the font
//!
//! Only a granted request triggers the usage update, and that update never
//! delays or alters the outcome.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use crate::domain::catalog::{FontCatalog, FontId};
use crate::domain::credential::CredentialRepository;
use crate::domain::entitlement::EntitlementRepository;
use crate::domain::license::{LicenseOutcome, LicenseRequest};
use crate::domain::DomainError;
use crate::infrastructure::usage::UsageRecorder;

/// Gateway service combining catalog, credential store and entitlement store
#[derive(Clone)]
pub struct LicenseService {
    catalog: Arc<FontCatalog>,
    credentials: Arc<dyn CredentialRepository>,
    entitlements: Arc<dyn EntitlementRepository>,
    usage: UsageRecorder,
}

impl LicenseService {
    pub fn new(
        catalog: Arc<FontCatalog>,
        credentials: Arc<dyn CredentialRepository>,
        entitlements: Arc<dyn EntitlementRepository>,
    ) -> Self {
        let usage = UsageRecorder::new(Arc::clone(&credentials));

        Self {
            catalog,
            credentials,
            entitlements,
            usage,
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Evaluate a request
    ///
    /// `Err` is returned only when a store could not answer; every denial is an
    /// `Ok` outcome.
    #[instrument(skip_all, fields(font = request.font.as_deref().unwrap_or_default()))]
    pub async fn evaluate(&self, request: &LicenseRequest) -> Result<LicenseOutcome, DomainError> {
        let Some(key) = request.key.as_deref() else {
            debug!("Rejected: no API key presented");
            return Ok(LicenseOutcome::MissingKey);
        };

        let requested = request
            .font
            .as_deref()
            .unwrap_or_else(|| self.catalog.default_font().as_str());

        let Some(stylesheet) = FontId::new(requested)
            .ok()
            .and_then(|id| self.catalog.lookup(id.as_str()))
        else {
            debug!(requested = %requested, "Rejected: unknown font");
            return Ok(LicenseOutcome::UnknownResource {
                requested: requested.to_string(),
            });
        };

        let fingerprint = key_fingerprint(key);

        let Some(credential) = self.credentials.find_by_key(key).await? else {
            info!(key = %fingerprint, "Rejected: unknown API key");
            return Ok(LicenseOutcome::InvalidKey);
        };

        if !credential.is_active() {
            info!(
                key = %fingerprint,
                credential_id = %credential.id(),
                "Rejected: API key is disabled"
            );
            return Ok(LicenseOutcome::DisabledKey);
        }

        let font_id = stylesheet.id();

        if !self
            .entitlements
            .is_entitled(credential.id(), font_id)
            .await?
        {
            info!(
                key = %fingerprint,
                credential_id = %credential.id(),
                font = %font_id,
                "Rejected: API key not licensed for font"
            );
            return Ok(LicenseOutcome::NotEntitled {
                font_id: font_id.clone(),
            });
        }

        self.usage.record(credential.id().clone());

        debug!(
            credential_id = %credential.id(),
            owner_id = %credential.owner_id(),
            font = %font_id,
            "Granted"
        );

        Ok(LicenseOutcome::Success(stylesheet.clone()))
    }

    /// Check the credential store is reachable
    pub async fn check_storage(&self) -> Result<(), DomainError> {
        self.credentials.ping().await
    }
}

/// Short, non-reversible identifier for a presented key, safe for logs
pub fn key_fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    hex::encode(&digest[..6])
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::credential::{Credential, CredentialId, MockCredentialRepository};
    use crate::domain::entitlement::{Entitlement, MockEntitlementRepository};
    use crate::infrastructure::credential::InMemoryCredentialRepository;
    use crate::infrastructure::entitlement::InMemoryEntitlementRepository;

    struct Fixture {
        service: LicenseService,
        credentials: Arc<InMemoryCredentialRepository>,
    }

    fn fixture(active: bool, grants: &[&str]) -> Fixture {
        let credentials = Arc::new(InMemoryCredentialRepository::with_credentials(vec![
            Credential::new("cred-1".into(), "abc123", "owner-1").with_active(active),
        ]));
        let entitlements = Arc::new(InMemoryEntitlementRepository::with_entitlements(
            grants
                .iter()
                .map(|font| Entitlement::new("cred-1".into(), FontId::new(font).unwrap()))
                .collect(),
        ));

        let catalog = FontCatalog::builder()
            .with_builtin()
            .insert(FontId::new("june").unwrap(), "@font-face { font-family: 'June'; }")
            .build("july")
            .unwrap();

        Fixture {
            service: LicenseService::new(Arc::new(catalog), credentials.clone(), entitlements),
            credentials,
        }
    }

    fn catalog() -> Arc<FontCatalog> {
        Arc::new(FontCatalog::builtin())
    }

    async fn wait_for_last_used(
        repo: &InMemoryCredentialRepository,
        id: &str,
    ) -> Option<DateTime<Utc>> {
        let id = CredentialId::new(id);

        for _ in 0..100 {
            if let Some(at) = repo.get(&id).await.and_then(|c| c.last_used_at()) {
                return Some(at);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        None
    }

    #[tokio::test]
    async fn test_missing_key_never_queries_credentials() {
        let mut credentials = MockCredentialRepository::new();
        credentials.expect_find_by_key().times(0);
        let mut entitlements = MockEntitlementRepository::new();
        entitlements.expect_is_entitled().times(0);

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        for font in [None, Some("july"), Some("arial")] {
            let outcome = service
                .evaluate(&LicenseRequest::new(None, font))
                .await
                .unwrap();
            assert_eq!(outcome, LicenseOutcome::MissingKey);
        }
    }

    #[tokio::test]
    async fn test_unknown_font_never_queries_credentials() {
        let mut credentials = MockCredentialRepository::new();
        credentials.expect_find_by_key().times(0);
        let mut entitlements = MockEntitlementRepository::new();
        entitlements.expect_is_entitled().times(0);

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        for font in ["arial", "JULY", "", "../july", "july*/"] {
            let outcome = service
                .evaluate(&LicenseRequest::new(Some("abc123"), Some(font)))
                .await
                .unwrap();
            assert_eq!(
                outcome,
                LicenseOutcome::UnknownResource {
                    requested: font.to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_font_with_valid_entitled_key() {
        let f = fixture(true, &["july"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("arial")))
            .await
            .unwrap();

        assert_eq!(outcome.label(), "unknown_resource");
    }

    #[tokio::test]
    async fn test_invalid_key() {
        let f = fixture(true, &["july"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("nope"), Some("july")))
            .await
            .unwrap();

        assert_eq!(outcome, LicenseOutcome::InvalidKey);
    }

    #[tokio::test]
    async fn test_disabled_key_even_when_entitled() {
        let f = fixture(false, &["july"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await
            .unwrap();

        assert_eq!(outcome, LicenseOutcome::DisabledKey);
    }

    #[tokio::test]
    async fn test_disabled_key_never_reaches_entitlement_check() {
        let mut credentials = MockCredentialRepository::new();
        credentials.expect_find_by_key().times(1).returning(|_| {
            Ok(Some(
                Credential::new("cred-1".into(), "abc123", "owner-1").with_active(false),
            ))
        });
        credentials.expect_mark_used().times(0);
        let mut entitlements = MockEntitlementRepository::new();
        entitlements.expect_is_entitled().times(0);

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        let outcome = service
            .evaluate(&LicenseRequest::new(Some("abc123"), None))
            .await
            .unwrap();
        assert_eq!(outcome, LicenseOutcome::DisabledKey);
    }

    #[tokio::test]
    async fn test_not_entitled() {
        let f = fixture(true, &["june"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            LicenseOutcome::NotEntitled {
                font_id: FontId::new("july").unwrap()
            }
        );
    }

    #[tokio::test]
    async fn test_success_returns_exact_payload_and_records_usage() {
        let f = fixture(true, &["july"]);
        let expected = f.service.catalog().lookup("july").unwrap().clone();
        let before = Utc::now();

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await
            .unwrap();

        match outcome {
            LicenseOutcome::Success(stylesheet) => {
                assert_eq!(stylesheet.content(), expected.content());
            }
            other => panic!("expected success, got {:?}", other),
        }

        let last_used = wait_for_last_used(&f.credentials, "cred-1").await.unwrap();
        assert!(last_used >= before);
    }

    #[tokio::test]
    async fn test_default_font_is_used_when_omitted() {
        let f = fixture(true, &["july"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), None))
            .await
            .unwrap();

        match outcome {
            LicenseOutcome::Success(stylesheet) => assert_eq!(stylesheet.id().as_str(), "july"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_font_is_trimmed() {
        let f = fixture(true, &["june"]);

        let outcome = f
            .service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some(" june ")))
            .await
            .unwrap();

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_denials_do_not_record_usage() {
        let f = fixture(true, &["june"]);

        f.service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let credential = f.credentials.get(&CredentialId::new("cred-1")).await.unwrap();
        assert!(credential.last_used_at().is_none());
    }

    #[tokio::test]
    async fn test_credential_store_failure_is_an_error() {
        let mut credentials = MockCredentialRepository::new();
        credentials
            .expect_find_by_key()
            .times(1)
            .returning(|_| Err(DomainError::storage("connection refused")));
        let entitlements = MockEntitlementRepository::new();

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        let result = service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_entitlement_store_failure_is_an_error() {
        let mut credentials = MockCredentialRepository::new();
        credentials
            .expect_find_by_key()
            .returning(|_| Ok(Some(Credential::new("cred-1".into(), "abc123", "owner-1"))));
        credentials.expect_mark_used().times(0);
        let mut entitlements = MockEntitlementRepository::new();
        entitlements
            .expect_is_entitled()
            .returning(|_, _| Err(DomainError::storage("timeout")));

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        let result = service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_usage_failure_does_not_change_outcome() {
        let mut credentials = MockCredentialRepository::new();
        credentials
            .expect_find_by_key()
            .returning(|_| Ok(Some(Credential::new("cred-1".into(), "abc123", "owner-1"))));
        credentials
            .expect_mark_used()
            .returning(|_, _| Err(DomainError::storage("read-only replica")));
        let mut entitlements = MockEntitlementRepository::new();
        entitlements.expect_is_entitled().returning(|_, _| Ok(true));

        let service = LicenseService::new(catalog(), Arc::new(credentials), Arc::new(entitlements));

        let outcome = service
            .evaluate(&LicenseRequest::new(Some("abc123"), Some("july")))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_key_fingerprint() {
        let fp = key_fingerprint("abc123");

        assert_eq!(fp.len(), 12);
        assert!(!fp.contains("abc123"));
        assert_eq!(fp, key_fingerprint("abc123"));
        assert_ne!(fp, key_fingerprint("abc124"));
    }
}
