// src/infrastructure/security/session.rs
use crate::application::{
    dto::{AuthenticatedUser, SessionSubject, SessionTokenDto},
    error::{ApplicationError, ApplicationResult},
    ports::security::SessionManager,
};
use crate::domain::user::{Role, UserId};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Stateless session tokens: a base64url JSON payload plus an HMAC-SHA256
/// signature over it, `payload.signature`. Nothing is stored server-side;
/// expiry is enforced at verification time.
pub struct HmacSessionManager {
    key: Vec<u8>,
    ttl_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: i64,
    username: String,
    role: Role,
    iat: i64,
    exp: i64,
    sid: String,
}

impl HmacSessionManager {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            ttl_secs,
        }
    }

    fn mac(&self) -> ApplicationResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }

    fn sign(&self, payload: &str) -> ApplicationResult<String> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

fn malformed() -> ApplicationError {
    ApplicationError::unauthorized("malformed session token")
}

#[async_trait]
impl SessionManager for HmacSessionManager {
    async fn issue(&self, subject: SessionSubject) -> ApplicationResult<SessionTokenDto> {
        let issued_at = Utc::now();
        let expires_at = issued_at + chrono::Duration::seconds(self.ttl_secs);
        let session_id = Uuid::new_v4().to_string();

        let claims = SessionClaims {
            sub: subject.user_id.into(),
            username: subject.username,
            role: subject.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            sid: session_id.clone(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(&payload)?;

        Ok(SessionTokenDto {
            token: format!("{payload}.{signature}"),
            issued_at,
            expires_at,
            expires_in: self.ttl_secs,
            session_id,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let (payload, signature) = token.split_once('.').ok_or_else(malformed)?;

        let expected = URL_SAFE_NO_PAD.decode(signature).map_err(|_| malformed())?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| ApplicationError::unauthorized("invalid session token"))?;

        let claims: SessionClaims = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or_else(malformed)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(ApplicationError::unauthorized("session expired"));
        }

        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or_else(malformed)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or_else(malformed)?;

        Ok(AuthenticatedUser {
            id: UserId::new(claims.sub)?,
            username: claims.username,
            capabilities: claims.role.default_capabilities(),
            role: claims.role,
            issued_at,
            expires_at,
            session_id: claims.sid,
        })
    }
}
