//! Signed session cookie payload (HS256 JWT).

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, SessionCodec, SessionData};

/// Session signing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub lifetime_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "dev".to_string(),
            lifetime_hours: 24,
            issuer: "quill".to_string(),
        }
    }
}

/// Claims written into the session cookie.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uid: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

/// Session codec signing the payload with the application secret.
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionCodec {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    /// Cookie max-age matching the token lifetime.
    pub fn lifetime_seconds(&self) -> i64 {
        self.config.lifetime_hours * 3600
    }
}

impl SessionCodec for JwtSessionCodec {
    fn encode(&self, data: &SessionData) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.lifetime_hours);

        let claims = Claims {
            uid: data.user_id,
            flashes: data.flashes.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<SessionData, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(SessionData {
            user_id: token_data.claims.uid,
            flashes: token_data.claims.flashes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-key".to_string(),
            lifetime_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_session_survives_encoding() {
        let codec = JwtSessionCodec::new(test_config());
        let data = SessionData {
            user_id: Some(42),
            flashes: vec!["Title is required.".to_string()],
        };

        let token = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), data);
    }

    #[test]
    fn test_anonymous_session_with_flash() {
        let codec = JwtSessionCodec::new(test_config());
        let data = SessionData {
            user_id: None,
            flashes: vec!["Incorrect username.".to_string()],
        };

        let token = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), data);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let codec = JwtSessionCodec::new(test_config());

        let result = codec.decode("not-a-token");
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let ours = JwtSessionCodec::new(test_config());
        let theirs = JwtSessionCodec::new(SessionConfig {
            secret: "attacker".to_string(),
            ..test_config()
        });

        let forged = theirs
            .encode(&SessionData {
                user_id: Some(1),
                flashes: vec![],
            })
            .unwrap();

        assert!(ours.decode(&forged).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let first = JwtSessionCodec::new(SessionConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let second = JwtSessionCodec::new(SessionConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = first.encode(&SessionData::default()).unwrap();
        assert!(second.decode(&token).is_err());
    }

    #[test]
    fn test_expired_session() {
        let codec = JwtSessionCodec::new(SessionConfig {
            lifetime_hours: -1,
            ..test_config()
        });

        let token = codec
            .encode(&SessionData {
                user_id: Some(5),
                flashes: vec![],
            })
            .unwrap();
        assert!(matches!(
            codec.decode(&token).unwrap_err(),
            AuthError::SessionExpired
        ));
    }

    #[test]
    fn test_lifetime_seconds() {
        let codec = JwtSessionCodec::new(SessionConfig {
            lifetime_hours: 24,
            ..test_config()
        });

        assert_eq!(codec.lifetime_seconds(), 86400);
    }
}
