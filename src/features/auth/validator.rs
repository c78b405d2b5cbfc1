use super::model::{AuthenticatedUser, SessionClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::time::Duration;

/// Validates access tokens signed by the auth backend with its shared secret
pub struct JwtValidator {
    decoding_key: DecodingKey,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, audience: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        // Anonymous sessions carry the "anon" role and are not users
        if claims.role.as_deref() == Some("anon") {
            return Err(AppError::Auth("Anonymous tokens are not accepted".to_string()));
        }

        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
            session_id: claims.session_id,
            access_token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sign_token, TEST_JWT_SECRET};
    use uuid::Uuid;

    fn validator() -> JwtValidator {
        JwtValidator::new(
            TEST_JWT_SECRET,
            "authenticated".to_string(),
            Duration::from_secs(0),
        )
    }

    #[test]
    fn test_valid_token_resolves_user() {
        let id = Uuid::new_v4();
        let token = sign_token(id, "authenticated", 3600);

        let user = validator().validate_token(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.access_token, token);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = sign_token(Uuid::new_v4(), "authenticated", -3600);
        assert!(matches!(
            validator().validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = sign_token(Uuid::new_v4(), "someone-else", 3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validator().validate_token("not-a-jwt").is_err());
    }
}
