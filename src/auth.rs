use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const TOKEN_LIFETIME_DAYS: i64 = 30;

// Полезная нагрузка токена, как в оригинальном API: user_id + iat + exp
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

// Несовпадение и поврежденный хеш неразличимы для вызывающего
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

pub fn issue_token(user_id: i64, secret: &str, lifetime_days: i64) -> String {
    let now = Utc::now();
    issue_token_at(user_id, secret, now.timestamp(), lifetime_days)
}

fn issue_token_at(user_id: i64, secret: &str, iat: i64, lifetime_days: i64) -> String {
    let claims = Claims {
        user_id,
        iat,
        exp: iat + Duration::days(lifetime_days).num_seconds(),
    };
    // HS256 с валидным секретом не падает
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap_or_default()
}

// None на любую проблему: битый токен, плохая подпись, истекший срок
pub fn verify_token(token: &str, secret: &str) -> Option<i64> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let token = issue_token(42, SECRET, TOKEN_LIFETIME_DAYS);
        assert_eq!(verify_token(&token, SECRET), Some(42));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token(42, SECRET, TOKEN_LIFETIME_DAYS);
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('x');
        assert_eq!(verify_token(&tampered, SECRET), None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(42, SECRET, TOKEN_LIFETIME_DAYS);
        assert_eq!(verify_token(&token, "other-secret"), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        // выпущен 60 дней назад со сроком жизни 30 дней
        let iat = Utc::now().timestamp() - Duration::days(60).num_seconds();
        let token = issue_token_at(42, SECRET, iat, TOKEN_LIFETIME_DAYS);
        assert_eq!(verify_token(&token, SECRET), None);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(verify_token("not-a-jwt", SECRET), None);
        assert_eq!(verify_token("", SECRET), None);
    }

    #[test]
    fn password_hash_verifies() {
        // низкий cost, чтобы тест не тормозил
        let hashed = hash("hunter2", 4).unwrap();
        assert!(verify_password("hunter2", &hashed));
        assert!(!verify_password("hunter3", &hashed));
    }

    #[test]
    fn corrupt_hash_does_not_verify() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
    }
}
