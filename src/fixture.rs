//! Random user fixtures for the pet-store user endpoints.

use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of every generated password
pub const PASSWORD_LENGTH: usize = 12;

/// User payload as accepted by `POST /user` and `PUT /user/{username}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_status: i32,
}

/// Generate a user with the thread-local RNG
pub fn generate() -> UserRecord {
    generate_with(&mut rand::thread_rng())
}

/// Generate a user from the given RNG (seeded RNGs give reproducible fixtures)
pub fn generate_with<R: Rng>(rng: &mut R) -> UserRecord {
    UserRecord {
        id: rng.gen_range(1000..=9999),
        username: Username().fake_with_rng(rng),
        first_name: FirstName().fake_with_rng(rng),
        last_name: LastName().fake_with_rng(rng),
        email: SafeEmail().fake_with_rng(rng),
        password: Password(PASSWORD_LENGTH..PASSWORD_LENGTH + 1).fake_with_rng(rng),
        phone: PhoneNumber().fake_with_rng(rng),
        user_status: rng.gen_range(0..=1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_fields_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let user = generate_with(&mut rng);
            assert!((1000..=9999).contains(&user.id), "id out of range: {}", user.id);
            assert!(user.user_status == 0 || user.user_status == 1);
            assert_eq!(user.password.chars().count(), PASSWORD_LENGTH);
            for field in [
                &user.username,
                &user.first_name,
                &user.last_name,
                &user.email,
                &user.phone,
            ] {
                assert!(!field.is_empty());
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_with(&mut StdRng::seed_from_u64(42));
        let b = generate_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_camel_case() {
        let user = generate();
        let json = serde_json::to_value(&user).unwrap();
        for key in ["id", "username", "firstName", "lastName", "email", "password", "phone", "userStatus"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json.as_object().unwrap().len(), 8);
    }
}
