//! Property-based tests for password hashing
//!
//! Uses proptest to generate random credentials and verify the hashing
//! invariants. bcrypt runs at the minimum cost so the generated cases
//! stay cheap.

use keyward::auth::PasswordHasher;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_any_password_verifies_against_its_own_hash(
        password in "[a-zA-Z0-9!@#$%^&*]{8,40}",
    ) {
        let hasher = PasswordHasher::new(4);
        let digest = hasher.hash(&password).unwrap();
        prop_assert!(hasher.verify(&password, &digest));
    }

    #[test]
    fn test_different_password_never_verifies(
        password in "[a-zA-Z0-9]{8,40}",
        other in "[a-zA-Z0-9]{8,40}",
    ) {
        prop_assume!(password != other);
        let hasher = PasswordHasher::new(4);
        let digest = hasher.hash(&password).unwrap();
        prop_assert!(!hasher.verify(&other, &digest));
    }

    #[test]
    fn test_digest_never_contains_the_plaintext(
        password in "[a-zA-Z0-9]{8,40}",
    ) {
        let hasher = PasswordHasher::new(4);
        let digest = hasher.hash(&password).unwrap();
        prop_assert!(!digest.contains(&password));
    }
}
