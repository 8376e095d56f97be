// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use trailhead::config::Config;
use trailhead::db::FirestoreDb;
use trailhead::routes::create_router;
use trailhead::services::IdTokenVerifier;
use trailhead::AppState;

pub const TEST_KID: &str = "test-kid";
const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_rsa_private.pem");
const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_rsa_public.pem");

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// ID token verifier trusting the fixture key under [`TEST_KID`].
#[allow(dead_code)]
pub fn test_verifier(config: &Config) -> IdTokenVerifier {
    let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).expect("valid test key");
    IdTokenVerifier::new_with_static_key(config, TEST_KID, key).expect("static verifier")
}

/// Sign an ID token for `uid` that the test verifier accepts.
#[allow(dead_code)]
pub fn create_test_id_token(uid: &str) -> String {
    let project = Config::test_default().firebase_project_id;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    sign_claims(json!({
        "iss": format!("https://securetoken.google.com/{}", project),
        "aud": project,
        "sub": uid,
        "iat": now,
        "auth_time": now,
        "exp": now + 3600,
    }))
}

/// Sign arbitrary claims with the fixture key.
#[allow(dead_code)]
pub fn sign_claims(claims: serde_json::Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KID.to_string());
    let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes()).expect("valid test key");
    encode(&header, &claims, &key).expect("signed token")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let id_token_verifier = Arc::new(test_verifier(&config));

    let state = Arc::new(AppState {
        config,
        db,
        id_token_verifier,
    });

    (create_router(state.clone()), state)
}
