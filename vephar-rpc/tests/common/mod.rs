//! Shared helpers for the live-server tests.

#![allow(dead_code)]

use std::env;

use vephar_rpc::VepharClient;

/// Environment variable holding the base URL of the node under test.
pub const URL_VAR: &str = "VEPHAR_TEST_URL";

/// Return early from a live test unless every listed variable is set.
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+ $(,)?) => {
        let missing: Vec<&str> = [$($var),+]
            .into_iter()
            .filter(|var| std::env::var(var).is_err())
            .collect();
        if !missing.is_empty() {
            eprintln!("live test skipped, unset: {}", missing.join(", "));
            return;
        }
    };
}

/// Unwrap an `Option`, failing the test with the expression text on `None`.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(, $($context:tt)+)?) => {
        match $expr {
            Some(value) => value,
            None => panic!(
                "`{}` was None{}",
                stringify!($expr),
                String::new() $(+ ": " + &format!($($context)+))?
            ),
        }
    };
}

/// Unwrap a `Result`, failing the test with the expression text and the
/// error on `Err`.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(, $($context:tt)+)?) => {
        match $expr {
            Ok(value) => value,
            Err(err) => panic!(
                "`{}` failed{}: {err}",
                stringify!($expr),
                String::new() $(+ " (" + &format!($($context)+) + ")")?
            ),
        }
    };
}

/// Unique key prefix so parallel runs never collide.
pub fn generate_test_prefix() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}-", &uuid.to_string()[..8])
}

/// Client pointed at the node named by [`URL_VAR`].
pub struct TestContext {
    pub client: VepharClient,
    pub prefix: String,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let url = env::var(URL_VAR).ok()?;
        let client = VepharClient::new(url).ok()?;
        Some(Self {
            client,
            prefix: generate_test_prefix(),
        })
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }
}
