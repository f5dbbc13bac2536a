use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use sqlx::Type;
use utoipa::ToSchema;

use crate::shared::constants::{TRACKING_ID_PREFIX, TRACKING_ID_RANDOM_LEN};
use crate::shared::validation::TRACKING_ID_REGEX;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Opaque handle returned to an anonymous reporter.
///
/// Layout is `SR` + base-36 epoch milliseconds + [`TRACKING_ID_RANDOM_LEN`]
/// random base-36 characters, all upper case. The random tail keeps ids
/// unguessable even when the submission time is known; nothing about the
/// report or the reporter goes into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Type, ToSchema)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now(), &mut rand::rng())
    }

    pub fn generate_at<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let millis = now.timestamp_millis().max(0) as u64;

        let mut id = String::with_capacity(TRACKING_ID_PREFIX.len() + 13 + TRACKING_ID_RANDOM_LEN);
        id.push_str(TRACKING_ID_PREFIX);
        id.push_str(&to_base36(millis));
        for _ in 0..TRACKING_ID_RANDOM_LEN {
            id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
        }

        Self(id)
    }

    /// Accept a caller-supplied id, case-insensitively. Returns `None` for
    /// anything that could not have been issued by this service.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        TRACKING_ID_REGEX
            .is_match(&normalized)
            .then_some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
