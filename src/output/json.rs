use serde::Serialize;

use crate::error::BreathError;

/// Serialize any value as pretty-printed JSON.
///
/// # Errors
///
/// Returns `BreathError::Parse` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreathError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breath::{MusicTrack, SessionConfig};

    #[test]
    fn test_session_config_json_shape() {
        let config = SessionConfig {
            total_duration_secs: 300,
            pace_secs: 4,
            music: MusicTrack::RiverSounds,
            instructions: true,
        };
        let json = to_json(&config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_duration_secs"], 300);
        assert_eq!(value["music"], "river-sounds");
        assert_eq!(value["instructions"], true);
    }
}
