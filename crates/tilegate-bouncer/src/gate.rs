//! Admission Gate: whole-packet checks run once before any per-cell work.

use tilegate_config::BouncerConfig;
use tilegate_protocol::{MAX_RECT_SIZE, RectHeader};

use crate::error::Rejection;
use crate::services::PlayerContext;

/// Largest rectangle the server accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectLimits {
    /// Maximum width in cells.
    pub max_width: u8,
    /// Maximum height in cells.
    pub max_height: u8,
}

impl RectLimits {
    /// Limits from the `bouncer` config section.
    pub fn from_config(config: &BouncerConfig) -> Self {
        Self {
            max_width: config.max_rect_width,
            max_height: config.max_rect_height,
        }
    }

    /// Returns `true` when `header` fits.
    pub fn admits(&self, header: &RectHeader) -> bool {
        header.width <= self.max_width && header.height <= self.max_height
    }
}

impl Default for RectLimits {
    fn default() -> Self {
        Self {
            max_width: MAX_RECT_SIZE,
            max_height: MAX_RECT_SIZE,
        }
    }
}

/// How an admitted request proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Requester may edit freely; apply verbatim without validation.
    ClientTrusted,
    /// Run segmentation and legality checks.
    Validate,
}

/// Runs the gate checks in order, stopping at the first that matches.
pub fn admit(
    header: &RectHeader,
    player: &dyn PlayerContext,
    limits: &RectLimits,
) -> Result<Admission, Rejection> {
    if player.can_edit_client_side() {
        return Ok(Admission::ClientTrusted);
    }

    if !limits.admits(header) {
        return Err(Rejection::ProtocolViolation {
            width: header.width,
            height: header.height,
            max_width: limits.max_width,
            max_height: limits.max_height,
        });
    }

    if player.is_throttled() {
        return Err(Rejection::Throttled);
    }

    if player.is_disabled() {
        return Err(Rejection::Disabled);
    }

    Ok(Admission::Validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakePlayer;

    #[test]
    fn test_client_side_editor_bypasses_everything() {
        let player = FakePlayer {
            client_side: true,
            throttled: true,
            ..FakePlayer::default()
        };
        let header = RectHeader::new(0, 0, 200, 200);
        assert_eq!(
            admit(&header, &player, &RectLimits::default()),
            Ok(Admission::ClientTrusted)
        );
    }

    #[test]
    fn test_oversized_rect_is_protocol_violation() {
        let player = FakePlayer::default();
        let header = RectHeader::new(0, 0, 5, 1);
        let err = admit(&header, &player, &RectLimits::default()).unwrap_err();
        assert!(matches!(err, Rejection::ProtocolViolation { width: 5, .. }));
    }

    #[test]
    fn test_size_checked_before_throttle() {
        let player = FakePlayer {
            throttled: true,
            ..FakePlayer::default()
        };
        let header = RectHeader::new(0, 0, 1, 9);
        let err = admit(&header, &player, &RectLimits::default()).unwrap_err();
        assert!(matches!(err, Rejection::ProtocolViolation { .. }));
    }

    #[test]
    fn test_throttled_before_disabled() {
        let player = FakePlayer {
            throttled: true,
            disabled: true,
            ..FakePlayer::default()
        };
        let header = RectHeader::new(0, 0, 2, 2);
        assert_eq!(
            admit(&header, &player, &RectLimits::default()),
            Err(Rejection::Throttled)
        );
    }

    #[test]
    fn test_disabled_rejected() {
        let player = FakePlayer {
            disabled: true,
            ..FakePlayer::default()
        };
        let header = RectHeader::new(0, 0, 2, 2);
        assert_eq!(
            admit(&header, &player, &RectLimits::default()),
            Err(Rejection::Disabled)
        );
    }

    #[test]
    fn test_configured_limits_apply() {
        let config = BouncerConfig {
            max_rect_width: 2,
            max_rect_height: 3,
            ..BouncerConfig::default()
        };
        let limits = RectLimits::from_config(&config);
        assert!(limits.admits(&RectHeader::new(0, 0, 2, 3)));
        assert!(!limits.admits(&RectHeader::new(0, 0, 3, 3)));
    }
}
