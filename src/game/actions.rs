//! Semantic action IDs carried by click targets.
//!
//! The render pass registers these against screen rectangles; the input
//! handler dispatches on them without knowing anything about layout.

/// Tap the candy core.
pub const TAP_CORE: u16 = 0;

// Tab navigation.
pub const TAB_CORE: u16 = 10;
pub const TAB_SHOP: u16 = 11;
pub const TAB_MAGIC: u16 = 12;
pub const TAB_STATS: u16 = 13;
pub const TAB_FUN: u16 = 14;

/// `BUY_UPGRADE_BASE + i` buys `content::UPGRADES[i]`.
pub const BUY_UPGRADE_BASE: u16 = 100;

pub const ASCEND: u16 = 200;
pub const CONFIRM_ASCEND: u16 = 201;
pub const CANCEL_ASCEND: u16 = 202;

pub const SURRENDER: u16 = 210;
pub const CONFIRM_SURRENDER: u16 = 211;
pub const CANCEL_SURRENDER: u16 = 212;

/// `SET_MODE_BASE + i` selects `DeviceMode::from_index(i)`.
pub const SET_MODE_BASE: u16 = 300;
/// `SET_SKIN_BASE + i` selects `content::SKINS[i]`.
pub const SET_SKIN_BASE: u16 = 320;

pub const NEXT_ORACLE: u16 = 400;
pub const EDIT_NAME: u16 = 401;

// Onboarding.
pub const AWAKEN_AUDIO: u16 = 500;
pub const INTRO_YES: u16 = 501;
pub const WARNING_PULSE: u16 = 502;

/// Inert id for rects that swallow taps (dialog bodies) without acting.
pub const NOOP: u16 = 999;

pub const DISMISS_OFFLINE: u16 = 700;
pub const DISMISS_BANNER: u16 = 701;

/// `COMPANION_BASE + i` taps `state.companions[i]`. The companion count is
/// unbounded, so the block sits at the top of the id space; indices past
/// `u16::MAX` simply get no click target.
pub const COMPANION_BASE: u16 = 30000;
