//! Shared constants for the training data model
//!
//! Single source of truth for action names, response naming and session
//! defaults used by importers and the entity model.

/// Built-in dialogue actions every assistant knows about
pub mod actions {
    pub const ACTION_LISTEN_NAME: &str = "action_listen";
    pub const ACTION_RESTART_NAME: &str = "action_restart";
    pub const ACTION_SESSION_START_NAME: &str = "action_session_start";
    pub const ACTION_DEFAULT_FALLBACK_NAME: &str = "action_default_fallback";
    pub const ACTION_DEACTIVATE_LOOP_NAME: &str = "action_deactivate_loop";
    pub const ACTION_REVERT_FALLBACK_EVENTS_NAME: &str = "action_revert_fallback_events";
    pub const ACTION_DEFAULT_ASK_AFFIRMATION_NAME: &str = "action_default_ask_affirmation";
    pub const ACTION_DEFAULT_ASK_REPHRASE_NAME: &str = "action_default_ask_rephrase";
    pub const ACTION_TWO_STAGE_FALLBACK_NAME: &str = "action_two_stage_fallback";
    pub const ACTION_BACK_NAME: &str = "action_back";

    /// Default actions in their canonical order
    pub const DEFAULT_ACTION_NAMES: &[&str] = &[
        ACTION_LISTEN_NAME,
        ACTION_RESTART_NAME,
        ACTION_SESSION_START_NAME,
        ACTION_DEFAULT_FALLBACK_NAME,
        ACTION_DEACTIVATE_LOOP_NAME,
        ACTION_REVERT_FALLBACK_EVENTS_NAME,
        ACTION_DEFAULT_ASK_AFFIRMATION_NAME,
        ACTION_DEFAULT_ASK_REPHRASE_NAME,
        ACTION_TWO_STAGE_FALLBACK_NAME,
        ACTION_BACK_NAME,
    ];

    /// Prefix of response (utterance) actions
    pub const UTTER_PREFIX: &str = "utter_";
}

/// Response naming
pub mod responses {
    /// Separates a retrieval intent from its response key, e.g. `chitchat/ask_name`
    pub const RESPONSE_IDENTIFIER_DELIMITER: char = '/';
}

/// Dialogue session defaults
pub mod session {
    pub const DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES: f64 = 0.0;
    pub const DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION: bool = true;
}
