/// custom ids of buttons on the application message
pub mod button {
    pub const ACCEPT: &str = "accept";
    pub const DENY: &str = "deny";
}

/// custom ids used by the reason modal
pub mod modal {
    pub const REASON: &str = "reason";
    pub const ADMIN_REASON: &str = "admin_reason";

    pub const REASON_MIN_LENGTH: u16 = 10;
    pub const REASON_MAX_LENGTH: u16 = 1000;
}

/// texts sent back to the moderator
pub mod reply {
    pub const APPLICATION_NOT_FOUND: &str = "Could not find application in database";
    pub const MEMBER_NOT_FOUND: &str = "Member could not be found. Are they still in the server?";
    pub const SUBMISSION_RECEIVED: &str = "Your submission was received successfully!";
    pub const FETCH_FAILED: &str = "An error occurred while fetching the application";
    pub const DENY_FAILED: &str = "An error occurred while denying the application";
}
