//! Column layout of the two stores.
//!
//! Both stores are positional on write (`append` takes an ordered list of
//! cells) and named on read (rows come back keyed by the header row). The
//! header names below match the sheets the lab already uses.

/// Registration store columns.
pub mod registration {
    pub const PRODUCT: &str = "제품명";
    pub const MANUFACTURER: &str = "제조사";
    pub const CATALOG_NUMBER: &str = "Cat. No.";
    pub const LOT_NUMBER: &str = "Lot 번호";
    pub const INITIAL_QUANTITY: &str = "최초 수량";
    pub const UNIT: &str = "단위";
    pub const EXPIRY: &str = "유통기한";
    pub const LOCATION: &str = "보관 위치";
    pub const REGISTERED_AT: &str = "등록일";
    pub const REGISTRANT: &str = "등록자";
    pub const ALERT_THRESHOLD: &str = "알림 기준 수량";
    pub const MUTED: &str = "알림 끄기";

    /// Positional column order used by `append`.
    pub const COLUMNS: [&str; 12] = [
        PRODUCT,
        MANUFACTURER,
        CATALOG_NUMBER,
        LOT_NUMBER,
        INITIAL_QUANTITY,
        UNIT,
        EXPIRY,
        LOCATION,
        REGISTERED_AT,
        REGISTRANT,
        ALERT_THRESHOLD,
        MUTED,
    ];

    /// Columns without which no registration row can be keyed or counted.
    pub const REQUIRED: [&str; 4] = [PRODUCT, CATALOG_NUMBER, LOT_NUMBER, INITIAL_QUANTITY];

    /// Zero-based position of the mute flag (target of mute write-back).
    pub const MUTED_INDEX: usize = 11;
}

/// Usage store columns.
pub mod usage {
    pub const TIMESTAMP: &str = "Timestamp";
    pub const PRODUCT: &str = "제품명";
    pub const LOT_NUMBER: &str = "Lot 번호";
    pub const QUANTITY: &str = "사용량";
    pub const USER: &str = "사용자";
    pub const NOTE: &str = "비고";

    /// Positional column order used by `append`.
    pub const COLUMNS: [&str; 6] = [TIMESTAMP, PRODUCT, LOT_NUMBER, QUANTITY, USER, NOTE];

    pub const REQUIRED: [&str; 3] = [PRODUCT, LOT_NUMBER, QUANTITY];
}

/// Mute flag sentinel for "muted".
pub const MUTED_YES: &str = "예";

/// Mute flag sentinel for "not muted".
pub const MUTED_NO: &str = "아니요";

/// Interpret a stored mute cell. Anything unrecognised reads as not muted.
pub fn parse_mute_flag(text: &str) -> bool {
    let text = text.trim();
    text == MUTED_YES
        || ["yes", "y", "true", "1"]
            .iter()
            .any(|s| text.eq_ignore_ascii_case(s))
}

/// Encode a mute flag as its stored sentinel.
pub fn mute_flag_text(muted: bool) -> &'static str {
    if muted { MUTED_YES } else { MUTED_NO }
}
