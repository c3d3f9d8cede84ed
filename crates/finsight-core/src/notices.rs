//! User-facing conversation text.
//!
//! The interface speaks Hebrew; every message the session appends on the
//! user's behalf comes from here.

/// Shown when ingestion fails for any reason.
pub const INGESTION_FAILED_NOTICE: &str =
    "שגיאה בעיבוד המסמך. וודא ששרת ה-Backend פועל ושה-API Key מוגדר.";

/// Shown when a query fails for any reason.
pub const QUERY_FAILED_NOTICE: &str = "מצטער, חלה שגיאה בתקשורת עם מנוע הבינה המלאכותית.";

/// Questions offered as one-key shortcuts.
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "מה היה אחוז הצמיחה בהכנסות?",
    "מהם סיכוני השוק המרכזיים שצוינו?",
    "סכם את נקודות המפתח מדברי המנכ״ל",
    "מהי תחזית הרווח לשנה הבאה?",
];

/// Confirmation appended after a document is ingested.
pub fn ingestion_succeeded(document_name: &str) -> String {
    format!("המסמך \"{document_name}\" עובד בהצלחה. המידע זמין כעת לשאילתות.")
}
