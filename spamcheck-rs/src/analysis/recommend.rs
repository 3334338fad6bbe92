//! Safety recommendation table
//!
//! Static guidance per (label, risk tier) pair, written for end users. The
//! elevated ham texts cover every ham tier above Low so the lookup is total.

use super::risk::RiskLevel;
use crate::model::Label;

const SPAM_CRITICAL: &[&str] = &[
    "🚨 DO NOT click any links or download attachments",
    "🗑️ Delete this email immediately",
    "⚠️ Do not respond or provide any personal information",
    "🔒 Report this email as spam to your email provider",
    "👤 Verify sender's email address - it may be spoofed",
];

const SPAM_HIGH: &[&str] = &[
    "⚠️ This email shows strong spam characteristics",
    "🔗 Avoid clicking any links in this email",
    "📧 Verify the sender through an independent channel",
    "🗑️ Consider deleting or moving to spam folder",
    "🔍 Check for spelling errors and suspicious formatting",
];

const SPAM_MEDIUM: &[&str] = &[
    "⚠️ Exercise caution with this email",
    "🔍 Verify the sender's identity before taking action",
    "🔗 Hover over links to check destinations before clicking",
    "📞 Contact the sender through official channels if unsure",
    "❌ Don't provide sensitive information via email",
];

const SPAM_LOW: &[&str] = &[
    "ℹ️ This email has some spam-like characteristics",
    "🔍 Review the content carefully before responding",
    "✅ Verify sender identity if requesting sensitive actions",
    "💡 When in doubt, contact sender through official channels",
];

const HAM_LOW: &[&str] = &[
    "✅ This email appears to be legitimate",
    "💡 Always verify unexpected requests, even from known senders",
    "🔒 Keep your personal information secure",
    "🔍 Stay vigilant for phishing attempts",
];

const HAM_ELEVATED: &[&str] = &[
    "ℹ️ This email seems legitimate but shows some unusual patterns",
    "🔍 Verify the sender if the email requests sensitive actions",
    "💡 Contact the sender directly if anything seems suspicious",
    "⚠️ Be cautious with links and attachments",
];

/// Guidance for one (label, tier) pair, in display order, never empty
pub fn safety_recommendations(label: Label, risk: RiskLevel) -> &'static [&'static str] {
    match (label, risk) {
        (Label::Spam, RiskLevel::Critical) => SPAM_CRITICAL,
        (Label::Spam, RiskLevel::High) => SPAM_HIGH,
        (Label::Spam, RiskLevel::Medium) => SPAM_MEDIUM,
        (Label::Spam, RiskLevel::Low) => SPAM_LOW,
        (Label::Ham, RiskLevel::Low) => HAM_LOW,
        (Label::Ham, _) => HAM_ELEVATED,
    }
}
