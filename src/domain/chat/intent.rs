//! Keyword heuristics for chat messages.
//!
//! Classification is stateless and local: no model call is involved. The
//! result steers the system prompt and tells the UI which follow-up buttons
//! to offer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    Pricing,
    Payments,
    Support,
    General,
}

// Keywords match whole words; multi-word entries match as phrases.
const PRICING_KEYWORDS: &[&str] = &[
    "price", "prices", "pricing", "plan", "plans", "cost", "costs", "how much", "fee", "fees",
    "discount", "upgrade", "tier", "tiers", "naira", "₦",
];

const PAYMENT_KEYWORDS: &[&str] = &[
    "pay", "paying", "payment", "payments", "card", "cards", "transfer", "bank", "ussd",
    "paystack", "refund", "receipt", "charge", "charged", "invoice", "debit", "debited",
];

const SUPPORT_KEYWORDS: &[&str] = &[
    "help", "error", "errors", "problem", "issue", "issues", "bug", "bugs", "not working",
    "broken", "support", "complaint", "can't", "cannot", "failed",
];

/// A follow-up the UI can offer alongside the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestedAction {
    /// Button text.
    pub label: &'static str,
    /// Stable identifier the frontend routes on.
    pub action: &'static str,
}

impl SuggestedAction {
    const fn new(label: &'static str, action: &'static str) -> Self {
        Self { label, action }
    }
}

const PRICING_ACTIONS: &[SuggestedAction] = &[
    SuggestedAction::new("View plans", "view_plans"),
    SuggestedAction::new("Compare plans", "compare_plans"),
];

const PAYMENT_ACTIONS: &[SuggestedAction] = &[
    SuggestedAction::new("Make a payment", "start_payment"),
    SuggestedAction::new("Check payment status", "verify_payment"),
];

const SUPPORT_ACTIONS: &[SuggestedAction] = &[
    SuggestedAction::new("Contact support", "contact_support"),
    SuggestedAction::new("Read the FAQ", "view_faq"),
];

const GENERAL_ACTIONS: &[SuggestedAction] = &[
    SuggestedAction::new("View plans", "view_plans"),
    SuggestedAction::new("Contact support", "contact_support"),
];

impl ChatIntent {
    /// Classifies a user message by keyword hits.
    ///
    /// The intent with the most hits wins; ties go to the earlier of
    /// Payments, Pricing, Support. No hits means `General`.
    pub fn classify(message: &str) -> Self {
        let text = message.to_lowercase();
        let words = normalized_words(&text);
        let hits = |keywords: &[&str]| {
            keywords
                .iter()
                .filter(|k| keyword_matches(&text, &words, k))
                .count()
        };

        let scored = [
            (ChatIntent::Payments, hits(PAYMENT_KEYWORDS)),
            (ChatIntent::Pricing, hits(PRICING_KEYWORDS)),
            (ChatIntent::Support, hits(SUPPORT_KEYWORDS)),
        ];

        let mut best = (ChatIntent::General, 0);
        for (intent, score) in scored {
            if score > best.1 {
                best = (intent, score);
            }
        }
        best.0
    }

    /// Follow-up actions for this intent.
    pub fn suggested_actions(&self) -> &'static [SuggestedAction] {
        match self {
            ChatIntent::Pricing => PRICING_ACTIONS,
            ChatIntent::Payments => PAYMENT_ACTIONS,
            ChatIntent::Support => SUPPORT_ACTIONS,
            ChatIntent::General => GENERAL_ACTIONS,
        }
    }

    /// Extra instruction appended to the system prompt.
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            ChatIntent::Pricing => {
                "The user is asking about pricing. Quote amounts in naira (₦) and point them to the plans page."
            }
            ChatIntent::Payments => {
                "The user is asking about payments. Card, bank transfer and USSD are supported through Paystack. Never ask for full card details."
            }
            ChatIntent::Support => {
                "The user needs help with a problem. Be concise, ask for the payment reference if relevant, and offer to escalate to support."
            }
            ChatIntent::General => "Answer briefly and helpfully.",
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatIntent::Pricing => "pricing",
            ChatIntent::Payments => "payments",
            ChatIntent::Support => "support",
            ChatIntent::General => "general",
        }
    }
}

/// Lowercased words joined by single spaces and padded at both ends, so a
/// keyword or phrase can be matched as ` <keyword> `.
fn normalized_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    for word in text
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|w| !w.is_empty())
    {
        for c in word.chars() {
            out.push(if c == '\u{2019}' { '\'' } else { c });
        }
        out.push(' ');
    }
    out
}

fn keyword_matches(text: &str, words: &str, keyword: &str) -> bool {
    if keyword.chars().any(char::is_alphanumeric) {
        words.contains(&format!(" {keyword} "))
    } else {
        // symbols such as ₦ are not word characters
        text.contains(keyword)
    }
}

impl fmt::Display for ChatIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Classification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn classifies_pricing_questions() {
        assert_eq!(ChatIntent::classify("What plans do you have?"), ChatIntent::Pricing);
        assert_eq!(ChatIntent::classify("How much is the Pro tier"), ChatIntent::Pricing);
    }

    #[test]
    fn classifies_payment_questions() {
        assert_eq!(ChatIntent::classify("Can I use USSD?"), ChatIntent::Payments);
        assert_eq!(ChatIntent::classify("I want a refund for my card charge"), ChatIntent::Payments);
    }

    #[test]
    fn classifies_support_questions() {
        assert_eq!(ChatIntent::classify("The dashboard is broken"), ChatIntent::Support);
        assert_eq!(ChatIntent::classify("HELP, I found a bug"), ChatIntent::Support);
    }

    #[test]
    fn no_keywords_is_general() {
        assert_eq!(ChatIntent::classify("Good morning"), ChatIntent::General);
        assert_eq!(ChatIntent::classify(""), ChatIntent::General);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(ChatIntent::classify("PRICING"), ChatIntent::Pricing);
    }

    #[test]
    fn most_hits_wins() {
        // pay + bank + transfer outweigh "failed"
        assert_eq!(
            ChatIntent::classify("my bank transfer to pay failed"),
            ChatIntent::Payments
        );
    }

    #[test]
    fn ties_prefer_payments_over_pricing() {
        // one payment hit ("card"), one pricing hit ("cost")
        assert_eq!(ChatIntent::classify("card cost"), ChatIntent::Payments);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(ChatIntent::classify("Can you explain this?"), ChatIntent::General);
        assert_eq!(ChatIntent::classify("I want to debug my app"), ChatIntent::General);
        assert_eq!(ChatIntent::classify("Here is some feedback"), ChatIntent::General);
    }

    #[test]
    fn paystack_counts_once() {
        // one payment hit against one pricing hit is a tie
        assert_eq!(ChatIntent::classify("paystack price"), ChatIntent::Payments);
        assert_eq!(ChatIntent::classify("paystack price cost"), ChatIntent::Pricing);
    }

    #[test]
    fn phrases_and_symbols_still_match() {
        assert_eq!(ChatIntent::classify("how   much?"), ChatIntent::Pricing);
        assert_eq!(ChatIntent::classify("It's not working!"), ChatIntent::Support);
        assert_eq!(ChatIntent::classify("Is it ₦5,000?"), ChatIntent::Pricing);
        assert_eq!(ChatIntent::classify("I can\u{2019}t log in"), ChatIntent::Support);
    }

    // ══════════════════════════════════════════════════════════════
    // Suggested Action Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn every_intent_has_actions() {
        for intent in [
            ChatIntent::Pricing,
            ChatIntent::Payments,
            ChatIntent::Support,
            ChatIntent::General,
        ] {
            assert!(!intent.suggested_actions().is_empty(), "{intent}");
            assert!(!intent.prompt_hint().is_empty());
        }
    }

    #[test]
    fn payment_actions_include_verification() {
        let actions = ChatIntent::Payments.suggested_actions();
        assert!(actions.iter().any(|a| a.action == "verify_payment"));
    }

    #[test]
    fn intent_serializes_snake_case() {
        let json = serde_json::to_string(&ChatIntent::Payments).unwrap();
        assert_eq!(json, r#""payments""#);
    }
}
