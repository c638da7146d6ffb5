//! Platform questions the chat widget answers without touching the catalog.

use crate::models::BotResponse;

const INTRO: &str = "I'm the Subash scent assistant, and I can help with the platform too. ";

const SELLING_ANSWER: &str = "To sell decants you need a verified phone number and at least 50 reviews to earn the Verified Seller badge. After that you can post listings in the Decant Market.";

const REPORTING_ANSWER: &str = "If you come across a fake or suspicious listing, use the Report button on it or escalate to a human moderator from the Support tab.";

const GENERAL_ANSWER: &str = "For platform guidelines, badges or moderation questions, check the FAQs in the Support tab or escalate to our team.";

/// Topics the assistant recognises, checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportTopic {
    Selling,
    Reporting,
    General,
}

const SELLING_PHRASES: &[&str] = &["sell decant", "selling decant", "verified seller", "become a seller", "how to sell"];
const REPORTING_PHRASES: &[&str] = &["report a", "report this", "fake listing", "scam", "counterfeit"];
const GENERAL_PHRASES: &[&str] = &["moderator", "badges", "support tab", "community guidelines", "platform rules"];

impl SupportTopic {
    pub fn detect(message: &str) -> Option<Self> {
        let msg = message.to_lowercase();
        let hit = |phrases: &[&str]| phrases.iter().any(|p| msg.contains(p));

        if hit(SELLING_PHRASES) {
            Some(SupportTopic::Selling)
        } else if hit(REPORTING_PHRASES) {
            Some(SupportTopic::Reporting)
        } else if hit(GENERAL_PHRASES) {
            Some(SupportTopic::General)
        } else {
            None
        }
    }

    fn answer_text(self) -> &'static str {
        match self {
            SupportTopic::Selling => SELLING_ANSWER,
            SupportTopic::Reporting => REPORTING_ANSWER,
            SupportTopic::General => GENERAL_ANSWER,
        }
    }
}

/// Canned answer when the message is a platform question, `None` otherwise.
pub fn answer_support(message: &str) -> Option<BotResponse> {
    SupportTopic::detect(message).map(|topic| BotResponse {
        text: format!("{}{}", INTRO, topic.answer_text()),
        perfumes: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_topics() {
        assert_eq!(
            SupportTopic::detect("How do I become a verified seller?"),
            Some(SupportTopic::Selling)
        );
        assert_eq!(
            SupportTopic::detect("I think this is a fake listing"),
            Some(SupportTopic::Reporting)
        );
        assert_eq!(
            SupportTopic::detect("how do badges work"),
            Some(SupportTopic::General)
        );
    }

    #[test]
    fn test_scent_requests_pass_through() {
        assert_eq!(SupportTopic::detect("help me find a woody scent"), None);
        assert!(answer_support("a fresh citrus scent for summer").is_none());
    }

    #[test]
    fn test_support_answer_has_no_perfumes() {
        let response = answer_support("how to sell my decants").unwrap();
        assert!(response.perfumes.is_empty());
        assert!(response.text.contains("Verified Seller"));
    }
}
