//! Coaching assistant seam.
//!
//! The UI only ever sees this trait, so a real model backend can be
//! substituted without touching routes or templates. The bundled
//! implementation answers from a fixed response pool after a fixed
//! delay, standing in for network latency.

use std::time::Duration;

use actix_web::rt::time::sleep;
use rand::seq::IndexedRandom;

use crate::domain::conversation::Message;

/// Request: the visitor's prompt plus the conversation so far.
/// Response: assistant text.
pub trait CoachingAssistantClient: Send + Sync {
    fn respond(
        &self,
        prompt: &str,
        history: &[Message],
    ) -> impl Future<Output = String> + Send;
}

/// Greeting used to open a fresh conversation.
pub const GREETING: &str = "Hello! I'm ready to help you with your coaching practice. \
What would you like to discuss today?\n\n\
I can assist with:\n\
- Session analysis and insights\n\
- Coaching technique recommendations\n\
- Client progress reviews\n\
- Goal setting strategies\n\
- Difficult conversation guidance\n\n\
What's on your mind?";

const RESPONSES: [&str; 3] = [
    "That's an excellent question! Based on your coaching experience and the \
     context you've provided, start with open-ended questions to explore their \
     perspective, use reflective listening to validate their concerns, and \
     collaborate on setting realistic, achievable goals.\n\n\
     Would you like me to dive deeper into any of these areas?",
    "I understand what you're looking for. Schedule a dedicated planning session, \
     review their current progress metrics, and identify any external factors \
     affecting performance. Longer term, implement regular check-in protocols and \
     create milestone celebration moments.\n\n\
     How does this approach resonate with your current coaching methodology?",
    "Great insight! This is a common challenge that many coaches face. Evaluate \
     their current readiness for change, identify their core values and \
     motivators, then break goals down into manageable steps with clear success \
     metrics and regular feedback loops.\n\n\
     What specific aspect would you like to explore further?",
];

/// Stand-in assistant: fixed delay, random canned answer.
#[derive(Clone)]
pub struct CannedAssistant {
    delay: Duration,
    responses: Vec<String>,
}

impl CannedAssistant {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            responses: RESPONSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CoachingAssistantClient for CannedAssistant {
    async fn respond(&self, _prompt: &str, _history: &[Message]) -> String {
        sleep(self.delay).await;
        self.responses
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn canned_assistant_answers_from_its_pool() {
        let assistant = CannedAssistant::new(Duration::ZERO);
        let reply = assistant.respond("How do I handle resistance?", &[]).await;
        assert!(RESPONSES.contains(&reply.as_str()));
    }
}
