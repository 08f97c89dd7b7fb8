//! Canned concierge chat. Stateless: replies do not depend on what was asked.

pub const GREETING: &str = "Welcome to Serenterra! I'm here to help answer your questions about our retreat. How can I assist you today?";

pub const RESPONSES: [&str; 6] = [
    "That's a wonderful question! At Serenterra, we believe in creating authentic experiences. How can I help you today?",
    "I'd love to help! Are you interested in booking a stay, learning about our experiences, or would you like information about our dining?",
    "Absolutely! Our forest cabins are designed for ultimate peace and relaxation. Would you like to know more about a specific room type?",
    "We're here to help! Feel free to ask about availability, pricing, or any special requests you might have.",
    "Thank you for your interest in Serenterra! Our team is available 24/7 to assist with bookings and inquiries.",
    "You can reach our concierge team directly at +1 (555) 987-6543 or hello@serenterra.com for immediate assistance.",
];

/// Selects a reply for `seed`. The same seed always yields the same reply.
pub fn pick_response(seed: u64) -> &'static str {
    RESPONSES[(seed % RESPONSES.len() as u64) as usize]
}
