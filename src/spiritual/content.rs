/**
 * Spiritual Content Catalogs
 *
 * Curated scripture references, practice listings, affirmations, and
 * video placeholders served by the spiritual endpoints.
 */

use serde_json::{json, Value};

/// All scripture entries keyed by tradition
pub fn scriptures() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        (
            "bhagavad_gita",
            vec![
                json!({
                    "verse": "2.47",
                    "text": "You have the right to perform your prescribed duty, but you are not entitled to the fruits of action.",
                    "topic": ["duty", "detachment", "karma"]
                }),
                json!({
                    "verse": "6.5",
                    "text": "One must elevate, not degrade, oneself with one's own mind.",
                    "topic": ["self-improvement", "mind", "discipline"]
                }),
            ],
        ),
        (
            "bible",
            vec![
                json!({
                    "verse": "Philippians 4:13",
                    "text": "I can do all things through Christ who strengthens me.",
                    "topic": ["strength", "faith", "perseverance"]
                }),
                json!({
                    "verse": "Psalm 23:4",
                    "text": "Even though I walk through the valley of the shadow of death, I will fear no evil.",
                    "topic": ["courage", "faith", "protection"]
                }),
            ],
        ),
        (
            "quran",
            vec![
                json!({
                    "verse": "2:286",
                    "text": "Allah does not burden a soul beyond that it can bear.",
                    "topic": ["strength", "trials", "faith"]
                }),
                json!({
                    "verse": "94:5-6",
                    "text": "Indeed, with hardship comes ease.",
                    "topic": ["hope", "perseverance", "patience"]
                }),
            ],
        ),
        (
            "buddhist",
            vec![
                json!({
                    "text": "Thousands of candles can be lighted from a single candle, and the life of the candle will not be shortened. Happiness never decreases by being shared.",
                    "source": "Buddha",
                    "topic": ["happiness", "sharing", "compassion"]
                }),
                json!({
                    "text": "Peace comes from within. Do not seek it without.",
                    "source": "Buddha",
                    "topic": ["peace", "inner-peace", "mindfulness"]
                }),
            ],
        ),
    ]
}

/// Practices for a spiritual goal, falling back to the peace set
pub fn practices_for_goal(goal: &str) -> Vec<Value> {
    match goal {
        "gratitude" => vec![
            json!({
                "name": "Gratitude Journal",
                "duration": "10 minutes",
                "description": "Write three things you're grateful for each day",
                "tradition": "Universal"
            }),
            json!({
                "name": "Shukr Practice",
                "duration": "Throughout the day",
                "description": "Express thankfulness to Allah for blessings",
                "tradition": "Islamic"
            }),
        ],
        "compassion" => vec![
            json!({
                "name": "Metta Meditation",
                "duration": "20 minutes",
                "description": "Send loving-kindness to yourself and others",
                "tradition": "Buddhist"
            }),
            json!({
                "name": "Seva",
                "duration": "Varies",
                "description": "Selfless service to others",
                "tradition": "Hindu/Sikh"
            }),
        ],
        "focus" => vec![
            json!({
                "name": "Trataka",
                "duration": "10-15 minutes",
                "description": "Candle gazing meditation for concentration",
                "tradition": "Yoga"
            }),
            json!({
                "name": "Dhikr",
                "duration": "15-30 minutes",
                "description": "Remembrance of Allah through repetition",
                "tradition": "Islamic/Sufi"
            }),
        ],
        _ => vec![
            json!({
                "name": "Centering Prayer",
                "duration": "20 minutes",
                "description": "Sit quietly and let go of thoughts, returning to a sacred word",
                "tradition": "Christian Contemplative"
            }),
            json!({
                "name": "Vipassana Meditation",
                "duration": "10-60 minutes",
                "description": "Observe sensations and thoughts without attachment",
                "tradition": "Buddhist"
            }),
            json!({
                "name": "Pranayama",
                "duration": "15 minutes",
                "description": "Controlled breathing exercises to calm the mind",
                "tradition": "Yoga/Hindu"
            }),
        ],
    }
}

/// Affirmations for a focus area, falling back to the general set
pub fn affirmations_for_focus(focus: &str) -> Vec<&'static str> {
    match focus {
        "anxiety" => vec![
            "I am safe in this moment",
            "I release the need to control everything",
            "My breath anchors me to the present",
            "This too shall pass",
            "I choose calm over chaos",
            "I am stronger than my anxious thoughts",
        ],
        "self-love" => vec![
            "I am enough just as I am",
            "I deserve kindness and compassion",
            "I honor my journey and growth",
            "I am learning to love myself more each day",
            "My imperfections make me unique",
            "I am worthy of my own love",
        ],
        "strength" => vec![
            "I have overcome challenges before and I will again",
            "I am resilient and can handle life's challenges",
            "My strength comes from within",
            "I choose courage over comfort",
            "I am capable of amazing things",
            "Every challenge is an opportunity to grow",
        ],
        _ => vec![
            "I am worthy of love and respect",
            "I choose peace over worry",
            "I am growing stronger every day",
            "I trust the journey of my life",
            "I am exactly where I need to be",
            "I release what no longer serves me",
            "I am grateful for this moment",
            "I have the power to create change",
        ],
    }
}

pub fn videos() -> Vec<Value> {
    vec![
        json!({
            "title": "Finding Inner Peace",
            "description": "A guided meditation for inner calm",
            "duration": "15 minutes",
            "type": "meditation",
            "url": "/static/videos/inner-peace.mp4"
        }),
        json!({
            "title": "Understanding Your Purpose",
            "description": "Spiritual talk on finding life's meaning",
            "duration": "30 minutes",
            "type": "teaching",
            "url": "/static/videos/purpose.mp4"
        }),
        json!({
            "title": "Healing Through Faith",
            "description": "Stories of spiritual healing and hope",
            "duration": "20 minutes",
            "type": "inspiration",
            "url": "/static/videos/healing.mp4"
        }),
    ]
}
