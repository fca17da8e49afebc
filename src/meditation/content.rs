/**
 * Meditation Content Catalogs
 *
 * Static breathing exercises, guided meditation listings, and music
 * recommendations served by the meditation endpoints.
 */

use serde_json::{json, Value};

/// Look up a breathing exercise by key, falling back to 4-7-8
pub fn breathing_exercise(kind: &str) -> Value {
    match kind {
        "box" => json!({
            "name": "Box Breathing",
            "description": "Square breathing technique used by Navy SEALs",
            "instructions": [
                "Inhale for 4 counts",
                "Hold for 4 counts",
                "Exhale for 4 counts",
                "Hold empty for 4 counts",
                "Repeat 4-5 times"
            ],
            "benefits": ["Reduces stress", "Improves focus", "Regulates emotions"],
            "duration": "3-5 minutes"
        }),
        "belly" => json!({
            "name": "Diaphragmatic Breathing",
            "description": "Deep belly breathing for relaxation",
            "instructions": [
                "Place one hand on chest, one on belly",
                "Inhale slowly through nose, expanding belly",
                "Exhale slowly through mouth, contracting belly",
                "Chest should remain relatively still",
                "Continue for 5-10 breaths"
            ],
            "benefits": [
                "Activates relaxation response",
                "Lowers blood pressure",
                "Improves core stability"
            ],
            "duration": "5-10 minutes"
        }),
        "alternate" => json!({
            "name": "Alternate Nostril Breathing",
            "description": "Yogic breathing technique (Nadi Shodhana)",
            "instructions": [
                "Use right thumb to close right nostril",
                "Inhale through left nostril",
                "Close left nostril with ring finger",
                "Open right nostril and exhale",
                "Inhale through right, switch, exhale through left",
                "Continue alternating for 5-10 rounds"
            ],
            "benefits": ["Balances nervous system", "Improves focus", "Reduces anxiety"],
            "duration": "5-10 minutes"
        }),
        _ => json!({
            "name": "4-7-8 Breathing",
            "description": "Calming breath technique for anxiety and sleep",
            "instructions": [
                "Exhale completely through your mouth",
                "Close your mouth and inhale through your nose for 4 counts",
                "Hold your breath for 7 counts",
                "Exhale completely through your mouth for 8 counts",
                "Repeat 3-4 times"
            ],
            "benefits": ["Reduces anxiety", "Improves sleep", "Manages cravings"],
            "duration": "2-3 minutes"
        }),
    }
}

pub fn guided_meditations() -> Vec<Value> {
    vec![
        json!({
            "id": "body-scan",
            "name": "Body Scan Meditation",
            "description": "Progressive relaxation through body awareness",
            "duration": 15,
            "difficulty": "beginner",
            "benefits": ["Reduces tension", "Improves body awareness", "Promotes relaxation"]
        }),
        json!({
            "id": "loving-kindness",
            "name": "Loving-Kindness Meditation",
            "description": "Cultivate compassion for self and others",
            "duration": 20,
            "difficulty": "intermediate",
            "benefits": ["Increases empathy", "Reduces negative emotions", "Improves relationships"]
        }),
        json!({
            "id": "mindfulness",
            "name": "Mindfulness of Breath",
            "description": "Focus on the breath to anchor in the present",
            "duration": 10,
            "difficulty": "beginner",
            "benefits": ["Improves focus", "Reduces anxiety", "Increases awareness"]
        }),
        json!({
            "id": "sleep",
            "name": "Sleep Meditation",
            "description": "Gentle meditation to prepare for restful sleep",
            "duration": 25,
            "difficulty": "beginner",
            "benefits": ["Improves sleep quality", "Reduces insomnia", "Calms racing thoughts"]
        }),
        json!({
            "id": "anxiety-relief",
            "name": "Anxiety Relief Meditation",
            "description": "Specific techniques to manage anxiety",
            "duration": 12,
            "difficulty": "beginner",
            "benefits": ["Reduces anxiety", "Calms nervous system", "Improves emotional regulation"]
        }),
        json!({
            "id": "focus",
            "name": "Concentration Meditation",
            "description": "Train the mind to maintain focus",
            "duration": 15,
            "difficulty": "intermediate",
            "benefits": ["Improves concentration", "Enhances productivity", "Strengthens mental discipline"]
        }),
    ]
}

pub fn music_tracks() -> Vec<Value> {
    vec![
        json!({
            "title": "Ocean Waves",
            "type": "nature",
            "duration": "30 minutes",
            "description": "Calming ocean sounds for deep relaxation",
            "url": "/static/music/ocean-waves.mp3"
        }),
        json!({
            "title": "Tibetan Singing Bowls",
            "type": "instrumental",
            "duration": "20 minutes",
            "description": "Traditional healing sounds for meditation",
            "url": "/static/music/singing-bowls.mp3"
        }),
        json!({
            "title": "Rain Forest",
            "type": "nature",
            "duration": "45 minutes",
            "description": "Peaceful rain and forest sounds",
            "url": "/static/music/rain-forest.mp3"
        }),
        json!({
            "title": "432 Hz Healing",
            "type": "frequency",
            "duration": "15 minutes",
            "description": "Healing frequency music for balance",
            "url": "/static/music/432hz.mp3"
        }),
        json!({
            "title": "Indian Classical - Raag Yaman",
            "type": "classical",
            "duration": "25 minutes",
            "description": "Evening raag for peace and tranquility",
            "url": "/static/music/raag-yaman.mp3"
        }),
    ]
}
