/**
 * Crisis Support Resource Catalogs
 *
 * Static, India-focused helpline and support listings. Served by the
 * crisis endpoints and appended to chat replies when a crisis is
 * detected. Kept as JSON values since the payloads are presentation
 * data with no behavior attached.
 */

use serde::Serialize;
use serde_json::{json, Value};

/// A phone helpline surfaced in chat replies during a crisis
#[derive(Debug, Clone, Serialize)]
pub struct Helpline {
    pub name: &'static str,
    pub number: &'static str,
    pub available: &'static str,
}

/// Helplines appended to chat replies; the first two are inlined into
/// the reply text
pub fn chat_helplines() -> Vec<Helpline> {
    vec![
        Helpline {
            name: "NIMHANS",
            number: "080-46110007",
            available: "24/7",
        },
        Helpline {
            name: "Vandrevala Foundation",
            number: "9999666555",
            available: "24/7",
        },
        Helpline {
            name: "AASRA",
            number: "91-9820466726",
            available: "24/7",
        },
    ]
}

/// Support resources matched to the detected crisis level
pub fn support_resources(is_crisis: bool) -> Vec<Value> {
    if is_crisis {
        vec![
            json!({
                "type": "immediate",
                "name": "National Suicide Prevention Lifeline",
                "contact": "988",
                "available": "24/7",
                "description": "Free, confidential crisis support"
            }),
            json!({
                "type": "immediate",
                "name": "Crisis Text Line",
                "contact": "Text HOME to 741741",
                "available": "24/7",
                "description": "Text-based crisis support"
            }),
            json!({
                "type": "immediate",
                "name": "NIMHANS 24x7 Helpline",
                "contact": "080-46110007",
                "available": "24/7",
                "description": "Mental health support in India"
            }),
        ]
    } else {
        vec![
            json!({
                "type": "preventive",
                "name": "Mental Health Resources",
                "url": "https://www.nimh.nih.gov/health/find-help",
                "description": "Find mental health resources and information"
            }),
            json!({
                "type": "preventive",
                "name": "Mindfulness Exercises",
                "url": "/api/meditation",
                "description": "Practice mindfulness and meditation"
            }),
        ]
    }
}

/// Regional emergency contacts
pub fn emergency_contacts() -> Vec<Value> {
    vec![
        json!({"name": "Emergency Services", "number": "112", "type": "emergency"}),
        json!({"name": "NIMHANS Helpline", "number": "080-46110007", "type": "mental_health"}),
        json!({"name": "Vandrevala Foundation", "number": "9999666555", "type": "mental_health"}),
        json!({"name": "AASRA", "number": "91-9820466726", "type": "suicide_prevention"}),
    ]
}

/// Minimal resources returned when detection itself fails
pub fn default_resources() -> Vec<Value> {
    vec![json!({
        "type": "general",
        "name": "Mental Health Support",
        "description": "Professional help is available"
    })]
}

pub fn default_emergency_contacts() -> Vec<Value> {
    vec![json!({"name": "Emergency", "number": "112", "type": "emergency"})]
}

pub fn helplines() -> Vec<Value> {
    vec![
        json!({
            "name": "NIMHANS",
            "number": "080-46110007",
            "hours": "24/7",
            "languages": ["English", "Hindi", "Kannada"]
        }),
        json!({
            "name": "Vandrevala Foundation",
            "number": "9999666555",
            "hours": "24/7",
            "languages": ["English", "Hindi", "Multiple Regional Languages"]
        }),
        json!({
            "name": "iCALL",
            "number": "9152987821",
            "hours": "Mon-Sat: 10 AM - 8 PM",
            "languages": ["English", "Hindi", "Marathi", "Tamil", "Telugu", "Gujarati"]
        }),
    ]
}

pub fn support_groups() -> Vec<Value> {
    vec![
        json!({
            "name": "Youth Mental Health Support",
            "type": "online",
            "platform": "Discord/WhatsApp",
            "description": "Peer support for young adults"
        }),
        json!({
            "name": "Depression and Anxiety Support Group",
            "type": "online",
            "platform": "Zoom",
            "schedule": "Weekly meetings"
        }),
    ]
}

pub fn self_help_resources() -> Vec<Value> {
    vec![
        json!({
            "name": "Breathing Exercises",
            "type": "technique",
            "duration": "5 minutes",
            "link": "/api/meditation/breathing"
        }),
        json!({
            "name": "Grounding Techniques",
            "type": "technique",
            "description": "5-4-3-2-1 sensory grounding"
        }),
        json!({
            "name": "Journaling Prompts",
            "type": "activity",
            "description": "Express your feelings through writing"
        }),
    ]
}

pub fn professional_resources() -> Vec<Value> {
    vec![
        json!({
            "name": "Find a Therapist",
            "type": "directory",
            "url": "https://www.psychologytoday.com/in",
            "description": "Directory of mental health professionals in India"
        }),
        json!({
            "name": "Online Therapy Platforms",
            "type": "service",
            "options": ["BetterHelp", "Talkspace", "Manastha"],
            "description": "Connect with licensed therapists online"
        }),
    ]
}

/// Immediate support block returned with self-reports
pub fn immediate_support() -> Value {
    json!({
        "message": "You are not alone. Help is available.",
        "immediate_actions": [
            "Call a trusted friend or family member",
            "Contact a crisis helpline: 080-46110007",
            "Go to the nearest emergency room if in immediate danger",
            "Use grounding techniques to calm yourself"
        ],
        "helplines": helplines()
    })
}
