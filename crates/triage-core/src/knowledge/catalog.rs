//! Builtin symptom catalog provided by the system.
//!
//! The catalog is always available and cannot be modified at runtime.
//! It is initialized once on first access and cached for the lifetime of
//! the process; engine instances share it by reference.

use std::sync::OnceLock;

use super::model::{Category, Symptom};

/// Read-only view over the category and symptom catalog.
///
/// Lookup misses are `None`, never an error: callers are expected to
/// fall back to free-text handling when an id is unknown.
#[derive(Debug)]
pub struct Catalog {
    categories: Vec<Category>,
    symptoms: Vec<Symptom>,
}

impl Catalog {
    /// Finds a category by its id token.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Finds a symptom by its id token.
    pub fn symptom(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    /// All categories, in menu order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All symptoms, in menu order.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }
}

/// Static storage for the catalog (initialized once).
static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Returns the shared builtin catalog.
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| Catalog {
        categories: builtin_categories(),
        symptoms: builtin_symptoms(),
    })
}

fn builtin_categories() -> Vec<Category> {
    vec![
        Category {
            id: "symptoms",
            display_name: "Check symptoms",
            description: "Walk through common symptoms and severity levels",
        },
        Category {
            id: "first-aid",
            display_name: "First aid basics",
            description: "Quick guidance for minor injuries at home",
        },
        Category {
            id: "wellness",
            display_name: "General wellness",
            description: "Everyday health questions and prevention tips",
        },
    ]
}

fn builtin_symptoms() -> Vec<Symptom> {
    vec![
        Symptom {
            id: "fever",
            name: "Fever",
            description: "Elevated body temperature",
            levels: [
                &[
                    "Temperature up to 38.0 C (100.4 F)",
                    "Mild fatigue, otherwise feeling okay",
                ],
                &[
                    "Temperature 38.0 to 39.4 C (100.4 to 103 F)",
                    "Chills, body aches, reduced appetite",
                ],
                &[
                    "Temperature above 39.4 C (103 F)",
                    "Confusion, stiff neck, or difficulty staying awake",
                    "Fever lasting more than three days",
                ],
            ],
            emergency_actions: &[
                "Call emergency services if confusion or a stiff neck is present",
                "Do not wait for the fever to break on its own",
                "Use cool compresses while waiting for help",
            ],
            next_steps: &[
                "Rest and drink plenty of fluids",
                "Take your temperature every few hours",
                "Use fever-reducing medication as directed on the label",
            ],
            when_to_seek_help: &[
                "Fever lasts longer than 48 hours",
                "Temperature keeps rising despite medication",
                "New rash, severe headache, or trouble breathing appears",
            ],
        },
        Symptom {
            id: "headache",
            name: "Headache",
            description: "Head pain or pressure",
            levels: [
                &[
                    "Dull, mild pain that fades with rest",
                    "No other symptoms",
                ],
                &[
                    "Persistent throbbing pain",
                    "Sensitivity to light or sound",
                ],
                &[
                    "Sudden, worst-ever headache",
                    "Slurred speech, weakness, or vision loss",
                    "Headache after a head injury",
                ],
            ],
            emergency_actions: &[
                "Call emergency services immediately for a thunderclap headache",
                "Note the exact time symptoms started",
                "Do not drive yourself to the hospital",
            ],
            next_steps: &[
                "Rest in a quiet, dark room",
                "Stay hydrated",
                "Track when headaches occur and what preceded them",
            ],
            when_to_seek_help: &[
                "Headaches become more frequent or severe",
                "Over-the-counter medication stops helping",
                "Headache wakes you from sleep",
            ],
        },
        Symptom {
            id: "cough",
            name: "Cough",
            description: "Persistent coughing",
            levels: [
                &[
                    "Occasional dry cough",
                    "No fever or breathing trouble",
                ],
                &[
                    "Frequent cough with phlegm",
                    "Mild wheezing or chest discomfort",
                ],
                &[
                    "Coughing up blood",
                    "Severe shortness of breath or blue lips",
                    "Cough with high fever and chest pain",
                ],
            ],
            emergency_actions: &[
                "Call emergency services for breathing difficulty or blue lips",
                "Sit upright and stay as calm as possible",
                "Loosen tight clothing around the chest",
            ],
            next_steps: &[
                "Drink warm fluids and use a humidifier",
                "Avoid smoke and other irritants",
                "Note whether the cough is dry or productive",
            ],
            when_to_seek_help: &[
                "Cough lasts longer than three weeks",
                "Fever develops alongside the cough",
                "Wheezing or chest tightness gets worse",
            ],
        },
        Symptom {
            id: "stomach-pain",
            name: "Stomach pain",
            description: "Abdominal pain or cramping",
            levels: [
                &[
                    "Mild cramping that comes and goes",
                    "Relieved by rest or passing gas",
                ],
                &[
                    "Steady pain lasting several hours",
                    "Nausea or loss of appetite",
                ],
                &[
                    "Severe pain, rigid or swollen abdomen",
                    "Pain with vomiting blood or black stools",
                    "Pain concentrated in the lower right side",
                ],
            ],
            emergency_actions: &[
                "Call emergency services for severe or rigid abdominal pain",
                "Do not eat or drink anything until evaluated",
                "Do not take painkillers before being seen",
            ],
            next_steps: &[
                "Eat light, bland meals",
                "Apply a warm compress to the abdomen",
                "Keep a diary of foods and pain episodes",
            ],
            when_to_seek_help: &[
                "Pain persists beyond 24 hours",
                "Fever or repeated vomiting develops",
                "You notice blood in stool or urine",
            ],
        },
        Symptom {
            id: "sore-throat",
            name: "Sore throat",
            description: "Throat pain or irritation",
            levels: [
                &[
                    "Scratchy throat, worse in the morning",
                    "Normal swallowing",
                ],
                &[
                    "Painful swallowing",
                    "Swollen glands or white patches",
                ],
                &[
                    "Unable to swallow liquids or saliva",
                    "Drooling or muffled voice",
                    "Difficulty breathing through swelling",
                ],
            ],
            emergency_actions: &[
                "Call emergency services if breathing or swallowing is blocked",
                "Stay upright and lean slightly forward",
                "Do not attempt to force food or drink",
            ],
            next_steps: &[
                "Gargle with warm salt water",
                "Drink warm tea with honey",
                "Rest your voice",
            ],
            when_to_seek_help: &[
                "Sore throat lasts more than a week",
                "Fever above 38.3 C (101 F) develops",
                "Rash or joint pain appears",
            ],
        },
        Symptom {
            id: "dizziness",
            name: "Dizziness",
            description: "Lightheadedness or vertigo",
            levels: [
                &[
                    "Brief lightheadedness when standing up",
                    "Passes within seconds",
                ],
                &[
                    "Spinning sensation lasting minutes",
                    "Mild nausea or unsteady walking",
                ],
                &[
                    "Fainting or near-fainting",
                    "Dizziness with chest pain or palpitations",
                    "Sudden trouble speaking or walking",
                ],
            ],
            emergency_actions: &[
                "Call emergency services for dizziness with chest pain or confusion",
                "Lie down with legs elevated while waiting",
                "Do not stand or walk unassisted",
            ],
            next_steps: &[
                "Sit or lie down as soon as dizziness starts",
                "Stand up slowly from sitting or lying",
                "Drink water regularly through the day",
            ],
            when_to_seek_help: &[
                "Episodes become frequent or last longer",
                "Hearing changes or ringing accompanies the dizziness",
                "You fall or injure yourself during an episode",
            ],
        },
    ]
}
