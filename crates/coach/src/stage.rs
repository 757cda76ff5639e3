//! The questionnaire stages and the answers they collect.

use std::fmt;

/// Instruction used for side questions and for Q&A after the summary.
pub const GENERAL_INSTRUCTION: &str =
    "Give simple, friendly entrepreneurship advice in 4–6 sentences.";

/// Where the learner is in the guided flow.
///
/// Stages only move forward, one step per answer, and stop at `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    AskBackground,
    AskIdea,
    AskCustomers,
    AskCompetitors,
    AskLocation,
    Finished,
}

impl Stage {
    /// All stages in flow order.
    pub const ALL: [Stage; 6] = [
        Stage::AskBackground,
        Stage::AskIdea,
        Stage::AskCustomers,
        Stage::AskCompetitors,
        Stage::AskLocation,
        Stage::Finished,
    ];

    /// 1-based step number.
    pub fn index(self) -> usize {
        match self {
            Stage::AskBackground => 1,
            Stage::AskIdea => 2,
            Stage::AskCustomers => 3,
            Stage::AskCompetitors => 4,
            Stage::AskLocation => 5,
            Stage::Finished => 6,
        }
    }

    /// The following stage. `Finished` is terminal.
    pub fn next(self) -> Stage {
        match self {
            Stage::AskBackground => Stage::AskIdea,
            Stage::AskIdea => Stage::AskCustomers,
            Stage::AskCustomers => Stage::AskCompetitors,
            Stage::AskCompetitors => Stage::AskLocation,
            Stage::AskLocation | Stage::Finished => Stage::Finished,
        }
    }

    pub fn is_finished(self) -> bool {
        self == Stage::Finished
    }

    /// The question put to the learner on entering this stage.
    pub fn question(self) -> Option<&'static str> {
        match self {
            Stage::AskBackground => {
                Some("First, tell me about yourself — skills, experience, situation?")
            }
            Stage::AskIdea => Some("Great — now describe one business idea you have?"),
            Stage::AskCustomers => Some("Nice. Who are your main customers?"),
            Stage::AskCompetitors => Some("Now tell me about your competitors."),
            Stage::AskLocation => {
                Some("Where will you run this business (home, shop, online)?")
            }
            Stage::Finished => None,
        }
    }

    /// Coaching instruction for feedback on an answer given at this stage.
    pub fn instruction(self) -> &'static str {
        match self {
            Stage::AskBackground => {
                "Appreciate the learner’s background and say why skills/experience help in choosing a business idea."
            }
            Stage::AskIdea => {
                "Summarize the idea in 3–4 bullet points, give one strength and one improvement point."
            }
            Stage::AskCustomers => {
                "Check if the customer group is specific. Suggest 2–3 improvements."
            }
            Stage::AskCompetitors => {
                "Give 2 simple suggestions on how to stand out vs competitors."
            }
            Stage::AskLocation => "Explain (briefly) why location matters and what to observe.",
            Stage::Finished => GENERAL_INSTRUCTION,
        }
    }

    /// The answer this stage records.
    pub fn field(self) -> Option<Field> {
        match self {
            Stage::AskBackground => Some(Field::Background),
            Stage::AskIdea => Some(Field::Idea),
            Stage::AskCustomers => Some(Field::Customers),
            Stage::AskCompetitors => Some(Field::Competitors),
            Stage::AskLocation => Some(Field::Location),
            Stage::Finished => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AskBackground => "ask_background",
            Stage::AskIdea => "ask_idea",
            Stage::AskCustomers => "ask_customers",
            Stage::AskCompetitors => "ask_competitors",
            Stage::AskLocation => "ask_location",
            Stage::Finished => "finished",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One questionnaire answer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Background,
    Idea,
    Customers,
    Competitors,
    Location,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Background,
        Field::Idea,
        Field::Customers,
        Field::Competitors,
        Field::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Background => "Background",
            Field::Idea => "Idea",
            Field::Customers => "Customers",
            Field::Competitors => "Competitors",
            Field::Location => "Location",
        }
    }
}

/// The learner's answers, one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub background: Option<String>,
    pub idea: Option<String>,
    pub customers: Option<String>,
    pub competitors: Option<String>,
    pub location: Option<String>,
}

impl Answers {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Background => &mut self.background,
            Field::Idea => &mut self.idea,
            Field::Customers => &mut self.customers,
            Field::Competitors => &mut self.competitors,
            Field::Location => &mut self.location,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Background => self.background.as_deref(),
            Field::Idea => self.idea.as_deref(),
            Field::Customers => self.customers.as_deref(),
            Field::Competitors => self.competitors.as_deref(),
            Field::Location => self.location.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, answer: impl Into<String>) {
        *self.slot(field) = Some(answer.into());
    }

    /// Number of fields answered so far.
    pub fn answered(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }
}
