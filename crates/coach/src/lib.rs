//! The guided GYB coach.
//!
//! A session walks the learner through five questions in a fixed order:
//!
//! 1. **Background** — skills, experience, situation
//! 2. **Idea** — one business idea
//! 3. **Customers** — who will buy
//! 4. **Competitors** — who else sells it
//! 5. **Location** — where the business will run
//!
//! Every answer gets short feedback grounded in matching manual excerpts.
//! After the location answer the coach writes a business-idea summary and the
//! session switches to open Q&A. Questions asked mid-flow are answered as
//! side questions without moving the flow forward.

pub mod coach;
pub mod error;
pub mod intent;
pub mod prompt;
pub mod session;
pub mod stage;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use coach::{Coach, CoachSettings, Reply};
pub use error::CoachError;
pub use intent::looks_like_question;
pub use session::{CoachSession, Turn};
pub use stage::{Answers, Field, Stage};
