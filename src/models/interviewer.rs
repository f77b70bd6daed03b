use serde::{Deserialize, Serialize};

pub type InterviewerId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewer {
    pub id: InterviewerId,
    pub name: String,
    pub avatar: String,
}
