mod assessment;
mod question;
mod result;
mod user;

pub use assessment::{Assessment, AssessmentSummary};
pub use question::{NewQuestion, OPTION_LABELS, Question, QuestionView, is_option_label};
pub use result::{AssessmentResult, CategorizedResult, NewResult, ResultWithAssessment, SubmittedAnswer};
pub use user::{Role, User};
