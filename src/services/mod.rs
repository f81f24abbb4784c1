pub mod ai_service;
pub mod extraction;
pub mod grading_service;
pub mod practice_service;
pub mod prompt;
pub mod question_service;
pub mod question_validator;
