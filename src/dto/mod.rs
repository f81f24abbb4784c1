pub mod question_dto;
