pub mod attempt_service;
pub mod exam_service;
pub mod grading_service;
pub mod selection_service;
pub mod stats_service;
